/// Retention options for one Column Family
///
/// The store applies these after every write to the family. Versions
/// beyond `max_versions` (newest first) are dropped from the column.
///
/// # Example
///
/// ```
/// use widecell::ColumnFamilyOptions;
///
/// let options = ColumnFamilyOptions {
///     max_versions: Some(3),
/// };
/// assert_eq!(options.max_versions, Some(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnFamilyOptions {
    /// Number of versions kept per column (None = keep all)
    /// Default: None
    pub max_versions: Option<u32>,
}

impl ColumnFamilyOptions {
    pub fn with_max_versions(max_versions: u32) -> Self {
        ColumnFamilyOptions {
            max_versions: Some(max_versions),
        }
    }
}
