use crate::column_family::ColumnFamilyOptions;

/// Descriptor for a Column Family inside a table
///
/// Contains the name and options for a column family.
/// Used when creating a table and returned when describing one.
///
/// # Example
///
/// ```
/// use widecell::{ColumnFamilyDescriptor, ColumnFamilyOptions};
///
/// let families = vec![
///     ColumnFamilyDescriptor::new("cf1", ColumnFamilyOptions::default()),
///     ColumnFamilyDescriptor::new("history", ColumnFamilyOptions::with_max_versions(5)),
/// ];
/// assert_eq!(families[1].options.max_versions, Some(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFamilyDescriptor {
    /// Name of the column family
    pub name: String,

    /// Options for this column family
    pub options: ColumnFamilyOptions,
}

impl ColumnFamilyDescriptor {
    /// Create a new column family descriptor
    pub fn new<S: Into<String>>(name: S, options: ColumnFamilyOptions) -> Self {
        ColumnFamilyDescriptor {
            name: name.into(),
            options,
        }
    }
}

impl From<&str> for ColumnFamilyDescriptor {
    fn from(name: &str) -> Self {
        ColumnFamilyDescriptor::new(name, ColumnFamilyOptions::default())
    }
}

impl From<String> for ColumnFamilyDescriptor {
    fn from(name: String) -> Self {
        ColumnFamilyDescriptor::new(name, ColumnFamilyOptions::default())
    }
}
