/// Column Family definitions
///
/// Every table owns one or more column families. A family groups columns
/// that share retention settings; a cell always names its family, and the
/// store rejects writes to families the table was not created with.
///
/// # Architecture
///
/// ```text
/// Table "test-table"
///  ├─→ ColumnFamily("cf1")      max_versions: None
///  │    ├─→ column cf1:name
///  │    └─→ column cf1:greeting
///  └─→ ColumnFamily("history")  max_versions: Some(5)
///       └─→ ...
/// ```
pub mod column_family_descriptor;
pub mod column_family_options;

pub use column_family_descriptor::ColumnFamilyDescriptor;
pub use column_family_options::ColumnFamilyOptions;

/// Family name used by the demo workflow when none is configured
pub const DEFAULT_COLUMN_FAMILY_NAME: &str = "cf1";
