/// Store capability sets and the in-process store
///
/// The client workflow only talks to the two traits below. Anything that
/// implements them can stand in for the store: `InMemoryStore` serves
/// both from process memory, which is what the demo binary and the tests
/// use.
///
/// ```text
/// StoreContext
///  ├─→ Arc<dyn AdminApi>   exists / create_table / delete_table
///  └─→ Arc<dyn DataApi>    mutate_row / read_row / read_rows
///            ↓
///      InMemoryStore
///       └─→ TableSet
///            └─→ TableData (SkipMap of cells)
/// ```
use std::fmt;

use crate::{
    column_family::ColumnFamilyDescriptor,
    filter::Filter,
    model::Row,
    mutation::RowMutation,
    util::{Result, Slice},
};

mod memory;
mod query;
mod stream;
mod table;
mod table_set;

pub use memory::{InMemoryStore, MemAdminClient, MemDataClient};
pub use query::{Query, RowSet};
pub use stream::RowStream;
pub use table::MAX_ROW_KEY_SIZE;

/// Project and instance a client is bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceName {
    pub project: String,
    pub instance: String,
}

impl InstanceName {
    pub fn new(project: impl Into<String>, instance: impl Into<String>) -> Self {
        InstanceName {
            project: project.into(),
            instance: instance.into(),
        }
    }

    /// `projects/{project}/instances/{instance}/tables/{table_id}`
    pub fn table_path(&self, table_id: &str) -> String {
        format!("{self}/tables/{table_id}")
    }
}

impl fmt::Display for InstanceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "projects/{}/instances/{}", self.project, self.instance)
    }
}

/// Request to create a table with its column families
///
/// ```
/// use widecell::CreateTableRequest;
///
/// let request = CreateTableRequest::of("test-table").add_family("cf1");
/// assert_eq!(request.families().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTableRequest {
    table_id: String,
    families: Vec<ColumnFamilyDescriptor>,
}

impl CreateTableRequest {
    pub fn of(table_id: impl Into<String>) -> Self {
        CreateTableRequest {
            table_id: table_id.into(),
            families: Vec::new(),
        }
    }

    pub fn add_family(mut self, family: impl Into<ColumnFamilyDescriptor>) -> Self {
        self.families.push(family.into());
        self
    }

    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    pub fn families(&self) -> &[ColumnFamilyDescriptor] {
        &self.families
    }
}

/// Schema of an existing table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    pub table_id: String,
    /// Fully qualified resource name
    pub name: String,
    pub families: Vec<ColumnFamilyDescriptor>,
}

impl TableDescriptor {
    pub fn family_names(&self) -> Vec<&str> {
        self.families.iter().map(|f| f.name.as_str()).collect()
    }
}

/// Administrative capability: table lifecycle
pub trait AdminApi: Send + Sync {
    fn exists(&self, table_id: &str) -> Result<bool>;

    /// Fails with `AlreadyExists` if the table is present
    fn create_table(&self, request: CreateTableRequest) -> Result<TableDescriptor>;

    /// Fails with `NotFound` if the table is absent
    fn get_table(&self, table_id: &str) -> Result<TableDescriptor>;

    fn list_tables(&self) -> Result<Vec<String>>;

    /// Fails with `NotFound` if the table is absent
    fn delete_table(&self, table_id: &str) -> Result<()>;

    /// Release the handle; later calls fail with `Unavailable`
    fn close(&self);
}

/// Data capability: row mutations, point reads and scans
pub trait DataApi: Send + Sync {
    /// Apply all operations of `mutation` to one row, or none of them
    fn mutate_row(&self, table_id: &str, mutation: RowMutation) -> Result<()>;

    /// `Ok(None)` if the row is absent or the filter removed every cell
    fn read_row(&self, table_id: &str, key: &Slice, filter: Option<&Filter>)
    -> Result<Option<Row>>;

    /// Open a scan; `NotFound` for an absent table is reported here,
    /// before any row
    fn read_rows(&self, table_id: &str, query: Query) -> Result<RowStream>;

    /// Release the handle; later calls fail with `Unavailable`
    fn close(&self);
}
