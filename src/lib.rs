pub mod client;
pub mod column_family;
pub mod config;
pub mod display;
pub mod filter;
pub mod model;
pub mod mutation;
pub mod statistics;
pub mod store;
pub mod util;
pub mod workflow;

pub use client::{
    CreateOutcome, Record, RowReader, RowWriter, StoreContext, TableLifecycleManager,
    TableScanner, WriteReport,
};
pub use column_family::{ColumnFamilyDescriptor, ColumnFamilyOptions, DEFAULT_COLUMN_FAMILY_NAME};
pub use config::StoreConfig;
pub use display::{CellLine, RowDisplay};
pub use filter::{Filter, FilterPolicy, TimestampRange};
pub use model::{Cell, Row};
pub use mutation::{MutationOp, RowMutation};
pub use statistics::Statistics;
pub use store::{
    AdminApi, CreateTableRequest, DataApi, InMemoryStore, InstanceName, Query, RowSet, RowStream,
    TableDescriptor,
};
pub use util::{Code, Result, Slice, Status};
pub use workflow::{DemoWorkflow, WorkflowReport};
