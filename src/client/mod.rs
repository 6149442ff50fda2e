/// Client-side workflow components
///
/// Each component borrows a `StoreContext` and does one job. None of them
/// keep state between calls, and none evaluate filters: filters travel to
/// the store with the request.
///
/// ```text
/// StoreContext
///  ├─→ TableLifecycleManager  create / delete
///  ├─→ RowWriter              write_all (one mutation per record)
///  ├─→ RowReader              read_row / read_cells / read_row_filtered
///  └─→ TableScanner           scan_all / scan_filtered → RowStream
/// ```
mod context;
mod lifecycle;
mod reader;
mod scanner;
mod writer;

pub use context::StoreContext;
pub use lifecycle::{CreateOutcome, TableLifecycleManager};
pub use reader::RowReader;
pub use scanner::TableScanner;
pub use writer::{Record, RowWriter, WriteReport};
