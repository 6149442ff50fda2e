/// Data model shared by the store and its clients
///
/// ```text
/// Table "test-table"
///  └─→ Row "rowKey0"
///       ├─→ Cell (cf1, greeting, t=1700000000000001) "Hello World!"
///       ├─→ Cell (cf1, name,     t=1700000000000002) "World"
///       └─→ Cell (cf1, name,     t=1699999999999000) "Earth"
/// ```
mod cell;
mod row;

pub use cell::Cell;
pub use row::Row;
