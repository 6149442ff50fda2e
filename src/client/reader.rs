use tracing::debug;

use crate::{
    client::StoreContext,
    filter::Filter,
    model::{Cell, Row},
    util::{Result, Slice},
};

/// Point reads of single rows
pub struct RowReader<'a> {
    ctx: &'a StoreContext,
}

impl<'a> RowReader<'a> {
    pub fn new(ctx: &'a StoreContext) -> Self {
        RowReader { ctx }
    }

    /// Whole row, or `None` if no such key
    pub fn read_row(&self, table_id: &str, key: impl Into<Slice>) -> Result<Option<Row>> {
        let key = key.into();
        let row = self.ctx.data().read_row(table_id, &key, None)?;
        debug!(table = table_id, row = %key, found = row.is_some(), "row read");
        Ok(row)
    }

    /// Every version stored in one column of one row
    ///
    /// Absent rows and absent columns both give an empty list.
    pub fn read_cells(
        &self,
        table_id: &str,
        key: impl Into<Slice>,
        family: &str,
        qualifier: impl AsRef<[u8]>,
    ) -> Result<Vec<Cell>> {
        Ok(self
            .read_row(table_id, key)?
            .map(|row| row.cells_for(family, qualifier))
            .unwrap_or_default())
    }

    /// Row with `filter` applied by the store
    pub fn read_row_filtered(
        &self,
        table_id: &str,
        key: impl Into<Slice>,
        filter: &Filter,
    ) -> Result<Option<Row>> {
        let key = key.into();
        self.ctx.data().read_row(table_id, &key, Some(filter))
    }
}
