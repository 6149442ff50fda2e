use std::{ops::Bound, sync::Arc};

use tracing::debug;

use crate::{
    filter::{Filter, eval},
    model::Row,
    statistics::Statistics,
    store::{
        query::RowSet,
        table::{CellKey, TableRef},
    },
    util::Result,
};

/// Server stream of rows produced by a scan
///
/// Rows arrive in ascending key order, one per pull. The stream is
/// forward-only and cannot be rewound; issue a new scan to start over.
/// Dropping it early cancels the scan without producing the remaining
/// rows.
///
/// A failure after rows have been produced is delivered as a single `Err`
/// item, after which the stream ends.
pub struct RowStream {
    inner: Box<dyn Iterator<Item = Result<Row>> + Send>,
}

impl RowStream {
    pub fn new(inner: impl Iterator<Item = Result<Row>> + Send + 'static) -> Self {
        RowStream {
            inner: Box::new(inner),
        }
    }

    /// A stream that yields nothing
    pub fn empty() -> Self {
        RowStream::new(std::iter::empty())
    }
}

impl Iterator for RowStream {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// Lazy walk over one table, pulling a row at a time from the skiplist
pub(crate) struct TableRowIter {
    table: TableRef,
    rows: RowSet,
    filter: Option<Filter>,
    remaining: Option<u64>,
    /// Where the next row starts
    cursor: Bound<CellKey>,
    statistics: Arc<Statistics>,
    done: bool,
}

impl TableRowIter {
    pub(crate) fn new(
        table: TableRef,
        rows: RowSet,
        filter: Option<Filter>,
        limit: Option<u64>,
        statistics: Arc<Statistics>,
    ) -> Self {
        let cursor = match rows.seek_key() {
            Some(key) => Bound::Included(CellKey::row_start(key)),
            None => Bound::Unbounded,
        };
        TableRowIter {
            table,
            rows,
            filter,
            remaining: limit,
            cursor,
            statistics,
            done: false,
        }
    }

    fn finish(&mut self) {
        debug!(table = self.table.id(), "scan finished");
        self.done = true;
    }
}

impl Iterator for TableRowIter {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done {
                return None;
            }
            if self.remaining == Some(0) {
                self.finish();
                return None;
            }
            let next = match self.table.next_row(self.cursor.clone()) {
                Ok(next) => next,
                Err(status) => {
                    self.done = true;
                    self.statistics.record_not_found();
                    return Some(Err(status));
                },
            };
            let Some((key, cells, last)) = next else {
                self.finish();
                return None;
            };
            self.cursor = Bound::Excluded(last);

            if self.rows.is_exhausted_at(&key) {
                self.finish();
                return None;
            }
            if !self.rows.contains(&key) {
                continue;
            }

            let examined = cells.len() as u64;
            let cells = match &self.filter {
                Some(filter) => eval::apply(filter, cells),
                None => cells,
            };
            if cells.is_empty() {
                self.statistics.record_filtered_out(examined);
                continue;
            }

            let returned = cells.len() as u64;
            self.statistics
                .record_row_returned(returned, examined.saturating_sub(returned));
            if let Some(remaining) = self.remaining.as_mut() {
                *remaining -= 1;
            }
            return Some(Ok(Row::new(key, cells)));
        }
    }
}
