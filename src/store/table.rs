use std::{
    cmp::Reverse,
    ops::Bound,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use crossbeam_skiplist::SkipMap;
use parking_lot::{RwLock, RwLockReadGuard};

use crate::{
    column_family::ColumnFamilyDescriptor,
    model::Cell,
    mutation::{MutationOp, RowMutation},
    util::{Result, Slice, Status, now_micros},
};

/// Maximum accepted row key length in bytes
pub const MAX_ROW_KEY_SIZE: usize = 4 * 1024;

/// Position of a cell inside a table
///
/// Field order gives the scan order: row, family, qualifier, then newest
/// timestamp first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct CellKey {
    pub(crate) row: Slice,
    pub(crate) family: String,
    pub(crate) qualifier: Slice,
    pub(crate) timestamp: Reverse<i64>,
}

impl CellKey {
    /// Sorts before every cell of `row`
    pub(crate) fn row_start(row: Slice) -> Self {
        CellKey {
            row,
            family: String::new(),
            qualifier: Slice::empty(),
            timestamp: Reverse(i64::MAX),
        }
    }

    /// Sorts before every version of one column
    fn column_start(row: Slice, family: &str, qualifier: Slice) -> Self {
        CellKey {
            row,
            family: family.to_string(),
            qualifier,
            timestamp: Reverse(i64::MAX),
        }
    }

    fn to_cell(&self, value: &Slice) -> Cell {
        Cell::new(
            self.family.clone(),
            self.qualifier.clone(),
            self.timestamp.0,
            value.clone(),
        )
    }
}

/// Runtime state of one table
///
/// # Thread Safety
///
/// Cells live in a lock-free skiplist so open scans never block writers
/// for long. Row-level atomicity comes from `commit`: mutations hold it
/// exclusively while applying, row reads hold it shared while collecting a
/// row, so no reader ever sees half of a mutation.
///
/// # Lifecycle
///
/// ```text
/// create_table → TableData::new → mutations / reads / scans
///                                        ↓
/// delete_table → mark_dropped → open scans fail on next pull
/// ```
#[derive(Debug)]
pub(crate) struct TableData {
    /// Table id (unique within the instance)
    id: String,

    /// Fully qualified resource name
    name: String,

    /// Families fixed at creation time
    families: Vec<ColumnFamilyDescriptor>,

    /// (row, family, qualifier, ts desc) → value
    cells: SkipMap<CellKey, Slice>,

    /// Last server-assigned timestamp; the lock also orders commits
    commit: RwLock<i64>,

    /// Set once the table is deleted
    dropped: AtomicBool,
}

impl TableData {
    pub(crate) fn new(id: String, name: String, families: Vec<ColumnFamilyDescriptor>) -> Self {
        TableData {
            id,
            name,
            families,
            cells: SkipMap::new(),
            commit: RwLock::new(0),
            dropped: AtomicBool::new(false),
        }
    }

    pub(crate) fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn families(&self) -> &[ColumnFamilyDescriptor] {
        &self.families
    }

    fn family(&self, name: &str) -> Option<&ColumnFamilyDescriptor> {
        self.families.iter().find(|f| f.name == name)
    }

    pub(crate) fn is_dropped(&self) -> bool {
        self.dropped.load(Ordering::Acquire)
    }

    pub(crate) fn mark_dropped(&self) {
        let _commit = self.commit.write();
        self.dropped.store(true, Ordering::Release);
        self.cells.clear();
    }

    pub(crate) fn not_found(&self) -> Status {
        Status::not_found(format!("Table not found: {}", self.name))
    }

    /// Shared commit guard, failing once the table is dropped
    ///
    /// The flag is checked under the guard: `mark_dropped` sets it while
    /// holding the write side, so a reader either sees the cells or sees
    /// the flag.
    fn live_guard(&self) -> Result<RwLockReadGuard<'_, i64>> {
        let guard = self.commit.read();
        if self.is_dropped() {
            return Err(self.not_found());
        }
        Ok(guard)
    }

    /// Number of stored cells across all rows
    #[cfg(test)]
    pub(crate) fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check every operation before any cell is touched
    fn validate(&self, mutation: &RowMutation) -> Result<()> {
        let key = mutation.row_key();
        if key.is_empty() {
            return Err(Status::invalid_argument("Row key must not be empty"));
        }
        if key.size() > MAX_ROW_KEY_SIZE {
            return Err(Status::invalid_argument(format!(
                "Row key is {} bytes, limit is {}",
                key.size(),
                MAX_ROW_KEY_SIZE
            )));
        }
        if mutation.is_empty() {
            return Err(Status::invalid_argument("No mutations provided"));
        }

        for op in mutation.ops() {
            if let Some(family) = op.family() {
                if self.family(family).is_none() {
                    return Err(Status::not_found(format!(
                        "Column family '{}' not found in {}",
                        family, self.name
                    )));
                }
            }
            if let MutationOp::SetCell {
                timestamp: Some(ts),
                ..
            } = op
            {
                if *ts < 0 {
                    return Err(Status::invalid_argument(format!(
                        "Negative timestamp {ts}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Validate and apply a mutation as one unit
    ///
    /// Returns the number of cells written.
    pub(crate) fn apply(&self, mutation: &RowMutation) -> Result<usize> {
        self.validate(mutation)?;

        let mut last_ts = self.commit.write();
        if self.is_dropped() {
            return Err(self.not_found());
        }

        let row = mutation.row_key().clone();
        let mut written = 0;
        let mut touched: Vec<(String, Slice)> = Vec::new();

        for op in mutation.ops() {
            match op {
                MutationOp::SetCell {
                    family,
                    qualifier,
                    timestamp,
                    value,
                } => {
                    let ts = match timestamp {
                        Some(ts) => *ts,
                        None => {
                            let ts = now_micros().max(*last_ts + 1);
                            *last_ts = ts;
                            ts
                        },
                    };
                    self.cells.insert(
                        CellKey {
                            row: row.clone(),
                            family: family.clone(),
                            qualifier: qualifier.clone(),
                            timestamp: Reverse(ts),
                        },
                        value.clone(),
                    );
                    touched.push((family.clone(), qualifier.clone()));
                    written += 1;
                },
                MutationOp::DeleteCells {
                    family,
                    qualifier,
                    range,
                } => {
                    self.remove_column_where(&row, family, qualifier, |ts| range.contains(ts));
                },
                MutationOp::DeleteFamily { family } => {
                    self.remove_row_where(&row, |k| &k.family == family);
                },
                MutationOp::DeleteRow => {
                    self.remove_row_where(&row, |_| true);
                },
            }
        }

        for (family, qualifier) in touched {
            self.enforce_max_versions(&row, &family, &qualifier);
        }

        Ok(written)
    }

    /// Cells of one row in row order; `NotFound` once the table is dropped
    pub(crate) fn row_cells(&self, row: &Slice) -> Result<Vec<Cell>> {
        let _guard = self.live_guard()?;
        Ok(self
            .cells
            .range((
                Bound::Included(CellKey::row_start(row.clone())),
                Bound::Unbounded,
            ))
            .take_while(|e| &e.key().row == row)
            .map(|e| e.key().to_cell(e.value()))
            .collect())
    }

    /// Collect the first row at or after `from`
    ///
    /// Returns the row key, its cells and the key of its last cell, or
    /// `None` once the table holds nothing further. `NotFound` once the
    /// table is dropped.
    pub(crate) fn next_row(&self, from: Bound<CellKey>) -> Result<Option<ScannedRow>> {
        let _guard = self.live_guard()?;
        let mut iter = self.cells.range((from, Bound::Unbounded));
        let Some(first) = iter.next() else {
            return Ok(None);
        };
        let row = first.key().row.clone();
        let mut last = first.key().clone();
        let mut cells = vec![first.key().to_cell(first.value())];

        for entry in iter {
            if entry.key().row != row {
                break;
            }
            cells.push(entry.key().to_cell(entry.value()));
            last = entry.key().clone();
        }
        Ok(Some((row, cells, last)))
    }

    fn remove_row_where(&self, row: &Slice, pred: impl Fn(&CellKey) -> bool) {
        let doomed: Vec<CellKey> = self
            .cells
            .range((
                Bound::Included(CellKey::row_start(row.clone())),
                Bound::Unbounded,
            ))
            .take_while(|e| &e.key().row == row)
            .filter(|e| pred(e.key()))
            .map(|e| e.key().clone())
            .collect();
        for key in doomed {
            self.cells.remove(&key);
        }
    }

    fn column_keys(&self, row: &Slice, family: &str, qualifier: &Slice) -> Vec<CellKey> {
        self.cells
            .range((
                Bound::Included(CellKey::column_start(row.clone(), family, qualifier.clone())),
                Bound::Unbounded,
            ))
            .take_while(|e| {
                let k = e.key();
                &k.row == row && k.family == family && &k.qualifier == qualifier
            })
            .map(|e| e.key().clone())
            .collect()
    }

    fn remove_column_where(
        &self,
        row: &Slice,
        family: &str,
        qualifier: &Slice,
        pred: impl Fn(i64) -> bool,
    ) {
        for key in self.column_keys(row, family, qualifier) {
            if pred(key.timestamp.0) {
                self.cells.remove(&key);
            }
        }
    }

    fn enforce_max_versions(&self, row: &Slice, family: &str, qualifier: &Slice) {
        let Some(max) = self.family(family).and_then(|f| f.options.max_versions) else {
            return;
        };
        // newest first, so everything past `max` is garbage
        for key in self.column_keys(row, family, qualifier).into_iter().skip(max as usize) {
            self.cells.remove(&key);
        }
    }
}

pub(crate) type TableRef = Arc<TableData>;

/// Row key, its cells, and the position of its last cell
pub(crate) type ScannedRow = (Slice, Vec<Cell>, CellKey);
