use tracing::{debug, warn};

use crate::{
    client::StoreContext,
    mutation::RowMutation,
    util::{Result, Slice, Status},
};

/// One logical record: a row key and its (qualifier, value) pairs
///
/// Pairs keep their insertion order and become one cell each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    key: Slice,
    cells: Vec<(Slice, Slice)>,
}

impl Record {
    pub fn new(key: impl Into<Slice>) -> Self {
        Record {
            key: key.into(),
            cells: Vec::new(),
        }
    }

    pub fn with(mut self, qualifier: impl Into<Slice>, value: impl Into<Slice>) -> Self {
        self.cells.push((qualifier.into(), value.into()));
        self
    }

    pub fn key(&self) -> &Slice {
        &self.key
    }

    pub fn cells(&self) -> &[(Slice, Slice)] {
        &self.cells
    }

    /// One `SetCell` per pair, all in `family`
    pub fn to_mutation(&self, family: &str) -> RowMutation {
        self.cells
            .iter()
            .fold(RowMutation::new(self.key.clone()), |m, (q, v)| {
                m.set_cell(family, q.clone(), v.clone())
            })
    }
}

/// Per-record outcome of `write_all`
#[derive(Debug, Default)]
pub struct WriteReport {
    pub written: Vec<Slice>,
    /// Records the store answered with `NotFound`
    pub failed: Vec<(Slice, Status)>,
}

impl WriteReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Writes records into one column family
pub struct RowWriter<'a> {
    ctx: &'a StoreContext,
    family: String,
}

impl<'a> RowWriter<'a> {
    pub fn new(ctx: &'a StoreContext, family: impl Into<String>) -> Self {
        RowWriter {
            ctx,
            family: family.into(),
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    /// Submit any prepared mutation
    pub fn mutate(&self, table_id: &str, mutation: RowMutation) -> Result<()> {
        self.ctx.data().mutate_row(table_id, mutation)
    }

    /// Write one record as a single atomic mutation
    pub fn write(&self, table_id: &str, record: &Record) -> Result<()> {
        self.mutate(table_id, record.to_mutation(&self.family))?;
        debug!(table = table_id, row = %record.key(), cells = record.cells().len(), "record written");
        Ok(())
    }

    /// Write records in order, one mutation each
    ///
    /// A `NotFound` answer only fails that record: it is logged, put in
    /// the report, and the next record is still attempted. Earlier writes
    /// stay in place. Any other error stops the batch.
    pub fn write_all<'r, I>(&self, table_id: &str, records: I) -> Result<WriteReport>
    where
        I: IntoIterator<Item = &'r Record>,
    {
        let mut report = WriteReport::default();
        for record in records {
            match self.write(table_id, record) {
                Ok(()) => report.written.push(record.key().clone()),
                Err(status) if status.is_not_found() => {
                    warn!(table = table_id, row = %record.key(), error = %status, "failed to write record");
                    report.failed.push((record.key().clone(), status));
                },
                Err(status) => return Err(status),
            }
        }
        Ok(report)
    }
}
