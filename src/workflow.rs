//! The end-to-end demo: provision, write, read, scan, filter, tear down
//!
//! ```text
//! create_table → write_to_table → read_single_row → read_specific_cells
//!      → read_table → filter_limit_cells_per_column → delete_table → close
//! ```
//!
//! Stages run one after another. A `NotFound` answer inside a stage is
//! logged, echoed to the output and turned into an empty result, so the
//! run reaches the end even against a half-provisioned store. Any other
//! error ends the run; the context is closed on that path too because it
//! is dropped.

use std::io::Write;

use tracing::{info, warn};

use crate::{
    client::{
        CreateOutcome, Record, RowReader, RowWriter, StoreContext, TableLifecycleManager,
        TableScanner, WriteReport,
    },
    config::StoreConfig,
    display::{CellLine, RowDisplay},
    filter::FilterPolicy,
    model::{Cell, Row},
    store::RowStream,
    util::Result,
};

pub const ROW_KEY_PREFIX: &str = "rowKey";
pub const COLUMN_QUALIFIER_NAME: &str = "name";
pub const COLUMN_QUALIFIER_GREETING: &str = "greeting";

/// What each stage observed
#[derive(Debug, Default)]
pub struct WorkflowReport {
    pub table_created: Option<CreateOutcome>,
    pub write: WriteReport,
    pub single_row: Option<Row>,
    pub specific_cells: Vec<Cell>,
    pub scanned_rows: Vec<Row>,
    pub filtered_row: Option<Row>,
    pub filtered_rows: Vec<Row>,
    pub table_deleted: bool,
    /// Stages that recovered from `NotFound`
    pub recovered: Vec<&'static str>,
}

/// Greeting records `rowKey{i} → {name, greeting}` for the given names
pub fn greeting_records(names: &[String]) -> Vec<Record> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            Record::new(format!("{ROW_KEY_PREFIX}{i}"))
                .with(COLUMN_QUALIFIER_NAME, name.as_str())
                .with(COLUMN_QUALIFIER_GREETING, format!("Hello {name}!"))
        })
        .collect()
}

pub struct DemoWorkflow {
    ctx: StoreContext,
    config: StoreConfig,
    recovered: Vec<&'static str>,
}

impl DemoWorkflow {
    pub fn new(ctx: StoreContext, config: StoreConfig) -> Self {
        DemoWorkflow {
            ctx,
            config,
            recovered: Vec::new(),
        }
    }

    pub fn context(&self) -> &StoreContext {
        &self.ctx
    }

    fn table_id(&self) -> &str {
        &self.config.table_id
    }

    fn first_row_key(&self) -> String {
        format!("{ROW_KEY_PREFIX}0")
    }

    /// Run every stage in order and close the context
    pub fn run<W: Write>(mut self, out: &mut W) -> Result<WorkflowReport> {
        let table_created = Some(self.create_table(out)?);
        let write = self.write_to_table(out)?;
        let single_row = self.read_single_row(out)?;
        let specific_cells = self.read_specific_cells(out)?;
        let scanned_rows = self.read_table(out)?;
        let (filtered_row, filtered_rows) =
            self.filter_limit_cells_per_column(self.config.filter_policy(), out)?;
        let table_deleted = self.delete_table(out)?;
        self.ctx.close();

        Ok(WorkflowReport {
            table_created,
            write,
            single_row,
            specific_cells,
            scanned_rows,
            filtered_row,
            filtered_rows,
            table_deleted,
            recovered: std::mem::take(&mut self.recovered),
        })
    }

    /// Turn `NotFound` into `None` after reporting it
    fn recover<T, W: Write>(
        &mut self,
        stage: &'static str,
        message: &str,
        out: &mut W,
        result: Result<T>,
    ) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(status) if status.is_not_found() => {
                warn!(stage, error = %status, "{message}");
                writeln!(out, "{message}: {status}")?;
                self.recovered.push(stage);
                Ok(None)
            },
            Err(status) => Err(status),
        }
    }

    pub fn create_table<W: Write>(&mut self, out: &mut W) -> Result<CreateOutcome> {
        let lifecycle = TableLifecycleManager::new(&self.ctx);
        let table_id = self.table_id();
        writeln!(out, "Creating table: {table_id}")?;
        let outcome = lifecycle.create(table_id, [self.config.column_family.as_str()])?;
        match outcome {
            CreateOutcome::Created => writeln!(out, "Table {table_id} created successfully")?,
            CreateOutcome::AlreadyExists => writeln!(out, "Table {table_id} already exists")?,
        }
        Ok(outcome)
    }

    pub fn write_to_table<W: Write>(&mut self, out: &mut W) -> Result<WriteReport> {
        writeln!(out, "\nWriting some greetings to the table")?;
        let records = greeting_records(&self.config.greetings);
        let writer = RowWriter::new(&self.ctx, self.config.column_family.clone());
        let report = writer.write_all(self.table_id(), &records)?;

        for record in &records {
            match report.failed.iter().find(|(key, _)| key == record.key()) {
                None => {
                    let greeting = record
                        .cells()
                        .iter()
                        .find(|(q, _)| q.data() == COLUMN_QUALIFIER_GREETING.as_bytes())
                        .map(|(_, v)| v.to_string())
                        .unwrap_or_default();
                    writeln!(out, "{greeting}")?;
                },
                Some((_, status)) => {
                    writeln!(out, "Failed to write to non-existent table: {status}")?;
                },
            }
        }
        if !report.is_complete() {
            self.recovered.push("write_to_table");
        }
        info!(written = report.written.len(), failed = report.failed.len(), "greetings written");
        Ok(report)
    }

    pub fn read_single_row<W: Write>(&mut self, out: &mut W) -> Result<Option<Row>> {
        writeln!(out, "\nReading a single row by row key")?;
        let key = self.first_row_key();
        let result = RowReader::new(&self.ctx).read_row(self.table_id(), key.as_str());
        let row = self
            .recover(
                "read_single_row",
                "Failed to read from a non-existent table",
                out,
                result,
            )?
            .flatten();

        match &row {
            Some(row) => {
                writeln!(out, "Row: {}", row.key())?;
                for cell in row.cells() {
                    writeln!(out, "{}", CellLine(cell))?;
                }
            },
            None => writeln!(out, "Row {key} not found")?,
        }
        Ok(row)
    }

    pub fn read_specific_cells<W: Write>(&mut self, out: &mut W) -> Result<Vec<Cell>> {
        writeln!(out, "\nReading specific cells by family and qualifier")?;
        let key = self.first_row_key();
        let result = RowReader::new(&self.ctx).read_cells(
            self.table_id(),
            key.as_str(),
            &self.config.column_family,
            COLUMN_QUALIFIER_NAME,
        );
        let cells = self
            .recover(
                "read_specific_cells",
                "Failed to read from a non-existent table",
                out,
                result,
            )?
            .unwrap_or_default();

        writeln!(out, "Row: {key}")?;
        for cell in &cells {
            writeln!(out, "{}", CellLine(cell))?;
        }
        Ok(cells)
    }

    pub fn read_table<W: Write>(&mut self, out: &mut W) -> Result<Vec<Row>> {
        writeln!(out, "\nReading the entire table")?;
        let result = TableScanner::new(&self.ctx).scan_all(self.table_id());
        let Some(stream) =
            self.recover("read_table", "Failed to read a non-existent table", out, result)?
        else {
            return Ok(Vec::new());
        };

        self.drain("read_table", stream, out, |row, out| {
            writeln!(out, "Row Key: {}", row.key())?;
            for cell in row.cells() {
                writeln!(out, "{}", CellLine(cell))?;
            }
            Ok(())
        })
    }

    /// Apply the same "limit cells per column" policy to a single-row read
    /// and to a full scan
    pub fn filter_limit_cells_per_column<W: Write>(
        &mut self,
        policy: FilterPolicy,
        out: &mut W,
    ) -> Result<(Option<Row>, Vec<Row>)> {
        let filter = policy.filter();
        writeln!(
            out,
            "\nFiltering to {} cell(s) per column",
            policy.cells_per_column()
        )?;

        let key = self.first_row_key();
        let result =
            RowReader::new(&self.ctx).read_row_filtered(self.table_id(), key.as_str(), &filter);
        let row = self
            .recover(
                "read_row_filtered",
                "Failed to read from a non-existent table",
                out,
                result,
            )?
            .flatten();
        if let Some(row) = &row {
            write!(out, "{}", RowDisplay(row))?;
        }
        writeln!(out, "Row filter completed.")?;

        let result = TableScanner::new(&self.ctx).scan_filtered(self.table_id(), &filter);
        let rows = match self.recover(
            "scan_filtered",
            "Failed to read a non-existent table",
            out,
            result,
        )? {
            Some(stream) => self.drain("scan_filtered", stream, out, |row, out| {
                write!(out, "{}", RowDisplay(row))?;
                Ok(())
            })?,
            None => Vec::new(),
        };
        writeln!(out, "Table filter completed.")?;
        Ok((row, rows))
    }

    pub fn delete_table<W: Write>(&mut self, out: &mut W) -> Result<bool> {
        let table_id = self.table_id().to_string();
        writeln!(out, "\nDeleting table: {table_id}")?;
        let result = TableLifecycleManager::new(&self.ctx).delete(&table_id);
        let deleted = self
            .recover(
                "delete_table",
                "Failed to delete a non-existent table",
                out,
                result,
            )?
            .is_some();
        if deleted {
            writeln!(out, "Table {table_id} deleted successfully")?;
        }
        Ok(deleted)
    }

    /// Pull every row, printing as it arrives; a mid-stream `NotFound`
    /// keeps the rows already received
    fn drain<W: Write>(
        &mut self,
        stage: &'static str,
        stream: RowStream,
        out: &mut W,
        mut print: impl FnMut(&Row, &mut W) -> Result<()>,
    ) -> Result<Vec<Row>> {
        let mut rows = Vec::new();
        for item in stream {
            match self.recover(stage, "Table disappeared during scan", out, item)? {
                Some(row) => {
                    print(&row, out)?;
                    rows.push(row);
                },
                None => break,
            }
        }
        Ok(rows)
    }
}
