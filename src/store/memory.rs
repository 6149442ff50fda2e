use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tracing::{debug, info};

use crate::{
    filter::{Filter, eval},
    model::Row,
    mutation::RowMutation,
    statistics::Statistics,
    store::{
        AdminApi, CreateTableRequest, DataApi, InstanceName, Query, RowStream, TableDescriptor,
        stream::TableRowIter, table::TableData, table_set::TableSet,
    },
    util::{Result, Slice, Status},
};

struct StoreInner {
    instance: InstanceName,
    tables: TableSet,
    statistics: Arc<Statistics>,
}

impl StoreInner {
    /// Count a failed call before handing it back
    fn track<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(status) = &result {
            if status.is_not_found() {
                self.statistics.record_not_found();
            } else {
                self.statistics.record_error();
            }
        }
        result
    }
}

fn describe(table: &TableData) -> TableDescriptor {
    TableDescriptor {
        table_id: table.id().to_string(),
        name: table.name().to_string(),
        families: table.families().to_vec(),
    }
}

/// Wide-column store living in process memory
///
/// One instance holds any number of tables. Admin and data handles are
/// separate objects sharing the same tables, mirroring how a remote store
/// hands out two clients.
///
/// # Example
///
/// ```
/// use widecell::{AdminApi, CreateTableRequest, DataApi, InMemoryStore, InstanceName, RowMutation, Slice};
///
/// let store = InMemoryStore::new(InstanceName::new("demo-project", "demo-instance"));
/// let admin = store.admin_client();
/// let data = store.data_client();
///
/// admin.create_table(CreateTableRequest::of("greetings").add_family("cf1")).unwrap();
/// data.mutate_row("greetings", RowMutation::new("rowKey0").set_cell("cf1", "name", "World")).unwrap();
///
/// let row = data.read_row("greetings", &Slice::from("rowKey0"), None).unwrap().unwrap();
/// assert_eq!(row.len(), 1);
/// ```
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<StoreInner>,
}

impl InMemoryStore {
    pub fn new(instance: InstanceName) -> Self {
        InMemoryStore {
            inner: Arc::new(StoreInner {
                tables: TableSet::new(instance.clone()),
                instance,
                statistics: Arc::new(Statistics::new()),
            }),
        }
    }

    pub fn instance(&self) -> &InstanceName {
        &self.inner.instance
    }

    pub fn admin_client(&self) -> MemAdminClient {
        MemAdminClient {
            inner: Arc::clone(&self.inner),
            closed: AtomicBool::new(false),
        }
    }

    pub fn data_client(&self) -> MemDataClient {
        MemDataClient {
            inner: Arc::clone(&self.inner),
            closed: AtomicBool::new(false),
        }
    }

    pub fn statistics(&self) -> &Arc<Statistics> {
        &self.inner.statistics
    }

    pub fn table_count(&self) -> usize {
        self.inner.tables.count()
    }
}

fn ensure_open(closed: &AtomicBool, what: &str) -> Result<()> {
    if closed.load(Ordering::Acquire) {
        return Err(Status::unavailable(format!("{what} client is closed")));
    }
    Ok(())
}

/// Admin handle onto an `InMemoryStore`
pub struct MemAdminClient {
    inner: Arc<StoreInner>,
    closed: AtomicBool,
}

impl AdminApi for MemAdminClient {
    fn exists(&self, table_id: &str) -> Result<bool> {
        ensure_open(&self.closed, "admin")?;
        Ok(self.inner.tables.exists(table_id))
    }

    fn create_table(&self, request: CreateTableRequest) -> Result<TableDescriptor> {
        ensure_open(&self.closed, "admin")?;
        let CreateTableRequest { table_id, families } = request;
        let table = self.inner.track(self.inner.tables.create(&table_id, families))?;
        self.inner.statistics.record_table_created();
        info!(table = table.name(), "table created");
        Ok(describe(&table))
    }

    fn get_table(&self, table_id: &str) -> Result<TableDescriptor> {
        ensure_open(&self.closed, "admin")?;
        let table = self.inner.track(self.inner.tables.get(table_id))?;
        Ok(describe(&table))
    }

    fn list_tables(&self) -> Result<Vec<String>> {
        ensure_open(&self.closed, "admin")?;
        Ok(self.inner.tables.list())
    }

    fn delete_table(&self, table_id: &str) -> Result<()> {
        ensure_open(&self.closed, "admin")?;
        self.inner.track(self.inner.tables.delete(table_id))?;
        self.inner.statistics.record_table_deleted();
        info!(table = table_id, "table deleted");
        Ok(())
    }

    fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            debug!(instance = %self.inner.instance, "admin client closed");
        }
    }
}

/// Data handle onto an `InMemoryStore`
pub struct MemDataClient {
    inner: Arc<StoreInner>,
    closed: AtomicBool,
}

impl DataApi for MemDataClient {
    fn mutate_row(&self, table_id: &str, mutation: RowMutation) -> Result<()> {
        ensure_open(&self.closed, "data")?;
        let table = self.inner.track(self.inner.tables.get(table_id))?;
        let written = self.inner.track(table.apply(&mutation))?;
        self.inner
            .statistics
            .record_mutation(written as u64, mutation.data_size() as u64);
        debug!(
            table = table_id,
            row = %mutation.row_key(),
            ops = mutation.count(),
            "row mutated"
        );
        Ok(())
    }

    fn read_row(
        &self,
        table_id: &str,
        key: &Slice,
        filter: Option<&Filter>,
    ) -> Result<Option<Row>> {
        ensure_open(&self.closed, "data")?;
        if let Some(filter) = filter {
            self.inner.track(filter.validate())?;
        }
        let table = self.inner.track(self.inner.tables.get(table_id))?;
        self.inner.statistics.record_row_read();

        let cells = self.inner.track(table.row_cells(key))?;
        let examined = cells.len() as u64;
        let cells = match filter {
            Some(filter) => eval::apply(filter, cells),
            None => cells,
        };

        if cells.is_empty() {
            self.inner.statistics.record_filtered_out(examined);
            return Ok(None);
        }
        let returned = cells.len() as u64;
        self.inner
            .statistics
            .record_row_returned(returned, examined.saturating_sub(returned));
        Ok(Some(Row::new(key.clone(), cells)))
    }

    fn read_rows(&self, table_id: &str, query: Query) -> Result<RowStream> {
        ensure_open(&self.closed, "data")?;
        if let Some(filter) = query.row_filter() {
            self.inner.track(filter.validate())?;
        }
        let table = self.inner.track(self.inner.tables.get(table_id))?;
        self.inner.statistics.record_scan();
        debug!(table = table_id, "scan opened");

        let (rows, filter, limit) = query.into_parts();
        Ok(RowStream::new(TableRowIter::new(
            table,
            rows,
            filter,
            limit,
            Arc::clone(&self.inner.statistics),
        )))
    }

    fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            debug!(instance = %self.inner.instance, "data client closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_table() -> (InMemoryStore, MemAdminClient, MemDataClient) {
        let store = InMemoryStore::new(InstanceName::new("p", "i"));
        let admin = store.admin_client();
        let data = store.data_client();
        admin
            .create_table(CreateTableRequest::of("t").add_family("cf1"))
            .unwrap();
        (store, admin, data)
    }

    #[test]
    fn test_lifecycle() {
        let (store, admin, _data) = store_with_table();
        assert!(admin.exists("t").unwrap());
        assert_eq!(admin.get_table("t").unwrap().family_names(), vec!["cf1"]);
        assert_eq!(admin.list_tables().unwrap(), vec!["t".to_string()]);

        admin.delete_table("t").unwrap();
        assert!(!admin.exists("t").unwrap());
        assert!(admin.delete_table("t").unwrap_err().is_not_found());
        assert_eq!(store.statistics().num_not_found(), 1);
        assert_eq!(store.table_count(), 0);
    }

    #[test]
    fn test_create_existing_table() {
        let (_store, admin, _data) = store_with_table();
        let err = admin
            .create_table(CreateTableRequest::of("t").add_family("cf1"))
            .unwrap_err();
        assert!(err.is_already_exists());
    }

    #[test]
    fn test_read_missing() {
        let (_store, _admin, data) = store_with_table();
        assert!(data.read_row("t", &Slice::from("nope"), None).unwrap().is_none());

        let err = data
            .read_row("missing", &Slice::from("k"), None)
            .unwrap_err();
        assert!(err.is_not_found());

        let err = data.read_rows("missing", Query::new()).err().unwrap();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_mutate_missing_table() {
        let (_store, _admin, data) = store_with_table();
        let err = data
            .mutate_row("missing", RowMutation::new("k").set_cell("cf1", "q", "v"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_filter_rejected() {
        let (_store, _admin, data) = store_with_table();
        let err = data
            .read_row(
                "t",
                &Slice::from("k"),
                Some(&Filter::CellsPerColumnLimit(0)),
            )
            .unwrap_err();
        assert!(err.is_invalid_argument());

        let err = data
            .read_rows("t", Query::new().filter(Filter::CellsPerRowLimit(0)))
            .err()
            .unwrap();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_closed_clients() {
        let (store, admin, data) = store_with_table();
        admin.close();
        data.close();
        data.close();

        assert!(admin.exists("t").unwrap_err().is_unavailable());
        assert!(
            data.mutate_row("t", RowMutation::new("k").set_cell("cf1", "q", "v"))
                .unwrap_err()
                .is_unavailable()
        );

        // other handles are unaffected
        assert!(store.admin_client().exists("t").unwrap());
    }

    #[test]
    fn test_filtered_read_counts() {
        let (store, _admin, data) = store_with_table();
        data.mutate_row(
            "t",
            RowMutation::new("k")
                .set_cell_at("cf1", "q", 1, "a")
                .set_cell_at("cf1", "q", 2, "b")
                .set_cell_at("cf1", "q", 3, "c"),
        )
        .unwrap();

        let row = data
            .read_row("t", &Slice::from("k"), Some(&Filter::CellsPerColumnLimit(1)))
            .unwrap()
            .unwrap();
        assert_eq!(row.len(), 1);
        assert_eq!(row.cells()[0].timestamp(), 3);
        assert_eq!(store.statistics().cells_returned(), 1);
        assert_eq!(store.statistics().cells_filtered_out(), 2);
    }
}
