use tracing::debug;

use crate::{
    client::StoreContext,
    filter::Filter,
    store::{Query, RowStream},
    util::Result,
};

/// Streaming reads over whole tables
pub struct TableScanner<'a> {
    ctx: &'a StoreContext,
}

impl<'a> TableScanner<'a> {
    pub fn new(ctx: &'a StoreContext) -> Self {
        TableScanner { ctx }
    }

    /// Every row in key order
    pub fn scan_all(&self, table_id: &str) -> Result<RowStream> {
        self.scan(table_id, Query::new())
    }

    /// Every row, reduced by `filter` inside the store
    pub fn scan_filtered(&self, table_id: &str, filter: &Filter) -> Result<RowStream> {
        self.scan(table_id, Query::new().filter(filter.clone()))
    }

    pub fn scan(&self, table_id: &str, query: Query) -> Result<RowStream> {
        debug!(table = table_id, ?query, "opening scan");
        self.ctx.data().read_rows(table_id, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        client::{Record, RowWriter, TableLifecycleManager},
        model::Row,
        store::{InMemoryStore, InstanceName},
        util::Slice,
    };

    fn ctx_with_rows(keys: &[&str]) -> StoreContext {
        let ctx = StoreContext::connect(&InMemoryStore::new(InstanceName::new("p", "i")));
        TableLifecycleManager::new(&ctx).create("demo", ["cf1"]).unwrap();
        let records: Vec<Record> = keys
            .iter()
            .map(|k| Record::new(*k).with("name", *k))
            .collect();
        RowWriter::new(&ctx, "cf1").write_all("demo", &records).unwrap();
        ctx
    }

    fn keys(stream: RowStream) -> Vec<String> {
        stream.map(|r| r.unwrap().key().to_string()).collect()
    }

    #[test]
    fn test_scan_all_in_key_order() {
        let ctx = ctx_with_rows(&["r2", "r0", "r1"]);
        let scanner = TableScanner::new(&ctx);
        assert_eq!(keys(scanner.scan_all("demo").unwrap()), vec!["r0", "r1", "r2"]);
    }

    #[test]
    fn test_scan_is_restartable_only_by_rescanning() {
        let ctx = ctx_with_rows(&["r0", "r1"]);
        let scanner = TableScanner::new(&ctx);

        let mut first = scanner.scan_all("demo").unwrap();
        assert_eq!(first.next().unwrap().unwrap().key(), &Slice::from("r0"));
        drop(first);

        assert_eq!(keys(scanner.scan_all("demo").unwrap()), vec!["r0", "r1"]);
    }

    #[test]
    fn test_scan_missing_table_fails_before_rows() {
        let ctx = ctx_with_rows(&[]);
        let scanner = TableScanner::new(&ctx);
        let err = scanner.scan_all("missing").err().unwrap();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_scan_filtered() {
        let ctx = ctx_with_rows(&["r0", "r1"]);
        RowWriter::new(&ctx, "cf1")
            .write("demo", &Record::new("r0").with("name", "newer"))
            .unwrap();

        let scanner = TableScanner::new(&ctx);
        let rows: Vec<Row> = scanner
            .scan_filtered("demo", &Filter::CellsPerColumnLimit(1))
            .unwrap()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[0].cells()[0].value(), &Slice::from("newer"));
    }

    #[test]
    fn test_scan_prefix_with_limit() {
        let ctx = ctx_with_rows(&["a0", "a1", "a2", "b0"]);
        let scanner = TableScanner::new(&ctx);
        let stream = scanner
            .scan("demo", Query::new().prefix("a").limit(2))
            .unwrap();
        assert_eq!(keys(stream), vec!["a0", "a1"]);
    }

    #[test]
    fn test_table_deleted_mid_scan() {
        let ctx = ctx_with_rows(&["r0", "r1"]);
        let scanner = TableScanner::new(&ctx);
        let mut stream = scanner.scan_all("demo").unwrap();
        assert!(stream.next().unwrap().is_ok());

        TableLifecycleManager::new(&ctx).delete("demo").unwrap();
        assert!(stream.next().unwrap().unwrap_err().is_not_found());
        assert!(stream.next().is_none());
    }
}
