use widecell::{
    CreateOutcome, DemoWorkflow, Filter, InMemoryStore, InstanceName, Record, RowReader,
    RowWriter, Slice, StoreConfig, StoreContext, TableLifecycleManager, TableScanner,
};

fn demo_config() -> StoreConfig {
    StoreConfig {
        table_id: "demo".to_string(),
        column_family: "cf1".to_string(),
        greetings: vec!["World".to_string(), "Store".to_string()],
        ..StoreConfig::default()
    }
}

fn demo_records() -> Vec<Record> {
    vec![
        Record::new("rowKey0")
            .with("name", "World")
            .with("greeting", "Hello World!"),
        Record::new("rowKey1")
            .with("name", "Store")
            .with("greeting", "Hello Store!"),
    ]
}

#[test]
fn test_demo_scenario() {
    let store = InMemoryStore::new(InstanceName::new("p", "i"));
    let ctx = StoreContext::connect(&store);
    let lifecycle = TableLifecycleManager::new(&ctx);

    assert_eq!(
        lifecycle.create("demo", ["cf1"]).unwrap(),
        CreateOutcome::Created
    );
    assert!(lifecycle.exists("demo").unwrap());

    let report = RowWriter::new(&ctx, "cf1")
        .write_all("demo", &demo_records())
        .unwrap();
    assert!(report.is_complete());

    let reader = RowReader::new(&ctx);
    let row = reader.read_row("demo", "rowKey0").unwrap().unwrap();
    assert_eq!(row.len(), 2);
    assert!(
        row.cells()
            .iter()
            .any(|c| c.is_column("cf1", b"name") && c.value() == &Slice::from("World"))
    );
    assert!(
        row.cells()
            .iter()
            .any(|c| c.is_column("cf1", b"greeting") && c.value() == &Slice::from("Hello World!"))
    );

    let cells = reader.read_cells("demo", "rowKey0", "cf1", "name").unwrap();
    assert_eq!(cells.len(), 1);
    assert_eq!(cells[0].value(), &Slice::from("World"));

    let keys: Vec<Slice> = TableScanner::new(&ctx)
        .scan_all("demo")
        .unwrap()
        .map(|r| r.unwrap().key().clone())
        .collect();
    assert_eq!(keys, vec![Slice::from("rowKey0"), Slice::from("rowKey1")]);

    lifecycle.delete("demo").unwrap();
    assert!(!lifecycle.exists("demo").unwrap());
    assert!(lifecycle.delete("demo").unwrap_err().is_not_found());
}

#[test]
fn test_create_twice_keeps_data() {
    let store = InMemoryStore::new(InstanceName::new("p", "i"));
    let ctx = StoreContext::connect(&store);
    let lifecycle = TableLifecycleManager::new(&ctx);

    lifecycle.create("demo", ["cf1"]).unwrap();
    RowWriter::new(&ctx, "cf1")
        .write_all("demo", &demo_records())
        .unwrap();

    // different families requested: existing table wins
    assert_eq!(
        lifecycle.create("demo", ["cf1", "cf9"]).unwrap(),
        CreateOutcome::AlreadyExists
    );
    assert_eq!(lifecycle.describe("demo").unwrap().family_names(), vec!["cf1"]);
    assert!(
        RowReader::new(&ctx)
            .read_row("demo", "rowKey1")
            .unwrap()
            .is_some()
    );
}

#[test]
fn test_read_missing_row_and_column() {
    let store = InMemoryStore::new(InstanceName::new("p", "i"));
    let ctx = StoreContext::connect(&store);
    TableLifecycleManager::new(&ctx)
        .create("demo", ["cf1"])
        .unwrap();
    RowWriter::new(&ctx, "cf1")
        .write_all("demo", &demo_records())
        .unwrap();

    let reader = RowReader::new(&ctx);
    assert!(reader.read_row("demo", "nope").unwrap().is_none());
    assert!(
        reader
            .read_cells("demo", "rowKey0", "cf1", "missing")
            .unwrap()
            .is_empty()
    );
    assert!(
        reader
            .read_cells("demo", "nope", "cf1", "name")
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_operations_on_missing_table() {
    let store = InMemoryStore::new(InstanceName::new("p", "i"));
    let ctx = StoreContext::connect(&store);

    let reader = RowReader::new(&ctx);
    assert!(reader.read_row("ghost", "k").unwrap_err().is_not_found());
    assert!(
        reader
            .read_row_filtered("ghost", "k", &Filter::CellsPerColumnLimit(1))
            .unwrap_err()
            .is_not_found()
    );
    assert!(
        TableScanner::new(&ctx)
            .scan_all("ghost")
            .err()
            .unwrap()
            .is_not_found()
    );

    let report = RowWriter::new(&ctx, "cf1")
        .write_all("ghost", &demo_records())
        .unwrap();
    assert_eq!(report.failed.len(), 2);
    assert_eq!(store.statistics().num_not_found(), 5);
}

#[test]
fn test_filtered_read_returns_newest_version() {
    let store = InMemoryStore::new(InstanceName::new("p", "i"));
    let ctx = StoreContext::connect(&store);
    TableLifecycleManager::new(&ctx)
        .create("demo", ["cf1"])
        .unwrap();

    let writer = RowWriter::new(&ctx, "cf1");
    writer
        .write("demo", &Record::new("rowKey0").with("name", "v1"))
        .unwrap();
    writer
        .write("demo", &Record::new("rowKey0").with("name", "v2"))
        .unwrap();

    let reader = RowReader::new(&ctx);
    let all = reader.read_cells("demo", "rowKey0", "cf1", "name").unwrap();
    assert_eq!(all.len(), 2);
    assert!(all[0].timestamp() > all[1].timestamp());

    let row = reader
        .read_row_filtered("demo", "rowKey0", &Filter::CellsPerColumnLimit(1))
        .unwrap()
        .unwrap();
    assert_eq!(row.len(), 1);
    assert_eq!(row.cells()[0].value(), &Slice::from("v2"));

    let rows: Vec<_> = TableScanner::new(&ctx)
        .scan_filtered("demo", &Filter::CellsPerColumnLimit(2))
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].len(), 2);
}

#[test]
fn test_full_workflow_output() {
    let config = demo_config();
    let (ctx, store) = StoreContext::in_memory(&config);
    let mut out = Vec::new();

    let report = DemoWorkflow::new(ctx, config).run(&mut out).unwrap();

    assert_eq!(report.table_created, Some(CreateOutcome::Created));
    assert_eq!(report.write.written.len(), 2);
    assert_eq!(report.single_row.as_ref().map(|r| r.len()), Some(2));
    assert_eq!(report.specific_cells.len(), 1);
    assert_eq!(
        report
            .scanned_rows
            .iter()
            .map(|r| r.key().to_string())
            .collect::<Vec<_>>(),
        vec!["rowKey0", "rowKey1"]
    );
    assert_eq!(report.filtered_row.as_ref().map(|r| r.len()), Some(2));
    assert_eq!(report.filtered_rows.len(), 2);
    assert!(report.table_deleted);
    assert!(report.recovered.is_empty());
    assert_eq!(store.table_count(), 0);

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Hello World!\nHello Store!\n"));
    assert!(text.contains("Family: cf1    Qualifier: name    Value: World"));
    assert!(text.contains("Reading data for rowKey1\nColumn Family cf1\n"));
    assert!(text.contains("Row filter completed."));
    assert!(text.contains("Table filter completed."));
    assert!(text.contains("Table demo deleted successfully"));
}

#[test]
fn test_workflow_against_preexisting_table() {
    let config = demo_config();
    let store = InMemoryStore::new(config.instance_name());
    {
        let ctx = StoreContext::connect(&store);
        TableLifecycleManager::new(&ctx)
            .create("demo", ["cf1"])
            .unwrap();
        RowWriter::new(&ctx, "cf1")
            .write("demo", &Record::new("rowKey7").with("name", "Old"))
            .unwrap();
    }

    let mut out = Vec::new();
    let report = DemoWorkflow::new(StoreContext::connect(&store), config)
        .run(&mut out)
        .unwrap();
    assert_eq!(report.table_created, Some(CreateOutcome::AlreadyExists));
    assert_eq!(report.scanned_rows.len(), 3);
    assert!(report.table_deleted);
}
