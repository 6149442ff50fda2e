use widecell::{
    Filter, InMemoryStore, InstanceName, Query, Record, RowDisplay, RowReader, RowWriter,
    StoreContext, TableLifecycleManager, TableScanner,
};

fn main() {
    println!("Widecell Simple Example");

    let store = InMemoryStore::new(InstanceName::new("example-project", "example-instance"));
    let ctx = StoreContext::connect(&store);

    let lifecycle = TableLifecycleManager::new(&ctx);
    lifecycle
        .create("people", ["info"])
        .expect("Failed to create table");

    let writer = RowWriter::new(&ctx, "info");
    writer
        .write("people", &Record::new("alice").with("age", "30").with("city", "Paris"))
        .expect("Failed to write");
    writer
        .write("people", &Record::new("bob").with("age", "41"))
        .expect("Failed to write");

    // second version of alice's city
    writer
        .write("people", &Record::new("alice").with("city", "Lyon"))
        .expect("Failed to update");

    let reader = RowReader::new(&ctx);
    if let Some(row) = reader.read_row("people", "alice").expect("Failed to read") {
        print!("{}", RowDisplay(&row));
    }

    let latest = reader
        .read_row_filtered("people", "alice", &Filter::CellsPerColumnLimit(1))
        .expect("Failed to read");
    if let Some(row) = latest {
        print!("{}", RowDisplay(&row));
    }

    let scanner = TableScanner::new(&ctx);
    let stream = scanner
        .scan("people", Query::new().prefix("b"))
        .expect("Failed to scan");
    for row in stream {
        let row = row.expect("Scan failed");
        println!("Scanned {} ({} cells)", row.key(), row.len());
    }

    lifecycle.delete("people").expect("Failed to delete table");
    println!("Example completed successfully!");
}
