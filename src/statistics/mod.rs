use std::sync::atomic::{AtomicU64, Ordering};

/// Store-wide statistics
///
/// Thread-safe counters for every admin and data call the store serves.
/// Uses atomic counters for lock-free updates. "Returned" counters measure
/// what leaves the store after filtering, which is what a client would pay
/// for on the wire.
#[derive(Debug, Default)]
pub struct Statistics {
    // Admin operations
    pub tables_created: AtomicU64,
    pub tables_deleted: AtomicU64,

    // Mutations
    pub num_mutations: AtomicU64,
    pub cells_written: AtomicU64,
    pub bytes_written: AtomicU64,

    // Reads
    pub num_row_reads: AtomicU64,
    pub num_scans: AtomicU64,
    pub rows_returned: AtomicU64,
    pub cells_returned: AtomicU64,
    pub cells_filtered_out: AtomicU64,

    // Errors
    pub num_not_found: AtomicU64,
    pub num_errors: AtomicU64,
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    #[inline]
    pub fn record_table_created(&self) {
        self.tables_created.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_table_deleted(&self) {
        self.tables_deleted.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_mutation(&self, cells: u64, bytes: u64) {
        self.num_mutations.fetch_add(1, Ordering::Relaxed);
        self.cells_written.fetch_add(cells, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_row_read(&self) {
        self.num_row_reads.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_scan(&self) {
        self.num_scans.fetch_add(1, Ordering::Relaxed);
    }

    /// A row left the store with `returned` cells; `dropped` were filtered
    #[inline]
    pub fn record_row_returned(&self, returned: u64, dropped: u64) {
        self.rows_returned.fetch_add(1, Ordering::Relaxed);
        self.cells_returned.fetch_add(returned, Ordering::Relaxed);
        self.cells_filtered_out.fetch_add(dropped, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_filtered_out(&self, dropped: u64) {
        self.cells_filtered_out.fetch_add(dropped, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_not_found(&self) {
        self.num_not_found.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_error(&self) {
        self.num_errors.fetch_add(1, Ordering::Relaxed);
    }

    // Getters (snapshot values)
    pub fn num_mutations(&self) -> u64 {
        self.num_mutations.load(Ordering::Relaxed)
    }

    pub fn cells_written(&self) -> u64 {
        self.cells_written.load(Ordering::Relaxed)
    }

    pub fn rows_returned(&self) -> u64 {
        self.rows_returned.load(Ordering::Relaxed)
    }

    pub fn cells_returned(&self) -> u64 {
        self.cells_returned.load(Ordering::Relaxed)
    }

    pub fn cells_filtered_out(&self) -> u64 {
        self.cells_filtered_out.load(Ordering::Relaxed)
    }

    pub fn num_not_found(&self) -> u64 {
        self.num_not_found.load(Ordering::Relaxed)
    }

    /// Share of examined cells the filters removed before returning
    pub fn filter_reduction(&self) -> f64 {
        let dropped = self.cells_filtered_out() as f64;
        let total = dropped + self.cells_returned() as f64;
        if total > 0.0 { dropped / total } else { 0.0 }
    }

    /// Reset all statistics to zero
    pub fn reset(&self) {
        self.tables_created.store(0, Ordering::Relaxed);
        self.tables_deleted.store(0, Ordering::Relaxed);
        self.num_mutations.store(0, Ordering::Relaxed);
        self.cells_written.store(0, Ordering::Relaxed);
        self.bytes_written.store(0, Ordering::Relaxed);
        self.num_row_reads.store(0, Ordering::Relaxed);
        self.num_scans.store(0, Ordering::Relaxed);
        self.rows_returned.store(0, Ordering::Relaxed);
        self.cells_returned.store(0, Ordering::Relaxed);
        self.cells_filtered_out.store(0, Ordering::Relaxed);
        self.num_not_found.store(0, Ordering::Relaxed);
        self.num_errors.store(0, Ordering::Relaxed);
    }

    /// Get a formatted statistics report
    pub fn report(&self) -> String {
        format!(
            "Store Statistics:\n\
            \n\
            Tables:\n\
            - Created:       {}\n\
            - Deleted:       {}\n\
            \n\
            Writes:\n\
            - Mutations:     {}\n\
            - Cells written: {}\n\
            - Bytes written: {} ({:.2} MB)\n\
            \n\
            Reads:\n\
            - Row reads:     {}\n\
            - Scans:         {}\n\
            - Rows returned: {}\n\
            - Cells returned: {}\n\
            - Cells filtered: {} ({:.2}%)\n\
            \n\
            Errors:\n\
            - Not found:     {}\n\
            - Other:         {}",
            self.tables_created.load(Ordering::Relaxed),
            self.tables_deleted.load(Ordering::Relaxed),
            self.num_mutations(),
            self.cells_written(),
            self.bytes_written.load(Ordering::Relaxed),
            self.bytes_written.load(Ordering::Relaxed) as f64 / 1024.0 / 1024.0,
            self.num_row_reads.load(Ordering::Relaxed),
            self.num_scans.load(Ordering::Relaxed),
            self.rows_returned(),
            self.cells_returned(),
            self.cells_filtered_out(),
            self.filter_reduction() * 100.0,
            self.num_not_found(),
            self.num_errors.load(Ordering::Relaxed),
        )
    }
}
