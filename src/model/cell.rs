use std::cmp::Ordering;

use crate::util::Slice;

/// One versioned value inside a row
///
/// A cell is addressed by (family, qualifier, timestamp). Several cells may
/// share a (family, qualifier) column at different timestamps; how many are
/// retained is up to the store.
///
/// Labels are never stored. They are attached on the way out by the
/// `ApplyLabel` filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    family: String,
    qualifier: Slice,
    /// Microseconds since the Unix epoch
    timestamp: i64,
    value: Slice,
    labels: Vec<String>,
}

impl Cell {
    pub fn new(
        family: impl Into<String>,
        qualifier: impl Into<Slice>,
        timestamp: i64,
        value: impl Into<Slice>,
    ) -> Self {
        Cell {
            family: family.into(),
            qualifier: qualifier.into(),
            timestamp,
            value: value.into(),
            labels: Vec::new(),
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn qualifier(&self) -> &Slice {
        &self.qualifier
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn value(&self) -> &Slice {
        &self.value
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// True if this cell lives in the given column
    pub fn is_column(&self, family: &str, qualifier: &[u8]) -> bool {
        self.family == family && self.qualifier.data() == qualifier
    }

    pub(crate) fn add_label(&mut self, label: &str) {
        self.labels.push(label.to_string());
    }

    pub(crate) fn clear_value(&mut self) {
        self.value = Slice::empty();
    }

    /// Row order: family, then qualifier ascending, then newest first
    pub fn cmp_position(&self, other: &Cell) -> Ordering {
        self.family
            .cmp(&other.family)
            .then_with(|| self.qualifier.cmp(&other.qualifier))
            .then_with(|| other.timestamp.cmp(&self.timestamp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_position_order() {
        let newer = Cell::new("cf1", "name", 20, "b");
        let older = Cell::new("cf1", "name", 10, "a");
        let other_col = Cell::new("cf1", "greeting", 5, "c");
        let other_family = Cell::new("cf0", "zzz", 1, "d");

        assert_eq!(newer.cmp_position(&older), Ordering::Less);
        assert_eq!(other_col.cmp_position(&newer), Ordering::Less);
        assert_eq!(other_family.cmp_position(&other_col), Ordering::Less);
    }

    #[test]
    fn test_cell_is_column() {
        let cell = Cell::new("cf1", "name", 1, "World");
        assert!(cell.is_column("cf1", b"name"));
        assert!(!cell.is_column("cf1", b"greeting"));
        assert!(!cell.is_column("cf2", b"name"));
        assert!(cell.labels().is_empty());
    }
}
