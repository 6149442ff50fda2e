use crate::{model::Cell, util::Slice};

/// A row as returned by the store: its key plus cells in row order
/// (family, qualifier, newest timestamp first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    key: Slice,
    cells: Vec<Cell>,
}

impl Row {
    pub fn new(key: impl Into<Slice>, mut cells: Vec<Cell>) -> Self {
        cells.sort_by(|a, b| a.cmp_position(b));
        Row {
            key: key.into(),
            cells,
        }
    }

    pub fn key(&self) -> &Slice {
        &self.key
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    /// All versions stored in one column, newest first
    pub fn cells_for(&self, family: &str, qualifier: impl AsRef<[u8]>) -> Vec<Cell> {
        let qualifier = qualifier.as_ref();
        self.cells
            .iter()
            .filter(|c| c.is_column(family, qualifier))
            .cloned()
            .collect()
    }

    pub fn cells_in_family(&self, family: &str) -> Vec<Cell> {
        self.cells
            .iter()
            .filter(|c| c.family() == family)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
