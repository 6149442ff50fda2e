use crate::{filter::TimestampRange, util::Slice};

/// One operation inside a row mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOp {
    /// Write a cell. `None` asks the store to assign the timestamp.
    SetCell {
        family: String,
        qualifier: Slice,
        timestamp: Option<i64>,
        value: Slice,
    },
    /// Remove the versions of one column that fall inside `range`
    DeleteCells {
        family: String,
        qualifier: Slice,
        range: TimestampRange,
    },
    /// Remove every cell of one family
    DeleteFamily { family: String },
    /// Remove the whole row
    DeleteRow,
}

impl MutationOp {
    /// Family the operation touches, if any
    pub fn family(&self) -> Option<&str> {
        match self {
            MutationOp::SetCell { family, .. }
            | MutationOp::DeleteCells { family, .. }
            | MutationOp::DeleteFamily { family } => Some(family),
            MutationOp::DeleteRow => None,
        }
    }
}

/// Ordered batch of operations applied atomically to a single row
///
/// The store validates every operation before touching any cell, so a
/// mutation either lands completely or not at all.
///
/// # Example
///
/// ```
/// use widecell::RowMutation;
///
/// let mutation = RowMutation::new("rowKey0")
///     .set_cell("cf1", "name", "World")
///     .set_cell("cf1", "greeting", "Hello World!");
/// assert_eq!(mutation.count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowMutation {
    row_key: Slice,
    /// Operations in insertion order
    ops: Vec<MutationOp>,
    /// Approximate payload size in bytes
    data_size: usize,
}

impl RowMutation {
    pub fn new(row_key: impl Into<Slice>) -> Self {
        RowMutation {
            row_key: row_key.into(),
            ops: Vec::new(),
            data_size: 0,
        }
    }

    /// Add a cell write with a store-assigned timestamp
    pub fn set_cell(
        self,
        family: impl Into<String>,
        qualifier: impl Into<Slice>,
        value: impl Into<Slice>,
    ) -> Self {
        self.push(MutationOp::SetCell {
            family: family.into(),
            qualifier: qualifier.into(),
            timestamp: None,
            value: value.into(),
        })
    }

    /// Add a cell write at an explicit timestamp (microseconds)
    pub fn set_cell_at(
        self,
        family: impl Into<String>,
        qualifier: impl Into<Slice>,
        timestamp: i64,
        value: impl Into<Slice>,
    ) -> Self {
        self.push(MutationOp::SetCell {
            family: family.into(),
            qualifier: qualifier.into(),
            timestamp: Some(timestamp),
            value: value.into(),
        })
    }

    pub fn delete_cells(
        self,
        family: impl Into<String>,
        qualifier: impl Into<Slice>,
        range: TimestampRange,
    ) -> Self {
        self.push(MutationOp::DeleteCells {
            family: family.into(),
            qualifier: qualifier.into(),
            range,
        })
    }

    pub fn delete_family(self, family: impl Into<String>) -> Self {
        self.push(MutationOp::DeleteFamily {
            family: family.into(),
        })
    }

    pub fn delete_row(self) -> Self {
        self.push(MutationOp::DeleteRow)
    }

    pub fn push(mut self, op: MutationOp) -> Self {
        self.data_size += match &op {
            MutationOp::SetCell {
                family,
                qualifier,
                value,
                ..
            } => family.len() + qualifier.size() + value.size(),
            MutationOp::DeleteCells {
                family, qualifier, ..
            } => family.len() + qualifier.size(),
            MutationOp::DeleteFamily { family } => family.len(),
            MutationOp::DeleteRow => 0,
        };
        self.ops.push(op);
        self
    }

    pub fn row_key(&self) -> &Slice {
        &self.row_key
    }

    #[inline]
    pub fn ops(&self) -> &[MutationOp] {
        &self.ops
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.ops.len()
    }

    #[inline]
    pub fn data_size(&self) -> usize {
        self.data_size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_mutation_basic() {
        let mutation = RowMutation::new("rowKey0")
            .set_cell("cf1", "name", "World")
            .set_cell("cf1", "greeting", "Hello World!")
            .delete_family("cf2");

        assert_eq!(mutation.count(), 3);
        assert_eq!(mutation.row_key(), &Slice::from("rowKey0"));
        // cf1+name+World + cf1+greeting+Hello World! + cf2
        assert_eq!(mutation.data_size(), 3 + 4 + 5 + 3 + 8 + 12 + 3);
    }

    #[test]
    fn test_row_mutation_preserves_order() {
        let mutation = RowMutation::new("k")
            .set_cell_at("cf1", "q", 5, "v1")
            .delete_row()
            .set_cell("cf1", "q", "v2");

        assert!(matches!(
            mutation.ops()[0],
            MutationOp::SetCell {
                timestamp: Some(5),
                ..
            }
        ));
        assert_eq!(mutation.ops()[1], MutationOp::DeleteRow);
        assert_eq!(mutation.ops()[1].family(), None);
        assert_eq!(mutation.ops()[2].family(), Some("cf1"));
    }

    #[test]
    fn test_empty_mutation() {
        let mutation = RowMutation::new("k");
        assert!(mutation.is_empty());
        assert_eq!(mutation.data_size(), 0);
    }
}
