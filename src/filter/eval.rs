use std::ops::RangeBounds;

use crate::{filter::Filter, model::Cell};

/// Evaluate `filter` over the cells of one row.
///
/// Input must be in row order; output stays in row order.
pub(crate) fn apply(filter: &Filter, cells: Vec<Cell>) -> Vec<Cell> {
    match filter {
        Filter::PassAll => cells,
        Filter::BlockAll => Vec::new(),
        Filter::CellsPerColumnLimit(limit) => limit_per_column(cells, *limit as usize),
        Filter::CellsPerRowLimit(limit) => cells.into_iter().take(*limit as usize).collect(),
        Filter::CellsPerRowOffset(offset) => cells.into_iter().skip(*offset as usize).collect(),
        Filter::FamilyName(family) => cells
            .into_iter()
            .filter(|c| c.family() == family)
            .collect(),
        Filter::Qualifier(qualifier) => cells
            .into_iter()
            .filter(|c| c.qualifier() == qualifier)
            .collect(),
        Filter::ColumnRange { family, start, end } => {
            let bounds = (start.as_ref(), end.as_ref());
            cells
                .into_iter()
                .filter(|c| c.family() == family && bounds.contains(c.qualifier()))
                .collect()
        },
        Filter::TimestampRange(range) => cells
            .into_iter()
            .filter(|c| range.contains(c.timestamp()))
            .collect(),
        Filter::StripValue => cells
            .into_iter()
            .map(|mut c| {
                c.clear_value();
                c
            })
            .collect(),
        Filter::ApplyLabel(label) => cells
            .into_iter()
            .map(|mut c| {
                c.add_label(label);
                c
            })
            .collect(),
        Filter::Chain(filters) => filters
            .iter()
            .fold(cells, |acc, f| if acc.is_empty() { acc } else { apply(f, acc) }),
        Filter::Interleave(filters) => {
            let mut merged: Vec<Cell> = filters
                .iter()
                .flat_map(|f| apply(f, cells.clone()))
                .collect();
            // stable: equal positions keep branch order
            merged.sort_by(|a, b| a.cmp_position(b));
            merged
        },
    }
}

fn limit_per_column(cells: Vec<Cell>, limit: usize) -> Vec<Cell> {
    let mut kept = Vec::with_capacity(cells.len());
    let mut seen_in_column = 0;
    let mut prev: Option<(String, Vec<u8>)> = None;

    for cell in cells {
        let same_column = prev
            .as_ref()
            .is_some_and(|(f, q)| cell.is_column(f, q));
        if !same_column {
            prev = Some((cell.family().to_string(), cell.qualifier().data().to_vec()));
            seen_in_column = 0;
        }
        if seen_in_column < limit {
            kept.push(cell);
        }
        seen_in_column += 1;
    }
    kept
}

#[cfg(test)]
mod tests {
    use std::ops::Bound;

    use super::*;
    use crate::{filter::TimestampRange, model::Row, util::Slice};

    fn versioned_row() -> Vec<Cell> {
        Row::new(
            "r",
            vec![
                Cell::new("cf1", "greeting", 100, "Hello"),
                Cell::new("cf1", "name", 300, "v3"),
                Cell::new("cf1", "name", 200, "v2"),
                Cell::new("cf1", "name", 100, "v1"),
                Cell::new("cf2", "name", 100, "other"),
            ],
        )
        .into_cells()
    }

    fn values(cells: &[Cell]) -> Vec<String> {
        cells.iter().map(|c| c.value().to_string()).collect()
    }

    #[test]
    fn test_cells_per_column_keeps_newest() {
        let out = apply(&Filter::CellsPerColumnLimit(1), versioned_row());
        assert_eq!(values(&out), vec!["Hello", "v3", "other"]);

        let out = apply(&Filter::CellsPerColumnLimit(2), versioned_row());
        assert_eq!(values(&out), vec!["Hello", "v3", "v2", "other"]);
    }

    #[test]
    fn test_row_limit_and_offset() {
        let out = apply(&Filter::CellsPerRowLimit(2), versioned_row());
        assert_eq!(values(&out), vec!["Hello", "v3"]);

        let out = apply(&Filter::CellsPerRowOffset(3), versioned_row());
        assert_eq!(values(&out), vec!["v1", "other"]);
    }

    #[test]
    fn test_family_and_qualifier() {
        let out = apply(&Filter::FamilyName("cf2".into()), versioned_row());
        assert_eq!(values(&out), vec!["other"]);

        let out = apply(&Filter::Qualifier(Slice::from("name")), versioned_row());
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_column_range() {
        let filter = Filter::ColumnRange {
            family: "cf1".into(),
            start: Bound::Included(Slice::from("h")),
            end: Bound::Unbounded,
        };
        let out = apply(&filter, versioned_row());
        assert_eq!(values(&out), vec!["v3", "v2", "v1"]);
    }

    #[test]
    fn test_timestamp_range() {
        let filter = Filter::TimestampRange(TimestampRange::new(Some(150), Some(300)));
        let out = apply(&filter, versioned_row());
        assert_eq!(values(&out), vec!["v2"]);
    }

    #[test]
    fn test_chain_label_and_strip() {
        let filter = Filter::chain([
            Filter::CellsPerColumnLimit(1),
            Filter::StripValue,
            Filter::ApplyLabel("latest".into()),
        ]);
        let out = apply(&filter, versioned_row());
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|c| c.value().is_empty()));
        assert!(out.iter().all(|c| c.labels() == ["latest".to_string()]));
    }

    #[test]
    fn test_interleave_merges_in_row_order() {
        let filter = Filter::interleave([
            Filter::chain([
                Filter::FamilyName("cf2".into()),
                Filter::ApplyLabel("b".into()),
            ]),
            Filter::chain([
                Filter::CellsPerRowLimit(1),
                Filter::ApplyLabel("a".into()),
            ]),
        ]);
        let out = apply(&filter, versioned_row());
        assert_eq!(values(&out), vec!["Hello", "other"]);
        assert_eq!(out[0].labels(), ["a".to_string()]);
        assert_eq!(out[1].labels(), ["b".to_string()]);
    }

    #[test]
    fn test_block_all() {
        assert!(apply(&Filter::BlockAll, versioned_row()).is_empty());
        assert_eq!(apply(&Filter::PassAll, versioned_row()).len(), 5);
    }
}
