/// Server-side read filters
///
/// A `Filter` is a value the client builds and ships with a read. Only the
/// store evaluates it, so just the reduced result crosses the wire. The set
/// of predicates is closed: the store understands these variants and
/// nothing else.
///
/// ```text
/// readRow / readRows
///     ↓
/// Store: collect row cells → Filter::apply → drop row if no cells left
///     ↓
/// Client receives reduced Row
/// ```
use std::ops::Bound;

use crate::util::{Result, Slice, Status};

pub(crate) mod eval;

/// Half-open timestamp interval in microseconds: `[start, end)`
///
/// `None` on either side leaves that side unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimestampRange {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl TimestampRange {
    pub fn new(start: Option<i64>, end: Option<i64>) -> Self {
        TimestampRange { start, end }
    }

    /// Every timestamp
    pub fn all() -> Self {
        TimestampRange::default()
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        self.start.is_none_or(|s| timestamp >= s) && self.end.is_none_or(|e| timestamp < e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Return every cell unchanged
    PassAll,
    /// Return nothing
    BlockAll,
    /// Keep the newest `n` cells of each column
    CellsPerColumnLimit(u32),
    /// Keep the first `n` cells of each row
    CellsPerRowLimit(u32),
    /// Skip the first `n` cells of each row
    CellsPerRowOffset(u32),
    /// Keep cells of one family
    FamilyName(String),
    /// Keep cells with this exact qualifier, in any family
    Qualifier(Slice),
    /// Keep cells of `family` whose qualifier falls between the bounds
    ColumnRange {
        family: String,
        start: Bound<Slice>,
        end: Bound<Slice>,
    },
    TimestampRange(TimestampRange),
    /// Replace every value with an empty byte string
    StripValue,
    /// Attach a label to every cell that reaches this filter
    ApplyLabel(String),
    /// Feed the output of each filter into the next
    Chain(Vec<Filter>),
    /// Run every filter on the same input and merge the outputs
    Interleave(Vec<Filter>),
}

impl Filter {
    /// Reject filters the store cannot evaluate
    pub fn validate(&self) -> Result<()> {
        match self {
            Filter::CellsPerColumnLimit(0) => Err(Status::invalid_argument(
                "cells per column limit must be positive",
            )),
            Filter::CellsPerRowLimit(0) => Err(Status::invalid_argument(
                "cells per row limit must be positive",
            )),
            Filter::ApplyLabel(label) if label.is_empty() => {
                Err(Status::invalid_argument("label must not be empty"))
            },
            Filter::Interleave(filters) if filters.is_empty() => Err(
                Status::invalid_argument("interleave needs at least one filter"),
            ),
            Filter::Chain(filters) | Filter::Interleave(filters) => {
                filters.iter().try_for_each(Filter::validate)
            },
            _ => Ok(()),
        }
    }

    pub fn chain(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::Chain(filters.into_iter().collect())
    }

    pub fn interleave(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::Interleave(filters.into_iter().collect())
    }
}

/// "Retain at most K cells per column"
///
/// The one policy the demo workflow uses for both the single-row read and
/// the table scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterPolicy {
    cells_per_column: u32,
}

impl FilterPolicy {
    pub fn limit_cells_per_column(cells_per_column: u32) -> Self {
        FilterPolicy { cells_per_column }
    }

    pub fn cells_per_column(&self) -> u32 {
        self.cells_per_column
    }

    pub fn filter(&self) -> Filter {
        Filter::CellsPerColumnLimit(self.cells_per_column)
    }
}

impl Default for FilterPolicy {
    fn default() -> Self {
        FilterPolicy::limit_cells_per_column(1)
    }
}

impl From<FilterPolicy> for Filter {
    fn from(policy: FilterPolicy) -> Self {
        policy.filter()
    }
}
