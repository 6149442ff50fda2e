use std::{collections::BTreeSet, ops::Bound};

use crate::{filter::Filter, util::Slice};

/// Which rows a scan visits
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RowSet {
    #[default]
    All,
    /// Exact keys; absent keys are simply not returned
    Keys(BTreeSet<Slice>),
    Range { start: Bound<Slice>, end: Bound<Slice> },
    Prefix(Slice),
}

impl RowSet {
    /// First row key worth seeking to, `None` for the start of the table
    pub(crate) fn seek_key(&self) -> Option<Slice> {
        match self {
            RowSet::All => None,
            RowSet::Keys(keys) => keys.first().cloned(),
            RowSet::Range { start, .. } => match start {
                Bound::Included(k) | Bound::Excluded(k) => Some(k.clone()),
                Bound::Unbounded => None,
            },
            RowSet::Prefix(prefix) => Some(prefix.clone()),
        }
    }

    pub(crate) fn contains(&self, key: &Slice) -> bool {
        match self {
            RowSet::All => true,
            RowSet::Keys(keys) => keys.contains(key),
            RowSet::Range { start, end } => {
                let after_start = match start {
                    Bound::Included(s) => key >= s,
                    Bound::Excluded(s) => key > s,
                    Bound::Unbounded => true,
                };
                after_start && !Self::beyond_end(end, key)
            },
            RowSet::Prefix(prefix) => key.starts_with(prefix.data()),
        }
    }

    /// True once no row at or after `key` can match, so a scan may stop
    pub(crate) fn is_exhausted_at(&self, key: &Slice) -> bool {
        match self {
            RowSet::All => false,
            RowSet::Keys(keys) => keys.last().is_none_or(|last| key > last),
            RowSet::Range { end, .. } => Self::beyond_end(end, key),
            RowSet::Prefix(prefix) => key.data() > prefix.data() && !key.starts_with(prefix.data()),
        }
    }

    fn beyond_end(end: &Bound<Slice>, key: &Slice) -> bool {
        match end {
            Bound::Included(e) => key > e,
            Bound::Excluded(e) => key >= e,
            Bound::Unbounded => false,
        }
    }
}

/// A scan request: row selection, optional server-side filter, row limit
///
/// ```
/// use widecell::{Filter, Query};
///
/// let query = Query::new()
///     .prefix("rowKey")
///     .filter(Filter::CellsPerColumnLimit(1))
///     .limit(10);
/// assert_eq!(query.row_limit(), Some(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    rows: RowSet,
    filter: Option<Filter>,
    limit: Option<u64>,
}

impl Query {
    /// Every row of the table
    pub fn new() -> Self {
        Query::default()
    }

    pub fn row_key(mut self, key: impl Into<Slice>) -> Self {
        let key = key.into();
        match &mut self.rows {
            RowSet::Keys(keys) => {
                keys.insert(key);
            },
            rows => *rows = RowSet::Keys(BTreeSet::from([key])),
        }
        self
    }

    pub fn range(mut self, start: Bound<Slice>, end: Bound<Slice>) -> Self {
        self.rows = RowSet::Range { start, end };
        self
    }

    pub fn prefix(mut self, prefix: impl Into<Slice>) -> Self {
        self.rows = RowSet::Prefix(prefix.into());
        self
    }

    pub fn filter(mut self, filter: impl Into<Filter>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn rows(&self) -> &RowSet {
        &self.rows
    }

    pub fn row_filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    pub fn row_limit(&self) -> Option<u64> {
        self.limit
    }

    pub(crate) fn into_parts(self) -> (RowSet, Option<Filter>, Option<u64>) {
        (self.rows, self.filter, self.limit)
    }
}
