// Memoria - core/filter.rs
//
// Emotion label filter for collections of memories.
// Core layer: pure logic, no I/O or UI dependencies.
//
// Filtering never fails and never mutates its input. Absent labels count as
// "" and an absent collection counts as empty.

use crate::core::label::{normalize_label, LabelQuery, StripMode};
use crate::core::model::Labelled;
use crate::util::constants::DEBUG_MAX_LABEL_PREVIEW;
use crate::util::logging::preview;

/// Complete filter state: the requested label plus the normalisation rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelFilter {
    /// Label to select. `LabelQuery::All` selects everything.
    pub query: LabelQuery,

    /// How leading emoji are recognised when normalising item labels.
    pub strip_mode: StripMode,
}

impl LabelFilter {
    /// Build a filter from a raw query value (see `LabelQuery::parse`).
    pub fn new(query: Option<&str>) -> Self {
        Self {
            query: LabelQuery::parse(query),
            strip_mode: StripMode::default(),
        }
    }

    /// Same filter with a different strip mode.
    pub fn with_strip_mode(mut self, strip_mode: StripMode) -> Self {
        self.strip_mode = strip_mode;
        self
    }

    /// Returns true if the filter selects every item.
    pub fn is_empty(&self) -> bool {
        self.query.is_all()
    }

    /// Check a single item against the filter.
    pub fn matches<T: Labelled + ?Sized>(&self, item: &T) -> bool {
        match self.query.as_label() {
            None => true,
            Some(wanted) => normalize_label(item.emotion(), self.strip_mode) == wanted,
        }
    }

    /// Indices of matching items, in input order.
    ///
    /// Lets a caller keep a filtered view over a collection it owns without
    /// copying or borrowing the records.
    pub fn matching_indices<T: Labelled>(&self, items: &[T]) -> Vec<usize> {
        if self.is_empty() {
            return (0..items.len()).collect();
        }

        let indices: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.matches(*item))
            .map(|(idx, _)| idx)
            .collect();

        self.log_result(items.len(), indices.len());
        indices
    }

    /// Matching items, borrowed from `items`, in input order.
    pub fn apply<'a, T: Labelled>(&self, items: &'a [T]) -> Vec<&'a T> {
        if self.is_empty() {
            return items.iter().collect();
        }

        let selected: Vec<&T> = items.iter().filter(|item| self.matches(*item)).collect();
        self.log_result(items.len(), selected.len());
        selected
    }

    /// Matching items, taking ownership of the collection.
    pub fn apply_owned<T: Labelled>(&self, items: Vec<T>) -> Vec<T> {
        if self.is_empty() {
            return items;
        }

        let total = items.len();
        let selected: Vec<T> = items.into_iter().filter(|item| self.matches(item)).collect();
        self.log_result(total, selected.len());
        selected
    }

    fn log_result(&self, total: usize, matched: usize) {
        tracing::trace!(
            query = preview(self.query.as_str(), DEBUG_MAX_LABEL_PREVIEW),
            strip_mode = %self.strip_mode,
            total,
            matched,
            "Label filter applied"
        );
    }
}

/// Select the items whose normalised emotion label equals `query`.
///
/// `None`, `""` and `"All"` select every item. `None` for `items` is an
/// empty collection.
pub fn filter_by_label<'a, T: Labelled>(query: Option<&str>, items: Option<&'a [T]>) -> Vec<&'a T> {
    LabelFilter::new(query).apply(items.unwrap_or_default())
}

/// Owned variant of [`filter_by_label`].
pub fn filter_owned<T: Labelled>(query: Option<&str>, items: Vec<T>) -> Vec<T> {
    LabelFilter::new(query).apply_owned(items)
}

/// Filter like [`filter_by_label`] and hand the result to `sink`.
///
/// For callers that propagate results through a setter rather than a
/// return value. `sink` is called exactly once, also for empty results.
pub fn deliver_filtered<'a, T, F>(query: Option<&str>, items: Option<&'a [T]>, sink: F)
where
    T: Labelled,
    F: FnOnce(Vec<&'a T>),
{
    sink(filter_by_label(query, items));
}
