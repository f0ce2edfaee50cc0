// Memoria - app/state.rs
//
// Feed state: the loaded memories, the selected emotion label and the
// filtered view. Receives filter results the way a UI state setter would;
// the filtering itself lives in core::filter.

use crate::core::filter::LabelFilter;
use crate::core::label::{LabelQuery, StripMode};
use crate::core::model::Memory;
use crate::core::summary::LabelSummary;

/// Top-level feed state.
#[derive(Debug, Default)]
pub struct FeedState {
    /// All loaded memories, in load order.
    pub memories: Vec<Memory>,

    /// Current filter (selected label + strip mode).
    filter: LabelFilter,

    /// Indices of memories matching the current filter (into `memories`).
    filtered_indices: Vec<usize>,
}

impl FeedState {
    /// Create state with every memory visible.
    pub fn new(memories: Vec<Memory>, strip_mode: StripMode) -> Self {
        let mut state = Self {
            memories,
            filter: LabelFilter::default().with_strip_mode(strip_mode),
            filtered_indices: Vec::new(),
        };
        state.apply_filter();
        state
    }

    /// Currently selected label.
    pub fn selected_label(&self) -> &LabelQuery {
        &self.filter.query
    }

    pub fn strip_mode(&self) -> StripMode {
        self.filter.strip_mode
    }

    /// Select a label (`None`, `""` or `"All"` clears the selection) and
    /// recompute the visible memories.
    pub fn select_label(&mut self, label: Option<&str>) {
        self.set_query(LabelQuery::parse(label));
    }

    /// Same as [`FeedState::select_label`] with an already-parsed query.
    pub fn set_query(&mut self, query: LabelQuery) {
        tracing::debug!(label = %query, "Emotion selection changed");
        self.filter.query = query;
        self.apply_filter();
    }

    /// Replace the whole collection, keeping the current selection.
    pub fn replace_memories(&mut self, memories: Vec<Memory>) {
        self.memories = memories;
        self.apply_filter();
    }

    /// Remove the memory with `id`. Returns true if one was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.memories.len();
        self.memories.retain(|m| m.id.as_deref() != Some(id));
        let removed = self.memories.len() != before;
        if removed {
            tracing::info!(id, "Memory removed");
            self.apply_filter();
        }
        removed
    }

    /// Memories matching the current selection, in load order.
    pub fn visible(&self) -> Vec<&Memory> {
        self.filtered_indices
            .iter()
            .filter_map(|&idx| self.memories.get(idx))
            .collect()
    }

    /// Number of visible memories.
    pub fn visible_count(&self) -> usize {
        self.filtered_indices.len()
    }

    /// Label counts over all memories (not just the visible ones).
    pub fn summary(&self) -> LabelSummary {
        LabelSummary::from_items(&self.memories, self.filter.strip_mode)
    }

    /// Recompute filtered indices from current memories and filter.
    fn apply_filter(&mut self) {
        self.filtered_indices = self.filter.matching_indices(&self.memories);
        tracing::debug!(
            label = %self.filter.query,
            total = self.memories.len(),
            visible = self.filtered_indices.len(),
            "Feed filtered"
        );
    }
}
