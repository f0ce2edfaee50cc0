// Memoria - core/summary.rs
//
// Per-label counts over a collection, used to build the list of labels a
// user can pick from.

use crate::core::label::{normalize_label, StripMode};
use crate::core::model::Labelled;
use crate::util::constants::ALL_LABEL;
use serde::Serialize;
use std::collections::HashMap;

/// Number of items sharing one normalised label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    /// Normalised label. `""` collects unlabelled items.
    pub label: String,
    pub count: usize,
}

/// Label counts for a whole collection.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LabelSummary {
    /// Total number of items inspected.
    pub total: usize,

    /// One entry per distinct normalised label, in order of first appearance.
    pub labels: Vec<LabelCount>,
}

impl LabelSummary {
    /// Build the summary in one pass over `items`.
    pub fn from_items<T: Labelled>(items: &[T], mode: StripMode) -> Self {
        let mut labels: Vec<LabelCount> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for item in items {
            let label = normalize_label(item.emotion(), mode);
            match positions.get(label) {
                Some(&pos) => labels[pos].count += 1,
                None => {
                    positions.insert(label, labels.len());
                    labels.push(LabelCount {
                        label: label.to_string(),
                        count: 1,
                    });
                }
            }
        }

        Self {
            total: items.len(),
            labels,
        }
    }

    /// Count for one label (0 when absent).
    pub fn count_of(&self, label: &str) -> usize {
        self.labels
            .iter()
            .find(|c| c.label == label)
            .map_or(0, |c| c.count)
    }

    /// Selectable options: "All" first, then every non-empty label.
    pub fn options(&self) -> Vec<&str> {
        std::iter::once(ALL_LABEL)
            .chain(
                self.labels
                    .iter()
                    .map(|c| c.label.as_str())
                    .filter(|label| !label.is_empty() && *label != ALL_LABEL),
            )
            .collect()
    }
}

/// Convenience wrapper returning only the counts.
pub fn label_counts<T: Labelled>(items: &[T], mode: StripMode) -> Vec<LabelCount> {
    LabelSummary::from_items(items, mode).labels
}
