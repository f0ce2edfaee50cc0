// Memoria - core/label.rs
//
// Emotion label normalisation and query parsing.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::util::constants::ALL_LABEL;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

// =============================================================================
// Label query
// =============================================================================

/// What the caller asked to filter by.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum LabelQuery {
    /// No filtering: every item is selected.
    #[default]
    All,

    /// Select items whose normalised label equals this string exactly.
    Label(String),
}

impl LabelQuery {
    /// Interpret a raw query value.
    ///
    /// `None`, `""` and exactly `"All"` mean no filter. Anything else is a
    /// label, kept verbatim: no trimming and no case folding, so `"all"` and
    /// `" Happy"` are ordinary labels.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") | Some(ALL_LABEL) => Self::All,
            Some(label) => Self::Label(label.to_string()),
        }
    }

    /// Returns true for the no-filter query.
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// The label to match, or `None` for the no-filter query.
    pub fn as_label(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Label(label) => Some(label),
        }
    }

    /// Display form; the no-filter query renders as "All".
    pub fn as_str(&self) -> &str {
        self.as_label().unwrap_or(ALL_LABEL)
    }
}

impl From<Option<String>> for LabelQuery {
    fn from(raw: Option<String>) -> Self {
        Self::parse(raw.as_deref())
    }
}

impl From<LabelQuery> for Option<String> {
    fn from(query: LabelQuery) -> Self {
        match query {
            LabelQuery::All => None,
            LabelQuery::Label(label) => Some(label),
        }
    }
}

impl From<&str> for LabelQuery {
    fn from(raw: &str) -> Self {
        Self::parse(Some(raw))
    }
}

impl std::fmt::Display for LabelQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Strip mode
// =============================================================================

/// How the leading decorative emoji run of a label is recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StripMode {
    /// Strip a run of single symbol codepoints (`\p{So}`, pictographs).
    /// Zero-width joiners, variation selectors and skin-tone modifiers end
    /// the run, so parts of a multi-codepoint emoji can survive the strip.
    #[default]
    Codepoint,

    /// Also absorb the joiners, selectors, modifiers and tag characters that
    /// glue multi-codepoint emoji together, removing whole clusters.
    Cluster,
}

impl StripMode {
    /// Parse a config/CLI value (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "codepoint" => Some(Self::Codepoint),
            "cluster" => Some(Self::Cluster),
            _ => None,
        }
    }

    /// Config/CLI spelling.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Codepoint => "codepoint",
            Self::Cluster => "cluster",
        }
    }

    fn prefix_regex(self) -> &'static Regex {
        static CODEPOINT: OnceLock<Regex> = OnceLock::new();
        static CLUSTER: OnceLock<Regex> = OnceLock::new();

        // Patterns are fixed and covered by the unit tests below, so a
        // mistake shows up as a failing test rather than a runtime panic.
        match self {
            Self::Codepoint => CODEPOINT.get_or_init(|| {
                Regex::new(r"^[\p{So}\p{Extended_Pictographic}]+")
                    .expect("codepoint emoji prefix: invalid regex")
            }),
            Self::Cluster => CLUSTER.get_or_init(|| {
                Regex::new(
                    r"^[\p{So}\p{Extended_Pictographic}\p{Emoji_Modifier}\x{200D}\x{FE0E}\x{FE0F}\x{20E3}\x{E0020}-\x{E007F}]+",
                )
                .expect("cluster emoji prefix: invalid regex")
            }),
        }
    }
}

impl std::fmt::Display for StripMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Normalisation
// =============================================================================

/// Strip the leading emoji run from a raw label, then trim whitespace.
///
/// An absent label normalises to `""`. The result borrows from `raw`.
pub fn normalize_label(raw: Option<&str>, mode: StripMode) -> &str {
    let raw = raw.unwrap_or("");
    let rest = match mode.prefix_regex().find(raw) {
        Some(prefix) => &raw[prefix.end()..],
        None => raw,
    };
    rest.trim()
}
