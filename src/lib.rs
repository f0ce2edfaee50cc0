// Memoria - lib.rs
//
// Library entry point, exposing all modules for the CLI, integration tests
// and programmatic use.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;

pub use crate::core::filter::{deliver_filtered, filter_by_label, filter_owned, LabelFilter};
pub use crate::core::label::{normalize_label, LabelQuery, StripMode};
pub use crate::core::model::{Labelled, Memory};
