// Memoria - app/selection.rs
//
// Decides which memories file to open and which emotion label to show,
// from the CLI arguments, the previous session and config.toml.
//
// Priority:
//   file:  CLI argument > session last_file > error
//   label: --emotion > session label > config default_label

use crate::app::session::SessionData;
use crate::core::label::LabelQuery;
use crate::platform::config::AppConfig;
use crate::util::error::{MemoriaError, Result};
use std::path::{Path, PathBuf};

/// The file and label a run works on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub file: PathBuf,
    pub query: LabelQuery,
}

impl Selection {
    /// Session snapshot that `--remember` persists for the next run.
    pub fn remembered(&self) -> SessionData {
        SessionData::new(Some(self.file.clone()), self.query.clone())
    }
}

/// Resolve the file and label for this run.
///
/// Fails with `MemoriaError::NoInput` when no file was given and the
/// previous session does not name one.
pub fn resolve_selection(
    cli_file: Option<&Path>,
    cli_emotion: Option<&str>,
    previous: Option<&SessionData>,
    config: &AppConfig,
) -> Result<Selection> {
    let file = match (cli_file, previous.and_then(|s| s.last_file.as_ref())) {
        (Some(file), _) => file.to_path_buf(),
        (None, Some(last)) => {
            tracing::info!(path = %last.display(), "Using memories file from last session");
            last.clone()
        }
        (None, None) => return Err(MemoriaError::NoInput),
    };

    let query = match (cli_emotion, previous) {
        (Some(label), _) => LabelQuery::parse(Some(label)),
        (None, Some(prev)) => prev.selected_label.clone(),
        (None, None) => config.default_label.clone(),
    };

    tracing::debug!(path = %file.display(), label = %query, "Selection resolved");
    Ok(Selection { file, query })
}
