// Memoria - app/session.rs
//
// Session persistence: remember the last memories file and the selected
// emotion label between runs.
//
// - Session is saved atomically (write temp, rename) so a crash during save
//   never corrupts the previous good session.
// - Load problems are logged and discarded; a bad session just starts fresh.
// - Memories themselves are never persisted here.

use crate::core::label::LabelQuery;
use crate::platform::fs::write_atomic;
use crate::util::constants::SESSION_FILE_NAME;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Version stamp for forward-compatibility checks.
///
/// Version mismatches silently discard the session.
pub const SESSION_VERSION: u32 = 1;

/// Complete persistent session snapshot.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    /// Schema version; must equal `SESSION_VERSION` to be accepted.
    pub version: u32,

    /// Memories file used in the last run.
    #[serde(default)]
    pub last_file: Option<PathBuf>,

    /// Emotion label selected in the last run. `null` means "All".
    #[serde(default)]
    pub selected_label: LabelQuery,
}

impl SessionData {
    pub fn new(last_file: Option<PathBuf>, selected_label: LabelQuery) -> Self {
        Self {
            version: SESSION_VERSION,
            last_file,
            selected_label,
        }
    }
}

/// Resolve the session file path from the platform data directory.
pub fn session_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_FILE_NAME)
}

/// Save `data` to `path` atomically.
///
/// Returns a descriptive error string suitable for a tracing warn! call; the
/// caller decides whether to surface it.
pub fn save(data: &SessionData, path: &Path) -> Result<(), String> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| format!("failed to serialise session: {e}"))?;

    write_atomic(path, json.as_bytes())
        .map_err(|e| format!("failed to write session file '{}': {e}", path.display()))?;

    tracing::debug!(path = %path.display(), "Session saved");
    Ok(())
}

/// Load and validate a `SessionData` from `path`.
///
/// Returns `None` on any error (file not found, JSON parse failure,
/// version mismatch). The caller should treat `None` as "start fresh".
pub fn load(path: &Path) -> Option<SessionData> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| {
            // "Not found" is the normal first run.
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(path = %path.display(), error = %e, "Cannot read session file");
            }
        })
        .ok()?;

    let data: SessionData = serde_json::from_str(&content)
        .map_err(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Session file is malformed; starting fresh"
            );
        })
        .ok()?;

    if data.version != SESSION_VERSION {
        tracing::warn!(
            found = data.version,
            expected = SESSION_VERSION,
            "Session file version mismatch; starting fresh"
        );
        return None;
    }

    tracing::info!(path = %path.display(), "Session file loaded");
    Some(data)
}
