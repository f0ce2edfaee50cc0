// Memoria - app/loader.rs
//
// Reads a memories file from disk and hands the text to core::load.

use crate::core::load::parse_memories;
use crate::core::model::Memory;
use crate::platform::fs::{read_capped, CappedRead};
use crate::util::constants::MAX_INPUT_FILE_SIZE;
use crate::util::error::LoadError;
use std::path::Path;

/// Load all memories from a JSON file.
pub fn load_memories(path: &Path) -> Result<Vec<Memory>, LoadError> {
    load_memories_capped(path, MAX_INPUT_FILE_SIZE)
}

/// [`load_memories`] with an explicit size cap.
pub fn load_memories_capped(path: &Path, max_size: u64) -> Result<Vec<Memory>, LoadError> {
    let content = match read_capped(path, max_size) {
        Ok(CappedRead::Content(c)) => c,
        Ok(CappedRead::TooLarge { size }) => {
            return Err(LoadError::FileTooLarge {
                path: path.to_path_buf(),
                size,
                max_size,
            })
        }
        Err(e) => {
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    let memories = parse_memories(&content, path)?;
    tracing::info!(
        path = %path.display(),
        count = memories.len(),
        "Loaded memories"
    );
    Ok(memories)
}
