// Memoria - core/export.rs
//
// Text, CSV and JSON export of filtered memories.
// Core layer: writes to any Write trait object.

use crate::core::label::{normalize_label, StripMode};
use crate::core::model::Memory;
use crate::core::summary::{LabelCount, LabelSummary};
use crate::util::constants::MAX_EXPORT_ENTRIES;
use crate::util::error::ExportError;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// Output layout for exported memories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// One human-readable line per memory.
    #[default]
    Text,
    Json,
    Csv,
}

impl ExportFormat {
    /// Parse a config/CLI value (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

fn check_limit(count: usize) -> Result<(), ExportError> {
    if count > MAX_EXPORT_ENTRIES {
        return Err(ExportError::TooManyEntries {
            count,
            max: MAX_EXPORT_ENTRIES,
        });
    }
    Ok(())
}

/// Export in the requested format. Returns the number of memories written.
pub fn export<W: Write>(
    format: ExportFormat,
    memories: &[&Memory],
    writer: W,
    export_path: &Path,
    mode: StripMode,
) -> Result<usize, ExportError> {
    match format {
        ExportFormat::Text => export_text(memories, writer, export_path, mode),
        ExportFormat::Json => export_json(memories, writer, export_path),
        ExportFormat::Csv => export_csv(memories, writer, export_path, mode),
    }
}

/// Export memories to CSV format.
///
/// Writes: id, title, emotion, label, created_at, image_url, description.
/// `label` is the normalised emotion label.
pub fn export_csv<W: Write>(
    memories: &[&Memory],
    writer: W,
    export_path: &Path,
    mode: StripMode,
) -> Result<usize, ExportError> {
    check_limit(memories.len())?;

    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "id",
            "title",
            "emotion",
            "label",
            "created_at",
            "image_url",
            "description",
        ])
        .map_err(csv_err)?;

    for memory in memories {
        let created = memory
            .created_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_default();

        csv_writer
            .write_record([
                memory.id.as_deref().unwrap_or(""),
                memory.title.as_deref().unwrap_or(""),
                memory.emotion.as_deref().unwrap_or(""),
                normalize_label(memory.emotion.as_deref(), mode),
                created.as_str(),
                memory.image_url.as_deref().unwrap_or(""),
                memory.description.as_deref().unwrap_or(""),
            ])
            .map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(memories.len())
}

/// Export memories to JSON format (array of objects, extra attributes kept).
pub fn export_json<W: Write>(
    memories: &[&Memory],
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_limit(memories.len())?;

    serde_json::to_writer_pretty(&mut writer, memories).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    writeln!(writer).map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(memories.len())
}

/// Export memories as one line each: `[label] title (date)`.
pub fn export_text<W: Write>(
    memories: &[&Memory],
    mut writer: W,
    export_path: &Path,
    mode: StripMode,
) -> Result<usize, ExportError> {
    check_limit(memories.len())?;

    let io_err = |e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    };

    for memory in memories {
        let label = normalize_label(memory.emotion.as_deref(), mode);
        let title = memory
            .title
            .as_deref()
            .or(memory.id.as_deref())
            .unwrap_or("(untitled)");

        write!(writer, "[{label}] {title}").map_err(io_err)?;
        if let Some(created) = memory.created_at {
            write!(writer, " ({})", created.format("%Y-%m-%d")).map_err(io_err)?;
        }
        writeln!(writer).map_err(io_err)?;
    }

    writer.flush().map_err(io_err)?;
    Ok(memories.len())
}

// =============================================================================
// Label counts
// =============================================================================

/// Export a label summary. Returns the number of distinct labels written.
pub fn export_label_counts<W: Write>(
    format: ExportFormat,
    summary: &LabelSummary,
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    match format {
        ExportFormat::Csv => export_label_counts_csv(&summary.labels, writer, export_path),
        ExportFormat::Text => export_label_counts_text(&summary.labels, writer, export_path),
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, summary).map_err(|e| ExportError::Json {
                path: export_path.to_path_buf(),
                source: e,
            })?;
            writeln!(writer).map_err(|e| ExportError::Io {
                path: export_path.to_path_buf(),
                source: e,
            })?;
            Ok(summary.labels.len())
        }
    }
}

/// Export label counts to CSV with a `label,count` header.
///
/// Unlabelled items are counted under an empty label.
pub fn export_label_counts_csv<W: Write>(
    counts: &[LabelCount],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(["label", "count"]).map_err(csv_err)?;
    for entry in counts {
        let count = entry.count.to_string();
        csv_writer
            .write_record([entry.label.as_str(), count.as_str()])
            .map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(counts.len())
}

/// Export label counts as tab-separated lines, `(none)` for unlabelled.
pub fn export_label_counts_text<W: Write>(
    counts: &[LabelCount],
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let io_err = |e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    };

    for entry in counts {
        let label = if entry.label.is_empty() {
            "(none)"
        } else {
            entry.label.as_str()
        };
        writeln!(writer, "{label}\t{}", entry.count).map_err(io_err)?;
    }

    writer.flush().map_err(io_err)?;
    Ok(counts.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn make_memory(title: &str, emotion: Option<&str>) -> Memory {
        Memory {
            id: Some(format!("id-{title}")),
            title: Some(title.to_string()),
            created_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()),
            ..Memory::with_emotion(emotion)
        }
    }

    #[test]
    fn test_csv_export() {
        let a = make_memory("Beach", Some("😀 Happy"));
        let b = make_memory("Rain", None);
        let mut buf = Vec::new();
        let count = export_csv(&[&a, &b], &mut buf, Path::new("out.csv"), StripMode::Codepoint)
            .unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        let mut lines = output.lines();
        assert_eq!(
            lines.next(),
            Some("id,title,emotion,label,created_at,image_url,description")
        );
        assert_eq!(
            lines.next(),
            Some("id-Beach,Beach,😀 Happy,Happy,2024-05-01T10:00:00+00:00,,")
        );
        assert_eq!(lines.next(), Some("id-Rain,Rain,,,2024-05-01T10:00:00+00:00,,"));
    }

    #[test]
    fn test_json_export_keeps_extra_attributes() {
        let mut memory = make_memory("Beach", Some("Happy"));
        memory
            .extra
            .insert("likes".to_string(), serde_json::json!(7));
        let mut buf = Vec::new();
        let count = export_json(&[&memory], &mut buf, Path::new("out.json")).unwrap();
        assert_eq!(count, 1);

        let back: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(back[0]["title"], "Beach");
        assert_eq!(back[0]["likes"], 7);
    }

    #[test]
    fn test_text_export() {
        let a = make_memory("Beach", Some("😀 Happy"));
        let untitled = Memory::with_emotion(Some("Sad"));
        let mut buf = Vec::new();
        export_text(&[&a, &untitled], &mut buf, Path::new("-"), StripMode::Codepoint).unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert_eq!(output, "[Happy] Beach (2024-05-01)\n[Sad] (untitled)\n");
    }

    #[test]
    fn test_export_dispatch_and_empty_selection() {
        let mut buf = Vec::new();
        let count = export(
            ExportFormat::Json,
            &[],
            &mut buf,
            Path::new("out.json"),
            StripMode::Codepoint,
        )
        .unwrap();
        assert_eq!(count, 0);
        assert_eq!(String::from_utf8(buf).unwrap().trim(), "[]");
    }

    #[test]
    fn test_format_names() {
        assert_eq!(ExportFormat::from_name("CSV"), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::from_name("xml"), None);
        assert_eq!(ExportFormat::default(), ExportFormat::Text);
    }

    fn count(label: &str, count: usize) -> LabelCount {
        LabelCount {
            label: label.to_string(),
            count,
        }
    }

    #[test]
    fn test_label_counts_csv_quotes_separators() {
        let counts = [count("Happy, mostly", 1), count("Sad \"ish\"", 1), count("", 2)];
        let mut buf = Vec::new();
        let written = export_label_counts_csv(&counts, &mut buf, Path::new("labels.csv")).unwrap();
        assert_eq!(written, 3);

        let output = String::from_utf8(buf).unwrap();
        assert_eq!(
            output,
            "label,count\n\"Happy, mostly\",1\n\"Sad \"\"ish\"\"\",1\n,2\n"
        );

        let mut reader = csv::Reader::from_reader(output.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.len() == 2));
        assert_eq!(&rows[0][0], "Happy, mostly");
        assert_eq!(&rows[1][0], "Sad \"ish\"");
        assert_eq!(&rows[2][0], "");
    }

    #[test]
    fn test_label_counts_text_and_json() {
        let items = ["😀 Happy", "Happy", "😢 Sad"];
        let summary = LabelSummary::from_items(&items, StripMode::Codepoint);

        let mut buf = Vec::new();
        export_label_counts(ExportFormat::Text, &summary, &mut buf, Path::new("-")).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Happy\t2\nSad\t1\n");

        let mut buf = Vec::new();
        let written =
            export_label_counts(ExportFormat::Json, &summary, &mut buf, Path::new("-")).unwrap();
        assert_eq!(written, 2);
        let back: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(back["total"], 3);
        assert_eq!(back["labels"][0]["label"], "Happy");
    }
}
