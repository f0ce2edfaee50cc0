// Memoria - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Labelled (the only view of a record the filter needs)
// =============================================================================

/// Anything that carries an optional free-text emotion label.
///
/// The filter never looks at any other attribute, so callers can filter
/// their own record types by implementing this one method.
pub trait Labelled {
    /// The raw emotion label, including any decorative emoji prefix.
    /// `None` when the record has no label at all.
    fn emotion(&self) -> Option<&str>;
}

impl<T: Labelled + ?Sized> Labelled for &T {
    fn emotion(&self) -> Option<&str> {
        (**self).emotion()
    }
}

impl Labelled for str {
    fn emotion(&self) -> Option<&str> {
        Some(self)
    }
}

impl Labelled for String {
    fn emotion(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl Labelled for Option<String> {
    fn emotion(&self) -> Option<&str> {
        self.as_deref()
    }
}

// =============================================================================
// Memory
// =============================================================================

/// One user-created journal entry.
///
/// Only `emotion` matters for filtering. The named fields are the ones the
/// exporters know how to lay out; every other attribute of the source record
/// is kept verbatim in `extra` so a load/export cycle does not drop data.
///
/// Reading is strict about `emotion` only. A named field whose value cannot
/// be used (wrong type, unparseable date) stays `None` and its raw value
/// remains in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Memory {
    /// Record identifier as issued by the backend (`id` or `_id`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Emotion label, e.g. "😀 Happy". JSON `null` and a missing key both
    /// become `None`.
    pub emotion: Option<String>,

    /// Creation time (`created_at` or `createdAt`). Date-only values are
    /// read as midnight UTC.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Location of the uploaded image (`image_url`, `imageUrl` or `image`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Every attribute not named above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for Memory {
    type Error = String;

    fn try_from(mut fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let emotion = match fields.remove("emotion") {
            None | Some(Value::Null) => None,
            Some(Value::String(label)) => Some(label),
            Some(other) => {
                return Err(format!(
                    "invalid type for `emotion`: expected a string or null, found {other}"
                ))
            }
        };

        Ok(Self {
            id: take_field(&mut fields, &["id", "_id"], identifier),
            title: take_field(&mut fields, &["title"], text),
            description: take_field(&mut fields, &["description"], text),
            emotion,
            created_at: take_field(&mut fields, &["created_at", "createdAt"], timestamp),
            image_url: take_field(&mut fields, &["image_url", "imageUrl", "image"], text),
            extra: fields,
        })
    }
}

/// Remove and convert the first of `keys` holding a usable value.
///
/// `keys[0]` is the serialised name. Once a value is found, a leftover entry
/// under that name is dropped so the record never serialises a key twice.
fn take_field<T>(
    fields: &mut Map<String, Value>,
    keys: &[&str],
    convert: fn(&Value) -> Option<T>,
) -> Option<T> {
    let found = keys.iter().find_map(|key| {
        let value = fields.get(*key).and_then(convert)?;
        fields.remove(*key);
        Some(value)
    });
    if found.is_some() {
        fields.remove(keys[0]);
    }
    found
}

fn text(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let raw = value.as_str()?;
    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Some(time.with_timezone(&Utc));
    }
    let midnight = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight))
}

impl Memory {
    /// Convenience constructor used by tests and callers building records
    /// by hand.
    pub fn with_emotion(emotion: Option<&str>) -> Self {
        Self {
            emotion: emotion.map(str::to_string),
            ..Default::default()
        }
    }
}

impl Labelled for Memory {
    fn emotion(&self) -> Option<&str> {
        self.emotion.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_and_missing_emotion_are_none() {
        let with_null: Memory = serde_json::from_str(r#"{"emotion": null}"#).unwrap();
        let missing: Memory = serde_json::from_str(r#"{"title": "Beach"}"#).unwrap();
        assert_eq!(with_null.emotion, None);
        assert_eq!(missing.emotion, None);
        assert_eq!(missing.title.as_deref(), Some("Beach"));
    }

    #[test]
    fn test_backend_field_aliases() {
        let json = r#"{
            "_id": "64f0c1",
            "emotion": "😀 Happy",
            "createdAt": "2024-05-01T10:00:00Z",
            "imageUrl": "/uploads/beach.jpg"
        }"#;
        let memory: Memory = serde_json::from_str(json).unwrap();
        assert_eq!(memory.id.as_deref(), Some("64f0c1"));
        assert!(memory.created_at.is_some());
        assert_eq!(memory.image_url.as_deref(), Some("/uploads/beach.jpg"));
        assert!(memory.extra.is_empty(), "aliased keys must not leak into extra");
    }

    #[test]
    fn test_id_and_underscore_id_together() {
        let json = r#"{"_id": "a1", "id": "a1", "emotion": "😀 Happy"}"#;
        let memory: Memory = serde_json::from_str(json).unwrap();
        assert_eq!(memory.id.as_deref(), Some("a1"));
        assert_eq!(memory.extra.get("_id"), Some(&serde_json::json!("a1")));

        let back = serde_json::to_string(&memory).unwrap();
        assert_eq!(back.matches("\"id\"").count(), 1, "got: {back}");
    }

    #[test]
    fn test_numeric_id_becomes_text() {
        let memory: Memory = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(memory.id.as_deref(), Some("42"));
    }

    #[test]
    fn test_date_only_created_at_is_midnight_utc() {
        let json = r#"{"emotion": "Happy", "createdAt": "2024-06-01"}"#;
        let memory: Memory = serde_json::from_str(json).unwrap();
        assert_eq!(
            memory.created_at,
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_unreadable_created_at_kept_in_extra() {
        let json = r#"{"emotion": "Happy", "createdAt": "last tuesday"}"#;
        let memory: Memory = serde_json::from_str(json).unwrap();
        assert_eq!(memory.created_at, None);
        assert_eq!(memory.emotion.as_deref(), Some("Happy"));
        assert_eq!(
            memory.extra.get("createdAt"),
            Some(&serde_json::json!("last tuesday"))
        );
    }

    #[test]
    fn test_image_url_and_image_together() {
        let json = r#"{"imageUrl": "/uploads/a.jpg", "image": "a.jpg", "emotion": "Calm"}"#;
        let memory: Memory = serde_json::from_str(json).unwrap();
        assert_eq!(memory.image_url.as_deref(), Some("/uploads/a.jpg"));
        assert_eq!(memory.extra.get("image"), Some(&serde_json::json!("a.jpg")));
    }

    #[test]
    fn test_wrong_type_on_title_is_tolerated() {
        let json = r#"{"title": {"en": "Beach"}, "emotion": "Happy"}"#;
        let memory: Memory = serde_json::from_str(json).unwrap();
        assert_eq!(memory.title, None);
        assert!(memory.extra.contains_key("title"));

        // The raw value round-trips under its own key.
        let back = serde_json::to_value(&memory).unwrap();
        assert_eq!(back["title"]["en"], "Beach");
    }

    #[test]
    fn test_non_string_emotion_is_rejected() {
        let result: Result<Memory, _> = serde_json::from_str(r#"{"emotion": 5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_attributes_kept_in_extra() {
        let json = r#"{"emotion": "Sad", "likes": 3, "tags": ["rain"]}"#;
        let memory: Memory = serde_json::from_str(json).unwrap();
        assert_eq!(memory.extra.get("likes"), Some(&serde_json::json!(3)));

        let back = serde_json::to_value(&memory).unwrap();
        assert_eq!(back["tags"], serde_json::json!(["rain"]));
    }

    #[test]
    fn test_labelled_impls() {
        assert_eq!(Memory::with_emotion(Some("Calm")).emotion(), Some("Calm"));
        assert_eq!(Labelled::emotion(&None::<String>), None);
        assert_eq!(Labelled::emotion("Happy"), Some("Happy"));
        assert_eq!(Labelled::emotion(&"Sad".to_string()), Some("Sad"));
    }
}
