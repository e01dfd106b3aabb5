//! Chat export input model.
//!
//! Only the fields the pipeline reads are modelled. A post's `text` is
//! either a plain string or a list of fragments (plain strings or
//! entity objects carrying their own `text`); anything else reads as
//! empty text.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// Input-shape failures. Data-quality problems inside posts are never errors.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("archive root must be a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("`messages` must be an array, found {0}")]
    MessagesNotArray(&'static str),

    #[error("invalid archive JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ── Post text ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PostText {
    Plain(String),
    Fragments(Vec<TextFragment>),
    Entity { text: String },
    Other(IgnoredAny),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TextFragment {
    Text(String),
    /// Formatting entity: `{"type": "bold", "text": "..."}`.
    Entity { text: String },
    Other(IgnoredAny),
}

impl PostText {
    /// Concatenate every text-bearing fragment, in order, with no separator.
    pub fn flatten(&self) -> String {
        match self {
            Self::Plain(s) => s.clone(),
            Self::Entity { text } => text.clone(),
            Self::Fragments(parts) => parts
                .iter()
                .filter_map(|p| match p {
                    TextFragment::Text(s) | TextFragment::Entity { text: s } => Some(s.as_str()),
                    TextFragment::Other(_) => None,
                })
                .collect(),
            Self::Other(_) => String::new(),
        }
    }
}

// ── Post ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(default)]
    pub text: Option<PostText>,
}

impl Post {
    pub fn is_message(&self) -> bool {
        self.kind.as_deref() == Some("message")
    }

    pub fn flat_text(&self) -> String {
        self.text.as_ref().map(PostText::flatten).unwrap_or_default()
    }
}

fn lenient_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(match v {
        Value::String(s) => Some(s),
        _ => None,
    })
}

// ── Archive ──────────────────────────────────────────────────────────

/// The whole export, posts in archive order.
#[derive(Debug, Clone, Default)]
pub struct Archive {
    pub posts: Vec<Post>,
}

impl Archive {
    pub fn from_json_str(json: &str) -> Result<Self, ArchiveError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Validate the top-level shape. A missing `messages` key is an empty archive.
    pub fn from_value(value: Value) -> Result<Self, ArchiveError> {
        let mut root = match value {
            Value::Object(root) => root,
            other => return Err(ArchiveError::NotAnObject(json_kind(&other))),
        };

        let messages = match root.remove("messages") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(other) => return Err(ArchiveError::MessagesNotArray(json_kind(&other))),
        };

        let mut posts = Vec::with_capacity(messages.len());
        for (idx, item) in messages.into_iter().enumerate() {
            match serde_json::from_value::<Post>(item) {
                Ok(post) => posts.push(post),
                // Non-object entries carry no post; skip them like non-message kinds.
                Err(e) => debug!(index = idx, error = %e, "skipping unreadable archive entry"),
            }
        }

        Ok(Archive { posts })
    }

    pub fn messages(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter().filter(|p| p.is_message())
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post(v: Value) -> Post {
        serde_json::from_value(v).unwrap()
    }

    // ── flattening ───────────────────────────────────────────────────

    #[test]
    fn test_flatten_plain_string() {
        let p = post(json!({"id": 1, "type": "message", "text": "Ayat No: 1"}));
        assert_eq!(p.flat_text(), "Ayat No: 1");
    }

    #[test]
    fn test_flatten_fragment_list() {
        let p = post(json!({
            "id": 2,
            "type": "message",
            "text": ["Surah ", {"type": "bold", "text": "No 2"}, {"type": "link"}, " end"]
        }));
        assert_eq!(p.flat_text(), "Surah No 2 end");
    }

    #[test]
    fn test_flatten_missing_or_odd_text() {
        assert_eq!(post(json!({"id": 3, "type": "message"})).flat_text(), "");
        assert_eq!(post(json!({"id": 4, "type": "message", "text": 17})).flat_text(), "");
        assert_eq!(post(json!({"id": 5, "type": "message", "text": null})).flat_text(), "");
        assert_eq!(
            post(json!({"id": 6, "type": "message", "text": {"text": "solo"}})).flat_text(),
            "solo"
        );
    }

    #[test]
    fn test_unknown_fragment_shapes_read_as_empty() {
        let p = post(json!({
            "id": 7,
            "type": "message",
            "text": ["Ayat ", 5, {"type": "link", "href": "x"}, null, "No 5"]
        }));
        assert_eq!(p.flat_text(), "Ayat No 5");
        assert!(matches!(p.text, Some(PostText::Fragments(_))));

        let p = post(json!({"id": 8, "type": "message", "text": {"entities": []}}));
        assert!(matches!(p.text, Some(PostText::Other(_))));
        assert_eq!(p.flat_text(), "");
    }

    #[test]
    fn test_lenient_fields() {
        let p = post(json!({"id": "42", "type": 7}));
        assert_eq!(p.id, Some(42));
        assert_eq!(p.kind, None);
        assert!(!p.is_message());
    }

    // ── archive shape ────────────────────────────────────────────────

    #[test]
    fn test_archive_missing_messages_is_empty() {
        let a = Archive::from_value(json!({"name": "channel"})).unwrap();
        assert!(a.posts.is_empty());
    }

    #[test]
    fn test_archive_rejects_bad_shapes() {
        assert!(matches!(
            Archive::from_value(json!([1, 2])),
            Err(ArchiveError::NotAnObject("array"))
        ));
        assert!(matches!(
            Archive::from_value(json!({"messages": "nope"})),
            Err(ArchiveError::MessagesNotArray("string"))
        ));
        assert!(matches!(
            Archive::from_json_str("{not json"),
            Err(ArchiveError::Json(_))
        ));
    }

    #[test]
    fn test_archive_filters_messages_and_skips_junk() {
        let a = Archive::from_value(json!({"messages": [
            {"id": 1, "type": "service", "text": "joined"},
            {"id": 2, "type": "message", "text": "hello"},
            "garbage",
        ]}))
        .unwrap();
        assert_eq!(a.posts.len(), 2);
        let ids: Vec<_> = a.messages().map(|p| p.id).collect();
        assert_eq!(ids, vec![Some(2)]);
    }
}
