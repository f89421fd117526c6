//! Record listing and creation payloads (`{api}/test`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned record identifier. The backend uses integer keys, but any
/// scalar is accepted and displayed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(number) => write!(f, "{number}"),
            RecordId::Text(text) => f.write_str(text),
        }
    }
}

/// A record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
    /// Raw timestamp as sent by the server; parsing happens at render time.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of `GET {api}/test`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordList {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Vec<Record>>,
    #[serde(default)]
    pub count: Option<u64>,
}

/// Body of `POST {api}/test`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    pub name: String,
    pub value: String,
}

/// Structured error body returned by the backend for non-success statuses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_list_parses_backend_shape() {
        let list: RecordList = serde_json::from_value(json!({
            "success": true,
            "count": 2,
            "data": [
                { "id": 1, "name": "alpha", "value": "1", "created_at": "Tue, 02 Jan 2024 03:04:05 GMT" },
                { "id": 2, "name": "beta", "value": null, "created_at": null }
            ]
        }))
        .unwrap();

        assert!(list.success);
        assert_eq!(list.count, Some(2));
        let data = list.data.unwrap();
        assert_eq!(data[0].id.to_string(), "1");
        assert_eq!(data[1].value, None);
        assert_eq!(data[1].created_at, None);
    }

    #[test]
    fn rate_limited_body_is_not_a_success() {
        let list: RecordList = serde_json::from_value(json!({ "error": "Too many requests" })).unwrap();
        assert!(!list.success);
        assert!(list.data.is_none());
    }

    #[test]
    fn textual_ids_are_preserved() {
        let record: Record = serde_json::from_value(json!({ "id": "a-7", "name": "n" })).unwrap();
        assert_eq!(record.id, RecordId::Text("a-7".into()));
    }
}
