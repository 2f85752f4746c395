//! Data Transfer Objects - request/response types for the API.
//!
//! Field names follow the JSON the web client already sends (`postId`,
//! `profilePicture`, `Music`). Request fields are read as raw JSON first so
//! that a wrongly typed value becomes a validation message for that field
//! instead of rejecting the whole body.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Text of a value that counts as supplied.
///
/// `null`, `false`, `0` and `""` count as absent. Any other scalar is taken in
/// its JSON text form, so `42` becomes `"42"`.
fn supplied_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// Text stored for an opaque column value. `null` stores NULL.
fn stored_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn supplied<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| supplied_text(&value))
}

/// A key that is present, even as `null`, yields `Some`. Pair with
/// `#[serde(default)]` so a missing key stays `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| Some(stored_text(value)))
}

/// POST /api/profile
///
/// Optional fields distinguish a missing key (`None`, column untouched) from
/// an explicit `null` (`Some(None)`, column cleared).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "supplied")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub hobby: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub profile_picture: Option<Option<String>>,
    #[serde(rename = "Music", default, deserialize_with = "present")]
    pub music: Option<Option<String>>,
}

/// One `{postId, category}` pair as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationItem {
    pub post_id: Option<String>,
    pub category: Option<String>,
}

impl ClassificationItem {
    /// Read one batch entry. A non-object entry has neither field.
    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| value.get(name).and_then(supplied_text);
        Self {
            post_id: field("postId"),
            category: field("category"),
        }
    }
}

/// POST /api/classify-posts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifyPostsRequest {
    #[serde(default)]
    pub classifications: Option<Value>,
}

impl ClassifyPostsRequest {
    /// The submitted items, or `None` when `classifications` is missing or
    /// not an array.
    pub fn items(&self) -> Option<Vec<ClassificationItem>> {
        match self.classifications.as_ref()? {
            Value::Array(entries) => {
                Some(entries.iter().map(ClassificationItem::from_value).collect())
            }
            _ => None,
        }
    }
}

/// Per-item outcome, in request order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub post_id: String,
    pub category: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyPostsResponse {
    pub updated_count: usize,
    pub total_count: usize,
    pub results: Vec<ClassificationResult>,
}

/// GET /api/classify-posts?limit=
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnclassifiedQuery {
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub message: String,
    pub username: String,
    pub timestamp: String,
    pub categories: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnclassifiedPostsResponse {
    pub count: usize,
    pub posts: Vec<PostSummary>,
}

/// POST /api/views
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackViewRequest {
    #[serde(default, deserialize_with = "supplied")]
    pub post_id: Option<String>,
    #[serde(default, deserialize_with = "supplied")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackViewResponse {
    pub view_count: i64,
    pub is_new_view: bool,
}

/// GET /api/views/{post_id}
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostViewStatsResponse {
    pub post_id: String,
    pub view_count: i64,
    pub unique_viewers: u64,
}
