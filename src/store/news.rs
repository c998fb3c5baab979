//! News article record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// == News Article ==
/// A news article served to the public website.
///
/// Ids are epoch-millisecond strings assigned at creation; new articles are
/// prepended so the list stays newest-first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewsArticle {
    /// Creates an article stamped with the current time.
    pub fn new(title: String, content: String) -> Self {
        Self {
            id: chrono::Utc::now().timestamp_millis().to_string(),
            title,
            content,
            created_at: chrono::Utc::now().to_rfc3339(),
            published: false,
            ..Self::default()
        }
    }
}
