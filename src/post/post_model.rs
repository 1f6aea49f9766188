use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::model::Author;

/// A persisted feed post. `id` and `created_at` are assigned by the remote
/// service at insert time; a client-generated id is never authoritative.
/// Read-only after creation except for `likes`/`liked_by`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub author: Author,
    /// Non-negative; older rows may miss the column, the reconciler
    /// normalizes missing or negative values to 0 on load.
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub liked_by: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new post row. Carries no id or timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct PostRecord {
    pub content: String,
    pub image_url: Option<String>,
    pub author: Author,
    pub likes: i64,
    pub liked_by: Vec<String>,
}

/// Partial update persisted by the like flow.
#[derive(Debug, Clone, Serialize)]
pub struct LikePatch {
    pub likes: i64,
    pub liked_by: Vec<String>,
}

/// A raw image selected for upload.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub data: Vec<u8>,
    pub content_type: Option<String>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            data,
            content_type: None,
        }
    }

    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.file_name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_lowercase())
    }

    /// Collision-resistant object key: random token plus the original
    /// extension, so concurrent uploads never overwrite each other.
    pub fn storage_key(&self) -> String {
        let token = Uuid::new_v4();
        match self.extension() {
            Some(ext) => format!("{token}.{ext}"),
            None => token.to_string(),
        }
    }
}

/// Transient composer input. Held by the feed state and cleared only after a
/// confirmed successful submit.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub content: String,
    pub image: Option<ImageFile>,
}

impl PostDraft {
    /// Trimmed content, or an error when the draft is empty-and-imageless.
    pub fn validated_content(&self) -> Result<String, String> {
        let content = self.content.trim();
        if content.is_empty() && self.image.is_none() {
            return Err("a post needs text or an image".to_string());
        }
        Ok(content.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty() && self.image.is_none()
    }
}
