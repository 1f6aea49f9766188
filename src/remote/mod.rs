pub mod supabase;

use async_trait::async_trait;
use thiserror::Error;

use crate::post::post_model::{ImageFile, LikePatch, Post, PostRecord};

/// Transport-level failures from the hosted backend. Coordinators classify
/// these into the user-facing taxonomy at their boundary.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request timed out")]
    Timeout,

    #[error("service rejected the request ({status}): {message}")]
    Service { status: u16, message: String },

    #[error("transport failure: {0}")]
    Transport(String),
}

/// Abstract contract of the hosted object-store + row-store. There is no
/// transactional guarantee between an upload and a row insert; callers
/// sequence the two themselves.
#[async_trait]
pub trait RemoteDataService: Send + Sync {
    /// Upload a file under `key` and return its durable public URL.
    async fn upload_file(
        &self,
        bucket: &str,
        key: &str,
        file: &ImageFile,
    ) -> Result<String, RemoteError>;

    /// Insert a post row; the returned row carries the server-assigned id
    /// and creation timestamp.
    async fn insert_row(&self, record: PostRecord) -> Result<Post, RemoteError>;

    /// All post rows, ordered by creation time descending.
    async fn select_rows(&self) -> Result<Vec<Post>, RemoteError>;

    /// Partial update of a single row's like fields.
    async fn update_row(&self, id: &str, patch: LikePatch) -> Result<(), RemoteError>;
}
