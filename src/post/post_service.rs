use std::sync::Arc;

use log::{debug, info, warn};

use crate::feed::feed_service::FeedService;
use crate::feed::feed_state::FeedState;
use crate::post::post_model::{ImageFile, Post, PostRecord};
use crate::remote::{RemoteDataService, RemoteError};
use crate::user::model::{Author, CurrentUser};
use crate::utils::error::FeedError;

/// Orchestrates post creation: optional image upload, row insert, optimistic
/// prepend, and a follow-up reconciliation sequenced strictly after the
/// insert's success response.
pub struct PostSubmitService {
    state: Arc<FeedState>,
    remote: Arc<dyn RemoteDataService>,
    feed: FeedService,
    bucket: String,
}

impl PostSubmitService {
    pub fn new(
        state: Arc<FeedState>,
        remote: Arc<dyn RemoteDataService>,
        bucket: impl Into<String>,
    ) -> Self {
        let feed = FeedService::new(state.clone(), remote.clone());
        Self {
            state,
            remote,
            feed,
            bucket: bucket.into(),
        }
    }

    /// Submit the draft currently held by the feed state. The draft is
    /// cleared only after the post is confirmed persisted, so a failure
    /// leaves the composer input intact.
    pub async fn submit_draft(&self, author: &CurrentUser) -> Result<Post, FeedError> {
        let draft = self.state.draft().await;
        let post = self.submit(&draft.content, draft.image, author).await?;
        self.state.clear_draft().await;
        Ok(post)
    }

    /// Create a post from explicit inputs.
    ///
    /// Ordering is fixed: the upload must complete before the row insert so
    /// no row ever references a missing image. An upload failure aborts
    /// before the insert; an insert failure after a successful upload leaves
    /// local state untouched (the uploaded file is an accepted orphan, not
    /// cleaned up here).
    pub async fn submit(
        &self,
        content: &str,
        image: Option<ImageFile>,
        author: &CurrentUser,
    ) -> Result<Post, FeedError> {
        let content = content.trim();
        if content.is_empty() && image.is_none() {
            return Err(FeedError::ValidationError(
                "a post needs text or an image".to_string(),
            ));
        }

        let image_url = match &image {
            Some(file) => Some(self.upload(file).await?),
            None => None,
        };

        let record = PostRecord {
            content: content.to_string(),
            image_url,
            author: Author::from(author),
            likes: 0,
            liked_by: Vec::new(),
        };

        let post = self.remote.insert_row(record).await.map_err(|e| {
            warn!("post insert failed: {e}");
            match e {
                RemoteError::Timeout => FeedError::NetworkError(e.to_string()),
                _ => FeedError::PersistError(e.to_string()),
            }
        })?;

        info!("post {} persisted", post.id);

        if !self.state.prepend(post.clone()).await {
            // View gone or the reconciler already picked the row up.
            debug!("skipping optimistic prepend for post {}", post.id);
            return Ok(post);
        }

        // Converge with authoritative order; concurrent posts from other
        // users may have landed in between. Non-fatal if it fails, the
        // optimistic entry stays until the next refresh.
        if let Err(e) = self.feed.refresh().await {
            warn!("post-submit refresh failed: {e}");
        }

        Ok(post)
    }

    async fn upload(&self, file: &ImageFile) -> Result<String, FeedError> {
        let key = file.storage_key();
        self.remote
            .upload_file(&self.bucket, &key, file)
            .await
            .map_err(|e| {
                warn!("image upload failed for key {key}: {e}");
                match e {
                    RemoteError::Timeout => FeedError::NetworkError(e.to_string()),
                    _ => FeedError::UploadError(e.to_string()),
                }
            })
    }
}
