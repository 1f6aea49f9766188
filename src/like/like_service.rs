use std::sync::Arc;

use log::{debug, warn};

use crate::feed::feed_state::{FeedState, LikeBegin};
use crate::post::post_model::LikePatch;
use crate::remote::{RemoteDataService, RemoteError};
use crate::utils::error::FeedError;

/// Applies likes optimistically and persists them, idempotent per viewer
/// per session.
pub struct LikeService {
    state: Arc<FeedState>,
    remote: Arc<dyn RemoteDataService>,
}

impl LikeService {
    pub fn new(state: Arc<FeedState>, remote: Arc<dyn RemoteDataService>) -> Self {
        Self { state, remote }
    }

    /// Like `post_id` as `viewer_id` and return the updated count.
    ///
    /// A repeat like from the same viewer in the same session is a no-op
    /// returning the current count. On persist failure both the count and
    /// the session marker are rolled back, so a retry is possible.
    ///
    /// Known correctness gap: the persisted value is a blind overwrite of a
    /// locally computed count, so two concurrent likers can race and one
    /// increment is lost. Fixing this needs a server-side atomic increment
    /// or a conditional write keyed on the previously read value.
    pub async fn like(&self, post_id: &str, viewer_id: &str) -> Result<i64, FeedError> {
        let (likes, liked_by) = match self.state.begin_like(post_id, viewer_id).await {
            LikeBegin::AlreadyLiked(likes) => {
                debug!("viewer {viewer_id} already liked post {post_id}");
                return Ok(likes);
            }
            LikeBegin::UnknownPost => {
                return Err(FeedError::ValidationError(format!(
                    "unknown post: {post_id}"
                )));
            }
            LikeBegin::Closed => {
                return Err(FeedError::ValidationError(
                    "feed state is closed".to_string(),
                ));
            }
            LikeBegin::Applied { likes, liked_by } => (likes, liked_by),
        };

        match self.remote.update_row(post_id, LikePatch { likes, liked_by }).await {
            Ok(()) => Ok(likes),
            Err(e) => {
                warn!("like persist failed for post {post_id}: {e}");
                self.state.revert_like(post_id, viewer_id).await;
                Err(match e {
                    RemoteError::Timeout => FeedError::NetworkError(e.to_string()),
                    _ => FeedError::PersistError(e.to_string()),
                })
            }
        }
    }
}
