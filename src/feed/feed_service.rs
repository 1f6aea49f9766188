use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, info, warn};

use crate::feed::feed_state::FeedState;
use crate::post::post_model::Post;
use crate::remote::{RemoteDataService, RemoteError};
use crate::utils::error::FeedError;

/// Reconciles local feed state with the authoritative post list. This is the
/// convergence point for optimistic insertions: the fetched sequence replaces
/// local state wholesale, deduplicated by id.
#[derive(Clone)]
pub struct FeedService {
    state: Arc<FeedState>,
    remote: Arc<dyn RemoteDataService>,
}

impl FeedService {
    pub fn new(state: Arc<FeedState>, remote: Arc<dyn RemoteDataService>) -> Self {
        Self { state, remote }
    }

    /// Fetch all posts, newest first, and replace local state with them.
    /// On failure the last-known-good state is kept and the error is
    /// non-fatal; the caller may retry.
    pub async fn refresh(&self) -> Result<Vec<Post>, FeedError> {
        let rows = self.remote.select_rows().await.map_err(|e| {
            warn!("feed refresh failed: {e}");
            match e {
                RemoteError::Timeout => FeedError::NetworkError(e.to_string()),
                _ => FeedError::FetchError(e.to_string()),
            }
        })?;

        let posts = normalize(rows);
        if !self.state.replace(posts.clone()).await {
            debug!("feed state closed, dropping fetched posts");
            return Ok(posts);
        }

        info!("feed refreshed, {} posts", posts.len());
        Ok(posts)
    }
}

/// Defensive load normalization: clamp missing/negative like counters to 0,
/// drop duplicate ids (first occurrence wins), and order by creation time
/// descending. The sort is stable, so ties keep the remote's return order.
fn normalize(mut rows: Vec<Post>) -> Vec<Post> {
    for post in &mut rows {
        if post.likes < 0 {
            post.likes = 0;
        }
    }

    let mut seen = HashSet::new();
    rows.retain(|post| seen.insert(post.id.clone()));
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    rows
}
