use std::collections::HashSet;

use tokio::sync::Mutex;

use crate::post::post_model::{ImageFile, Post, PostDraft};

/// Local feed state, owned by the composing application for the lifetime of
/// a session. All mutation goes through this container under one lock, so
/// interleaved async operations cannot lose updates. Once closed, late
/// completions are dropped instead of mutating state for a gone view.
pub struct FeedState {
    inner: Mutex<FeedInner>,
}

#[derive(Default)]
struct FeedInner {
    posts: Vec<Post>,
    /// (post id, viewer id) pairs liked during this session.
    liked: HashSet<(String, String)>,
    draft: PostDraft,
    closed: bool,
}

/// Outcome of an optimistic like application.
pub(crate) enum LikeBegin {
    /// Viewer already liked this post in this session; count unchanged.
    AlreadyLiked(i64),
    /// Count incremented and session marker set; carries the patch payload.
    Applied { likes: i64, liked_by: Vec<String> },
    UnknownPost,
    Closed,
}

impl FeedState {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(FeedInner::default()),
        }
    }

    /// Snapshot of the current feed, newest first.
    pub async fn posts(&self) -> Vec<Post> {
        self.inner.lock().await.posts.clone()
    }

    pub async fn post_count(&self) -> usize {
        self.inner.lock().await.posts.len()
    }

    pub async fn like_count(&self, post_id: &str) -> Option<i64> {
        let inner = self.inner.lock().await;
        inner.posts.iter().find(|p| p.id == post_id).map(|p| p.likes)
    }

    pub async fn set_draft_content(&self, content: impl Into<String>) {
        self.inner.lock().await.draft.content = content.into();
    }

    pub async fn attach_image(&self, image: ImageFile) {
        self.inner.lock().await.draft.image = Some(image);
    }

    pub async fn draft(&self) -> PostDraft {
        self.inner.lock().await.draft.clone()
    }

    pub(crate) async fn clear_draft(&self) {
        self.inner.lock().await.draft = PostDraft::default();
    }

    /// Stop acting on in-flight results; the owning view is gone.
    pub async fn close(&self) {
        self.inner.lock().await.closed = true;
    }

    pub async fn is_closed(&self) -> bool {
        self.inner.lock().await.closed
    }

    /// Prepend a freshly persisted post. Returns false when the state is
    /// closed or the id is already present; the caller then skips any
    /// follow-up mutation.
    pub(crate) async fn prepend(&self, post: Post) -> bool {
        let mut inner = self.inner.lock().await;
        if inner.closed || inner.posts.iter().any(|p| p.id == post.id) {
            return false;
        }
        inner.posts.insert(0, post);
        true
    }

    /// Wholesale replacement with an authoritative fetch. Returns false when
    /// the state was closed while the fetch was in flight.
    pub(crate) async fn replace(&self, posts: Vec<Post>) -> bool {
        let mut inner = self.inner.lock().await;
        if inner.closed {
            return false;
        }
        inner.posts = posts;
        true
    }

    /// Apply the optimistic half of a like: bump the count and set the
    /// session marker in one critical section.
    pub(crate) async fn begin_like(&self, post_id: &str, viewer_id: &str) -> LikeBegin {
        let mut inner = self.inner.lock().await;
        if inner.closed {
            return LikeBegin::Closed;
        }

        let marker = (post_id.to_string(), viewer_id.to_string());
        if inner.liked.contains(&marker) {
            let likes = inner
                .posts
                .iter()
                .find(|p| p.id == post_id)
                .map(|p| p.likes)
                .unwrap_or(0);
            return LikeBegin::AlreadyLiked(likes);
        }

        let Some(post) = inner.posts.iter_mut().find(|p| p.id == post_id) else {
            return LikeBegin::UnknownPost;
        };
        post.likes += 1;
        if !post.liked_by.iter().any(|v| v == viewer_id) {
            post.liked_by.push(viewer_id.to_string());
        }
        let likes = post.likes;
        let liked_by = post.liked_by.clone();
        inner.liked.insert(marker);

        LikeBegin::Applied { likes, liked_by }
    }

    /// Roll back a like whose persist failed: restore the pre-increment
    /// count and drop the session marker so a retry is possible.
    pub(crate) async fn revert_like(&self, post_id: &str, viewer_id: &str) {
        let mut inner = self.inner.lock().await;
        inner
            .liked
            .remove(&(post_id.to_string(), viewer_id.to_string()));
        if let Some(post) = inner.posts.iter_mut().find(|p| p.id == post_id) {
            post.likes = (post.likes - 1).max(0);
            post.liked_by.retain(|v| v != viewer_id);
        }
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::model::Author;
    use chrono::Utc;

    fn post(id: &str, likes: i64) -> Post {
        Post {
            id: id.to_string(),
            content: format!("post {id}"),
            image_url: None,
            author: Author {
                name: "Ada".to_string(),
                surname: "L".to_string(),
                avatar_url: None,
            },
            likes,
            liked_by: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn prepend_rejects_duplicate_ids() {
        let state = FeedState::new();
        assert!(state.prepend(post("a", 0)).await);
        assert!(!state.prepend(post("a", 0)).await);
        assert_eq!(state.post_count().await, 1);
    }

    #[tokio::test]
    async fn closed_state_ignores_mutations() {
        let state = FeedState::new();
        state.close().await;
        assert!(!state.prepend(post("a", 0)).await);
        assert!(!state.replace(vec![post("b", 0)]).await);
        assert_eq!(state.post_count().await, 0);
    }

    #[tokio::test]
    async fn begin_like_is_idempotent_per_viewer() {
        let state = FeedState::new();
        state.prepend(post("a", 5)).await;

        match state.begin_like("a", "viewer-1").await {
            LikeBegin::Applied { likes, .. } => assert_eq!(likes, 6),
            _ => panic!("first like should apply"),
        }
        match state.begin_like("a", "viewer-1").await {
            LikeBegin::AlreadyLiked(likes) => assert_eq!(likes, 6),
            _ => panic!("second like should be a no-op"),
        }
    }

    #[tokio::test]
    async fn revert_like_restores_count_and_marker() {
        let state = FeedState::new();
        state.prepend(post("a", 2)).await;
        state.begin_like("a", "viewer-1").await;
        state.revert_like("a", "viewer-1").await;

        assert_eq!(state.like_count("a").await, Some(2));
        // Marker rolled back, so the like can be retried.
        match state.begin_like("a", "viewer-1").await {
            LikeBegin::Applied { likes, .. } => assert_eq!(likes, 3),
            _ => panic!("retry after revert should apply"),
        }
    }
}
