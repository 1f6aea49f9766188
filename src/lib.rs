//! Client-side coordination core for the KHinsta feed.
//!
//! Owns the local feed state and keeps it converged with a hosted
//! object-store + row-store backend that offers no transactional guarantee
//! across calls. Submission, reconciliation and like handling are optimistic
//! with defined rollbacks; rendering and authentication are external
//! collaborators.

pub mod config;
pub mod feed;
pub mod like;
pub mod post;
pub mod remote;
pub mod user;
pub mod utils;

pub use config::RemoteConfig;
pub use feed::feed_service::FeedService;
pub use feed::feed_state::FeedState;
pub use like::like_service::LikeService;
pub use post::post_model::{ImageFile, Post, PostDraft};
pub use post::post_service::PostSubmitService;
pub use remote::supabase::SupabaseRemote;
pub use remote::{RemoteDataService, RemoteError};
pub use user::model::{AuthProvider, Author, CurrentUser};
pub use utils::error::FeedError;
