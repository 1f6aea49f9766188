pub mod feed_service;
pub mod feed_state;
