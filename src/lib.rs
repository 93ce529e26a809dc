pub mod config;
pub mod fake_feed;
pub mod format;
pub mod http_cache;
pub mod http_client;
pub mod normalize;
pub mod rankings;
pub mod report;
pub mod score_feed;
pub mod score_fetch;
pub mod state;
pub mod timeline;
