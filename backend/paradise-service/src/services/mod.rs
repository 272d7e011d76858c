/// Business logic layer for paradise-service
///
/// - Post service: create-or-replace, likes, list/get queries
/// - Publisher: post-commit external publish sink
pub mod posts;
pub mod publisher;

pub use posts::{CreateOutcome, PostService, MAX_CONTENT_CHARS};
pub use publisher::{NoopPublisher, PublishSink, WebhookPublisher};
