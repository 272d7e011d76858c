/// Background jobs
///
/// - Post expiry: periodic deletion of posts past the retention window
pub mod post_expiry;

pub use post_expiry::start_post_expiry;
