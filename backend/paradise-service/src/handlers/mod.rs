/// HTTP handlers for post endpoints
///
/// Route surface:
/// - `POST /posts` - create (or replace a stale) post
/// - `GET /posts` - list all live posts for the viewer
/// - `GET /posts/{author_id}` - single post by author
/// - `PUT /posts/{post_id}/like` - add the caller to a like-set
/// - `GET /whoami` - the caller's exposed author id
pub mod posts;

pub use posts::{create_post, get_author_post, like_post, list_posts, whoami};
