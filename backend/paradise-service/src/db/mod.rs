/// Database access layer
///
/// Repository functions over the shared `PgPool`. The create-or-replace
/// transaction lives in the service layer; everything here is a single
/// statement against the pool.
pub mod like_repo;
pub mod post_repo;
