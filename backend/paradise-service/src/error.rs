/// Error types for paradise-service
///
/// Conflict variants carry the non-exceptional "a rule blocked this" signals
/// (cool-down hit, duplicate like) distinct from store failures. Errors are
/// converted to JSON HTTP responses for API clients.
use crate::models::PostView;
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;
use uuid::Uuid;

/// Result type for paradise-service operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Cool-down: the author already has a live post younger than the window.
    /// Carries the existing post (redacted) so the caller can display it.
    #[error("a new post cannot be created within 24 hours of your last post")]
    AlreadyPosted { existing: PostView },

    /// The (post, author) pair is already in the like-set.
    #[error("post already liked by this user")]
    AlreadyLiked,

    /// Like target does not exist.
    #[error("unknown post: {0}")]
    UnknownPost(Uuid),

    /// Lookup miss on a read path.
    #[error("not found: {0}")]
    NotFound(String),

    /// Request payload failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed request (e.g. no client address to derive identity from).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Store operation failed; the attempted transaction was rolled back.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::AlreadyPosted { .. } | AppError::AlreadyLiked => StatusCode::CONFLICT,
            AppError::UnknownPost(_) | AppError::Validation(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        match self {
            AppError::AlreadyPosted { existing } => {
                HttpResponse::build(status).json(serde_json::json!({
                    "error": self.to_string(),
                    "status": status.as_u16(),
                    "post": existing,
                }))
            }
            _ => HttpResponse::build(status).json(serde_json::json!({
                "error": self.to_string(),
                "status": status.as_u16(),
            })),
        }
    }
}

/// True when `err` is a database-level violation of the named constraint.
/// Used to turn unique/foreign-key violations into conflict signals.
pub fn is_constraint_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db) => db.constraint() == Some(constraint),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_variants_map_to_409() {
        assert_eq!(AppError::AlreadyLiked.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn unknown_post_maps_to_400() {
        assert_eq!(
            AppError::UnknownPost(Uuid::new_v4()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn lookup_miss_maps_to_404() {
        assert_eq!(
            AppError::NotFound("author".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn store_failures_map_to_500() {
        assert_eq!(
            AppError::Internal("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Database(sqlx::Error::PoolClosed).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
