/// Post service - create-or-replace, likes, and query operations
use crate::db::{like_repo, post_repo};
use crate::error::{is_constraint_violation, AppError, Result};
use crate::models::{derive_author_id, PostColor, PostView, PostWithLikes};
use crate::services::publisher::PublishSink;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Longest content the publish sink downstream will accept.
pub const MAX_CONTENT_CHARS: usize = 280;

/// Outcome of a successful create. `published` is false when the post was
/// committed but the external sink rejected it (partial failure).
#[derive(Debug, Clone, Copy)]
pub struct CreateOutcome {
    pub post_id: Uuid,
    pub published: bool,
}

pub struct PostService {
    pool: PgPool,
    publisher: Arc<dyn PublishSink>,
    cooldown: Duration,
}

impl PostService {
    pub fn new(pool: PgPool, publisher: Arc<dyn PublishSink>, cooldown_hours: i64) -> Self {
        Self {
            pool,
            publisher,
            cooldown: Duration::hours(cooldown_hours),
        }
    }

    /// Create the author's post, replacing a stale one.
    ///
    /// The whole decision runs in one transaction: the author's current post
    /// is read under a row lock, the cool-down re-checked, and the replacement
    /// (delete + insert + self-like seed) committed atomically. Concurrent
    /// first posts from the same identity are resolved by the unique
    /// constraint on the author key; the loser gets the same conflict signal
    /// as a cool-down hit.
    pub async fn create_or_replace_post(
        &self,
        author_key: &str,
        content: &str,
        color: PostColor,
    ) -> Result<CreateOutcome> {
        let content = content.trim();
        validate_content(content)?;

        let author_id = derive_author_id(author_key);
        let mut tx = self.pool.begin().await?;

        let existing: Option<(Uuid, DateTime<Utc>)> = sqlx::query_as(
            r#"
            SELECT id, created_at FROM posts
            WHERE author_key = $1
            FOR UPDATE
            "#,
        )
        .bind(author_key)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some((existing_id, created_at)) = existing {
            if Utc::now() - created_at < self.cooldown {
                // The row is locked, so it cannot vanish before we read it.
                let view = self.post_view_in_tx(&mut tx, existing_id).await?;
                tx.rollback().await?;
                return Err(AppError::AlreadyPosted { existing: view });
            }

            // Stale post: likes cascade with the row.
            sqlx::query("DELETE FROM posts WHERE id = $1")
                .bind(existing_id)
                .execute(&mut *tx)
                .await?;
        }

        let post_id = Uuid::new_v4();
        let inserted = sqlx::query(
            r#"
            INSERT INTO posts (id, author_key, author_id, content, color)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(post_id)
        .bind(author_key)
        .bind(author_id)
        .bind(content)
        .bind(color.as_str())
        .execute(&mut *tx)
        .await;

        if let Err(err) = inserted {
            if is_constraint_violation(&err, "posts_author_key_key") {
                // Lost the race against a concurrent first post. Abandon the
                // transaction and report the winner's post as the conflict.
                drop(tx);
                return Err(self.already_posted(author_key).await?);
            }
            return Err(err.into());
        }

        sqlx::query("INSERT INTO likes (post_id, author_key) VALUES ($1, $2)")
            .bind(post_id)
            .bind(author_key)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        // Post-commit side effect: the post stays committed either way.
        let published = match self.publisher.publish(content).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(%post_id, "publish sink failed: {err:#}");
                false
            }
        };

        Ok(CreateOutcome { post_id, published })
    }

    /// Add the author to a post's like-set.
    ///
    /// One conditional insert: a duplicate is a no-op reported as a conflict,
    /// an unknown post surfaces the foreign-key violation. Returns the like
    /// count after the insert.
    pub async fn add_like(&self, post_id: Uuid, author_key: &str) -> Result<i64> {
        let inserted = like_repo::insert_like(&self.pool, post_id, author_key)
            .await
            .map_err(|err| {
                if is_constraint_violation(&err, "likes_post_id_fkey") {
                    AppError::UnknownPost(post_id)
                } else {
                    AppError::Database(err)
                }
            })?;

        if !inserted {
            return Err(AppError::AlreadyLiked);
        }

        let count = like_repo::count_likes(&self.pool, post_id).await?;
        Ok(count)
    }

    /// List all live posts as the given viewer sees them.
    pub async fn list_posts(&self, viewer_key: &str) -> Result<Vec<PostView>> {
        let rows = post_repo::list_posts_with_likes(&self.pool).await?;
        rows.into_iter()
            .map(|row| {
                let is_viewer = row.author_key == viewer_key;
                into_view(row, is_viewer)
            })
            .collect()
    }

    /// Single post by its exposed author id.
    pub async fn get_post_by_author(&self, author_id: Uuid, viewer_key: &str) -> Result<PostView> {
        let row = post_repo::find_post_by_author_id(&self.pool, author_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no post for author {author_id}")))?;

        let is_viewer = row.author_key == viewer_key;
        into_view(row, is_viewer)
    }

    /// Conflict signal carrying the author's current post, for paths where
    /// the transaction is already gone (unique-violation race).
    async fn already_posted(&self, author_key: &str) -> Result<AppError> {
        let row = post_repo::find_post_by_author_key(&self.pool, author_key)
            .await?
            .ok_or_else(|| {
                AppError::Internal("post state changed concurrently; retry".to_string())
            })?;

        let existing = into_view(row, true)?;
        Ok(AppError::AlreadyPosted { existing })
    }

    /// Read a post with its like count inside the create transaction.
    async fn post_view_in_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        post_id: Uuid,
    ) -> Result<PostView> {
        let row = sqlx::query_as::<_, PostWithLikes>(
            r#"
            SELECT p.id, p.author_key, p.author_id, p.content, p.color, p.created_at,
                   (SELECT COUNT(*) FROM likes WHERE post_id = p.id) AS like_count
            FROM posts p
            WHERE p.id = $1
            "#,
        )
        .bind(post_id)
        .fetch_one(&mut **tx)
        .await?;

        into_view(row, true)
    }
}

fn into_view(row: PostWithLikes, is_viewer: bool) -> Result<PostView> {
    row.into_view(is_viewer)
        .ok_or_else(|| AppError::Internal("unrecognized post color in store".to_string()))
}

fn validate_content(content: &str) -> Result<()> {
    if content.is_empty() {
        return Err(AppError::Validation("content must not be empty".to_string()));
    }

    let chars = content.chars().count();
    if chars > MAX_CONTENT_CHARS {
        return Err(AppError::Validation(format!(
            "content is {chars} characters, limit is {MAX_CONTENT_CHARS}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_content_is_rejected() {
        assert!(matches!(
            validate_content(""),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn content_at_limit_is_accepted() {
        let content = "🦀".repeat(MAX_CONTENT_CHARS);
        assert!(validate_content(&content).is_ok());
    }

    #[test]
    fn content_over_limit_is_rejected() {
        let content = "a".repeat(MAX_CONTENT_CHARS + 1);
        assert!(matches!(
            validate_content(&content),
            Err(AppError::Validation(_))
        ));
    }
}
