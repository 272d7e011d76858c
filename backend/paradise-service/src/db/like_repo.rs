use sqlx::PgPool;
use uuid::Uuid;

/// Conditionally add `author_key` to a post's like-set.
///
/// Returns Ok(false) when the pair already exists (the insert is a no-op, the
/// set is unchanged). A foreign-key violation on `likes_post_id_fkey` means
/// the post does not exist; callers map that to their own error kind.
pub async fn insert_like(
    pool: &PgPool,
    post_id: Uuid,
    author_key: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO likes (post_id, author_key)
        VALUES ($1, $2)
        ON CONFLICT (post_id, author_key) DO NOTHING
        "#,
    )
    .bind(post_id)
    .bind(author_key)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Count likes for a post.
pub async fn count_likes(pool: &PgPool, post_id: Uuid) -> Result<i64, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM likes
        WHERE post_id = $1
        "#,
    )
    .bind(post_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}
