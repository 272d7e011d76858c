use crate::models::PostWithLikes;
use sqlx::PgPool;
use uuid::Uuid;

const POST_WITH_LIKES: &str = r#"
    SELECT p.id, p.author_key, p.author_id, p.content, p.color, p.created_at,
           COALESCE(l.like_count, 0) AS like_count
    FROM posts p
    LEFT JOIN (
        SELECT post_id, COUNT(*) AS like_count
        FROM likes
        GROUP BY post_id
    ) l ON l.post_id = p.id
"#;

/// List all live posts with their like counts, newest first.
pub async fn list_posts_with_likes(pool: &PgPool) -> Result<Vec<PostWithLikes>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostWithLikes>(&format!(
        "{POST_WITH_LIKES} ORDER BY p.created_at DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Find a post by its exposed author id.
pub async fn find_post_by_author_id(
    pool: &PgPool,
    author_id: Uuid,
) -> Result<Option<PostWithLikes>, sqlx::Error> {
    let post = sqlx::query_as::<_, PostWithLikes>(&format!(
        "{POST_WITH_LIKES} WHERE p.author_id = $1"
    ))
    .bind(author_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Find a post by the internal author key.
pub async fn find_post_by_author_key(
    pool: &PgPool,
    author_key: &str,
) -> Result<Option<PostWithLikes>, sqlx::Error> {
    let post = sqlx::query_as::<_, PostWithLikes>(&format!(
        "{POST_WITH_LIKES} WHERE p.author_key = $1"
    ))
    .bind(author_key)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Delete posts older than the retention window. Likes cascade with their
/// post. Returns the number of posts removed.
pub async fn delete_expired_posts(pool: &PgPool, window_hours: i32) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM posts
        WHERE created_at < NOW() - make_interval(hours => $1)
        "#,
    )
    .bind(window_hours)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
