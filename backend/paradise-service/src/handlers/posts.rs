/// Post handlers - HTTP endpoints for post operations
use crate::config::Config;
use crate::error::Result;
use crate::middleware::ClientIp;
use crate::models::{derive_author_id, PostColor, PostView};
use crate::services::{PostService, PublishSink};
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
    pub color: PostColor,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostResponse {
    pub post_id: Uuid,
    pub published: bool,
}

#[derive(Debug, Serialize)]
pub struct ListPostsResponse {
    pub posts: Vec<PostView>,
}

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub success: bool,
    pub likes: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoamiResponse {
    pub author_id: Uuid,
}

fn service(
    pool: &web::Data<PgPool>,
    publisher: &web::Data<Arc<dyn PublishSink>>,
    config: &web::Data<Config>,
) -> PostService {
    PostService::new(
        pool.get_ref().clone(),
        publisher.get_ref().clone(),
        config.retention.window_hours,
    )
}

/// Create a new post, replacing the author's stale one
pub async fn create_post(
    pool: web::Data<PgPool>,
    publisher: web::Data<Arc<dyn PublishSink>>,
    config: web::Data<Config>,
    ip: ClientIp,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let outcome = service(&pool, &publisher, &config)
        .create_or_replace_post(&ip.0, &req.content, req.color)
        .await?;

    Ok(HttpResponse::Ok().json(CreatePostResponse {
        post_id: outcome.post_id,
        published: outcome.published,
    }))
}

/// List all live posts for the viewer
pub async fn list_posts(
    pool: web::Data<PgPool>,
    publisher: web::Data<Arc<dyn PublishSink>>,
    config: web::Data<Config>,
    ip: ClientIp,
) -> Result<HttpResponse> {
    let posts = service(&pool, &publisher, &config).list_posts(&ip.0).await?;

    Ok(HttpResponse::Ok().json(ListPostsResponse { posts }))
}

/// Get a single post by its author id
pub async fn get_author_post(
    pool: web::Data<PgPool>,
    publisher: web::Data<Arc<dyn PublishSink>>,
    config: web::Data<Config>,
    ip: ClientIp,
    author_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let post = service(&pool, &publisher, &config)
        .get_post_by_author(*author_id, &ip.0)
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

/// Add the caller to a post's like-set
pub async fn like_post(
    pool: web::Data<PgPool>,
    publisher: web::Data<Arc<dyn PublishSink>>,
    config: web::Data<Config>,
    ip: ClientIp,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let likes = service(&pool, &publisher, &config)
        .add_like(*post_id, &ip.0)
        .await?;

    Ok(HttpResponse::Ok().json(LikeResponse {
        success: true,
        likes,
    }))
}

/// The caller's exposed author id, so the front end can link its own post
pub async fn whoami(ip: ClientIp) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(WhoamiResponse {
        author_id: derive_author_id(&ip.0),
    }))
}
