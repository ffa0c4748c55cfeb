//! Post endpoints.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/posts` | List all posts |
//! | `GET` | `/posts/{id}` | Single post |
//! | `POST` | `/posts` | Create a post |
//! | `PATCH` | `/posts/{id}` | Change title or content |
//! | `DELETE` | `/posts/{id}` | Delete a post |

use std::sync::Arc;

use agora_types::{Post, PostId};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};

use crate::error::ApiError;
use crate::requests::{CreatePostRequest, UpdatePostRequest, parse_id, validated};
use crate::state::AppState;

/// List every post in insertion order.
pub async fn list_posts(State(state): State<Arc<AppState>>) -> Json<Vec<Post>> {
    let db = state.db.read().await;
    Json(db.posts.list().to_vec())
}

/// Fetch one post.
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    let id: PostId = parse_id(&id)?;
    let db = state.db.read().await;
    db.posts
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("post not found: {id}")))
}

/// Create a post. The owner is not checked for existence.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<Json<Post>, ApiError> {
    let body = validated(payload)?;
    let mut db = state.db.write().await;
    Ok(Json(db.posts.create(body.into())))
}

/// Change a post. A missing post is a bad request.
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> Result<Json<Post>, ApiError> {
    let id: PostId = parse_id(&id)?;
    let body = validated(payload)?;
    let mut db = state.db.write().await;
    db.posts
        .change(&id, body.into())
        .map(Json)
        .map_err(ApiError::missing_as_bad_request)
}

/// Delete a post.
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    let id: PostId = parse_id(&id)?;
    let mut db = state.db.write().await;
    Ok(Json(db.posts.delete(&id)?))
}
