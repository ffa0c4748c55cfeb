//! User endpoints, including the subscription toggle and the deletion
//! cascade.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/users` | List all users |
//! | `GET` | `/users/{id}` | Single user |
//! | `POST` | `/users` | Create a user |
//! | `PATCH` | `/users/{id}` | Change name or email |
//! | `DELETE` | `/users/{id}` | Delete with cascade |
//! | `POST` | `/users/{id}/subscribeTo` | `{id}` follows `userId` |
//! | `POST` | `/users/{id}/unsubscribeFrom` | `{id}` unfollows `userId` |

use std::sync::Arc;

use agora_types::{User, UserId};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};

use crate::error::ApiError;
use crate::requests::{
    CreateUserRequest, SubscriptionRequest, UpdateUserRequest, parse_id, validated,
};
use crate::state::AppState;

/// List every user in insertion order.
pub async fn list_users(State(state): State<Arc<AppState>>) -> Json<Vec<User>> {
    let db = state.db.read().await;
    Json(db.users.list().to_vec())
}

/// Fetch one user.
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id: UserId = parse_id(&id)?;
    let db = state.db.read().await;
    db.users
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("user not found: {id}")))
}

/// Create a user with an empty follower list.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let body = validated(payload)?;
    let mut db = state.db.write().await;
    Ok(Json(db.users.create(body.into())))
}

/// Change a user's name or email. A missing user is a bad request.
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let id: UserId = parse_id(&id)?;
    let body = validated(payload)?;
    let mut db = state.db.write().await;
    db.users
        .change(&id, body.into())
        .map(Json)
        .map_err(ApiError::missing_as_bad_request)
}

/// Delete a user together with its profile, its posts and its entries in
/// other users' follower lists.
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id: UserId = parse_id(&id)?;
    let mut db = state.db.write().await;
    Ok(Json(db.relations().delete_user(&id)?))
}

/// Record the path user as a follower of the body's `userId`.
///
/// Returns the followed user.
pub async fn subscribe_to(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<SubscriptionRequest>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let subscriber: UserId = parse_id(&id)?;
    let body = validated(payload)?;
    let mut db = state.db.write().await;
    Ok(Json(db.relations().subscribe(subscriber, &body.user_id)?))
}

/// Remove the path user from the follower list of the body's `userId`.
///
/// Returns the previously followed user; `400` if it was not followed.
pub async fn unsubscribe_from(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<SubscriptionRequest>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let subscriber: UserId = parse_id(&id)?;
    let body = validated(payload)?;
    let mut db = state.db.write().await;
    Ok(Json(db.relations().unsubscribe(subscriber, &body.user_id)?))
}
