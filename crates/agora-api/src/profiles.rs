//! Profile endpoints.
//!
//! A user has at most one profile and every profile names a seeded member
//! type. Both rules are checked here, before the store is called; the
//! store itself does not enforce them.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/profiles` | List all profiles |
//! | `GET` | `/profiles/{id}` | Single profile |
//! | `POST` | `/profiles` | Create a profile |
//! | `PATCH` | `/profiles/{id}` | Change profile attributes |
//! | `DELETE` | `/profiles/{id}` | Delete a profile |

use std::sync::Arc;

use agora_store::{Database, Predicate, ProfileField};
use agora_types::{MemberTypeId, Profile, ProfileId};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};

use crate::error::ApiError;
use crate::requests::{CreateProfileRequest, UpdateProfileRequest, parse_id, validated};
use crate::state::AppState;

/// List every profile in insertion order.
pub async fn list_profiles(State(state): State<Arc<AppState>>) -> Json<Vec<Profile>> {
    let db = state.db.read().await;
    Json(db.profiles.list().to_vec())
}

/// Fetch one profile.
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    let id: ProfileId = parse_id(&id)?;
    let db = state.db.read().await;
    db.profiles
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("profile not found: {id}")))
}

/// Create a profile for a user that does not have one yet.
pub async fn create_profile(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateProfileRequest>, JsonRejection>,
) -> Result<Json<Profile>, ApiError> {
    let body = validated(payload)?;
    let mut db = state.db.write().await;

    require_member_type(&db, &body.member_type_id)?;
    let existing = db
        .profiles
        .find_one(&Predicate::equals(ProfileField::UserId, body.user_id))?;
    if existing.is_some() {
        return Err(ApiError::BadRequest(format!(
            "profile already exists for user {}",
            body.user_id
        )));
    }

    Ok(Json(db.profiles.create(body.into())))
}

/// Change a profile.
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<Profile>, ApiError> {
    let id: ProfileId = parse_id(&id)?;
    let body = validated(payload)?;
    let mut db = state.db.write().await;

    if let Some(member_type_id) = &body.member_type_id {
        require_member_type(&db, member_type_id)?;
    }
    Ok(Json(db.profiles.change(&id, body.into())?))
}

/// Delete a profile.
pub async fn delete_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    let id: ProfileId = parse_id(&id)?;
    let mut db = state.db.write().await;
    Ok(Json(db.profiles.delete(&id)?))
}

fn require_member_type(db: &Database, id: &MemberTypeId) -> Result<(), ApiError> {
    if db.member_types.contains(id) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!("unknown member type: {id}")))
    }
}
