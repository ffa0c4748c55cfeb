//! Member type endpoints. Plans are seeded at startup, so there is no
//! create or delete.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/member-types` | List all plans |
//! | `GET` | `/member-types/{id}` | Single plan |
//! | `PATCH` | `/member-types/{id}` | Change discount or post limit |

use std::sync::Arc;

use agora_types::{MemberType, MemberTypeId};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};

use crate::error::ApiError;
use crate::requests::{UpdateMemberTypeRequest, validated};
use crate::state::AppState;

/// List every plan in seed order.
pub async fn list_member_types(State(state): State<Arc<AppState>>) -> Json<Vec<MemberType>> {
    let db = state.db.read().await;
    Json(db.member_types.list().to_vec())
}

/// Fetch one plan.
pub async fn get_member_type(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MemberType>, ApiError> {
    let id = MemberTypeId::new(id);
    let db = state.db.read().await;
    db.member_types
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("member type not found: {id}")))
}

/// Change a plan's limits. An unknown plan is a bad request.
pub async fn update_member_type(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateMemberTypeRequest>, JsonRejection>,
) -> Result<Json<MemberType>, ApiError> {
    let id = MemberTypeId::new(id);
    let body = validated(payload)?;
    let mut db = state.db.write().await;
    db.member_types
        .change(&id, body.into())
        .map(Json)
        .map_err(ApiError::missing_as_bad_request)
}
