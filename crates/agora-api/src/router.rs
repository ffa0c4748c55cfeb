//! Axum router construction for the member API.
//!
//! Assembles all routes into a single [`Router`] with CORS and request
//! tracing middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{member_types, posts, profiles, users};

/// Build the complete Axum router.
///
/// The router includes:
/// - `/users`, `/users/{id}` -- user CRUD (delete cascades)
/// - `/users/{id}/subscribeTo`, `/users/{id}/unsubscribeFrom` -- follow toggle
/// - `/posts`, `/posts/{id}` -- post CRUD
/// - `/profiles`, `/profiles/{id}` -- profile CRUD
/// - `/member-types`, `/member-types/{id}` -- plan reads and changes
///
/// CORS allows any origin.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Users
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        .route("/users/{id}/subscribeTo", post(users::subscribe_to))
        .route("/users/{id}/unsubscribeFrom", post(users::unsubscribe_from))
        // Posts
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/posts/{id}",
            get(posts::get_post)
                .patch(posts::update_post)
                .delete(posts::delete_post),
        )
        // Profiles
        .route(
            "/profiles",
            get(profiles::list_profiles).post(profiles::create_profile),
        )
        .route(
            "/profiles/{id}",
            get(profiles::get_profile)
                .patch(profiles::update_profile)
                .delete(profiles::delete_profile),
        )
        // Member types
        .route("/member-types", get(member_types::list_member_types))
        .route(
            "/member-types/{id}",
            get(member_types::get_member_type).patch(member_types::update_member_type),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
