//! HTTP API for the Agora member store.
//!
//! This crate provides an Axum server exposing CRUD over users, posts,
//! profiles and member types, plus the follow/unfollow toggle and the
//! user deletion cascade.
//!
//! # Architecture
//!
//! Handlers parse and validate ids and bodies, then call into a shared
//! [`agora_store::Database`] held by [`AppState`]. Store outcomes
//! (`NotFound`, `InvalidState`) are mapped to HTTP statuses by
//! [`ApiError`]. Mutating handlers hold the write lock for the whole
//! operation, so requests are applied one at a time.

pub mod error;
pub mod member_types;
pub mod posts;
pub mod profiles;
pub mod requests;
pub mod router;
pub mod server;
pub mod state;
pub mod users;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
