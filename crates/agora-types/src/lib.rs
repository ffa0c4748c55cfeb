//! Shared type definitions for the Agora member store.
//!
//! # Modules
//!
//! - [`ids`] -- Typed identifiers for every entity kind
//! - [`structs`] -- Stored entity records (users, posts, profiles, member types)
//! - [`payloads`] -- Create and partial-change payloads
//!
//! Types with `#[ts(export)]` generate `TypeScript` bindings under
//! `bindings/` when the crate's tests run.

pub mod ids;
pub mod payloads;
pub mod structs;

pub use ids::{MemberTypeId, PostId, ProfileId, UserId};
pub use payloads::{
    MemberTypeChange, NewPost, NewProfile, NewUser, PostChange, ProfileChange, UserChange,
};
pub use structs::{MemberType, Post, Profile, User};

#[cfg(test)]
mod tests {
    #[test]
    fn export_bindings() {
        use ts_rs::TS;

        let _ = crate::ids::UserId::export_all();
        let _ = crate::ids::PostId::export_all();
        let _ = crate::ids::ProfileId::export_all();
        let _ = crate::ids::MemberTypeId::export_all();

        let _ = crate::structs::User::export_all();
        let _ = crate::structs::Post::export_all();
        let _ = crate::structs::Profile::export_all();
        let _ = crate::structs::MemberType::export_all();

        let _ = crate::payloads::NewUser::export_all();
        let _ = crate::payloads::UserChange::export_all();
        let _ = crate::payloads::NewPost::export_all();
        let _ = crate::payloads::PostChange::export_all();
        let _ = crate::payloads::NewProfile::export_all();
        let _ = crate::payloads::ProfileChange::export_all();
        let _ = crate::payloads::MemberTypeChange::export_all();
    }
}
