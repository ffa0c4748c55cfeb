//! In-memory entity store for the Agora member service.
//!
//! The store keeps one [`EntityTable`] per entity kind (users, posts,
//! profiles, member types) inside a [`Database`]. Tables offer point
//! lookups, single-field predicate queries and create/change/delete.
//! Anything that must touch several tables to keep references intact
//! (deleting a user, following and unfollowing) lives in [`Relations`].
//!
//! # Architecture
//!
//! - [`predicate`] -- single-field filters with scalar equality and
//!   collection containment
//! - [`entity`] -- per-kind traits and field keys
//! - [`table`] -- the generic table
//! - [`relations`] -- deletion cascade and subscription toggle
//! - [`database`] -- the owned aggregate
//!
//! All operations are synchronous and return [`StoreResult`]. Callers that
//! share a [`Database`] across tasks serialize access themselves.

pub mod database;
pub mod entity;
pub mod error;
pub mod predicate;
pub mod relations;
pub mod table;

pub use database::{default_member_types, Database};
pub use entity::{
    Creatable, Entity, EntityKind, FieldKey, MemberTypeField, PostField, ProfileField, Removable,
    UserField,
};
pub use error::{StoreError, StoreResult};
pub use predicate::{Expected, FieldValue, Predicate, Value};
pub use relations::Relations;
pub use table::EntityTable;
