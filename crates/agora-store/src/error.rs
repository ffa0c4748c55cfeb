//! Error types for the entity store.
//!
//! Store operations report expected outcomes (a missing record, a
//! violated precondition) as [`StoreError`] values rather than panicking,
//! so callers can branch on the kind and map it to their own responses.

use crate::entity::EntityKind;

/// Outcome categories returned by table and coordinator operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No record with the requested id exists in the relevant table.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Table that was searched.
        kind: EntityKind,
        /// The id that was looked up, rendered for display.
        id: String,
    },

    /// A precondition on existing data does not hold.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A predicate's expected value does not fit the shape of its field.
    #[error("malformed predicate: {0}")]
    MalformedPredicate(String),
}

impl StoreError {
    /// Build a [`StoreError::NotFound`] for the given table and id.
    pub fn not_found(kind: EntityKind, id: &impl core::fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Whether this error is a [`StoreError::NotFound`].
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Convenience alias for store results.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_table() {
        let err = StoreError::not_found(EntityKind::Post, &"abc");
        assert_eq!(err.to_string(), "post not found: abc");
        assert!(err.is_not_found());
    }
}
