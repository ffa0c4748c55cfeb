//! Single-field predicates and their evaluation.
//!
//! A [`Predicate`] pairs a field key with an expected value. Evaluation
//! depends on the shape the field has on the record:
//!
//! | Field | Expected | Match when |
//! |-------|----------|------------|
//! | scalar | [`Expected::One`] | values are equal |
//! | collection | [`Expected::One`] | the collection contains the value |
//! | collection | [`Expected::All`] | the collection contains every listed value |
//! | scalar | [`Expected::All`] | never: reported as malformed |
//!
//! A collection is never compared for equality with the expected list.
//! There are no compound predicates, ranges or nested fields.

use agora_types::{MemberTypeId, PostId, ProfileId, UserId};
use uuid::Uuid;

use crate::entity::{Entity, FieldKey};
use crate::error::{StoreError, StoreResult};

/// A comparable field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// A UUID-backed identifier.
    Id(Uuid),
    /// Free text, including string ids.
    Text(String),
    /// A whole number.
    Int(i64),
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Text(text) => write!(f, "{text:?}"),
            Self::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<Uuid> for Value {
    fn from(id: Uuid) -> Self {
        Self::Id(id)
    }
}

impl From<UserId> for Value {
    fn from(id: UserId) -> Self {
        Self::Id(id.into_inner())
    }
}

impl From<PostId> for Value {
    fn from(id: PostId) -> Self {
        Self::Id(id.into_inner())
    }
}

impl From<ProfileId> for Value {
    fn from(id: ProfileId) -> Self {
        Self::Id(id.into_inner())
    }
}

impl From<&MemberTypeId> for Value {
    fn from(id: &MemberTypeId) -> Self {
        Self::Text(id.as_str().to_owned())
    }
}

impl From<MemberTypeId> for Value {
    fn from(id: MemberTypeId) -> Self {
        Self::Text(id.0)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Int(i64::from(n))
    }
}

/// The value a record holds for a field, as seen by the evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A single value.
    Scalar(Value),
    /// An ordered list of values (the follower list).
    Collection(Vec<Value>),
}

impl FieldValue {
    /// Wrap anything convertible into a [`Value`] as a scalar.
    pub fn scalar(value: impl Into<Value>) -> Self {
        Self::Scalar(value.into())
    }

    /// Collect values into a collection field.
    pub fn collection<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Self::Collection(values.into_iter().map(Into::into).collect())
    }
}

/// The right-hand side of a predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    /// Equal to (scalar) or contained in (collection) the field.
    One(Value),
    /// Every element contained in a collection field.
    All(Vec<Value>),
}

/// A single `(field, expected value)` filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate<F> {
    /// The field to inspect.
    pub key: F,
    /// What the field must hold.
    pub equals: Expected,
}

impl<F> Predicate<F> {
    /// Build a predicate from its parts.
    pub const fn new(key: F, equals: Expected) -> Self {
        Self { key, equals }
    }

    /// Field equals (or, for collections, contains) `value`.
    pub fn equals(key: F, value: impl Into<Value>) -> Self {
        Self::new(key, Expected::One(value.into()))
    }

    /// Collection field contains every one of `values`.
    pub fn contains_all<V: Into<Value>>(key: F, values: impl IntoIterator<Item = V>) -> Self {
        Self::new(key, Expected::All(values.into_iter().map(Into::into).collect()))
    }
}

impl<F: FieldKey> Predicate<F> {
    /// Reject a predicate whose expected value cannot fit its field.
    ///
    /// Depends only on the field's shape, so a malformed predicate is
    /// reported the same way whether or not the table holds any rows.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MalformedPredicate`] for a list expectation on
    /// a scalar field, or for an empty list expectation.
    pub fn check<E: Entity<Field = F>>(&self) -> StoreResult<()> {
        match shape_error(self.key.is_collection(), &self.equals) {
            Some(reason) => Err(malformed::<E>(self.key, reason)),
            None => Ok(()),
        }
    }

    /// Evaluate this predicate against one record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MalformedPredicate`] when the expected value
    /// cannot be applied to the field's shape.
    pub fn test<E: Entity<Field = F>>(&self, record: &E) -> StoreResult<bool> {
        matches(&record.field(self.key), &self.equals).map_err(|err| match err {
            StoreError::MalformedPredicate(reason) => malformed::<E>(self.key, &reason),
            other => other,
        })
    }
}

fn malformed<E: Entity>(key: E::Field, reason: &str) -> StoreError {
    StoreError::MalformedPredicate(format!("{}.{key}: {reason}", E::KIND))
}

fn shape_error(collection: bool, expected: &Expected) -> Option<&'static str> {
    match expected {
        Expected::One(_) => None,
        Expected::All(_) if !collection => Some("list of values given for a scalar field"),
        Expected::All(wanted) if wanted.is_empty() => Some("empty list of expected values"),
        Expected::All(_) => None,
    }
}

/// Match a field value against an expected value.
///
/// # Errors
///
/// Returns [`StoreError::MalformedPredicate`] for a list expectation on a
/// scalar field, or for an empty list expectation.
pub fn matches(field: &FieldValue, expected: &Expected) -> StoreResult<bool> {
    let collection = matches!(field, FieldValue::Collection(_));
    if let Some(reason) = shape_error(collection, expected) {
        return Err(StoreError::MalformedPredicate(String::from(reason)));
    }

    Ok(match (field, expected) {
        (FieldValue::Scalar(actual), Expected::One(wanted)) => actual == wanted,
        (FieldValue::Collection(items), Expected::One(wanted)) => items.contains(wanted),
        (FieldValue::Collection(items), Expected::All(wanted)) => {
            wanted.iter().all(|value| items.contains(value))
        }
        (FieldValue::Scalar(_), Expected::All(_)) => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::now_v7()).collect()
    }

    #[test]
    fn scalar_matches_on_equality() {
        let field = FieldValue::scalar("a@x.com");
        assert_eq!(matches(&field, &Expected::One(Value::from("a@x.com"))), Ok(true));
        assert_eq!(matches(&field, &Expected::One(Value::from("b@x.com"))), Ok(false));
    }

    #[test]
    fn scalar_equality_is_strict_about_kind() {
        let field = FieldValue::scalar(5_i64);
        assert_eq!(matches(&field, &Expected::One(Value::from("5"))), Ok(false));
    }

    #[test]
    fn collection_matches_on_containment() {
        let all = ids(3);
        let field = FieldValue::collection(all.iter().take(2).copied());

        let first = all.first().copied().map(Value::from);
        let absent = all.last().copied().map(Value::from);
        assert_eq!(first.map(|v| matches(&field, &Expected::One(v))), Some(Ok(true)));
        assert_eq!(absent.map(|v| matches(&field, &Expected::One(v))), Some(Ok(false)));
    }

    #[test]
    fn one_element_list_means_containment_not_equality() {
        let all = ids(2);
        let field = FieldValue::collection(all.iter().copied());
        let expected = Expected::All(all.iter().take(1).copied().map(Value::from).collect());
        assert_eq!(matches(&field, &expected), Ok(true));
    }

    #[test]
    fn list_expectation_requires_every_element() {
        let all = ids(3);
        let field = FieldValue::collection(all.iter().take(2).copied());
        let expected = Expected::All(all.iter().copied().map(Value::from).collect());
        assert_eq!(matches(&field, &expected), Ok(false));
    }

    #[test]
    fn empty_collection_contains_nothing() {
        let field = FieldValue::Collection(Vec::new());
        assert_eq!(matches(&field, &Expected::One(Value::Int(1))), Ok(false));
    }

    #[test]
    fn list_against_scalar_is_malformed() {
        let field = FieldValue::scalar("x");
        let result = matches(&field, &Expected::All(vec![Value::from("x")]));
        assert!(matches!(result, Err(StoreError::MalformedPredicate(_))));
    }

    #[test]
    fn empty_list_is_malformed() {
        let field = FieldValue::Collection(vec![Value::Int(1)]);
        let result = matches(&field, &Expected::All(Vec::new()));
        assert!(matches!(result, Err(StoreError::MalformedPredicate(_))));
    }

    #[test]
    fn check_rejects_list_on_scalar_field_without_rows() {
        use agora_types::Post;

        use crate::entity::PostField;

        let bad = Predicate::contains_all(PostField::Title, ["t"]);
        let err = bad.check::<Post>();
        assert_eq!(
            err,
            Err(StoreError::MalformedPredicate(String::from(
                "post.title: list of values given for a scalar field"
            )))
        );
    }

    #[test]
    fn check_rejects_empty_list_on_collection_field() {
        use agora_types::User;

        use crate::entity::UserField;

        let bad = Predicate::new(UserField::SubscribedToUserIds, Expected::All(Vec::new()));
        assert!(matches!(bad.check::<User>(), Err(StoreError::MalformedPredicate(_))));
    }

    #[test]
    fn check_accepts_well_formed_predicates() {
        use agora_types::User;

        use crate::entity::UserField;

        let follower = Uuid::now_v7();
        assert_eq!(Predicate::equals(UserField::Email, "a@x.com").check::<User>(), Ok(()));
        assert_eq!(
            Predicate::contains_all(UserField::SubscribedToUserIds, [follower]).check::<User>(),
            Ok(())
        );
    }
}
