//! Insertion-ordered, in-memory collection of one entity kind.

use tracing::debug;

use crate::entity::{Creatable, Entity, Removable};
use crate::error::{StoreError, StoreResult};
use crate::predicate::Predicate;

/// A typed table of records.
///
/// Rows keep insertion order for full scans and predicate queries. Ids
/// are unique within the table. All mutation goes through the methods
/// below; no operation touches another table.
#[derive(Debug, Clone)]
pub struct EntityTable<E> {
    rows: Vec<E>,
}

impl<E> Default for EntityTable<E> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<E: Entity> EntityTable<E> {
    /// Create an empty table.
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Create a table pre-populated with `rows`.
    ///
    /// Rows whose id repeats an earlier row are skipped, so the seeded
    /// table still has unique ids.
    pub fn seeded(rows: impl IntoIterator<Item = E>) -> Self {
        let mut table = Self::new();
        for row in rows {
            if table.contains(row.id()) {
                tracing::warn!(kind = %E::KIND, id = %row.id(), "duplicate seed row skipped");
                continue;
            }
            table.rows.push(row);
        }
        table
    }

    /// Every record, in insertion order.
    pub fn list(&self) -> &[E] {
        &self.rows
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look a record up by id.
    pub fn get(&self, id: &E::Id) -> Option<&E> {
        self.rows.iter().find(|row| row.id() == id)
    }

    /// Whether a record with `id` exists.
    pub fn contains(&self, id: &E::Id) -> bool {
        self.get(id).is_some()
    }

    /// First record matching `predicate`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MalformedPredicate`] if the predicate does not
    /// fit the field it names, even when the table is empty.
    pub fn find_one(&self, predicate: &Predicate<E::Field>) -> StoreResult<Option<&E>> {
        predicate.check::<E>()?;
        for row in &self.rows {
            if predicate.test(row)? {
                return Ok(Some(row));
            }
        }
        Ok(None)
    }

    /// All records matching `predicate`, in table order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MalformedPredicate`] if the predicate does not
    /// fit the field it names, even when the table is empty. No match is
    /// an empty vector, not an error.
    pub fn find_many(&self, predicate: &Predicate<E::Field>) -> StoreResult<Vec<&E>> {
        predicate.check::<E>()?;
        let mut found = Vec::new();
        for row in &self.rows {
            if predicate.test(row)? {
                found.push(row);
            }
        }
        Ok(found)
    }

    /// Shallow-merge `change` into the record with `id`.
    ///
    /// The stored record is replaced by a merged copy, which is also
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record has this id.
    pub fn change(&mut self, id: &E::Id, change: E::Change) -> StoreResult<E> {
        let slot = self
            .rows
            .iter_mut()
            .find(|row| row.id() == id)
            .ok_or_else(|| StoreError::not_found(E::KIND, id))?;

        let updated = slot.apply(change);
        *slot = updated.clone();
        debug!(kind = %E::KIND, %id, "record changed");
        Ok(updated)
    }
}

impl<E: Creatable> EntityTable<E> {
    /// Append a new record built from `new` under a fresh id.
    pub fn create(&mut self, new: E::New) -> E {
        let mut id = E::fresh_id();
        while self.contains(&id) {
            id = E::fresh_id();
        }

        let record = E::build(id, new);
        self.rows.push(record.clone());
        debug!(kind = %E::KIND, id = %record.id(), "record created");
        record
    }
}

impl<E: Removable> EntityTable<E> {
    /// Remove the record with `id` and return it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record has this id. Deleting
    /// the same id twice therefore fails the second time without touching
    /// any other record.
    pub fn delete(&mut self, id: &E::Id) -> StoreResult<E> {
        let position = self
            .rows
            .iter()
            .position(|row| row.id() == id)
            .ok_or_else(|| StoreError::not_found(E::KIND, id))?;

        let removed = self.rows.remove(position);
        debug!(kind = %E::KIND, %id, "record deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use agora_types::{
        MemberType, MemberTypeChange, MemberTypeId, NewPost, Post, PostChange, User, UserId,
    };

    use super::*;
    use crate::entity::{MemberTypeField, PostField, UserField};
    use crate::predicate::{Expected, Value};

    fn new_post(title: &str, owner: UserId) -> NewPost {
        NewPost {
            title: title.to_owned(),
            content: format!("{title} body"),
            user_id: owner,
        }
    }

    #[test]
    fn create_appends_in_insertion_order() {
        let owner = UserId::new();
        let mut posts = EntityTable::<Post>::new();
        let first = posts.create(new_post("first", owner));
        let second = posts.create(new_post("second", owner));

        let titles: Vec<_> = posts.list().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["first", "second"]);
        assert_ne!(first.id, second.id);
        assert_eq!(posts.len(), 2);
    }

    #[test]
    fn find_one_returns_first_match() {
        let owner = UserId::new();
        let mut posts = EntityTable::<Post>::new();
        let first = posts.create(new_post("a", owner));
        posts.create(new_post("b", owner));

        let found = posts.find_one(&Predicate::equals(PostField::UserId, owner));
        assert_eq!(found.ok().flatten().map(|p| p.id), Some(first.id));
    }

    #[test]
    fn find_many_on_no_match_is_empty() {
        let mut posts = EntityTable::<Post>::new();
        posts.create(new_post("a", UserId::new()));

        let found = posts.find_many(&Predicate::equals(PostField::UserId, UserId::new()));
        assert_eq!(found.map(|rows| rows.len()), Ok(0));
    }

    #[test]
    fn find_many_propagates_malformed_predicate() {
        let mut posts = EntityTable::<Post>::new();
        posts.create(new_post("a", UserId::new()));

        let bad = Predicate::contains_all(PostField::Title, ["a"]);
        assert!(matches!(posts.find_many(&bad), Err(StoreError::MalformedPredicate(_))));
    }

    #[test]
    fn malformed_predicate_errors_on_empty_table() {
        let posts = EntityTable::<Post>::new();
        let bad = Predicate::new(PostField::Title, Expected::All(vec![Value::from("t")]));
        assert!(matches!(posts.find_many(&bad), Err(StoreError::MalformedPredicate(_))));
        assert!(matches!(posts.find_one(&bad), Err(StoreError::MalformedPredicate(_))));

        let users = EntityTable::<User>::new();
        let empty = Predicate::new(UserField::SubscribedToUserIds, Expected::All(Vec::new()));
        assert!(matches!(users.find_many(&empty), Err(StoreError::MalformedPredicate(_))));
    }

    #[test]
    fn find_one_without_match_still_rejects_malformed_predicate() {
        let mut posts = EntityTable::<Post>::new();
        posts.create(new_post("a", UserId::new()));

        let bad = Predicate::contains_all(PostField::UserId, [UserId::new()]);
        assert!(matches!(posts.find_one(&bad), Err(StoreError::MalformedPredicate(_))));
    }

    #[test]
    fn change_merges_and_persists() {
        let mut posts = EntityTable::<Post>::new();
        let post = posts.create(new_post("draft", UserId::new()));

        let changed = posts.change(
            &post.id,
            PostChange {
                title: Some(String::from("final")),
                content: None,
            },
        );
        assert_eq!(changed.as_ref().map(|p| p.title.as_str()), Ok("final"));
        assert_eq!(posts.get(&post.id).map(|p| p.content.as_str()), Some("draft body"));
        assert_eq!(posts.get(&post.id).map(|p| p.title.as_str()), Some("final"));
    }

    #[test]
    fn change_of_missing_record_is_not_found() {
        let mut posts = EntityTable::<Post>::new();
        let missing = agora_types::PostId::new();
        let result = posts.change(&missing, PostChange::default());
        assert!(result.is_err_and(|e| e.is_not_found()));
    }

    #[test]
    fn second_delete_is_not_found_and_harmless() {
        let owner = UserId::new();
        let mut posts = EntityTable::<Post>::new();
        let doomed = posts.create(new_post("doomed", owner));
        let kept = posts.create(new_post("kept", owner));

        assert_eq!(posts.delete(&doomed.id).map(|p| p.id), Ok(doomed.id));
        assert!(posts.delete(&doomed.id).is_err_and(|e| e.is_not_found()));
        assert_eq!(posts.list(), [kept]);
    }

    #[test]
    fn seeded_table_skips_duplicate_ids() {
        let plan = |discount| MemberType {
            id: MemberTypeId::from("basic"),
            discount,
            month_posts_limit: 20,
        };
        let plans = EntityTable::seeded([plan(0), plan(9)]);
        assert_eq!(plans.len(), 1);
        assert_eq!(plans.get(&MemberTypeId::from("basic")).map(|m| m.discount), Some(0));
    }

    #[test]
    fn member_types_can_change_but_not_be_created() {
        let mut plans = EntityTable::seeded([MemberType {
            id: MemberTypeId::from("business"),
            discount: 5,
            month_posts_limit: 100,
        }]);
        let changed = plans.change(
            &MemberTypeId::from("business"),
            MemberTypeChange {
                discount: None,
                month_posts_limit: Some(150),
            },
        );
        assert_eq!(changed.map(|m| m.month_posts_limit), Ok(150));

        let found = plans.find_one(&Predicate::equals(MemberTypeField::MonthPostsLimit, 150_u32));
        assert!(found.is_ok_and(|m| m.is_some()));
    }
}
