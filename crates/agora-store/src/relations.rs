//! Cross-table workflows that keep references between entities intact.
//!
//! [`Relations`] owns the only two procedures that write to more than one
//! table: the user deletion cascade and the subscription toggle. It works
//! purely through the public [`EntityTable`] operations.
//!
//! # Follower list direction
//!
//! `subscribedToUserIds` lives on the *followed* user. Subscribing `A` to
//! `B` appends `A` to `B`'s list; the deletion cascade relies on that
//! direction when it scrubs a deleted id from other users.
//!
//! # Atomicity
//!
//! Steps run in a fixed order and are not rolled back. Dependents are
//! found by query and removed under the same exclusive borrow, so a
//! dependent that is already gone is simply not found and no step fails on
//! it. A failure part way through leaves the earlier steps applied.

use agora_types::{Post, Profile, User, UserChange, UserId};
use tracing::{debug, info};

use crate::entity::{EntityKind, PostField, ProfileField, UserField};
use crate::error::{StoreError, StoreResult};
use crate::predicate::Predicate;
use crate::table::EntityTable;

/// Mutable view over the tables involved in relationship workflows.
#[derive(Debug)]
pub struct Relations<'a> {
    users: &'a mut EntityTable<User>,
    profiles: &'a mut EntityTable<Profile>,
    posts: &'a mut EntityTable<Post>,
}

impl<'a> Relations<'a> {
    /// Borrow the user, profile and post tables.
    pub const fn new(
        users: &'a mut EntityTable<User>,
        profiles: &'a mut EntityTable<Profile>,
        posts: &'a mut EntityTable<Post>,
    ) -> Self {
        Self {
            users,
            profiles,
            posts,
        }
    }

    /// Delete a user and everything that refers to it.
    ///
    /// 1. Remove the user (missing user aborts here).
    /// 2. Remove the user's profile, if any.
    /// 3. Remove every post owned by the user.
    /// 4. Drop the user's id from every follower list that holds it,
    ///    keeping the order of the remaining entries.
    ///
    /// Returns the removed user record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the user does not exist, in which
    /// case nothing is changed.
    pub fn delete_user(&mut self, id: &UserId) -> StoreResult<User> {
        let deleted = self.users.delete(id)?;

        let profile_id = self
            .profiles
            .find_one(&Predicate::equals(ProfileField::UserId, deleted.id))?
            .map(|profile| profile.id);
        if let Some(profile_id) = &profile_id {
            self.profiles.delete(profile_id)?;
        }

        let post_ids: Vec<_> = self
            .posts
            .find_many(&Predicate::equals(PostField::UserId, deleted.id))?
            .into_iter()
            .map(|post| post.id)
            .collect();
        for post_id in &post_ids {
            self.posts.delete(post_id)?;
        }

        let rewrites: Vec<(UserId, Vec<UserId>)> = self
            .users
            .find_many(&Predicate::contains_all(
                UserField::SubscribedToUserIds,
                [deleted.id],
            ))?
            .into_iter()
            .map(|user| {
                let remaining = user
                    .subscribed_to_user_ids
                    .iter()
                    .copied()
                    .filter(|follower| *follower != deleted.id)
                    .collect();
                (user.id, remaining)
            })
            .collect();
        let lists_scrubbed = rewrites.len();
        for (user_id, remaining) in rewrites {
            self.users.change(&user_id, UserChange::followers(remaining))?;
            debug!(user = %user_id, removed = %deleted.id, "follower list scrubbed");
        }

        info!(
            user = %deleted.id,
            profile_removed = profile_id.is_some(),
            posts_removed = post_ids.len(),
            lists_scrubbed,
            "user deleted with cascade"
        );
        Ok(deleted)
    }

    /// Record `subscriber` as a follower of `target`.
    ///
    /// Appends to the target's follower list without deduplication and
    /// returns the updated target. The subscriber's own record is not
    /// touched or checked.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if `target` does not exist.
    pub fn subscribe(&mut self, subscriber: UserId, target: &UserId) -> StoreResult<User> {
        let mut followers = self.followers_of(target)?;
        followers.push(subscriber);

        let updated = self.users.change(target, UserChange::followers(followers))?;
        debug!(%subscriber, %target, "subscribed");
        Ok(updated)
    }

    /// Remove the first occurrence of `subscriber` from `target`'s
    /// follower list and return the updated target.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if `target` does not exist, or
    /// [`StoreError::InvalidState`] if `subscriber` is not in its follower
    /// list (the target is left unchanged).
    pub fn unsubscribe(&mut self, subscriber: UserId, target: &UserId) -> StoreResult<User> {
        let mut followers = self.followers_of(target)?;
        let position = followers
            .iter()
            .position(|follower| *follower == subscriber)
            .ok_or_else(|| {
                StoreError::InvalidState(format!("user {subscriber} does not follow user {target}"))
            })?;
        followers.remove(position);

        let updated = self.users.change(target, UserChange::followers(followers))?;
        debug!(%subscriber, %target, "unsubscribed");
        Ok(updated)
    }

    fn followers_of(&self, target: &UserId) -> StoreResult<Vec<UserId>> {
        self.users
            .get(target)
            .map(|user| user.subscribed_to_user_ids.clone())
            .ok_or_else(|| StoreError::not_found(EntityKind::User, target))
    }
}
