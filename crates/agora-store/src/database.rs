//! The aggregate of all four entity tables.

use agora_types::{MemberType, MemberTypeId, Post, Profile, User};

use crate::relations::Relations;
use crate::table::EntityTable;

/// Owned set of tables backing one running service.
///
/// Simple CRUD goes straight to the public table fields. Workflows with
/// cross-table effects go through [`Database::relations`].
#[derive(Debug, Clone)]
pub struct Database {
    /// Registered users.
    pub users: EntityTable<User>,
    /// Posts, each owned by a user.
    pub posts: EntityTable<Post>,
    /// Profiles, at most one per user.
    pub profiles: EntityTable<Profile>,
    /// Subscription plans, fixed at construction.
    pub member_types: EntityTable<MemberType>,
}

impl Database {
    /// Create empty user, post and profile tables and seed the plans.
    pub fn new(member_types: impl IntoIterator<Item = MemberType>) -> Self {
        Self {
            users: EntityTable::new(),
            posts: EntityTable::new(),
            profiles: EntityTable::new(),
            member_types: EntityTable::seeded(member_types),
        }
    }

    /// Borrow the tables needed for cascades and subscriptions.
    pub const fn relations(&mut self) -> Relations<'_> {
        Relations::new(&mut self.users, &mut self.profiles, &mut self.posts)
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new(default_member_types())
    }
}

/// The stock plans: `basic` and `business`.
pub fn default_member_types() -> Vec<MemberType> {
    vec![
        MemberType {
            id: MemberTypeId::from("basic"),
            discount: 0,
            month_posts_limit: 20,
        },
        MemberType {
            id: MemberTypeId::from("business"),
            discount: 5,
            month_posts_limit: 100,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_database_seeds_stock_plans_only() {
        let db = Database::default();
        assert!(db.users.is_empty());
        assert!(db.posts.is_empty());
        assert!(db.profiles.is_empty());

        let ids: Vec<_> = db.member_types.list().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["basic", "business"]);
    }
}
