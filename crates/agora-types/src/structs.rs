//! Entity records stored in the member tables.
//!
//! Field names follow the camelCase JSON contract consumed by clients.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::{MemberTypeId, PostId, ProfileId, UserId};

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct User {
    /// Unique identifier.
    pub id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email address.
    pub email: String,
    /// Ids of the users that subscribed to this user.
    ///
    /// Populated on the *followed* user's record by the subscribe flow.
    /// Insertion-ordered and not deduplicated: subscribing twice records
    /// the subscriber twice. Entries may name users that no longer exist.
    pub subscribed_to_user_ids: Vec<UserId>,
}

/// A post authored by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Post {
    /// Unique identifier.
    pub id: PostId,
    /// Headline.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Owning user. Not checked for existence by the store.
    pub user_id: UserId,
}

/// Plan-specific profile attached to a user (at most one per user).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Profile {
    /// Unique identifier.
    pub id: ProfileId,
    /// Avatar URL or handle.
    pub avatar: String,
    /// Self-described sex.
    pub sex: String,
    /// Birthday as a Unix timestamp in milliseconds.
    #[ts(type = "number")]
    pub birthday: i64,
    /// Country of residence.
    pub country: String,
    /// Street address.
    pub street: String,
    /// City of residence.
    pub city: String,
    /// Subscription plan of the owner.
    pub member_type_id: MemberTypeId,
    /// Owning user.
    pub user_id: UserId,
}

/// A subscription plan. Seeded at startup; only its limits are mutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct MemberType {
    /// Plan name, e.g. `basic`.
    pub id: MemberTypeId,
    /// Discount in percent.
    pub discount: u32,
    /// Maximum number of posts per month.
    pub month_posts_limit: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_uses_camel_case_wire_names() {
        let user = User {
            id: UserId::new(),
            first_name: String::from("Ada"),
            last_name: String::from("Lovelace"),
            email: String::from("ada@example.com"),
            subscribed_to_user_ids: vec![UserId::new()],
        };
        let json = serde_json::to_value(&user).ok();
        let json = json.as_ref();
        assert!(json.and_then(|v| v.get("firstName")).is_some());
        assert!(json.and_then(|v| v.get("subscribedToUserIds")).is_some());
        assert!(json.and_then(|v| v.get("first_name")).is_none());
    }

    #[test]
    fn member_type_parses_from_wire_json() {
        let parsed: Result<MemberType, _> =
            serde_json::from_str(r#"{"id":"business","discount":5,"monthPostsLimit":100}"#);
        let member_type = parsed.ok();
        assert_eq!(
            member_type.map(|m| (m.id, m.discount, m.month_posts_limit)),
            Some((MemberTypeId::from("business"), 5, 100))
        );
    }
}
