//! Create and change payloads accepted by the entity tables.
//!
//! Create payloads carry every attribute of a record except its id.
//! Change payloads carry the mutable attributes as `Option`s: a `None`
//! field is absent from the update and leaves the stored value alone.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::{MemberTypeId, UserId};

/// Attributes for a new [`User`](crate::User).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct NewUser {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email address.
    pub email: String,
}

/// Partial update of a [`User`](crate::User).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct UserChange {
    /// Replacement given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Replacement family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Replacement email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Replacement follower list (replaced wholesale, never merged).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscribed_to_user_ids: Option<Vec<UserId>>,
}

impl UserChange {
    /// A change that only rewrites the follower list.
    pub const fn followers(subscribed_to_user_ids: Vec<UserId>) -> Self {
        Self {
            first_name: None,
            last_name: None,
            email: None,
            subscribed_to_user_ids: Some(subscribed_to_user_ids),
        }
    }
}

/// Attributes for a new [`Post`](crate::Post).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct NewPost {
    /// Headline.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Owning user.
    pub user_id: UserId,
}

/// Partial update of a [`Post`](crate::Post).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct PostChange {
    /// Replacement headline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Replacement body text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Attributes for a new [`Profile`](crate::Profile).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct NewProfile {
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
    /// Subscription plan.
    pub member_type_id: MemberTypeId,
    /// Owning user.
    pub user_id: UserId,
}

/// Partial update of a [`Profile`](crate::Profile).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ProfileChange {
    /// Replacement avatar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Replacement sex.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    /// Replacement birthday.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "number | null")]
    pub birthday: Option<i64>,
    /// Replacement country.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Replacement street.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    /// Replacement city.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Replacement plan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_type_id: Option<MemberTypeId>,
}

/// Partial update of a [`MemberType`](crate::MemberType).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct MemberTypeChange {
    /// Replacement discount percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u32>,
    /// Replacement monthly post limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_posts_limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_deserialize_as_none() {
        let change: Result<UserChange, _> = serde_json::from_str(r#"{"email":"b@x.com"}"#);
        let change = change.ok().unwrap_or_default();
        assert_eq!(change.email.as_deref(), Some("b@x.com"));
        assert!(change.first_name.is_none());
        assert!(change.subscribed_to_user_ids.is_none());
    }

    #[test]
    fn empty_change_serializes_to_empty_object() {
        let json = serde_json::to_string(&PostChange::default()).ok();
        assert_eq!(json.as_deref(), Some("{}"));
    }

    #[test]
    fn followers_change_touches_only_the_list() {
        let change = UserChange::followers(Vec::new());
        assert_eq!(change.subscribed_to_user_ids, Some(Vec::new()));
        assert!(change.email.is_none());
    }
}
