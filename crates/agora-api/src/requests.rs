//! Request bodies and their validation.
//!
//! Each body rejects unknown fields and is checked with `validator`
//! before it reaches the store. Bodies convert into the store payloads
//! from `agora-types`.

use std::str::FromStr;

use agora_types::{
    MemberTypeChange, MemberTypeId, NewPost, NewProfile, NewUser, PostChange, ProfileChange,
    UserChange, UserId,
};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;
use validator::Validate;

use crate::error::ApiError;

/// Parse a UUID-backed id taken from a path segment.
pub fn parse_id<T>(raw: &str) -> Result<T, ApiError>
where
    T: FromStr,
    T::Err: core::fmt::Display,
{
    raw.parse()
        .map_err(|err| ApiError::InvalidUuid(format!("`{raw}`: {err}")))
}

/// Unwrap a JSON body and run its validation rules.
///
/// Malformed JSON, unknown fields and failed rules all become
/// [`ApiError::BadRequest`].
pub fn validated<T: Validate>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    let Json(body) = payload?;
    body.validate()?;
    Ok(body)
}

/// Body of `POST /users`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateUserRequest {
    /// Given name.
    #[validate(length(min = 1))]
    pub first_name: String,
    /// Family name.
    #[validate(length(min = 1))]
    pub last_name: String,
    /// Contact email address.
    #[validate(email)]
    pub email: String,
}

impl From<CreateUserRequest> for NewUser {
    fn from(body: CreateUserRequest) -> Self {
        Self {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
        }
    }
}

/// Body of `PATCH /users/{id}`.
///
/// The follower list is not client-editable; it changes only through the
/// subscribe endpoints and the deletion cascade.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateUserRequest {
    /// Replacement given name.
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    /// Replacement family name.
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    /// Replacement email address.
    #[validate(email)]
    pub email: Option<String>,
}

impl From<UpdateUserRequest> for UserChange {
    fn from(body: UpdateUserRequest) -> Self {
        Self {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            subscribed_to_user_ids: None,
        }
    }
}

/// Body of `POST /users/{id}/subscribeTo` and `/unsubscribeFrom`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubscriptionRequest {
    /// The user being followed or unfollowed.
    pub user_id: UserId,
}

/// Body of `POST /posts`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreatePostRequest {
    /// Headline.
    #[validate(length(min = 1))]
    pub title: String,
    /// Body text.
    pub content: String,
    /// Owning user.
    pub user_id: UserId,
}

impl From<CreatePostRequest> for NewPost {
    fn from(body: CreatePostRequest) -> Self {
        Self {
            title: body.title,
            content: body.content,
            user_id: body.user_id,
        }
    }
}

/// Body of `PATCH /posts/{id}`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdatePostRequest {
    /// Replacement headline.
    #[validate(length(min = 1))]
    pub title: Option<String>,
    /// Replacement body text.
    pub content: Option<String>,
}

impl From<UpdatePostRequest> for PostChange {
    fn from(body: UpdatePostRequest) -> Self {
        Self {
            title: body.title,
            content: body.content,
        }
    }
}

/// Body of `POST /profiles`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateProfileRequest {
    /// Avatar URL or handle.
    pub avatar: String,
    /// Self-described sex.
    pub sex: String,
    /// Birthday as a Unix timestamp in milliseconds.
    pub birthday: i64,
    /// Country of residence.
    pub country: String,
    /// Street address.
    pub street: String,
    /// City of residence.
    pub city: String,
    /// Subscription plan; must name a seeded member type.
    pub member_type_id: MemberTypeId,
    /// Owning user.
    pub user_id: UserId,
}

impl From<CreateProfileRequest> for NewProfile {
    fn from(body: CreateProfileRequest) -> Self {
        Self {
            avatar: body.avatar,
            sex: body.sex,
            birthday: body.birthday,
            country: body.country,
            street: body.street,
            city: body.city,
            member_type_id: body.member_type_id,
            user_id: body.user_id,
        }
    }
}

/// Body of `PATCH /profiles/{id}`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateProfileRequest {
    /// Replacement avatar.
    pub avatar: Option<String>,
    /// Replacement sex.
    pub sex: Option<String>,
    /// Replacement birthday.
    pub birthday: Option<i64>,
    /// Replacement country.
    pub country: Option<String>,
    /// Replacement street.
    pub street: Option<String>,
    /// Replacement city.
    pub city: Option<String>,
    /// Replacement plan; must name a seeded member type.
    pub member_type_id: Option<MemberTypeId>,
}

impl From<UpdateProfileRequest> for ProfileChange {
    fn from(body: UpdateProfileRequest) -> Self {
        Self {
            avatar: body.avatar,
            sex: body.sex,
            birthday: body.birthday,
            country: body.country,
            street: body.street,
            city: body.city,
            member_type_id: body.member_type_id,
        }
    }
}

/// Body of `PATCH /member-types/{id}`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateMemberTypeRequest {
    /// Replacement discount percentage (0-100).
    #[validate(range(max = 100))]
    pub discount: Option<u32>,
    /// Replacement monthly post limit.
    pub month_posts_limit: Option<u32>,
}

impl From<UpdateMemberTypeRequest> for MemberTypeChange {
    fn from(body: UpdateMemberTypeRequest) -> Self {
        Self {
            discount: body.discount,
            month_posts_limit: body.month_posts_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_ids_must_be_uuids() {
        let bad: Result<UserId, _> = parse_id("42");
        assert!(matches!(bad, Err(ApiError::InvalidUuid(_))));

        let id = UserId::new();
        let good: Result<UserId, _> = parse_id(&id.to_string());
        assert_eq!(good.ok(), Some(id));
    }

    #[test]
    fn create_user_rejects_bad_email() {
        let body = CreateUserRequest {
            first_name: String::from("Ada"),
            last_name: String::from("Lovelace"),
            email: String::from("not-an-email"),
        };
        assert!(body.validate().is_err());
    }

    #[test]
    fn empty_update_is_valid() {
        let body = UpdateUserRequest {
            first_name: None,
            last_name: None,
            email: None,
        };
        assert!(body.validate().is_ok());
        assert_eq!(UserChange::from(body), UserChange::default());
    }

    #[test]
    fn discount_above_hundred_is_rejected() {
        let body = UpdateMemberTypeRequest {
            discount: Some(101),
            month_posts_limit: None,
        };
        assert!(body.validate().is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let parsed: Result<UpdateUserRequest, _> =
            serde_json::from_str(r#"{"subscribedToUserIds":[]}"#);
        assert!(parsed.is_err());
    }
}
