//! Entity traits and the per-kind field keys used by predicates.
//!
//! Every stored record implements [`Entity`]. Kinds that callers may
//! create or delete additionally implement [`Creatable`] and
//! [`Removable`]; member types implement neither, so their tables only
//! offer reads and partial changes.

use agora_types::{
    MemberType, MemberTypeChange, MemberTypeId, NewPost, NewProfile, NewUser, Post, PostChange,
    PostId, Profile, ProfileChange, ProfileId, User, UserChange, UserId,
};

use crate::predicate::FieldValue;

/// The four entity kinds, one table each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// [`User`] records.
    User,
    /// [`Post`] records.
    Post,
    /// [`Profile`] records.
    Profile,
    /// [`MemberType`] records.
    MemberType,
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::User => "user",
            Self::Post => "post",
            Self::Profile => "profile",
            Self::MemberType => "member type",
        })
    }
}

/// A record stored in an [`EntityTable`](crate::EntityTable).
pub trait Entity: Clone {
    /// Which table this record lives in.
    const KIND: EntityKind;

    /// Identifier type, unique within the table.
    type Id: Clone + PartialEq + core::fmt::Display;

    /// Field keys accepted by predicates.
    type Field: FieldKey;

    /// Partial update payload.
    type Change;

    /// The record's id.
    fn id(&self) -> &Self::Id;

    /// Read a field for predicate evaluation.
    fn field(&self, key: Self::Field) -> FieldValue;

    /// Overlay `change` on this record and return the merged copy.
    ///
    /// Fields present in the change replace the record's values; absent
    /// fields are kept. The id never changes.
    #[must_use]
    fn apply(&self, change: Self::Change) -> Self;
}

/// A record that can be created through its table.
pub trait Creatable: Entity {
    /// Attributes supplied by the caller on creation.
    type New;

    /// Allocate a new candidate id.
    fn fresh_id() -> Self::Id;

    /// Combine a generated id with the caller's attributes.
    fn build(id: Self::Id, new: Self::New) -> Self;
}

/// A record that can be deleted through its table.
pub trait Removable: Entity {}

/// A field key that predicates can name.
pub trait FieldKey: Copy + core::fmt::Display {
    /// Whether the field holds a list of values rather than one value.
    fn is_collection(self) -> bool;
}

/// Generates a field-key enum with wire names, shapes and `Display`.
///
/// Variants tagged `[collection]` read as lists; all others are scalars.
macro_rules! define_fields {
    (@collection collection) => { true };
    (@collection) => { false };
    (
        $(#[$meta:meta])*
        $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $wire:literal $([$shape:ident])?
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Every field in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The camelCase wire name of the field.
            pub const fn wire_name(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }

            /// Whether the field holds a list of values.
            pub const fn is_collection(self) -> bool {
                match self {
                    $(Self::$variant => define_fields!(@collection $($shape)?),)+
                }
            }
        }

        impl FieldKey for $name {
            fn is_collection(self) -> bool {
                Self::is_collection(self)
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.wire_name())
            }
        }
    };
}

define_fields! {
    /// Queryable fields of a [`User`].
    UserField {
        /// The user's id.
        Id => "id",
        /// Given name.
        FirstName => "firstName",
        /// Family name.
        LastName => "lastName",
        /// Email address.
        Email => "email",
        /// Follower list (a collection field).
        SubscribedToUserIds => "subscribedToUserIds" [collection],
    }
}

define_fields! {
    /// Queryable fields of a [`Post`].
    PostField {
        /// The post's id.
        Id => "id",
        /// Headline.
        Title => "title",
        /// Body text.
        Content => "content",
        /// Owning user.
        UserId => "userId",
    }
}

define_fields! {
    /// Queryable fields of a [`Profile`].
    ProfileField {
        /// The profile's id.
        Id => "id",
        /// Avatar.
        Avatar => "avatar",
        /// Sex.
        Sex => "sex",
        /// Birthday timestamp.
        Birthday => "birthday",
        /// Country.
        Country => "country",
        /// Street.
        Street => "street",
        /// City.
        City => "city",
        /// Plan.
        MemberTypeId => "memberTypeId",
        /// Owning user.
        UserId => "userId",
    }
}

define_fields! {
    /// Queryable fields of a [`MemberType`].
    MemberTypeField {
        /// The plan name.
        Id => "id",
        /// Discount percentage.
        Discount => "discount",
        /// Monthly post limit.
        MonthPostsLimit => "monthPostsLimit",
    }
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::User;
    type Id = UserId;
    type Field = UserField;
    type Change = UserChange;

    fn id(&self) -> &UserId {
        &self.id
    }

    fn field(&self, key: UserField) -> FieldValue {
        match key {
            UserField::Id => FieldValue::scalar(self.id),
            UserField::FirstName => FieldValue::scalar(self.first_name.as_str()),
            UserField::LastName => FieldValue::scalar(self.last_name.as_str()),
            UserField::Email => FieldValue::scalar(self.email.as_str()),
            UserField::SubscribedToUserIds => {
                FieldValue::collection(self.subscribed_to_user_ids.iter().copied())
            }
        }
    }

    fn apply(&self, change: UserChange) -> Self {
        Self {
            id: self.id,
            first_name: change.first_name.unwrap_or_else(|| self.first_name.clone()),
            last_name: change.last_name.unwrap_or_else(|| self.last_name.clone()),
            email: change.email.unwrap_or_else(|| self.email.clone()),
            subscribed_to_user_ids: change
                .subscribed_to_user_ids
                .unwrap_or_else(|| self.subscribed_to_user_ids.clone()),
        }
    }
}

impl Creatable for User {
    type New = NewUser;

    fn fresh_id() -> UserId {
        UserId::new()
    }

    fn build(id: UserId, new: NewUser) -> Self {
        Self {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            subscribed_to_user_ids: Vec::new(),
        }
    }
}

impl Removable for User {}

impl Entity for Post {
    const KIND: EntityKind = EntityKind::Post;
    type Id = PostId;
    type Field = PostField;
    type Change = PostChange;

    fn id(&self) -> &PostId {
        &self.id
    }

    fn field(&self, key: PostField) -> FieldValue {
        match key {
            PostField::Id => FieldValue::scalar(self.id),
            PostField::Title => FieldValue::scalar(self.title.as_str()),
            PostField::Content => FieldValue::scalar(self.content.as_str()),
            PostField::UserId => FieldValue::scalar(self.user_id),
        }
    }

    fn apply(&self, change: PostChange) -> Self {
        Self {
            id: self.id,
            title: change.title.unwrap_or_else(|| self.title.clone()),
            content: change.content.unwrap_or_else(|| self.content.clone()),
            user_id: self.user_id,
        }
    }
}

impl Creatable for Post {
    type New = NewPost;

    fn fresh_id() -> PostId {
        PostId::new()
    }

    fn build(id: PostId, new: NewPost) -> Self {
        Self {
            id,
            title: new.title,
            content: new.content,
            user_id: new.user_id,
        }
    }
}

impl Removable for Post {}

impl Entity for Profile {
    const KIND: EntityKind = EntityKind::Profile;
    type Id = ProfileId;
    type Field = ProfileField;
    type Change = ProfileChange;

    fn id(&self) -> &ProfileId {
        &self.id
    }

    fn field(&self, key: ProfileField) -> FieldValue {
        match key {
            ProfileField::Id => FieldValue::scalar(self.id),
            ProfileField::Avatar => FieldValue::scalar(self.avatar.as_str()),
            ProfileField::Sex => FieldValue::scalar(self.sex.as_str()),
            ProfileField::Birthday => FieldValue::scalar(self.birthday),
            ProfileField::Country => FieldValue::scalar(self.country.as_str()),
            ProfileField::Street => FieldValue::scalar(self.street.as_str()),
            ProfileField::City => FieldValue::scalar(self.city.as_str()),
            ProfileField::MemberTypeId => FieldValue::scalar(&self.member_type_id),
            ProfileField::UserId => FieldValue::scalar(self.user_id),
        }
    }

    fn apply(&self, change: ProfileChange) -> Self {
        Self {
            id: self.id,
            avatar: change.avatar.unwrap_or_else(|| self.avatar.clone()),
            sex: change.sex.unwrap_or_else(|| self.sex.clone()),
            birthday: change.birthday.unwrap_or(self.birthday),
            country: change.country.unwrap_or_else(|| self.country.clone()),
            street: change.street.unwrap_or_else(|| self.street.clone()),
            city: change.city.unwrap_or_else(|| self.city.clone()),
            member_type_id: change
                .member_type_id
                .unwrap_or_else(|| self.member_type_id.clone()),
            user_id: self.user_id,
        }
    }
}

impl Creatable for Profile {
    type New = NewProfile;

    fn fresh_id() -> ProfileId {
        ProfileId::new()
    }

    fn build(id: ProfileId, new: NewProfile) -> Self {
        Self {
            id,
            avatar: new.avatar,
            sex: new.sex,
            birthday: new.birthday,
            country: new.country,
            street: new.street,
            city: new.city,
            member_type_id: new.member_type_id,
            user_id: new.user_id,
        }
    }
}

impl Removable for Profile {}

impl Entity for MemberType {
    const KIND: EntityKind = EntityKind::MemberType;
    type Id = MemberTypeId;
    type Field = MemberTypeField;
    type Change = MemberTypeChange;

    fn id(&self) -> &MemberTypeId {
        &self.id
    }

    fn field(&self, key: MemberTypeField) -> FieldValue {
        match key {
            MemberTypeField::Id => FieldValue::scalar(&self.id),
            MemberTypeField::Discount => FieldValue::scalar(self.discount),
            MemberTypeField::MonthPostsLimit => FieldValue::scalar(self.month_posts_limit),
        }
    }

    fn apply(&self, change: MemberTypeChange) -> Self {
        Self {
            id: self.id.clone(),
            discount: change.discount.unwrap_or(self.discount),
            month_posts_limit: change.month_posts_limit.unwrap_or(self.month_posts_limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::Value;

    fn sample_user() -> User {
        User::build(
            UserId::new(),
            NewUser {
                first_name: String::from("Ada"),
                last_name: String::from("Lovelace"),
                email: String::from("ada@example.com"),
            },
        )
    }

    #[test]
    fn new_users_start_without_followers() {
        assert!(sample_user().subscribed_to_user_ids.is_empty());
    }

    #[test]
    fn apply_replaces_present_fields_only() {
        let user = sample_user();
        let changed = user.apply(UserChange {
            email: Some(String::from("ada@new.example")),
            ..UserChange::default()
        });

        assert_eq!(changed.id, user.id);
        assert_eq!(changed.email, "ada@new.example");
        assert_eq!(changed.first_name, user.first_name);
        assert_eq!(changed.last_name, user.last_name);
        // The input record is untouched.
        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn empty_change_is_identity() {
        let user = sample_user();
        assert_eq!(user.apply(UserChange::default()), user);
    }

    #[test]
    fn follower_list_reads_as_collection() {
        let follower = UserId::new();
        let user = sample_user().apply(UserChange::followers(vec![follower]));
        assert_eq!(
            user.field(UserField::SubscribedToUserIds),
            FieldValue::Collection(vec![Value::from(follower)])
        );
    }

    #[test]
    fn member_type_keeps_id_on_change() {
        let plan = MemberType {
            id: MemberTypeId::from("basic"),
            discount: 0,
            month_posts_limit: 20,
        };
        let changed = plan.apply(MemberTypeChange {
            discount: Some(3),
            month_posts_limit: None,
        });
        assert_eq!(changed.id, plan.id);
        assert_eq!(changed.discount, 3);
        assert_eq!(changed.month_posts_limit, 20);
    }

    #[test]
    fn only_the_follower_list_is_a_collection() {
        let collections: Vec<_> = UserField::ALL
            .iter()
            .filter(|field| field.is_collection())
            .collect();
        assert_eq!(collections, [&UserField::SubscribedToUserIds]);
        assert!(PostField::ALL.iter().all(|field| !field.is_collection()));
        assert!(ProfileField::ALL.iter().all(|field| !field.is_collection()));
        assert!(MemberTypeField::ALL.iter().all(|field| !field.is_collection()));
    }

    #[test]
    fn field_display_uses_wire_name() {
        assert_eq!(ProfileField::MemberTypeId.to_string(), "memberTypeId");
        assert_eq!(UserField::SubscribedToUserIds.to_string(), "subscribedToUserIds");
    }
}
