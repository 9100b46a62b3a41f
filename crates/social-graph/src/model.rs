//! Generated entity types.
//!
//! These types are independent of any storage representation. The backend
//! maps them onto table rows at the point of persistence.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a generated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Wraps an existing UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier of a tag, assigned by the store or sequentially in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagId(i32);

impl TagId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Interest tag shared by the whole population.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    /// Tag identifier.
    pub id: TagId,
    /// Globally unique slug.
    pub slug: String,
}

macro_rules! string_enum {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $( $(#[$variant_meta:meta])* $variant:ident => $text:literal ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $text)]
                $variant,
            )*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Returns the stored string form.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum! {
    /// Declared gender of a user.
    pub enum Gender {
        /// Male.
        Male => "male",
        /// Female.
        Female => "female",
        /// Non-binary.
        NonBinary => "non-binary",
    }
}

string_enum! {
    /// Stated sexual preference of a user.
    ///
    /// Drawn independently of [`Gender`]; no correlation is modelled.
    pub enum SexPreference {
        /// Interested in men.
        Male => "male",
        /// Interested in women.
        Female => "female",
        /// Interested in everyone.
        Bisexual => "bisexual",
    }
}

string_enum! {
    /// Presence state shown on a profile.
    pub enum PresenceStatus {
        /// Currently connected.
        Online => "online",
        /// Disconnected.
        Offline => "offline",
        /// Connected but idle.
        Away => "away",
    }
}

string_enum! {
    /// Kind of a notification record.
    pub enum NotificationKind {
        /// Someone liked the subject.
        Like => "like",
        /// Someone viewed the subject's profile.
        ProfileConsulted => "profile_consulted",
        /// Someone sent the subject a message.
        NewMessage => "new_message",
        /// Someone liked the subject back.
        LikeBack => "like_back",
    }
}

/// A coordinate stored in millionths of a degree.
///
/// Keeping coordinates integral makes jitter exact and generation
/// reproducible across platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MicroDegrees(i32);

impl MicroDegrees {
    /// Wraps a value expressed in millionths of a degree.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the raw value in millionths of a degree.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Converts to decimal degrees.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "conversion to the store's floating-point column"
    )]
    pub fn as_degrees(self) -> f64 {
        f64::from(self.0) / 1_000_000.0
    }
}

/// City name plus a jittered coordinate pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Gazetteer city name.
    pub city: String,
    /// Latitude.
    pub latitude: MicroDegrees,
    /// Longitude.
    pub longitude: MicroDegrees,
}

/// A fully synthesized user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Unique identifier.
    pub id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login handle, at most 16 characters.
    pub username: String,
    /// Contact address derived from the username.
    pub email: String,
    /// Declared gender.
    pub gender: Gender,
    /// Stated preference.
    pub sex_preference: SexPreference,
    /// Free-text bio, at most 255 characters.
    pub bio: String,
    /// Date of birth.
    pub birthdate: NaiveDate,
    /// Popularity score in `0..=100`.
    pub popularity: u8,
    /// Whether the account passed verification.
    pub is_verified: bool,
    /// Presence state.
    pub status: PresenceStatus,
    /// Last activity instant.
    pub last_seen: DateTime<Utc>,
    /// Home location.
    pub location: Location,
}

/// Membership of a user in a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTag {
    /// Tagged user.
    pub user_id: UserId,
    /// Assigned tag.
    pub tag_id: TagId,
}

/// A profile photo reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    /// Owner of the photo.
    pub user_id: UserId,
    /// Placeholder image URL.
    pub url: String,
    /// Whether this is the profile picture.
    pub is_profile_picture: bool,
}

/// Directed expression of interest from `actor` to `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeEdge {
    /// User expressing interest.
    pub actor: UserId,
    /// User receiving interest.
    pub target: UserId,
    /// When the like was recorded.
    pub created_at: DateTime<Utc>,
}

/// A chat message inside a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Author, one of the two match members.
    pub sender: UserId,
    /// The other match member.
    pub recipient: UserId,
    /// Message body.
    pub content: String,
    /// Whether the recipient has read it.
    pub is_read: bool,
    /// Send instant.
    pub sent_at: DateTime<Utc>,
}

/// A notification addressed to `user_id` about `other_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Recipient of the notification.
    pub user_id: UserId,
    /// User the notification is about.
    pub other_id: UserId,
    /// Notification kind.
    pub kind: NotificationKind,
    /// Whether it has been read.
    pub is_read: bool,
    /// Emission instant.
    pub sent_at: DateTime<Utc>,
}

/// `user_id` blocked `blocked_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Blocking user.
    pub user_id: UserId,
    /// Blocked user.
    pub blocked_id: UserId,
}

/// `user_id` reported `reported_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Reporting user.
    pub user_id: UserId,
    /// Reported user.
    pub reported_id: UserId,
}
