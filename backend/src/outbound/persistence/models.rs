//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for mutations.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use social_graph::{
    Block, LikeEdge, Message, Notification, Photo, Report, UserProfile, UserTag,
};
use uuid::Uuid;

use super::schema::{
    blocks, chats, likes, notifications, photos, profiles, reports, tags, users_preferences,
};

/// Insertable struct for profile records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = profiles)]
pub(crate) struct NewProfileRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub username: &'a str,
    pub firstname: &'a str,
    pub lastname: &'a str,
    pub gender: &'static str,
    pub sex_preference: &'static str,
    pub bio: &'a str,
    pub birthdate: NaiveDate,
    pub popularity: i16,
    pub is_verified: bool,
    pub status: &'static str,
    pub last_seen: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub city: &'a str,
}

impl<'a> From<&'a UserProfile> for NewProfileRow<'a> {
    fn from(profile: &'a UserProfile) -> Self {
        Self {
            id: *profile.id.as_uuid(),
            email: &profile.email,
            username: &profile.username,
            firstname: &profile.first_name,
            lastname: &profile.last_name,
            gender: profile.gender.as_str(),
            sex_preference: profile.sex_preference.as_str(),
            bio: &profile.bio,
            birthdate: profile.birthdate,
            popularity: i16::from(profile.popularity),
            is_verified: profile.is_verified,
            status: profile.status.as_str(),
            last_seen: profile.last_seen,
            latitude: profile.location.latitude.as_degrees(),
            longitude: profile.location.longitude.as_degrees(),
            city: &profile.location.city,
        }
    }
}

/// Insertable struct for tag records; the identifier is assigned by the
/// database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tags)]
pub(crate) struct NewTagRow<'a> {
    pub slug: &'a str,
}

/// Insertable struct for user-tag memberships.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users_preferences)]
pub(crate) struct NewUserTagRow {
    pub user_id: Uuid,
    pub tag_id: i32,
}

impl From<&UserTag> for NewUserTagRow {
    fn from(user_tag: &UserTag) -> Self {
        Self {
            user_id: *user_tag.user_id.as_uuid(),
            tag_id: user_tag.tag_id.get(),
        }
    }
}

/// Insertable struct for photos.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = photos)]
pub(crate) struct NewPhotoRow<'a> {
    pub user_id: Uuid,
    pub url: &'a str,
    pub profile_picture: bool,
}

impl<'a> From<&'a Photo> for NewPhotoRow<'a> {
    fn from(photo: &'a Photo) -> Self {
        Self {
            user_id: *photo.user_id.as_uuid(),
            url: &photo.url,
            profile_picture: photo.is_profile_picture,
        }
    }
}

/// Insertable struct for likes.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = likes)]
pub(crate) struct NewLikeRow {
    pub user_id: Uuid,
    pub liked_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<&LikeEdge> for NewLikeRow {
    fn from(edge: &LikeEdge) -> Self {
        Self {
            user_id: *edge.actor.as_uuid(),
            liked_id: *edge.target.as_uuid(),
            created_at: edge.created_at,
        }
    }
}

/// Insertable struct for chat messages.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = chats)]
pub(crate) struct NewChatRow<'a> {
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub content: &'a str,
    pub is_read: bool,
    pub sent_at: DateTime<Utc>,
}

impl<'a> From<&'a Message> for NewChatRow<'a> {
    fn from(message: &'a Message) -> Self {
        Self {
            sender_id: *message.sender.as_uuid(),
            recipient_id: *message.recipient.as_uuid(),
            content: &message.content,
            is_read: message.is_read,
            sent_at: message.sent_at,
        }
    }
}

/// Insertable struct for notifications.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notifications)]
pub(crate) struct NewNotificationRow {
    pub user_id: Uuid,
    pub other_id: Uuid,
    pub kind: &'static str,
    pub is_read: bool,
    pub sent_at: DateTime<Utc>,
}

impl From<&Notification> for NewNotificationRow {
    fn from(notification: &Notification) -> Self {
        Self {
            user_id: *notification.user_id.as_uuid(),
            other_id: *notification.other_id.as_uuid(),
            kind: notification.kind.as_str(),
            is_read: notification.is_read,
            sent_at: notification.sent_at,
        }
    }
}

/// Insertable struct for blocks.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = blocks)]
pub(crate) struct NewBlockRow {
    pub user_id: Uuid,
    pub blocked_id: Uuid,
}

impl From<&Block> for NewBlockRow {
    fn from(block: &Block) -> Self {
        Self {
            user_id: *block.user_id.as_uuid(),
            blocked_id: *block.blocked_id.as_uuid(),
        }
    }
}

/// Insertable struct for reports.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reports)]
pub(crate) struct NewReportRow {
    pub user_id: Uuid,
    pub reported_id: Uuid,
}

impl From<&Report> for NewReportRow {
    fn from(report: &Report) -> Self {
        Self {
            user_id: *report.user_id.as_uuid(),
            reported_id: *report.reported_id.as_uuid(),
        }
    }
}
