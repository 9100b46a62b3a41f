//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// User profiles.
    ///
    /// The `id` column is the primary key. Usernames and emails are not
    /// declared unique.
    profiles (id) {
        /// Primary key: UUID identifier.
        id -> Uuid,
        /// Contact address.
        email -> Varchar,
        /// Login handle (max 16 characters).
        username -> Varchar,
        /// Given name.
        firstname -> Varchar,
        /// Family name.
        lastname -> Varchar,
        /// Declared gender.
        gender -> Varchar,
        /// Stated preference.
        sex_preference -> Varchar,
        /// Free-text bio (max 255 characters).
        bio -> Varchar,
        /// Date of birth.
        birthdate -> Date,
        /// Popularity score in `0..=100`.
        popularity -> Int2,
        /// Verification flag.
        is_verified -> Bool,
        /// Presence state.
        status -> Varchar,
        /// Last activity instant.
        last_seen -> Timestamptz,
        /// Latitude in decimal degrees.
        latitude -> Float8,
        /// Longitude in decimal degrees.
        longitude -> Float8,
        /// City name.
        city -> Varchar,
    }
}

diesel::table! {
    /// Interest tag vocabulary with unique slugs.
    tags (id) {
        /// Serial primary key.
        id -> Int4,
        /// Unique slug.
        slug -> Varchar,
    }
}

diesel::table! {
    /// User-tag memberships, keyed by the pair.
    users_preferences (user_id, tag_id) {
        /// Tagged user.
        user_id -> Uuid,
        /// Assigned tag.
        tag_id -> Int4,
    }
}

diesel::table! {
    /// Profile photos.
    photos (id) {
        /// Serial primary key.
        id -> Int4,
        /// Owner.
        user_id -> Uuid,
        /// Image URL.
        url -> Text,
        /// Whether this photo is the profile picture.
        profile_picture -> Bool,
    }
}

diesel::table! {
    /// Directed likes, unique per ordered pair.
    likes (user_id, liked_id) {
        /// User expressing interest.
        user_id -> Uuid,
        /// User receiving interest.
        liked_id -> Uuid,
        /// When the like was recorded.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Chat messages exchanged between matched users.
    chats (id) {
        /// Serial primary key.
        id -> Int4,
        /// Author.
        sender_id -> Uuid,
        /// Recipient.
        recipient_id -> Uuid,
        /// Message body (max 255 characters).
        content -> Varchar,
        /// Read flag.
        is_read -> Bool,
        /// Send instant.
        sent_at -> Timestamptz,
    }
}

diesel::table! {
    /// Notifications addressed to `user_id` about `other_id`.
    notifications (id) {
        /// Serial primary key.
        id -> Int4,
        /// Recipient.
        user_id -> Uuid,
        /// Subject of the notification.
        other_id -> Uuid,
        /// Notification kind, stored in the `type` column.
        #[sql_name = "type"]
        kind -> Varchar,
        /// Read flag.
        is_read -> Bool,
        /// Emission instant.
        sent_at -> Timestamptz,
    }
}

diesel::table! {
    /// Blocks, unique per ordered pair.
    blocks (user_id, blocked_id) {
        /// Blocking user.
        user_id -> Uuid,
        /// Blocked user.
        blocked_id -> Uuid,
    }
}

diesel::table! {
    /// Reports, unique per ordered pair.
    reports (user_id, reported_id) {
        /// Reporting user.
        user_id -> Uuid,
        /// Reported user.
        reported_id -> Uuid,
    }
}

diesel::joinable!(users_preferences -> profiles (user_id));
diesel::joinable!(users_preferences -> tags (tag_id));
diesel::joinable!(photos -> profiles (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    profiles,
    tags,
    users_preferences,
    photos,
    likes,
    chats,
    notifications,
    blocks,
    reports,
);
