//! Port abstraction for persisting a generated social graph.
//!
//! Every method persists one generation stage. Adapters must apply each call
//! in its own transaction, so a stage is either fully committed or not at
//! all, and earlier stages stay committed when a later one fails. Adapters
//! must reject duplicate keys and dangling references rather than skipping
//! them: the generator guarantees neither occurs, so a violation means the
//! store and the run disagree.

use async_trait::async_trait;
use social_graph::{
    Block, LikeEdge, Message, Notification, Photo, Report, TagId, UserProfile, UserTag,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by social-graph sink adapters.
    pub enum SocialGraphSinkError {
        /// Sink connection could not be established or was lost.
        Connection { message: String } => "social graph sink connection failed: {message}",
        /// A primary-key or uniqueness constraint rejected a record.
        UniqueViolation { message: String } => "social graph sink rejected a duplicate: {message}",
        /// A record referenced a row that does not exist.
        ForeignKeyViolation { message: String } => "social graph sink rejected a dangling reference: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "social graph sink query failed: {message}",
    }
}

/// Port for writing a social graph one stage at a time.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialGraphSink: Send + Sync {
    /// Remove every previously seeded record.
    async fn reset(&self) -> Result<(), SocialGraphSinkError>;

    /// Insert the tag vocabulary, returning the identifier assigned to each
    /// slug in input order.
    async fn insert_tags(&self, slugs: &[String]) -> Result<Vec<TagId>, SocialGraphSinkError>;

    /// Insert user profiles.
    async fn insert_users(&self, users: &[UserProfile]) -> Result<(), SocialGraphSinkError>;

    /// Insert user-tag memberships.
    async fn insert_user_tags(&self, user_tags: &[UserTag]) -> Result<(), SocialGraphSinkError>;

    /// Insert profile photos.
    async fn insert_photos(&self, photos: &[Photo]) -> Result<(), SocialGraphSinkError>;

    /// Insert like edges.
    async fn insert_likes(&self, likes: &[LikeEdge]) -> Result<(), SocialGraphSinkError>;

    /// Insert chat messages.
    async fn insert_messages(&self, messages: &[Message]) -> Result<(), SocialGraphSinkError>;

    /// Insert notifications.
    async fn insert_notifications(
        &self,
        notifications: &[Notification],
    ) -> Result<(), SocialGraphSinkError>;

    /// Insert blocks.
    async fn insert_blocks(&self, blocks: &[Block]) -> Result<(), SocialGraphSinkError>;

    /// Insert reports.
    async fn insert_reports(&self, reports: &[Report]) -> Result<(), SocialGraphSinkError>;
}
