//! In-memory social-graph sink.
//!
//! Enforces the same keys and references as the PostgreSQL schema so dry
//! runs and tests reject exactly what the database would. Each call is
//! validated in full before anything is stored, mirroring a rolled-back
//! transaction.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use async_trait::async_trait;
use social_graph::{
    Block, LikeEdge, Message, Notification, Photo, Report, Tag, TagId, UserId, UserProfile,
    UserTag,
};
use tokio::sync::Mutex;

use crate::domain::ports::{SocialGraphSink, SocialGraphSinkError};

/// Every record held by an [`InMemorySocialGraphSink`], in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SinkSnapshot {
    /// Stored tags with their assigned identifiers.
    pub tags: Vec<Tag>,
    /// Stored profiles.
    pub profiles: Vec<UserProfile>,
    /// Stored user-tag memberships.
    pub user_tags: Vec<UserTag>,
    /// Stored photos.
    pub photos: Vec<Photo>,
    /// Stored likes.
    pub likes: Vec<LikeEdge>,
    /// Stored messages.
    pub messages: Vec<Message>,
    /// Stored notifications.
    pub notifications: Vec<Notification>,
    /// Stored blocks.
    pub blocks: Vec<Block>,
    /// Stored reports.
    pub reports: Vec<Report>,
}

#[derive(Debug, Default)]
struct SinkState {
    records: SinkSnapshot,
    user_ids: HashSet<UserId>,
    tag_ids: HashSet<TagId>,
    tag_slugs: HashMap<String, TagId>,
    next_tag_id: i32,
    user_tag_keys: HashSet<UserTag>,
    like_keys: HashSet<(UserId, UserId)>,
    block_keys: HashSet<(UserId, UserId)>,
    report_keys: HashSet<(UserId, UserId)>,
}

impl SinkState {
    fn require_user(&self, table: &str, user: UserId) -> Result<(), SocialGraphSinkError> {
        if self.user_ids.contains(&user) {
            Ok(())
        } else {
            Err(SocialGraphSinkError::foreign_key_violation(format!(
                "{table} references unknown profile {user}"
            )))
        }
    }

    fn require_pair(
        &self,
        table: &str,
        first: UserId,
        second: UserId,
    ) -> Result<(), SocialGraphSinkError> {
        if first == second {
            return Err(SocialGraphSinkError::query(format!(
                "{table} rejects self-referencing row for {first}"
            )));
        }
        self.require_user(table, first)?;
        self.require_user(table, second)
    }
}

/// Collects keys for a batch, rejecting any already stored or repeated.
fn unique_keys<K, I>(
    table: &str,
    existing: &HashSet<K>,
    keys: I,
) -> Result<Vec<K>, SocialGraphSinkError>
where
    K: Eq + Hash + Copy + std::fmt::Debug,
    I: IntoIterator<Item = K>,
{
    let mut batch = HashSet::new();
    let mut ordered = Vec::new();
    for key in keys {
        if existing.contains(&key) || !batch.insert(key) {
            return Err(SocialGraphSinkError::unique_violation(format!(
                "{table} already holds {key:?}"
            )));
        }
        ordered.push(key);
    }
    Ok(ordered)
}

/// Social-graph sink that stores records in process memory.
#[derive(Debug, Default)]
pub struct InMemorySocialGraphSink {
    state: Mutex<SinkState>,
}

impl InMemorySocialGraphSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy out every stored record.
    pub async fn snapshot(&self) -> SinkSnapshot {
        self.state.lock().await.records.clone()
    }
}

#[async_trait]
impl SocialGraphSink for InMemorySocialGraphSink {
    async fn reset(&self) -> Result<(), SocialGraphSinkError> {
        *self.state.lock().await = SinkState::default();
        Ok(())
    }

    async fn insert_tags(&self, slugs: &[String]) -> Result<Vec<TagId>, SocialGraphSinkError> {
        let mut state = self.state.lock().await;
        let mut seen = HashSet::new();
        for slug in slugs {
            if state.tag_slugs.contains_key(slug) || !seen.insert(slug.as_str()) {
                return Err(SocialGraphSinkError::unique_violation(format!(
                    "tags already holds slug {slug}"
                )));
            }
        }

        let mut ids = Vec::with_capacity(slugs.len());
        for slug in slugs {
            state.next_tag_id = state
                .next_tag_id
                .checked_add(1)
                .ok_or_else(|| SocialGraphSinkError::query("tag identifier sequence exhausted"))?;
            let id = TagId::new(state.next_tag_id);
            state.tag_ids.insert(id);
            state.tag_slugs.insert(slug.clone(), id);
            state.records.tags.push(Tag {
                id,
                slug: slug.clone(),
            });
            ids.push(id);
        }
        Ok(ids)
    }

    async fn insert_users(&self, users: &[UserProfile]) -> Result<(), SocialGraphSinkError> {
        let mut state = self.state.lock().await;
        let ids = unique_keys("profiles", &state.user_ids, users.iter().map(|user| user.id))?;
        state.user_ids.extend(ids);
        state.records.profiles.extend_from_slice(users);
        Ok(())
    }

    async fn insert_user_tags(&self, user_tags: &[UserTag]) -> Result<(), SocialGraphSinkError> {
        let mut state = self.state.lock().await;
        for user_tag in user_tags {
            state.require_user("users_preferences", user_tag.user_id)?;
            if !state.tag_ids.contains(&user_tag.tag_id) {
                return Err(SocialGraphSinkError::foreign_key_violation(format!(
                    "users_preferences references unknown tag {}",
                    user_tag.tag_id
                )));
            }
        }
        let keys = unique_keys(
            "users_preferences",
            &state.user_tag_keys,
            user_tags.iter().copied(),
        )?;
        state.user_tag_keys.extend(keys);
        state.records.user_tags.extend_from_slice(user_tags);
        Ok(())
    }

    async fn insert_photos(&self, photos: &[Photo]) -> Result<(), SocialGraphSinkError> {
        let mut state = self.state.lock().await;
        for photo in photos {
            state.require_user("photos", photo.user_id)?;
        }
        state.records.photos.extend_from_slice(photos);
        Ok(())
    }

    async fn insert_likes(&self, likes: &[LikeEdge]) -> Result<(), SocialGraphSinkError> {
        let mut state = self.state.lock().await;
        for like in likes {
            state.require_pair("likes", like.actor, like.target)?;
        }
        let keys = unique_keys(
            "likes",
            &state.like_keys,
            likes.iter().map(|like| (like.actor, like.target)),
        )?;
        state.like_keys.extend(keys);
        state.records.likes.extend_from_slice(likes);
        Ok(())
    }

    async fn insert_messages(&self, messages: &[Message]) -> Result<(), SocialGraphSinkError> {
        let mut state = self.state.lock().await;
        for message in messages {
            state.require_pair("chats", message.sender, message.recipient)?;
        }
        state.records.messages.extend_from_slice(messages);
        Ok(())
    }

    async fn insert_notifications(
        &self,
        notifications: &[Notification],
    ) -> Result<(), SocialGraphSinkError> {
        let mut state = self.state.lock().await;
        for notification in notifications {
            state.require_user("notifications", notification.user_id)?;
            state.require_user("notifications", notification.other_id)?;
        }
        state.records.notifications.extend_from_slice(notifications);
        Ok(())
    }

    async fn insert_blocks(&self, blocks: &[Block]) -> Result<(), SocialGraphSinkError> {
        let mut state = self.state.lock().await;
        for block in blocks {
            state.require_pair("blocks", block.user_id, block.blocked_id)?;
        }
        let keys = unique_keys(
            "blocks",
            &state.block_keys,
            blocks.iter().map(|block| (block.user_id, block.blocked_id)),
        )?;
        state.block_keys.extend(keys);
        state.records.blocks.extend_from_slice(blocks);
        Ok(())
    }

    async fn insert_reports(&self, reports: &[Report]) -> Result<(), SocialGraphSinkError> {
        let mut state = self.state.lock().await;
        for report in reports {
            state.require_pair("reports", report.user_id, report.reported_id)?;
        }
        let keys = unique_keys(
            "reports",
            &state.report_keys,
            reports.iter().map(|report| (report.user_id, report.reported_id)),
        )?;
        state.report_keys.extend(keys);
        state.records.reports.extend_from_slice(reports);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use rstest::{fixture, rstest};
    use social_graph::{Gender, Location, MicroDegrees, PresenceStatus, SexPreference};
    use uuid::Uuid;

    use super::*;

    fn user(n: u128) -> UserId {
        UserId::from_uuid(Uuid::from_u128(n))
    }

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0)
            .single()
            .expect("valid instant")
    }

    fn profile(n: u128) -> UserProfile {
        UserProfile {
            id: user(n),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            username: format!("adalov{n}"),
            email: format!("adalov{n}@example.com"),
            gender: Gender::Female,
            sex_preference: SexPreference::Bisexual,
            bio: String::new(),
            birthdate: NaiveDate::from_ymd_opt(1990, 12, 10).expect("valid date"),
            popularity: 50,
            is_verified: true,
            status: PresenceStatus::Online,
            last_seen: instant(),
            location: Location {
                city: "Paris".to_owned(),
                latitude: MicroDegrees::new(48_856_600),
                longitude: MicroDegrees::new(2_352_200),
            },
        }
    }

    fn like(actor: u128, target: u128) -> LikeEdge {
        LikeEdge {
            actor: user(actor),
            target: user(target),
            created_at: instant(),
        }
    }

    #[fixture]
    async fn seeded_sink() -> InMemorySocialGraphSink {
        let sink = InMemorySocialGraphSink::new();
        sink.insert_users(&[profile(1), profile(2), profile(3)])
            .await
            .expect("users insert");
        sink
    }

    #[rstest]
    #[tokio::test]
    async fn tags_receive_sequential_identifiers() {
        let sink = InMemorySocialGraphSink::new();
        let ids = sink
            .insert_tags(&["vegan".to_owned(), "geek".to_owned()])
            .await
            .expect("tags insert");

        assert_eq!(ids, vec![TagId::new(1), TagId::new(2)]);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_slug_is_rejected() {
        let sink = InMemorySocialGraphSink::new();
        sink.insert_tags(&["vegan".to_owned()])
            .await
            .expect("first insert");

        let error = sink
            .insert_tags(&["geek".to_owned(), "vegan".to_owned()])
            .await
            .expect_err("duplicate slug");

        assert!(matches!(error, SocialGraphSinkError::UniqueViolation { .. }));
        assert_eq!(sink.snapshot().await.tags.len(), 1, "batch rolled back");
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_like_is_rejected(#[future] seeded_sink: InMemorySocialGraphSink) {
        let sink = seeded_sink.await;
        sink.insert_likes(&[like(1, 2)]).await.expect("first like");

        let error = sink
            .insert_likes(&[like(2, 1), like(1, 2)])
            .await
            .expect_err("duplicate like");

        assert!(matches!(error, SocialGraphSinkError::UniqueViolation { .. }));
        assert_eq!(sink.snapshot().await.likes, vec![like(1, 2)]);
    }

    #[rstest]
    #[tokio::test]
    async fn dangling_like_is_rejected(#[future] seeded_sink: InMemorySocialGraphSink) {
        let sink = seeded_sink.await;

        let error = sink
            .insert_likes(&[like(1, 99)])
            .await
            .expect_err("unknown target");

        assert!(matches!(
            error,
            SocialGraphSinkError::ForeignKeyViolation { .. }
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn self_block_is_rejected(#[future] seeded_sink: InMemorySocialGraphSink) {
        let sink = seeded_sink.await;

        let error = sink
            .insert_blocks(&[Block {
                user_id: user(1),
                blocked_id: user(1),
            }])
            .await
            .expect_err("self block");

        assert!(matches!(error, SocialGraphSinkError::Query { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn user_tag_requires_known_tag(#[future] seeded_sink: InMemorySocialGraphSink) {
        let sink = seeded_sink.await;

        let error = sink
            .insert_user_tags(&[UserTag {
                user_id: user(1),
                tag_id: TagId::new(5),
            }])
            .await
            .expect_err("unknown tag");

        assert!(matches!(
            error,
            SocialGraphSinkError::ForeignKeyViolation { .. }
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn reset_clears_everything(#[future] seeded_sink: InMemorySocialGraphSink) {
        let sink = seeded_sink.await;
        sink.insert_tags(&["vegan".to_owned()])
            .await
            .expect("tags insert");

        sink.reset().await.expect("reset");

        assert_eq!(sink.snapshot().await, SinkSnapshot::default());
        let ids = sink
            .insert_tags(&["vegan".to_owned()])
            .await
            .expect("slug reusable after reset");
        assert_eq!(ids, vec![TagId::new(1)]);
    }
}
