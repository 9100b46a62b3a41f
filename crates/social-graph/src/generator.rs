//! Deterministic social-graph generation from seed definitions.
//!
//! [`GraphGenerator`] owns the run's RNG and drives one stage at a time, so
//! a caller can persist each stage before asking for the next. Stages must
//! be requested in pipeline order for a seed to reproduce the same graph;
//! [`generate_social_graph`] runs the whole pipeline in memory.

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::attributes::{synthesize_photos, synthesize_profile};
use crate::config::GenerationConfig;
use crate::conversations::{Conversation, PhraseBook, generate_conversations};
use crate::entity_pool::{TagPool, assign_tags, create_users};
use crate::error::GenerationError;
use crate::events::{
    NotificationPlan, generate_blocks, generate_notifications, generate_reports,
};
use crate::likes::{LikeGraph, generate_likes};
use crate::matches::MatchSet;
use crate::model::{Block, Message, Notification, Photo, Report, UserId, UserProfile, UserTag};
use crate::registry::{SeedDefinition, SeedRegistry};

/// Stage-by-stage driver for one seeding run.
#[derive(Debug, Clone)]
pub struct GraphGenerator {
    rng: ChaCha8Rng,
    config: GenerationConfig,
    now: DateTime<Utc>,
}

impl GraphGenerator {
    /// Creates a generator seeded from `seed_def`, anchored at `now`.
    #[must_use]
    pub fn new(seed_def: &SeedDefinition, now: DateTime<Utc>) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed_def.seed()),
            config: seed_def.config().clone(),
            now,
        }
    }

    /// Reference instant all timestamps are measured back from.
    #[must_use]
    pub const fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Effective generation parameters.
    #[must_use]
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Draws `count` unique user identifiers.
    pub fn users(&mut self, count: usize) -> Vec<UserId> {
        create_users(&mut self.rng, count)
    }

    /// Synthesizes a profile for each user, in input order.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::BirthdateOutOfRange`] when the configured
    /// ages cannot be represented as dates.
    pub fn profiles(&mut self, users: &[UserId]) -> Result<Vec<UserProfile>, GenerationError> {
        users
            .iter()
            .map(|&id| synthesize_profile(&mut self.rng, id, &self.config, self.now))
            .collect()
    }

    /// Assigns tags from `pool` to each user.
    pub fn user_tags(&mut self, users: &[UserId], pool: &TagPool) -> Vec<UserTag> {
        assign_tags(&mut self.rng, users, pool, self.config.tags_per_user)
    }

    /// Creates photos for each user.
    pub fn photos(&mut self, users: &[UserId]) -> Vec<Photo> {
        let per_user = self.config.photos_per_user;
        users
            .iter()
            .flat_map(|&user_id| synthesize_photos(&mut self.rng, user_id, per_user))
            .collect()
    }

    /// Generates the like graph.
    pub fn likes(&mut self, users: &[UserId]) -> LikeGraph {
        generate_likes(&mut self.rng, users, self.config.likes_per_user, self.now)
    }

    /// Generates a conversation for each match.
    pub fn conversations(&mut self, matches: &MatchSet) -> Vec<Conversation> {
        let phrases = PhraseBook::synthesize(&mut self.rng);
        generate_conversations(
            &mut self.rng,
            matches,
            &phrases,
            self.config.messages_per_match,
            self.config.message_read_percent,
            self.now,
        )
    }

    /// Generates notifications for each user.
    pub fn notifications(&mut self, users: &[UserId]) -> Vec<Notification> {
        let plan = NotificationPlan {
            per_user: self.config.notifications_per_user,
            read_percent: self.config.notification_read_percent,
        };
        generate_notifications(&mut self.rng, users, plan, self.now)
    }

    /// Generates block pairs.
    pub fn blocks(&mut self, users: &[UserId]) -> Vec<Block> {
        generate_blocks(&mut self.rng, users, self.config.block_basis_points)
    }

    /// Generates report pairs.
    pub fn reports(&mut self, users: &[UserId]) -> Vec<Report> {
        generate_reports(&mut self.rng, users, self.config.report_basis_points)
    }
}

/// A complete generated graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialGraph {
    /// Tag vocabulary, numbered `1..=n`.
    pub tags: TagPool,
    /// User profiles in creation order.
    pub profiles: Vec<UserProfile>,
    /// Tag memberships.
    pub user_tags: Vec<UserTag>,
    /// Profile photos.
    pub photos: Vec<Photo>,
    /// Like edges.
    pub likes: LikeGraph,
    /// Matches resolved from `likes`.
    pub matches: MatchSet,
    /// One conversation per match.
    pub conversations: Vec<Conversation>,
    /// Notifications.
    pub notifications: Vec<Notification>,
    /// Blocks.
    pub blocks: Vec<Block>,
    /// Reports.
    pub reports: Vec<Report>,
}

impl SocialGraph {
    /// Identifiers of every user, in creation order.
    #[must_use]
    pub fn user_ids(&self) -> Vec<UserId> {
        self.profiles.iter().map(|profile| profile.id).collect()
    }

    /// Every message across all conversations.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.conversations
            .iter()
            .flat_map(|conversation| conversation.messages.iter())
    }
}

/// Generates a complete social graph from a seed definition.
///
/// Uses the seed's `seed` value to initialise a deterministic RNG, so the
/// same definition and reference instant always produce the same graph.
///
/// # Errors
///
/// Returns [`GenerationError`] if the registry's tags cannot form a pool or
/// a profile cannot be synthesized.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use social_graph::{SeedRegistry, generate_social_graph};
///
/// let json = r#"{
///     "version": 1,
///     "tags": ["vegan", "geek"],
///     "seeds": [{"name": "test", "seed": 42, "userCount": 3}]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid");
/// let seed_def = registry.find_seed("test").expect("found");
/// let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).single().expect("instant");
/// let graph = generate_social_graph(&registry, seed_def, now).expect("generated");
///
/// assert_eq!(graph.profiles.len(), 3);
/// // Same seed produces an identical graph
/// let again = generate_social_graph(&registry, seed_def, now).expect("generated");
/// assert_eq!(graph, again);
/// ```
pub fn generate_social_graph(
    registry: &SeedRegistry,
    seed_def: &SeedDefinition,
    now: DateTime<Utc>,
) -> Result<SocialGraph, GenerationError> {
    let tags = TagPool::create_tags(registry.tags().iter().cloned())?;
    let mut generator = GraphGenerator::new(seed_def, now);

    let users = generator.users(seed_def.user_count());
    let profiles = generator.profiles(&users)?;
    let user_tags = generator.user_tags(&users, &tags);
    let photos = generator.photos(&users);
    let likes = generator.likes(&users);
    let matches = MatchSet::resolve(&likes);
    let conversations = generator.conversations(&matches);
    let notifications = generator.notifications(&users);
    let blocks = generator.blocks(&users);
    let reports = generator.reports(&users);

    Ok(SocialGraph {
        tags,
        profiles,
        user_tags,
        photos,
        likes,
        matches,
        conversations,
        notifications,
        blocks,
        reports,
    })
}
