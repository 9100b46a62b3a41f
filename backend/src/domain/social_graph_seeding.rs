//! Social-graph seeding orchestration.
//!
//! Drives the generator one stage at a time and hands each stage to the
//! persistence sink before generating the next, so a failure leaves every
//! earlier stage committed. Sink errors abort the run; nothing is retried.

use std::fmt;
use std::sync::Arc;

use mockable::Clock;
use social_graph::{
    GenerationError, GraphGenerator, MatchSet, Message, RegistryError, SeedRegistry, Tag,
    TagPool,
};
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{SocialGraphSink, SocialGraphSinkError};

/// Pipeline stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeedStage {
    /// Clearing previously seeded records.
    Reset,
    /// Tag vocabulary.
    Tags,
    /// User profiles.
    Users,
    /// User-tag memberships.
    UserTags,
    /// Profile photos.
    Photos,
    /// Like edges.
    Likes,
    /// Chat messages inside matches.
    Messages,
    /// Notifications.
    Notifications,
    /// Blocks.
    Blocks,
    /// Reports.
    Reports,
}

impl SeedStage {
    /// Stable name used in logs and error messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::Tags => "tags",
            Self::Users => "users",
            Self::UserTags => "user_tags",
            Self::Photos => "photos",
            Self::Likes => "likes",
            Self::Messages => "messages",
            Self::Notifications => "notifications",
            Self::Blocks => "blocks",
            Self::Reports => "reports",
        }
    }
}

impl fmt::Display for SeedStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-run options layered over the registry's seed definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedOptions {
    /// Replaces the seed's population size when set.
    pub user_count: Option<usize>,
    /// Clear the store before the first stage.
    pub reset: bool,
}

/// Counts of every record committed by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedOutcome {
    /// Seed profile that was applied.
    pub seed_name: String,
    /// Tags inserted.
    pub tags: usize,
    /// Users inserted.
    pub users: usize,
    /// User-tag memberships inserted.
    pub user_tags: usize,
    /// Photos inserted.
    pub photos: usize,
    /// Like edges inserted.
    pub likes: usize,
    /// Matches resolved from the likes. Matches are derived, not stored.
    pub matches: usize,
    /// Messages inserted.
    pub messages: usize,
    /// Notifications inserted.
    pub notifications: usize,
    /// Blocks inserted.
    pub blocks: usize,
    /// Reports inserted.
    pub reports: usize,
}

/// Errors raised while preparing or applying a social graph.
#[derive(Debug, Error)]
pub enum SeedingError {
    /// Seed registry lookups failed.
    #[error("seed registry error: {0}")]
    Registry(#[from] RegistryError),
    /// Graph generation failed.
    #[error("social graph generation failed: {0}")]
    Generation(#[from] GenerationError),
    /// The sink returned a different number of tag identifiers than slugs.
    #[error("sink returned {actual} tag identifiers for {expected} tags")]
    TagIdMismatch {
        /// Slugs submitted.
        expected: usize,
        /// Identifiers returned.
        actual: usize,
    },
    /// The sink rejected a stage.
    #[error("seeding aborted at stage {stage}: {source}")]
    Persistence {
        /// Stage that failed. Earlier stages remain committed.
        stage: SeedStage,
        /// Underlying sink error.
        #[source]
        source: SocialGraphSinkError,
    },
}

fn at_stage(stage: SeedStage) -> impl FnOnce(SocialGraphSinkError) -> SeedingError {
    move |source| SeedingError::Persistence { stage, source }
}

fn committed(stage: SeedStage, count: usize) {
    info!(stage = %stage, count, "seed stage committed");
}

/// Service that orchestrates social-graph seeding.
#[derive(Clone)]
pub struct SocialGraphSeeder<S> {
    sink: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> SocialGraphSeeder<S> {
    /// Create a new seeder writing to `sink`, with timestamps anchored at
    /// the clock's current instant.
    pub fn new(sink: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { sink, clock }
    }
}

impl<S> SocialGraphSeeder<S>
where
    S: SocialGraphSink,
{
    /// Generate and persist the graph for a named seed within the registry.
    ///
    /// # Errors
    ///
    /// Returns [`SeedingError`] if the seed is unknown, generation fails, or
    /// the sink rejects a stage. Stages committed before the failure are
    /// left in place.
    pub async fn seed_from_registry(
        &self,
        registry: &SeedRegistry,
        seed_name: &str,
        options: SeedOptions,
    ) -> Result<SeedOutcome, SeedingError> {
        let seed_def = registry.find_seed(seed_name)?;
        let seed_def = match options.user_count {
            Some(count) => seed_def.with_user_count(count),
            None => seed_def.clone(),
        };
        let now = self.clock.utc();
        info!(
            seed = seed_def.name(),
            users = seed_def.user_count(),
            reset = options.reset,
            "seeding social graph"
        );

        if options.reset {
            self.sink.reset().await.map_err(at_stage(SeedStage::Reset))?;
            committed(SeedStage::Reset, 0);
        }

        let tags = self.persist_tags(registry.tags()).await?;
        let mut generator = GraphGenerator::new(&seed_def, now);

        let users = generator.users(seed_def.user_count());
        let profiles = generator.profiles(&users)?;
        self.sink
            .insert_users(&profiles)
            .await
            .map_err(at_stage(SeedStage::Users))?;
        committed(SeedStage::Users, profiles.len());

        let user_tags = generator.user_tags(&users, &tags);
        self.sink
            .insert_user_tags(&user_tags)
            .await
            .map_err(at_stage(SeedStage::UserTags))?;
        committed(SeedStage::UserTags, user_tags.len());

        let photos = generator.photos(&users);
        self.sink
            .insert_photos(&photos)
            .await
            .map_err(at_stage(SeedStage::Photos))?;
        committed(SeedStage::Photos, photos.len());

        let likes = generator.likes(&users);
        self.sink
            .insert_likes(likes.edges())
            .await
            .map_err(at_stage(SeedStage::Likes))?;
        committed(SeedStage::Likes, likes.len());

        let matches = MatchSet::resolve(&likes);
        info!(count = matches.len(), "matches resolved");

        let messages: Vec<Message> = generator
            .conversations(&matches)
            .into_iter()
            .flat_map(|conversation| conversation.messages)
            .collect();
        self.sink
            .insert_messages(&messages)
            .await
            .map_err(at_stage(SeedStage::Messages))?;
        committed(SeedStage::Messages, messages.len());

        let notifications = generator.notifications(&users);
        self.sink
            .insert_notifications(&notifications)
            .await
            .map_err(at_stage(SeedStage::Notifications))?;
        committed(SeedStage::Notifications, notifications.len());

        let blocks = generator.blocks(&users);
        self.sink
            .insert_blocks(&blocks)
            .await
            .map_err(at_stage(SeedStage::Blocks))?;
        committed(SeedStage::Blocks, blocks.len());

        let reports = generator.reports(&users);
        self.sink
            .insert_reports(&reports)
            .await
            .map_err(at_stage(SeedStage::Reports))?;
        committed(SeedStage::Reports, reports.len());

        Ok(SeedOutcome {
            seed_name: seed_def.name().to_owned(),
            tags: tags.len(),
            users: profiles.len(),
            user_tags: user_tags.len(),
            photos: photos.len(),
            likes: likes.len(),
            matches: matches.len(),
            messages: messages.len(),
            notifications: notifications.len(),
            blocks: blocks.len(),
            reports: reports.len(),
        })
    }

    async fn persist_tags(&self, slugs: &[String]) -> Result<TagPool, SeedingError> {
        let ids = self
            .sink
            .insert_tags(slugs)
            .await
            .map_err(at_stage(SeedStage::Tags))?;
        if ids.len() != slugs.len() {
            return Err(SeedingError::TagIdMismatch {
                expected: slugs.len(),
                actual: ids.len(),
            });
        }
        let tags = slugs
            .iter()
            .zip(ids)
            .map(|(slug, id)| Tag {
                id,
                slug: slug.clone(),
            })
            .collect();
        let pool = TagPool::from_persisted(tags)?;
        committed(SeedStage::Tags, pool.len());
        Ok(pool)
    }
}
