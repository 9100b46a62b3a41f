//! Deterministic synthetic social-graph generation for development seeding.
//!
//! This crate produces a believable population for a dating application:
//! users with profiles and photos, shared interest tags, directed likes,
//! the matches those likes imply, conversations inside matches, and a
//! sprinkling of notifications, blocks and reports. It is independent of
//! any storage layer; the backend maps the generated records onto tables.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Loading seed registries from JSON files
//! - Reproducible generation: every stage takes an explicit RNG and
//!   reference instant, so a seed plus an instant fixes the whole graph
//! - Stage-by-stage generation through [`GraphGenerator`] for callers that
//!   persist as they go
//! - Uniqueness guards that keep likes, blocks and reports free of
//!   self-references and duplicates
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use social_graph::{SeedRegistry, generate_social_graph};
//!
//! let json = r#"{
//!     "version": 1,
//!     "tags": ["vegan", "geek", "music"],
//!     "seeds": [{"name": "test-seed", "seed": 42, "userCount": 5}]
//! }"#;
//!
//! let registry = SeedRegistry::from_json(json).expect("valid registry");
//! let seed_def = registry.find_seed("test-seed").expect("seed exists");
//! let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).single().expect("instant");
//! let graph = generate_social_graph(&registry, seed_def, now).expect("generation succeeds");
//!
//! assert_eq!(graph.profiles.len(), 5);
//! ```

mod attributes;
mod config;
mod conversations;
mod entity_pool;
mod error;
mod events;
mod generator;
mod guard;
mod likes;
mod matches;
mod model;
mod registry;
mod validation;

pub use attributes::{
    COORDINATE_JITTER, City, GAZETTEER, age_on, finalize_bio, synthesize_birthdate,
    synthesize_bio, synthesize_first_name, synthesize_location, synthesize_photos,
    synthesize_profile,
};
pub use config::{ConfigOverrides, CountRange, GenerationConfig, RawRange};
pub use conversations::{Conversation, PhraseBook, generate_conversations};
pub use entity_pool::{TagPool, assign_tags, create_users};
pub use error::{GenerationError, RegistryError};
pub use events::{
    NotificationPlan, generate_blocks, generate_notifications, generate_reports, nominal_count,
};
pub use generator::{GraphGenerator, SocialGraph, generate_social_graph};
pub use guard::{
    BlockRelation, LikeRelation, PairAdmission, PairGuard, PairRelation, ReportRelation,
};
pub use likes::{LikeGraph, generate_likes};
pub use matches::{MatchPair, MatchSet};
pub use model::{
    Block, Gender, LikeEdge, Location, Message, MicroDegrees, Notification, NotificationKind,
    Photo, PresenceStatus, Report, SexPreference, Tag, TagId, UserId, UserProfile, UserTag,
};
pub use registry::{SeedDefinition, SeedRegistry};
pub use validation::{
    BIO_MAX_CHARS, USERNAME_MAX_CHARS, is_valid_slug, is_valid_username, truncate_chars,
};
