//! Identities for users and tags.
//!
//! User identifiers are drawn from the run's RNG, so a fixed seed yields the
//! same population. Tag identifiers are either numbered sequentially in
//! memory or supplied by the store after insertion.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::index;
use uuid::Uuid;

use crate::config::CountRange;
use crate::error::GenerationError;
use crate::model::{Tag, TagId, UserId, UserTag};
use crate::validation::is_valid_slug;

/// Creates `count` distinct user identifiers.
///
/// Identifiers are UUIDs built from 128 random bits; the vanishingly rare
/// collision is re-drawn so uniqueness holds unconditionally.
pub fn create_users<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<UserId> {
    let mut seen = HashSet::with_capacity(count);
    let mut users = Vec::with_capacity(count);
    while users.len() < count {
        let id = UserId::from_uuid(Uuid::from_u128(rng.random()));
        if seen.insert(id) {
            users.push(id);
        }
    }
    users
}

/// Shared pool of interest tags with unique slugs and identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPool {
    tags: Vec<Tag>,
}

impl TagPool {
    /// Builds a pool from slugs, numbering tags `1..=n` in input order.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when a slug is invalid or repeated, or the
    /// pool is too large for 32-bit identifiers.
    ///
    /// # Examples
    ///
    /// ```
    /// use social_graph::TagPool;
    ///
    /// let pool = TagPool::create_tags(["vegan", "geek"]).expect("valid slugs");
    /// assert_eq!(pool.len(), 2);
    /// assert_eq!(pool.tags()[1].id.get(), 2);
    /// ```
    pub fn create_tags<I, S>(slugs: I) -> Result<Self, GenerationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags = slugs
            .into_iter()
            .enumerate()
            .map(|(index, slug)| {
                let raw_id = index
                    .checked_add(1)
                    .and_then(|position| i32::try_from(position).ok())
                    .ok_or(GenerationError::TagPoolTooLarge { count: index })?;
                Ok(Tag {
                    id: TagId::new(raw_id),
                    slug: slug.into(),
                })
            })
            .collect::<Result<Vec<_>, GenerationError>>()?;
        Self::from_persisted(tags)
    }

    /// Rebuilds a pool from tags whose identifiers were assigned elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when a slug is invalid or repeated, or an
    /// identifier is repeated.
    pub fn from_persisted(tags: Vec<Tag>) -> Result<Self, GenerationError> {
        let mut slugs = HashSet::with_capacity(tags.len());
        let mut ids = HashSet::with_capacity(tags.len());
        for tag in &tags {
            if !is_valid_slug(&tag.slug) {
                return Err(GenerationError::InvalidTagSlug {
                    slug: tag.slug.clone(),
                });
            }
            if !slugs.insert(tag.slug.as_str()) {
                return Err(GenerationError::DuplicateTagSlug {
                    slug: tag.slug.clone(),
                });
            }
            if !ids.insert(tag.id) {
                return Err(GenerationError::DuplicateTagId { id: tag.id.get() });
            }
        }
        Ok(Self { tags })
    }

    /// Returns the tags in pool order.
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Returns the tag identifiers in pool order.
    #[must_use]
    pub fn ids(&self) -> Vec<TagId> {
        self.tags.iter().map(|tag| tag.id).collect()
    }

    /// Number of tags in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns `true` when the pool holds no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Assigns each user a set of distinct tags.
///
/// The per-user count is drawn from `per_user` and clamped to the pool size;
/// tags are sampled without replacement, so no user holds a tag twice.
pub fn assign_tags<R: Rng + ?Sized>(
    rng: &mut R,
    users: &[UserId],
    pool: &TagPool,
    per_user: CountRange,
) -> Vec<UserTag> {
    let mut assignments = Vec::new();
    for &user_id in users {
        let count = per_user.sample_clamped(rng, pool.len());
        for position in index::sample(rng, pool.len(), count) {
            if let Some(tag) = pool.tags.get(position) {
                assignments.push(UserTag {
                    user_id,
                    tag_id: tag.id,
                });
            }
        }
    }
    assignments
}
