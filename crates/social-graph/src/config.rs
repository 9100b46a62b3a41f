//! Generation parameters for a seeding run.
//!
//! [`GenerationConfig::default`] reproduces the reference dataset: 2-7 tags,
//! 5-30 likes and 1-5 photos per user, 1-20 messages per match, 0-10
//! notifications per user, ages 18-60, and 5% / 2% of the population
//! producing a block / report. Seed profiles in the registry may override
//! any field.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// Number of basis points in a whole.
pub(crate) const BASIS_POINTS_WHOLE: u32 = 10_000;

/// Inclusive range of counts sampled uniformly per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CountRange {
    min: usize,
    max: usize,
}

impl CountRange {
    /// Creates a range, rejecting inverted bounds.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidRange`] when `min > max`.
    pub const fn new(field: &'static str, min: usize, max: usize) -> Result<Self, RegistryError> {
        if min > max {
            return Err(RegistryError::InvalidRange { field, min, max });
        }
        Ok(Self { min, max })
    }

    /// Creates a range that always yields `count`.
    #[must_use]
    pub const fn exactly(count: usize) -> Self {
        Self {
            min: count,
            max: count,
        }
    }

    /// Returns the lower bound.
    #[must_use]
    pub const fn min(&self) -> usize {
        self.min
    }

    /// Returns the upper bound.
    #[must_use]
    pub const fn max(&self) -> usize {
        self.max
    }

    /// Draws a count uniformly from the range.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.random_range(self.min..=self.max)
    }

    /// Draws a count uniformly from the range, then clamps it to `available`.
    pub fn sample_clamped<R: Rng + ?Sized>(&self, rng: &mut R, available: usize) -> usize {
        self.sample(rng).min(available)
    }
}

/// Tunable parameters for every generation stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Tags assigned to each user.
    pub tags_per_user: CountRange,
    /// Photos attached to each user.
    pub photos_per_user: CountRange,
    /// Outgoing likes per user, before clamping to the population.
    pub likes_per_user: CountRange,
    /// Messages per match.
    pub messages_per_match: CountRange,
    /// Notifications per user.
    pub notifications_per_user: CountRange,
    /// Age in whole years.
    pub age_years: CountRange,
    /// Chance a user is verified, in percent.
    pub verified_percent: u32,
    /// Chance a message is read, in percent.
    pub message_read_percent: u32,
    /// Chance a notification is read, in percent.
    pub notification_read_percent: u32,
    /// Share of the population producing one block, in basis points.
    pub block_basis_points: u32,
    /// Share of the population producing one report, in basis points.
    pub report_basis_points: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            tags_per_user: CountRange { min: 2, max: 7 },
            photos_per_user: CountRange { min: 1, max: 5 },
            likes_per_user: CountRange { min: 5, max: 30 },
            messages_per_match: CountRange { min: 1, max: 20 },
            notifications_per_user: CountRange { min: 0, max: 10 },
            age_years: CountRange { min: 18, max: 60 },
            verified_percent: 80,
            message_read_percent: 70,
            notification_read_percent: 60,
            block_basis_points: 500,
            report_basis_points: 200,
        }
    }
}

impl GenerationConfig {
    /// Applies partial overrides on top of this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when an overridden range is inverted or a
    /// probability lies outside its scale.
    pub fn with_overrides(self, overrides: &ConfigOverrides) -> Result<Self, RegistryError> {
        let config = Self {
            tags_per_user: pick_range("tagsPerUser", self.tags_per_user, overrides.tags_per_user)?,
            photos_per_user: pick_range(
                "photosPerUser",
                self.photos_per_user,
                overrides.photos_per_user,
            )?,
            likes_per_user: pick_range(
                "likesPerUser",
                self.likes_per_user,
                overrides.likes_per_user,
            )?,
            messages_per_match: pick_range(
                "messagesPerMatch",
                self.messages_per_match,
                overrides.messages_per_match,
            )?,
            notifications_per_user: pick_range(
                "notificationsPerUser",
                self.notifications_per_user,
                overrides.notifications_per_user,
            )?,
            age_years: pick_range("ageYears", self.age_years, overrides.age_years)?,
            verified_percent: overrides.verified_percent.unwrap_or(self.verified_percent),
            message_read_percent: overrides
                .message_read_percent
                .unwrap_or(self.message_read_percent),
            notification_read_percent: overrides
                .notification_read_percent
                .unwrap_or(self.notification_read_percent),
            block_basis_points: overrides
                .block_basis_points
                .unwrap_or(self.block_basis_points),
            report_basis_points: overrides
                .report_basis_points
                .unwrap_or(self.report_basis_points),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks every range and probability.
    ///
    /// # Errors
    ///
    /// Returns the first [`RegistryError`] found.
    pub fn validate(&self) -> Result<(), RegistryError> {
        let ranges = [
            ("tagsPerUser", self.tags_per_user),
            ("photosPerUser", self.photos_per_user),
            ("likesPerUser", self.likes_per_user),
            ("messagesPerMatch", self.messages_per_match),
            ("notificationsPerUser", self.notifications_per_user),
            ("ageYears", self.age_years),
        ];
        for (field, range) in ranges {
            CountRange::new(field, range.min, range.max)?;
        }

        let percentages = [
            ("verifiedPercent", self.verified_percent),
            ("messageReadPercent", self.message_read_percent),
            ("notificationReadPercent", self.notification_read_percent),
        ];
        for (field, value) in percentages {
            if value > 100 {
                return Err(RegistryError::InvalidPercentage { field, value });
            }
        }

        let shares = [
            ("blockBasisPoints", self.block_basis_points),
            ("reportBasisPoints", self.report_basis_points),
        ];
        for (field, value) in shares {
            if value > BASIS_POINTS_WHOLE {
                return Err(RegistryError::InvalidBasisPoints { field, value });
            }
        }
        Ok(())
    }
}

/// Partial configuration as written in a seed profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigOverrides {
    /// Override for [`GenerationConfig::tags_per_user`].
    pub tags_per_user: Option<RawRange>,
    /// Override for [`GenerationConfig::photos_per_user`].
    pub photos_per_user: Option<RawRange>,
    /// Override for [`GenerationConfig::likes_per_user`].
    pub likes_per_user: Option<RawRange>,
    /// Override for [`GenerationConfig::messages_per_match`].
    pub messages_per_match: Option<RawRange>,
    /// Override for [`GenerationConfig::notifications_per_user`].
    pub notifications_per_user: Option<RawRange>,
    /// Override for [`GenerationConfig::age_years`].
    pub age_years: Option<RawRange>,
    /// Override for [`GenerationConfig::verified_percent`].
    pub verified_percent: Option<u32>,
    /// Override for [`GenerationConfig::message_read_percent`].
    pub message_read_percent: Option<u32>,
    /// Override for [`GenerationConfig::notification_read_percent`].
    pub notification_read_percent: Option<u32>,
    /// Override for [`GenerationConfig::block_basis_points`].
    pub block_basis_points: Option<u32>,
    /// Override for [`GenerationConfig::report_basis_points`].
    pub report_basis_points: Option<u32>,
}

/// Unvalidated `[min, max]` pair as it appears in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRange {
    /// Lower bound.
    pub min: usize,
    /// Upper bound.
    pub max: usize,
}

fn pick_range(
    field: &'static str,
    current: CountRange,
    raw: Option<RawRange>,
) -> Result<CountRange, RegistryError> {
    raw.map_or(Ok(current), |range| CountRange::new(field, range.min, range.max))
}
