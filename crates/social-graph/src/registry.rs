//! Seed registry types and JSON parsing.
//!
//! The registry names the reproducible seeding runs a developer can ask
//! for. It carries the shared tag vocabulary and a list of seed profiles,
//! each pairing an RNG seed and a population size with optional
//! generation overrides.

use std::collections::HashSet;

use camino::Utf8Path;
use cap_std::fs::Dir;
use serde::Deserialize;

use crate::config::{ConfigOverrides, GenerationConfig};
use crate::error::RegistryError;
use crate::validation::is_valid_slug;

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

/// A seed registry containing named seed profiles and the tag vocabulary.
///
/// # Example
///
/// ```
/// use social_graph::SeedRegistry;
///
/// let json = r#"{
///     "version": 1,
///     "tags": ["vegan", "geek"],
///     "seeds": [{"name": "test", "seed": 42, "userCount": 5}]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid registry");
/// assert_eq!(registry.seeds().len(), 1);
/// assert_eq!(registry.tags(), ["vegan", "geek"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRegistry {
    version: u32,
    tags: Vec<String>,
    seeds: Vec<SeedDefinition>,
}

impl SeedRegistry {
    /// Parses a seed registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if:
    /// - The JSON is malformed
    /// - Required fields are missing
    /// - The version is unsupported
    /// - The tag list is empty, or a slug is invalid or repeated
    /// - The seeds array is empty, or a seed name is repeated
    /// - A seed's overrides describe an invalid configuration
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawSeedRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a seed registry from a JSON file under `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::IoError`] if the file cannot be read, or any
    /// error [`SeedRegistry::from_json`] reports.
    pub fn from_file(dir: &Dir, path: &Utf8Path) -> Result<Self, RegistryError> {
        let contents = dir
            .read_to_string(path)
            .map_err(|e| RegistryError::IoError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawSeedRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.tags.is_empty() {
            return Err(RegistryError::EmptyTags);
        }
        let mut slugs = HashSet::with_capacity(raw.tags.len());
        for (index, slug) in raw.tags.iter().enumerate() {
            if !is_valid_slug(slug) {
                return Err(RegistryError::InvalidTagSlug {
                    index,
                    value: slug.clone(),
                });
            }
            if !slugs.insert(slug.as_str()) {
                return Err(RegistryError::DuplicateTagSlug { slug: slug.clone() });
            }
        }

        if raw.seeds.is_empty() {
            return Err(RegistryError::EmptySeeds);
        }
        let mut names = HashSet::with_capacity(raw.seeds.len());
        let mut seeds = Vec::with_capacity(raw.seeds.len());
        for seed in raw.seeds {
            if !names.insert(seed.name.clone()) {
                return Err(RegistryError::DuplicateSeedName { name: seed.name });
            }
            let config = GenerationConfig::default().with_overrides(&seed.overrides)?;
            seeds.push(SeedDefinition {
                name: seed.name,
                seed: seed.seed,
                user_count: seed.user_count,
                config,
            });
        }

        Ok(Self {
            version: raw.version,
            tags: raw.tags,
            seeds,
        })
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the tag slugs in declaration order.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns all seed definitions.
    #[must_use]
    pub fn seeds(&self) -> &[SeedDefinition] {
        &self.seeds
    }

    /// Finds a seed definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SeedNotFound`] if no seed with the given name
    /// exists.
    pub fn find_seed(&self, name: &str) -> Result<&SeedDefinition, RegistryError> {
        self.seeds
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| RegistryError::SeedNotFound {
                name: name.to_owned(),
            })
    }
}

/// A named seed profile for deterministic graph generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDefinition {
    name: String,
    seed: u64,
    user_count: usize,
    config: GenerationConfig,
}

impl SeedDefinition {
    /// Creates a seed definition directly, bypassing the registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when `config` fails validation.
    pub fn new(
        name: impl Into<String>,
        seed: u64,
        user_count: usize,
        config: GenerationConfig,
    ) -> Result<Self, RegistryError> {
        config.validate()?;
        Ok(Self {
            name: name.into(),
            seed,
            user_count,
            config,
        })
    }

    /// Returns the seed name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the RNG seed value.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of users to generate.
    #[must_use]
    pub const fn user_count(&self) -> usize {
        self.user_count
    }

    /// Returns the effective generation configuration.
    #[must_use]
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Returns a copy with a different population size.
    #[must_use]
    pub fn with_user_count(&self, user_count: usize) -> Self {
        Self {
            user_count,
            ..self.clone()
        }
    }
}

/// Raw JSON representation for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedRegistry {
    version: u32,
    tags: Vec<String>,
    seeds: Vec<RawSeedDefinition>,
}

/// Raw JSON representation of a seed definition.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedDefinition {
    name: String,
    seed: u64,
    user_count: usize,
    #[serde(default)]
    overrides: ConfigOverrides,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::config::CountRange;

    const VALID_JSON: &str = r#"{
        "version": 1,
        "tags": ["vegan", "geek", "rock-climbing"],
        "seeds": [
            {"name": "matcha-default", "seed": 2026, "userCount": 500},
            {
                "name": "small-town",
                "seed": 7,
                "userCount": 10,
                "overrides": {"likesPerUser": {"min": 9, "max": 9}, "blockBasisPoints": 0}
            }
        ]
    }"#;

    #[test]
    fn parses_valid_registry() {
        let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");

        assert_eq!(registry.version(), 1);
        assert_eq!(registry.tags().len(), 3);
        assert_eq!(registry.seeds().len(), 2);
    }

    #[test]
    fn seeds_without_overrides_use_defaults() {
        let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");
        let seed = registry.find_seed("matcha-default").expect("seed found");

        assert_eq!(seed.seed(), 2026);
        assert_eq!(seed.user_count(), 500);
        assert_eq!(seed.config(), &GenerationConfig::default());
    }

    #[test]
    fn overrides_are_applied_to_the_seed_config() {
        let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");
        let seed = registry.find_seed("small-town").expect("seed found");

        assert_eq!(seed.config().likes_per_user, CountRange::exactly(9));
        assert_eq!(seed.config().block_basis_points, 0);
        assert_eq!(seed.config().report_basis_points, 200);
    }

    #[test]
    fn returns_error_for_unknown_seed() {
        let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");
        let result = registry.find_seed("unknown");

        assert_eq!(
            result,
            Err(RegistryError::SeedNotFound {
                name: "unknown".to_owned()
            })
        );
    }

    #[rstest]
    #[case::malformed_json("not valid json")]
    #[case::missing_version(r#"{"tags": ["a"], "seeds": [{"name": "a", "seed": 1, "userCount": 1}]}"#)]
    #[case::unknown_override(
        r#"{"version": 1, "tags": ["a"], "seeds": [{"name": "a", "seed": 1, "userCount": 1, "overrides": {"likes": 3}}]}"#
    )]
    fn rejects_json_with_parse_error(#[case] json: &str) {
        let result = SeedRegistry::from_json(json);
        assert!(matches!(result, Err(RegistryError::ParseError { .. })));
    }

    #[rstest]
    #[case::unsupported_version(
        r#"{"version": 99, "tags": ["a"], "seeds": [{"name": "a", "seed": 1, "userCount": 1}]}"#,
        RegistryError::UnsupportedVersion { expected: 1, actual: 99 }
    )]
    #[case::empty_tags(
        r#"{"version": 1, "tags": [], "seeds": [{"name": "a", "seed": 1, "userCount": 1}]}"#,
        RegistryError::EmptyTags
    )]
    #[case::invalid_slug(
        r#"{"version": 1, "tags": ["vegan", "Rock Climbing"], "seeds": [{"name": "a", "seed": 1, "userCount": 1}]}"#,
        RegistryError::InvalidTagSlug { index: 1, value: "Rock Climbing".to_owned() }
    )]
    #[case::duplicate_slug(
        r#"{"version": 1, "tags": ["geek", "geek"], "seeds": [{"name": "a", "seed": 1, "userCount": 1}]}"#,
        RegistryError::DuplicateTagSlug { slug: "geek".to_owned() }
    )]
    #[case::empty_seeds(
        r#"{"version": 1, "tags": ["a"], "seeds": []}"#,
        RegistryError::EmptySeeds
    )]
    #[case::duplicate_seed(
        r#"{"version": 1, "tags": ["a"], "seeds": [{"name": "a", "seed": 1, "userCount": 1}, {"name": "a", "seed": 2, "userCount": 2}]}"#,
        RegistryError::DuplicateSeedName { name: "a".to_owned() }
    )]
    #[case::inverted_range(
        r#"{"version": 1, "tags": ["a"], "seeds": [{"name": "a", "seed": 1, "userCount": 1, "overrides": {"ageYears": {"min": 60, "max": 18}}}]}"#,
        RegistryError::InvalidRange { field: "ageYears", min: 60, max: 18 }
    )]
    fn rejects_invalid_registry(#[case] json: &str, #[case] expected: RegistryError) {
        let result = SeedRegistry::from_json(json);
        assert_eq!(result, Err(expected));
    }

    #[test]
    fn user_count_can_be_overridden() {
        let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");
        let seed = registry.find_seed("small-town").expect("seed found");

        let resized = seed.with_user_count(3);

        assert_eq!(resized.user_count(), 3);
        assert_eq!(resized.seed(), seed.seed());
        assert_eq!(resized.config(), seed.config());
    }
}
