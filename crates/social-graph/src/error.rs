//! Error types for the social-graph crate.
//!
//! Registry errors cover loading and validating seed profiles; generation
//! errors cover the few ways a stage can refuse its input. Stages clamp
//! sampling counts to the available population instead of failing.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when parsing or querying a seed registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry file at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// The registry declares no tag slugs.
    #[error("registry contains no tag slugs")]
    EmptyTags,

    /// A tag slug is empty or contains characters outside `[a-z0-9-]`.
    #[error("invalid tag slug at index {index}: '{value}'")]
    InvalidTagSlug {
        /// Index of the slug in the `tags` array.
        index: usize,
        /// The rejected slug.
        value: String,
    },

    /// The same tag slug appears twice.
    #[error("duplicate tag slug '{slug}' in registry")]
    DuplicateTagSlug {
        /// The repeated slug.
        slug: String,
    },

    /// The registry contains no seed definitions.
    #[error("registry contains no seed definitions")]
    EmptySeeds,

    /// Two seed definitions share a name.
    #[error("seed '{name}' already exists in registry")]
    DuplicateSeedName {
        /// The repeated seed name.
        name: String,
    },

    /// A configured count range has its bounds inverted.
    #[error("invalid range for {field}: min {min} exceeds max {max}")]
    InvalidRange {
        /// Name of the configuration field.
        field: &'static str,
        /// Configured lower bound.
        min: usize,
        /// Configured upper bound.
        max: usize,
    },

    /// A configured percentage lies outside `0..=100`.
    #[error("invalid percentage for {field}: {value} is above 100")]
    InvalidPercentage {
        /// Name of the configuration field.
        field: &'static str,
        /// Configured value.
        value: u32,
    },

    /// A configured basis-point share lies outside `0..=10000`.
    #[error("invalid share for {field}: {value} basis points is above 10000")]
    InvalidBasisPoints {
        /// Name of the configuration field.
        field: &'static str,
        /// Configured value.
        value: u32,
    },

    /// The requested seed name was not found in the registry.
    #[error("seed '{name}' not found in registry")]
    SeedNotFound {
        /// The seed name that was not found.
        name: String,
    },
}

/// Errors that can occur while generating graph stages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Two tags in the same pool share a slug.
    #[error("duplicate tag slug '{slug}' in tag pool")]
    DuplicateTagSlug {
        /// The repeated slug.
        slug: String,
    },

    /// A tag slug is empty or contains characters outside `[a-z0-9-]`.
    #[error("invalid tag slug '{slug}'")]
    InvalidTagSlug {
        /// The rejected slug.
        slug: String,
    },

    /// Two tags in a persisted pool share an identifier.
    #[error("duplicate tag id {id} in tag pool")]
    DuplicateTagId {
        /// The repeated identifier.
        id: i32,
    },

    /// The tag pool cannot be numbered with 32-bit identifiers.
    #[error("tag pool of {count} entries exceeds the identifier range")]
    TagPoolTooLarge {
        /// Number of tags requested.
        count: usize,
    },

    /// A configured age cannot be turned into a calendar date.
    #[error("cannot derive a birthdate {years} years in the past")]
    BirthdateOutOfRange {
        /// Age in years that was drawn.
        years: usize,
    },
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::io(
        RegistryError::IoError {
            path: Utf8PathBuf::from("/tmp/seeds.json"),
            message: "file not found".to_owned(),
        },
        "failed to read registry file at '/tmp/seeds.json': file not found"
    )]
    #[case::version(
        RegistryError::UnsupportedVersion { expected: 1, actual: 2 },
        "unsupported registry version: expected 1, found 2"
    )]
    #[case::range(
        RegistryError::InvalidRange { field: "likesPerUser", min: 9, max: 3 },
        "invalid range for likesPerUser: min 9 exceeds max 3"
    )]
    #[case::seed_not_found(
        RegistryError::SeedNotFound { name: "lakeside".to_owned() },
        "seed 'lakeside' not found in registry"
    )]
    fn registry_errors_format(#[case] err: RegistryError, #[case] expected: &str) {
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn generation_error_duplicate_slug_formats_correctly() {
        let err = GenerationError::DuplicateTagSlug {
            slug: "vegan".to_owned(),
        };
        assert_eq!(err.to_string(), "duplicate tag slug 'vegan' in tag pool");
    }
}
