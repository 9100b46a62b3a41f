//! Seeding run orchestration for the command-line entry point.

use std::path::PathBuf;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};
use mockable::DefaultClock;
use social_graph::{RegistryError, SeedRegistry};
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::ports::SocialGraphSink;
use crate::domain::{SeedOptions, SeedOutcome, SeedingError, SocialGraphSeeder};
use crate::outbound::memory::InMemorySocialGraphSink;
use crate::outbound::persistence::{
    DbPool, DieselSocialGraphSink, MigrationError, PoolConfig, PoolError, run_pending_migrations,
};
use crate::seeding::config::SeederSettings;

/// Errors returned while executing a seeding run.
#[derive(Debug, Error)]
pub enum SeederStartupError {
    /// Registry path is not valid UTF-8.
    #[error("registry path {path:?} is not valid UTF-8")]
    NonUtf8RegistryPath {
        /// Offending path.
        path: PathBuf,
    },
    /// Registry directory could not be opened.
    #[error("failed to open registry directory {path}: {source}")]
    RegistryRead {
        /// Path to the registry file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Registry loading or validation failed.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    /// Seed name must not be empty.
    #[error("seed name must not be empty")]
    EmptySeedName,
    /// A database run was requested without a connection string.
    #[error("SEEDER_DATABASE_URL is required unless dry_run is set")]
    MissingDatabaseUrl,
    /// Schema migrations failed.
    #[error("migration error: {0}")]
    Migration(#[from] MigrationError),
    /// The connection pool could not be built.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
    /// Generation or persistence failed.
    #[error("social graph seeding error: {0}")]
    Seeding(#[from] SeedingError),
}

/// Run one seeding pass as described by `settings`.
///
/// Dry runs generate into an [`InMemorySocialGraphSink`] and never touch
/// the database.
///
/// # Errors
///
/// Returns [`SeederStartupError`] when configuration is incomplete, the
/// registry cannot be loaded, migrations fail, or a stage is rejected.
///
/// # Examples
///
/// ```rust,no_run
/// use backend::seeding::{SeederSettings, run_seeding};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = SeederSettings {
///     database_url: None,
///     seed_name: Some("small-town".to_owned()),
///     user_count: None,
///     registry_path: None,
///     reset: None,
///     run_migrations: None,
///     dry_run: Some(true),
/// };
/// let outcome = run_seeding(&settings).await?;
/// assert_eq!(outcome.seed_name, "small-town");
/// # Ok(())
/// # }
/// ```
pub async fn run_seeding(settings: &SeederSettings) -> Result<SeedOutcome, SeederStartupError> {
    let seed_name = settings.seed_name().trim();
    if seed_name.is_empty() {
        return Err(SeederStartupError::EmptySeedName);
    }

    let registry_path = Utf8PathBuf::from_path_buf(settings.registry_path())
        .map_err(|path| SeederStartupError::NonUtf8RegistryPath { path })?;
    let registry = load_registry(&registry_path)?;
    info!(path = %registry_path, seeds = registry.seeds().len(), "seed registry loaded");

    let options = SeedOptions {
        user_count: settings.user_count,
        reset: settings.reset(),
    };

    if settings.dry_run() {
        if settings.database_url.is_some() {
            warn!("dry run requested; ignoring SEEDER_DATABASE_URL");
        }
        let sink = Arc::new(InMemorySocialGraphSink::new());
        return seed_into(sink, &registry, seed_name, options).await;
    }

    let database_url = settings
        .database_url
        .as_deref()
        .ok_or(SeederStartupError::MissingDatabaseUrl)?;
    if settings.run_migrations() {
        run_pending_migrations(database_url).await?;
    }
    let pool = DbPool::new(PoolConfig::new(database_url)).await?;
    let sink = Arc::new(DieselSocialGraphSink::new(pool));
    seed_into(sink, &registry, seed_name, options).await
}

async fn seed_into<S: SocialGraphSink>(
    sink: Arc<S>,
    registry: &SeedRegistry,
    seed_name: &str,
    options: SeedOptions,
) -> Result<SeedOutcome, SeederStartupError> {
    let seeder = SocialGraphSeeder::new(sink, Arc::new(DefaultClock));
    let outcome = seeder
        .seed_from_registry(registry, seed_name, options)
        .await?;
    info!(
        seed = %outcome.seed_name,
        users = outcome.users,
        likes = outcome.likes,
        matches = outcome.matches,
        messages = outcome.messages,
        "social graph seeded"
    );
    Ok(outcome)
}

/// Read and validate the registry through a capability handle on its
/// parent directory.
fn load_registry(path: &Utf8Path) -> Result<SeedRegistry, SeederStartupError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| SeederStartupError::RegistryRead {
            path: path.to_owned(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "registry path must be a file",
            ),
        })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|source| {
        SeederStartupError::RegistryRead {
            path: path.to_owned(),
            source,
        }
    })?;
    Ok(SeedRegistry::from_file(&dir, Utf8Path::new(file_name))?)
}
