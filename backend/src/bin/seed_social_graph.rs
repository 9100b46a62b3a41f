//! Seeds a synthetic social graph into PostgreSQL.
//!
//! Configuration comes from `SEEDER_*` environment variables, an optional
//! configuration file, and command-line flags. Set `SEEDER_DRY_RUN=true` to
//! generate into memory without a database.

use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::seeding::{SeederSettings, run_seeding};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = SeederSettings::load_from_iter(std::env::args_os())
        .wrap_err("failed to load seeder configuration")?;
    let outcome = run_seeding(&settings)
        .await
        .wrap_err_with(|| format!("seeding `{}` failed", settings.seed_name()))?;

    info!(
        seed = %outcome.seed_name,
        tags = outcome.tags,
        users = outcome.users,
        user_tags = outcome.user_tags,
        photos = outcome.photos,
        likes = outcome.likes,
        matches = outcome.matches,
        messages = outcome.messages,
        notifications = outcome.notifications,
        blocks = outcome.blocks,
        reports = outcome.reports,
        dry_run = settings.dry_run(),
        "seeding complete"
    );
    Ok(())
}
