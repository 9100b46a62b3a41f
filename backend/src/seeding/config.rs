//! Seeder configuration loaded via OrthoConfig.
//!
//! Values layer in the usual order: defaults, configuration file,
//! `SEEDER_*` environment variables, then command-line flags.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_SEED_NAME: &str = "matcha-default";

fn default_registry_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("fixtures")
        .join("social-graph")
        .join("seeds.json")
}

/// Configuration values controlling a seeding run.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SEEDER")]
pub struct SeederSettings {
    /// PostgreSQL connection string. Required unless `dry_run` is set.
    pub database_url: Option<String>,
    /// Seed profile to load from the registry.
    pub seed_name: Option<String>,
    /// Optional override for the number of users generated.
    pub user_count: Option<usize>,
    /// Optional registry path override.
    pub registry_path: Option<PathBuf>,
    /// Clear previously seeded records before the first stage.
    pub reset: Option<bool>,
    /// Apply embedded schema migrations before seeding.
    pub run_migrations: Option<bool>,
    /// Generate into memory instead of the database.
    pub dry_run: Option<bool>,
}

impl SeederSettings {
    /// Return the configured seed name, falling back to the default.
    pub fn seed_name(&self) -> &str {
        self.seed_name.as_deref().unwrap_or(DEFAULT_SEED_NAME)
    }

    /// Return the configured registry path, falling back to the default.
    pub fn registry_path(&self) -> PathBuf {
        self.registry_path
            .clone()
            .unwrap_or_else(default_registry_path)
    }

    /// Whether to clear seeded tables first. Defaults to `true`.
    pub fn reset(&self) -> bool {
        self.reset.unwrap_or(true)
    }

    /// Whether to apply embedded migrations. Defaults to `false`.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(false)
    }

    /// Whether to seed the in-memory sink instead of PostgreSQL.
    pub fn dry_run(&self) -> bool {
        self.dry_run.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for seeder configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARIABLES: [&str; 7] = [
        "SEEDER_DATABASE_URL",
        "SEEDER_SEED_NAME",
        "SEEDER_USER_COUNT",
        "SEEDER_REGISTRY_PATH",
        "SEEDER_RESET",
        "SEEDER_RUN_MIGRATIONS",
        "SEEDER_DRY_RUN",
    ];

    fn load_from_empty_args() -> SeederSettings {
        SeederSettings::load_from_iter([OsString::from("seed-social-graph")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARIABLES.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert!(settings.database_url.is_none());
        assert_eq!(settings.seed_name(), DEFAULT_SEED_NAME);
        assert_eq!(settings.registry_path(), default_registry_path());
        assert!(settings.user_count.is_none());
        assert!(settings.reset());
        assert!(!settings.run_migrations());
        assert!(!settings.dry_run());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "SEEDER_DATABASE_URL",
                Some("postgres://localhost/matcha".to_owned()),
            ),
            ("SEEDER_SEED_NAME", Some("small-town".to_owned())),
            ("SEEDER_USER_COUNT", Some("25".to_owned())),
            ("SEEDER_REGISTRY_PATH", Some("/tmp/seeds.json".to_owned())),
            ("SEEDER_RESET", Some("false".to_owned())),
            ("SEEDER_RUN_MIGRATIONS", Some("true".to_owned())),
            ("SEEDER_DRY_RUN", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/matcha")
        );
        assert_eq!(settings.seed_name(), "small-town");
        assert_eq!(settings.user_count, Some(25));
        assert_eq!(settings.registry_path(), PathBuf::from("/tmp/seeds.json"));
        assert!(!settings.reset());
        assert!(settings.run_migrations());
        assert!(settings.dry_run());
    }

    #[rstest]
    #[case("SEEDER_RESET", "false", false, false, false)]
    #[case("SEEDER_RUN_MIGRATIONS", "true", true, true, false)]
    #[case("SEEDER_DRY_RUN", "true", true, false, true)]
    fn a_single_flag_variable_leaves_other_defaults(
        #[case] variable: &str,
        #[case] value: &str,
        #[case] reset: bool,
        #[case] run_migrations: bool,
        #[case] dry_run: bool,
    ) {
        let _guard = lock_env(VARIABLES.map(|name| {
            let set = (name == variable).then(|| value.to_owned());
            (name, set)
        }));

        let settings = load_from_empty_args();
        assert_eq!(settings.reset(), reset);
        assert_eq!(settings.run_migrations(), run_migrations);
        assert_eq!(settings.dry_run(), dry_run);
    }
}
