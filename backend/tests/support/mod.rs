//! Embedded PostgreSQL helpers for backend integration tests.
//!
//! Each test gets its own database on the shared embedded cluster. Schema
//! setup is left to the test so the embedded migrations are exercised too.

use pg_embedded_setup_unpriv::ClusterHandle;
use postgres::{Client, NoTls};
use uuid::Uuid;

/// Returns true when `SKIP_TEST_CLUSTER` is set to a truthy value.
///
/// Truthy values: "1", "true", "yes" (case-insensitive).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skips when `SKIP_TEST_CLUSTER` is truthy, otherwise panics with `reason`.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the cluster library spawns threads; the
        // shared handle below is created at most once per process.
        unsafe {
            std::env::set_var("PG_PASSWORD", "seeder_embedded_test");
        }
    }
    pg_embedded_setup_unpriv::test_support::shared_cluster_handle()
        .map_err(|err| format!("start shared cluster: {err:?}"))
}

/// Creates an empty database on the shared cluster and returns its URL.
pub fn provision_empty_database() -> Result<String, String> {
    let cluster = shared_cluster()?;
    let name = format!("seeder_{}", Uuid::new_v4().simple());
    cluster
        .create_database(name.as_str())
        .map_err(|err| format!("create database {name}: {err:?}"))?;
    Ok(cluster.connection().database_url(&name))
}

/// Render a `postgres` error with its SQLSTATE and message when available.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };
    format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    )
}

/// Count the rows in `table`.
pub fn count_rows(url: &str, table: &str) -> Result<i64, String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let row = client
        .query_one(format!("SELECT count(*) FROM {table}").as_str(), &[])
        .map_err(|err| format_postgres_error(&err))?;
    Ok(row.get(0))
}

/// Read every tag as `(id, slug)`, ordered by id.
pub fn stored_tags(url: &str) -> Result<Vec<(i32, String)>, String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let rows = client
        .query("SELECT id, slug FROM tags ORDER BY id", &[])
        .map_err(|err| format_postgres_error(&err))?;
    Ok(rows.iter().map(|row| (row.get(0), row.get(1))).collect())
}
