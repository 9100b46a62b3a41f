//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! This module provides the social-graph sink backed by PostgreSQL via the
//! Diesel ORM with async support through `diesel-async` and `bb8` connection
//! pooling.
//!
//! # Architecture
//!
//! - **Thin adapter**: the sink only translates generated records into
//!   Diesel rows. Stage ordering lives in the domain.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Strongly typed errors**: constraint violations map onto the port's
//!   error variants.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselSocialGraphSink, PoolConfig};
//!
//! let config = PoolConfig::new("postgres://localhost/matcha");
//! let pool = DbPool::new(config).await?;
//! let sink = DieselSocialGraphSink::new(pool);
//! ```

mod batched_insert_macros;
mod diesel_social_graph_sink;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_social_graph_sink::DieselSocialGraphSink;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
