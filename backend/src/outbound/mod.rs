//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern, providing concrete
//! implementations of the social-graph sink port:
//!
//! - **persistence**: PostgreSQL-backed sink using Diesel ORM, plus embedded
//!   schema migrations
//! - **memory**: constraint-checking in-memory sink for dry runs and tests
//!
//! Adapters are thin translators that convert between generated records and
//! infrastructure-specific representations. They contain no business logic.

pub mod memory;
pub mod persistence;
