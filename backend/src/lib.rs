//! Backend library modules for seeding a synthetic social graph.
//!
//! - `domain`: the staged seeding service and the sink port it writes to.
//! - `outbound`: PostgreSQL and in-memory sink adapters.
//! - `seeding`: configuration and run wiring used by the binary.

pub mod domain;
pub mod outbound;
pub mod seeding;
