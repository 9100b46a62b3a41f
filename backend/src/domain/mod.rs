//! Domain services and ports for seeding a social graph.
//!
//! Purpose: Orchestrate deterministic graph generation and hand each stage to
//! a persistence sink. The domain owns stage ordering and error reporting;
//! adapters own storage details.
//!
//! Public surface:
//! - SocialGraphSeeder: runs the staged pipeline against a sink.
//! - SeedOptions / SeedOutcome: per-run options and committed counts.
//! - SeedingError / SeedStage: failure reporting with the failing stage.

pub mod ports;
mod social_graph_seeding;

pub use self::social_graph_seeding::{
    SeedOptions, SeedOutcome, SeedStage, SeedingError, SocialGraphSeeder,
};
