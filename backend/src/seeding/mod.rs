//! Configuration and run wiring for the seeding binary.

mod config;
mod startup;

pub use config::SeederSettings;
pub use startup::{SeederStartupError, run_seeding};
