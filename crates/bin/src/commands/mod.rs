//! Subcommand implementations.

pub mod comic;
pub mod user;
