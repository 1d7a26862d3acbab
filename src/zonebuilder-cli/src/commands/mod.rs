//! Command handlers for zonebuilder CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod build;
pub mod configure;
pub mod info;
pub mod load;
pub mod types;
