//! # DSSS Site
//!
//! Command-line front end for the DSSS event catalog and registrations.
//!
//! - [`config`]: environment configuration
//! - [`commands`]: argument parsing and the registration flow
//! - [`render`]: plain-text catalog views
//! - [`console`]: terminal navigator and notifier

pub mod commands;
pub mod config;
pub mod console;
pub mod render;

pub use commands::{Command, USAGE};
pub use config::{Config, ConfigError, RegistrationSettings};
