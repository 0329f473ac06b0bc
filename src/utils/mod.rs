//! Configuration management

pub mod config;

pub use config::{ConfigError, ConfigurationManager, TrackerConfig};
