//! Configuration module for RagBridge-RS
//!
//! Handles loading settings from YAML files and environment variables.
//! Settings are built once at startup by the host and passed into the
//! executor; there is no global settings instance.

mod settings;

pub use settings::*;
