//! TOML configuration loading (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::validation::validate_config;
use super::SystemConfig;

/// Read a TOML file, parse it, and validate the result.
///
/// # Errors
///
/// Fails on unreadable files, malformed TOML, and values that violate the
/// engineering constraints (see [`validate_config`]).
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SystemConfig> {
    let content = fs::read_to_string(path.as_ref())
        .map_err(|e| Error::Config(ConfigError::IoError(truncated(&e.to_string()))))?;
    parse_config(&content)
}

/// Parse and validate configuration from a TOML string.
///
/// An empty string yields the engineering defaults; every section and field
/// is optional.
pub fn parse_config(content: &str) -> Result<SystemConfig> {
    let config: SystemConfig = toml::from_str(content)
        .map_err(|e| Error::Config(ConfigError::ParseError(truncated(e.message()))))?;
    validate_config(&config)?;
    Ok(config)
}

/// Keep the leading part of a diagnostic message that fits the fixed-capacity
/// error string.
fn truncated(msg: &str) -> heapless::String<128> {
    let mut out = heapless::String::new();
    for ch in msg.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}
