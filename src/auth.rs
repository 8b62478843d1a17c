// ABOUTME: Token discovery with precedence chain
// ABOUTME: CLI flag → config file → env var

use crate::{Error, Result};
use std::env;

/// Environment variable consulted when neither the CLI flag nor the config
/// file provides a token.
pub const TOKEN_ENV_VAR: &str = "DYNALIST_TOKEN";

pub fn resolve_token(cli_token: Option<String>, file_token: Option<&str>) -> Result<String> {
    // 1. CLI flag
    if let Some(token) = cli_token {
        return Ok(token);
    }

    // 2. Config file
    if let Some(token) = file_token {
        return Ok(token.to_string());
    }

    // 3. Environment variable
    if let Ok(token) = env::var(TOKEN_ENV_VAR) {
        return Ok(token);
    }

    Err(Error::Auth(format!(
        "No API token found. Provide via --token, the config file, or {} env var",
        TOKEN_ENV_VAR
    )))
}
