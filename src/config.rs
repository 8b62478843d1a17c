// ABOUTME: Optional JSON config file merged with CLI flags
// ABOUTME: Token, destination, request pacing, and render settings

use crate::cli::Cli;
use crate::render::RenderConfig;
use crate::Result;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_REQUEST_INTERVAL_MS: u64 = 500;

#[derive(Debug, Default, Clone, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub destination: Option<PathBuf>,
    #[serde(default)]
    pub api_base: Option<String>,
    #[serde(default)]
    pub request_interval_ms: Option<u64>,
    #[serde(default)]
    pub render: RenderFileConfig,
}

/// Render settings as they appear in the config file; unset fields fall
/// back to `RenderConfig::default()` and CLI flags override everything.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RenderFileConfig {
    #[serde(default)]
    pub use_tab: Option<bool>,
    #[serde(default)]
    pub tab_size: Option<usize>,
    #[serde(default)]
    pub strict_line_breaks: Option<bool>,
    #[serde(default)]
    pub add_checkboxes: Option<bool>,
    #[serde(default)]
    pub root_node_header: Option<bool>,
    #[serde(default)]
    pub color_tags: Option<Vec<String>>,
}

pub fn default_path() -> PathBuf {
    let config_home = env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = env::var("HOME").unwrap_or_default();
        format!("{}/.config", home)
    });

    PathBuf::from(config_home).join("dynamark").join("config.json")
}

/// Loads the config file, or defaults when it does not exist.
pub fn load(path: Option<&Path>) -> Result<FileConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_path(),
    };

    if !path.exists() {
        return Ok(FileConfig::default());
    }

    let content = fs::read_to_string(&path)?;
    let config = serde_json::from_str(&content)?;
    Ok(config)
}

/// CLI flags over config file over built-in defaults.
pub fn resolve_render(cli: &Cli, file: &RenderFileConfig) -> RenderConfig {
    let defaults = RenderConfig::default();

    RenderConfig {
        use_tab: cli.tabs || file.use_tab.unwrap_or(defaults.use_tab),
        tab_size: cli
            .tab_size
            .or(file.tab_size)
            .unwrap_or(defaults.tab_size),
        strict_line_breaks: cli.strict_line_breaks
            || file.strict_line_breaks.unwrap_or(defaults.strict_line_breaks),
        add_checkboxes: cli.checkboxes
            || file.add_checkboxes.unwrap_or(defaults.add_checkboxes),
        root_node_header: if cli.no_root_header {
            false
        } else {
            file.root_node_header.unwrap_or(defaults.root_node_header)
        },
        color_tags: cli
            .color_tags
            .clone()
            .or_else(|| file.color_tags.clone())
            .unwrap_or(defaults.color_tags),
    }
}
