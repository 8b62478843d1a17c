// ABOUTME: Command-line interface definitions using clap
// ABOUTME: Defines all subcommands and global flags

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dynamark")]
#[command(about = "Export a Dynalist account to a local Markdown tree", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// API token (overrides config file and env)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// API base URL
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Destination directory for the export
    #[arg(long, global = true)]
    pub dest: Option<PathBuf>,

    /// Config file path (default: $XDG_CONFIG_HOME/dynamark/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Delay between document fetches in milliseconds
    #[arg(long, global = true)]
    pub request_interval_ms: Option<u64>,

    /// Indent with tabs instead of spaces
    #[arg(long, global = true)]
    pub tabs: bool,

    /// Spaces per indent level
    #[arg(long, global = true)]
    pub tab_size: Option<usize>,

    /// End every line with a Markdown hard break (two trailing spaces)
    #[arg(long, global = true)]
    pub strict_line_breaks: bool,

    /// Mark checked items with [X] even when they have no checkbox
    #[arg(long = "checkboxes", global = true)]
    pub checkboxes: bool,

    /// Do not start each file with the document title as a heading
    #[arg(long, global = true)]
    pub no_root_header: bool,

    /// Comma-separated tags appended per color id (index = color)
    #[arg(long, global = true, value_delimiter = ',')]
    pub color_tags: Option<Vec<String>>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Export all folders and documents (default)
    Export,

    /// Print the destination tree without writing anything
    List,

    /// Fetch a single document and print its Markdown to stdout
    Fetch {
        /// Document ID to fetch
        id: String,
    },
}

impl Cli {
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Export)
    }
}
