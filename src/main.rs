// ABOUTME: CLI entrypoint for dynamark command
// ABOUTME: Handles error exit codes and command dispatch

use clap::Parser;
use dynamark::{
    api::ApiClient,
    auth::resolve_token,
    cli::{Cli, Commands},
    config,
    export::ExportRun,
    render::render_document,
    tree::{build_tree, NodeKind, TreeNode},
    Error, FileListResponse, Result,
};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

fn main() {
    if let Err(e) = run() {
        eprintln!("dynamark: [E{}] {}", e.exit_code(), e);
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let file_cfg = config::load(cli.config.as_deref())?;

    let token = resolve_token(cli.token.clone(), file_cfg.token.as_deref())?;
    let api_base = cli.api_base.clone().or_else(|| file_cfg.api_base.clone());
    let client = ApiClient::new(token, api_base)?;

    match cli.command() {
        Commands::Export => {
            let dest = destination(&cli, &file_cfg)?;
            let render = config::resolve_render(&cli, &file_cfg.render);
            let interval = cli
                .request_interval_ms
                .or(file_cfg.request_interval_ms)
                .unwrap_or(config::DEFAULT_REQUEST_INTERVAL_MS);

            let listing = fetch_listing(&client)?;
            let root_id = require_root_id(&listing)?;
            let tree = build_tree(&listing.files, &root_id, &dest)?;

            let run = ExportRun::new(&client, &render, Duration::from_millis(interval));
            let stats = run.import_tree(&tree)?;

            println!(
                "Done: {} folders created, {} documents written, {} skipped",
                stats.folders_created, stats.documents_written, stats.documents_skipped
            );
            if let Some(id) = stats.fetch_failed {
                eprintln!("Export stopped early: fetch failed for document {}", id);
            }
        }
        Commands::List => {
            let dest = destination(&cli, &file_cfg)?;
            let listing = fetch_listing(&client)?;
            let root_id = require_root_id(&listing)?;
            let tree = build_tree(&listing.files, &root_id, &dest)?;
            print_tree(&tree);
        }
        Commands::Fetch { id } => {
            let render = config::resolve_render(&cli, &file_cfg.render);
            let nodes = client.read_document(&id)?;
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            render_document(&nodes, &render, &mut handle)?;
            handle.flush()?;
        }
    }

    Ok(())
}

fn fetch_listing(client: &ApiClient) -> Result<FileListResponse> {
    println!("Fetching file list...");
    let listing = client.list_files()?;
    println!("{} folders and documents found.", listing.files.len());
    Ok(listing)
}

fn require_root_id(listing: &FileListResponse) -> Result<String> {
    listing.root_file_id.clone().ok_or_else(|| {
        Error::MalformedResponse {
            context: "/file/list".into(),
            message: "missing root_file_id".into(),
        }
    })
}

fn destination(cli: &Cli, file: &config::FileConfig) -> Result<PathBuf> {
    cli.dest
        .clone()
        .or_else(|| file.destination.clone())
        .ok_or_else(|| {
            Error::Filesystem(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No destination directory configured. Provide via --dest or the config file",
            ))
        })
}

fn print_tree(node: &TreeNode) {
    match node.kind {
        NodeKind::Folder => {
            println!("{}", node.path.display());
            for child in &node.children {
                print_tree(child);
            }
        }
        NodeKind::Document => println!("{} [FILE]", node.path.display()),
    }
}
