// ABOUTME: Filesystem layer for the export destination
// ABOUTME: Directory creation, pre-existence checks, and streamed file writes

use crate::render::{render_document, RenderConfig};
use crate::tree::TreeNode;
use crate::{Error, OutlineNode, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Ensures the folder exists. Returns `true` when it was created. An
/// existing non-empty folder is a warning, not an error; its contents are
/// never touched.
pub fn ensure_folder(path: &Path) -> Result<bool> {
    if !path.exists() {
        println!("Creating folder: {}", path.display());
        fs::create_dir_all(path)?;
        return Ok(true);
    }

    let entries = fs::read_dir(path)?.count();
    if entries > 0 {
        eprintln!(
            "Warning: existing folder is not empty: {}",
            path.display()
        );
    }
    Ok(false)
}

/// Renders one fetched document body into the node's destination file.
/// The destination must not exist; an existing file is left untouched and
/// reported as `DestinationExists`.
pub fn write_document(
    nodes: &[OutlineNode],
    node: &TreeNode,
    config: &RenderConfig,
) -> Result<()> {
    if node.path.exists() {
        return Err(Error::DestinationExists {
            path: node.path.clone(),
        });
    }

    let file = File::create(&node.path)?;
    let mut writer = BufWriter::new(file);
    render_document(nodes, config, &mut writer)?;
    writer.flush()?;

    Ok(())
}
