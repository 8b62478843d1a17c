// ABOUTME: Rebuilds the folder/document hierarchy from the flat file listing
// ABOUTME: Assigns each node its destination path during construction

use crate::util::sanitize_title;
use crate::{Error, FileRecord, Result};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Folder,
    Document,
}

/// A resolved node of the hierarchy. `path` is fixed at construction and
/// never recomputed; documents carry the `.md` suffix.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub id: String,
    pub kind: NodeKind,
    pub title: String,
    pub path: PathBuf,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Documents reachable from this node, in traversal order.
    pub fn document_count(&self) -> usize {
        match self.kind {
            NodeKind::Document => 1,
            NodeKind::Folder => self.children.iter().map(TreeNode::document_count).sum(),
        }
    }
}

/// Builds the tree rooted at `root_id`. The root must be a folder; its path
/// is `base_path` verbatim. Fails atomically: any structural error returns
/// `Err` and no partial tree.
pub fn build_tree(records: &[FileRecord], root_id: &str, base_path: &Path) -> Result<TreeNode> {
    let mut index: HashMap<&str, &FileRecord> = HashMap::with_capacity(records.len());
    for rec in records {
        if index.insert(rec.id.as_str(), rec).is_some() {
            return Err(Error::malformed(
                "/file/list",
                format!("duplicate record id {}", rec.id),
            ));
        }
    }

    let root = *index.get(root_id).ok_or_else(|| {
        Error::malformed("/file/list", format!("root record {} not found", root_id))
    })?;
    if root.file_type != "folder" {
        return Err(Error::malformed(
            "/file/list",
            format!("root record {} is not a folder", root_id),
        ));
    }

    let mut visiting = HashSet::new();
    let children = resolve_children(root, &index, base_path, &mut visiting)?;

    Ok(TreeNode {
        id: root.id.clone(),
        kind: NodeKind::Folder,
        title: root.title.clone(),
        path: base_path.to_path_buf(),
        children,
    })
}

fn resolve_children(
    folder: &FileRecord,
    index: &HashMap<&str, &FileRecord>,
    folder_path: &Path,
    visiting: &mut HashSet<String>,
) -> Result<Vec<TreeNode>> {
    // `visiting` holds the ids on the active recursion path
    if !visiting.insert(folder.id.clone()) {
        return Err(Error::malformed(
            "/file/list",
            format!("folder cycle involving {}", folder.id),
        ));
    }

    let mut resolved = Vec::with_capacity(folder.children.len());
    for child_id in &folder.children {
        let child = *index.get(child_id.as_str()).ok_or_else(|| Error::MissingReference {
            id: child_id.clone(),
            context: folder.id.clone(),
        })?;

        let node = match child.file_type.as_str() {
            "folder" => {
                let path = folder_path.join(segment_for(child));
                let children = resolve_children(child, index, &path, visiting)?;
                TreeNode {
                    id: child.id.clone(),
                    kind: NodeKind::Folder,
                    title: child.title.clone(),
                    path,
                    children,
                }
            }
            "document" => TreeNode {
                id: child.id.clone(),
                kind: NodeKind::Document,
                title: child.title.clone(),
                path: folder_path.join(format!("{}.md", segment_for(child))),
                children: Vec::new(),
            },
            other => {
                return Err(Error::UnknownNodeType {
                    id: child.id.clone(),
                    kind: other.to_string(),
                })
            }
        };

        resolved.push(node);
    }

    visiting.remove(&folder.id);
    Ok(resolved)
}

fn segment_for(record: &FileRecord) -> String {
    let name = sanitize_title(&record.title);
    if name != record.title {
        eprintln!(
            "Warning: name changed from original title: {:?} => {:?}",
            record.title, name
        );
    }
    name
}
