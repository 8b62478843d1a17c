// ABOUTME: Export run: walks the tree, queues documents, drains single-flight
// ABOUTME: Fixed inter-fetch delay via Pacer, skip-if-exists policy throughout

use crate::api::ApiClient;
use crate::render::RenderConfig;
use crate::storage;
use crate::tree::{NodeKind, TreeNode};
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::VecDeque;
use std::time::Duration;

/// Fixed wait between consecutive document fetches. Deliberate rate control
/// against the remote API, not a backoff.
pub struct Pacer {
    interval: Duration,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Pacer { interval }
    }

    pub fn pause(&self) {
        if !self.interval.is_zero() {
            std::thread::sleep(self.interval);
        }
    }
}

#[derive(Debug, Default)]
pub struct ExportStats {
    pub folders_created: usize,
    pub documents_written: usize,
    pub documents_skipped: usize,
    /// Id of the document whose fetch failed and stalled the queue, if any.
    pub fetch_failed: Option<String>,
}

/// One export run. Owns the document queue; nothing here is shared or
/// global, so several runs can coexist and tests construct runs directly.
pub struct ExportRun<'a> {
    client: &'a ApiClient,
    render: &'a RenderConfig,
    pacer: Pacer,
    queue: VecDeque<&'a TreeNode>,
    stats: ExportStats,
}

impl<'a> ExportRun<'a> {
    pub fn new(client: &'a ApiClient, render: &'a RenderConfig, interval: Duration) -> Self {
        ExportRun {
            client,
            render,
            pacer: Pacer::new(interval),
            queue: VecDeque::new(),
            stats: ExportStats::default(),
        }
    }

    /// Walks the tree creating directories and queueing missing documents,
    /// then drains the queue strictly sequentially. Returns the run's stats;
    /// a failed fetch stalls the remaining queue but is not an `Err`.
    pub fn import_tree(mut self, root: &'a TreeNode) -> Result<ExportStats> {
        self.walk_folder(root)?;
        self.drain()?;
        Ok(self.stats)
    }

    fn walk_folder(&mut self, folder: &'a TreeNode) -> Result<()> {
        if storage::ensure_folder(&folder.path)? {
            self.stats.folders_created += 1;
        }

        for child in &folder.children {
            match child.kind {
                NodeKind::Folder => self.walk_folder(child)?,
                NodeKind::Document => {
                    if child.path.exists() {
                        eprintln!(
                            "Warning: file already exists, skipping: {}",
                            child.path.display()
                        );
                        self.stats.documents_skipped += 1;
                    } else {
                        self.queue.push_back(child);
                    }
                }
            }
        }

        Ok(())
    }

    fn drain(&mut self) -> Result<()> {
        if self.queue.is_empty() {
            return Ok(());
        }

        let pb = ProgressBar::new(self.queue.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:40}] {pos}/{len} docs")
                .unwrap()
                .progress_chars("##-"),
        );

        // Single-flight: at most one fetch outstanding, ever
        while let Some(doc) = self.queue.pop_front() {
            match self.client.read_document(&doc.id) {
                Ok(nodes) => match storage::write_document(&nodes, doc, self.render) {
                    Ok(()) => self.stats.documents_written += 1,
                    Err(Error::DestinationExists { path }) => {
                        pb.println(format!(
                            "Warning: destination exists, skipping: {}",
                            path.display()
                        ));
                        self.stats.documents_skipped += 1;
                    }
                    Err(e) => return Err(e),
                },
                Err(e) => {
                    pb.println(format!(
                        "Error: failed to fetch {}: {}",
                        doc.path.display(),
                        e
                    ));
                    self.stats.fetch_failed = Some(doc.id.clone());
                    break;
                }
            }

            pb.inc(1);
            if !self.queue.is_empty() {
                self.pacer.pause();
            }
        }

        pb.finish_with_message(format!(
            "exported {} docs ({} skipped)",
            self.stats.documents_written, self.stats.documents_skipped
        ));

        Ok(())
    }
}
