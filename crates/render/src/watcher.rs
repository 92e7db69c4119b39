//! # Shader Hot-Reloading
//!
//! Watches a WGSL file on disk and reports changes to the render loop over a
//! channel. The render loop drains the channel between frames, re-validates the
//! shader and swaps the pipeline only when the new source is good, so a typo
//! never takes down a running session.
//!
//! The parent directory is watched rather than the file itself: most editors
//! save by writing a new file and renaming it over the old one, which would
//! otherwise silently end a file-level watch.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

use anyhow::{Context, Result};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use tracing::{error, info};

/// Keeps the file watcher alive and exposes its change notifications.
pub struct ShaderWatcher {
    _watcher: RecommendedWatcher,
    changes: Receiver<PathBuf>,
    path: PathBuf,
}

impl ShaderWatcher {
    /// Start watching `path` for modifications.
    ///
    /// # Errors
    ///
    /// Fails if the watcher cannot be created or the file's directory cannot
    /// be watched.
    pub fn start(path: &Path) -> Result<Self> {
        let path = path
            .canonicalize()
            .with_context(|| format!("shader file {} not found", path.display()))?;
        let directory = path
            .parent()
            .context("shader file has no parent directory")?
            .to_path_buf();

        let (sender, changes) = mpsc::channel();
        let target = path.clone();
        let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
            handle_file_event(result, &target, &sender);
        })
        .context("failed to create file watcher")?;

        watcher
            .watch(&directory, RecursiveMode::NonRecursive)
            .with_context(|| format!("failed to watch {}", directory.display()))?;

        info!("Shader watcher active - monitoring {:?}", path);
        Ok(Self {
            _watcher: watcher,
            changes,
            path,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True if the file changed since the last call. Bursts of events from a
    /// single save collapse into one reload.
    pub fn poll(&self) -> bool {
        self.changes.try_iter().count() > 0
    }
}

fn handle_file_event(result: notify::Result<Event>, target: &Path, sender: &Sender<PathBuf>) {
    match result {
        Ok(event) => {
            if !event.kind.is_modify() && !event.kind.is_create() {
                return;
            }
            if event.paths.iter().any(|p| is_target(p, target)) {
                // receiver gone means the renderer shut down
                let _ = sender.send(target.to_path_buf());
            }
        }
        Err(e) => error!("File watcher error: {:?}", e),
    }
}

fn is_target(path: &Path, target: &Path) -> bool {
    path == target || (path.file_name().is_some() && path.file_name() == target.file_name())
}
