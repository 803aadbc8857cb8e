//! Documentation tree watching for live reindexing.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Changes observed under the documentation root.
#[derive(Debug, Clone)]
pub enum TreeChange {
    /// A file or directory appeared
    Added(PathBuf),

    /// A file or directory was removed
    Removed(PathBuf),

    /// Contents changed in place
    Changed(PathBuf),
}

impl TreeChange {
    /// Path the change refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Added(p) | Self::Removed(p) | Self::Changed(p) => p,
        }
    }
}

/// Watcher over a documentation root.
pub struct TreeWatcher {
    _watcher: RecommendedWatcher,
}

impl TreeWatcher {
    /// Watch a documentation root recursively.
    ///
    /// Returns the watcher and a channel of debounced change events. The
    /// watcher must stay alive for the channel to keep producing.
    pub fn new(root: &Path) -> Result<(Self, async_mpsc::Receiver<TreeChange>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        watcher
            .watch(root, RecursiveMode::Recursive)
            .map_err(std::io::Error::other)?;

        // Forward events onto the async channel, coalescing bursts; a
        // version-tree upload arrives as many events in quick succession.
        std::thread::spawn(move || {
            let debounce = Duration::from_millis(250);
            let mut last_forward: Option<std::time::Instant> = None;

            while let Ok(event) = sync_rx.recv() {
                let now = std::time::Instant::now();
                if last_forward.is_some_and(|t| now.duration_since(t) < debounce) {
                    continue;
                }

                let Some(change) = classify_event(&event) else {
                    continue;
                };

                last_forward = Some(now);
                if async_tx.blocking_send(change).is_err() {
                    break;
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

/// Classify a notify event into a TreeChange.
fn classify_event(event: &notify::Event) -> Option<TreeChange> {
    use notify::EventKind;

    let path = event.paths.first()?.clone();

    match event.kind {
        EventKind::Create(_) => Some(TreeChange::Added(path)),
        EventKind::Remove(_) => Some(TreeChange::Removed(path)),
        EventKind::Modify(_) => Some(TreeChange::Changed(path)),
        _ => None,
    }
}
