//! Per-file write serialization.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per resolved target path.
///
/// Saves to the same file queue behind each other; saves to different
/// files do not contend. An entry lives only while some save holds or
/// waits for it, so the table stays as small as the number of in-flight
/// saves.
#[derive(Debug, Default)]
pub struct WriteLocks {
    locks: DashMap<PathBuf, Arc<Mutex<()>>>,
}

impl WriteLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `path`.
    pub async fn acquire(&self, path: &Path) -> PathGuard<'_> {
        let held = self.lock_for(path).lock_owned().await;
        PathGuard {
            locks: self,
            path: path.to_path_buf(),
            held: Some(held),
        }
    }

    fn lock_for(&self, path: &Path) -> Arc<Mutex<()>> {
        let entry = self.locks.entry(path.to_path_buf()).or_default();
        Arc::clone(entry.value())
    }

    /// Drop the entry for `path` unless another save still references it.
    ///
    /// The count is checked under the shard lock, the same lock `lock_for`
    /// clones under, so no waiter can be orphaned.
    fn evict_idle(&self, path: &Path) {
        self.locks.remove_if(path, |_, lock| Arc::strong_count(lock) == 1);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.locks.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Exclusive access to one path; released on drop.
#[derive(Debug)]
pub struct PathGuard<'a> {
    locks: &'a WriteLocks,
    path: PathBuf,
    held: Option<OwnedMutexGuard<()>>,
}

impl Drop for PathGuard<'_> {
    fn drop(&mut self) {
        // release first so our own reference is not counted
        drop(self.held.take());
        self.locks.evict_idle(&self.path);
    }
}
