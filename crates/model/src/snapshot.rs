use std::sync::{Mutex, PoisonError};

use rustc_hash::FxHashMap;

use crate::project::ProjectId;

/// Per-project record carried between build passes within one workspace
/// session.
///
/// Created lazily on a project's first decision, mutated every pass, removed
/// when the project leaves the workspace. Never persisted: a process restart
/// starts from scratch, which is exactly the conservative behaviour the
/// decision policy wants (no delta and no snapshot both mean "build").
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiagnosticSnapshot {
    /// Error-marker count observed on the previous pass, or `None` before
    /// the first observation.
    pub previous_error_count: Option<usize>,
    /// Count of this engine's own error markers observed on the previous
    /// pass.
    pub previous_engine_error_count: usize,
    /// One-shot flag forcing the next build regardless of deltas. Consumed
    /// atomically by [`SnapshotStore::take_force_build`].
    pub force_build: bool,
}

/// Session-scoped store of [`DiagnosticSnapshot`] values keyed by project.
///
/// The map lives behind a single mutex; every read-modify-write happens
/// inside one locked closure so the consume-once semantics of the force
/// flag hold even if the host ever runs passes concurrently.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    inner: Mutex<FxHashMap<ProjectId, DiagnosticSnapshot>>,
}

impl SnapshotStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` against the snapshot for `project`, creating a default
    /// snapshot on first access.
    pub fn with<R>(&self, project: &ProjectId, f: impl FnOnce(&mut DiagnosticSnapshot) -> R) -> R {
        let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(map.entry(project.clone()).or_default())
    }

    /// Observes and clears the one-shot force-build flag in a single step.
    ///
    /// Returns the value the flag had. After this call the flag is `false`,
    /// so an immediately repeated decision falls through to delta-based
    /// logic instead of forcing again.
    pub fn take_force_build(&self, project: &ProjectId) -> bool {
        self.with(project, |snapshot| {
            std::mem::replace(&mut snapshot.force_build, false)
        })
    }

    /// Marks `project` as needing its next build unconditionally.
    ///
    /// Called by external participants when they invalidate build output
    /// behind the engine's back (for example when the host clears a
    /// project's output folder).
    pub fn request_forced_build(&self, project: &ProjectId) {
        self.with(project, |snapshot| snapshot.force_build = true);
    }

    /// Returns a copy of the current snapshot for `project`.
    #[must_use]
    pub fn get(&self, project: &ProjectId) -> DiagnosticSnapshot {
        self.with(project, |snapshot| snapshot.clone())
    }

    /// Drops all state for `project`. Called when the project is closed or
    /// deleted from the workspace.
    pub fn remove(&self, project: &ProjectId) {
        let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        map.remove(project);
    }
}
