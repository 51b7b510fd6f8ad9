//! In-memory implementations of the collaborator traits.
//!
//! These back the engine's tests and double as reference implementations
//! for host adapters. They hold everything behind plain mutexes; the
//! workspace-wide single-pass assumption means contention is not a concern.

use std::sync::{Mutex, PoisonError};

use rustc_hash::FxHashMap;

use crate::diagnostic::{Diagnostic, DiagnosticSource};
use crate::marker::{
    Marker, MarkerId, MarkerKind, MarkerScope, MarkerStore, MarkerStoreError, Priority, Severity,
};
use crate::project::{ConfigurationProvider, ProjectConfig, ProjectId};

/// In-memory [`ConfigurationProvider`].
///
/// Projects are reported in insertion order unless an explicit build order
/// is set.
#[derive(Debug, Default)]
pub struct MemoryWorkspace {
    inner: Mutex<WorkspaceState>,
}

#[derive(Debug, Default)]
struct WorkspaceState {
    configs: FxHashMap<ProjectId, ProjectConfig>,
    build_order: Vec<ProjectId>,
}

impl MemoryWorkspace {
    /// Creates an empty workspace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a project. New projects are appended to the build
    /// order.
    pub fn insert_project(&self, project: ProjectId, config: ProjectConfig) {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if state.configs.insert(project.clone(), config).is_none() {
            state.build_order.push(project);
        }
    }

    /// Removes a project and its build-order entry.
    pub fn remove_project(&self, project: &ProjectId) {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        state.configs.remove(project);
        state.build_order.retain(|p| p != project);
    }

    /// Replaces the workspace build order.
    pub fn set_build_order(&self, order: Vec<ProjectId>) {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        state.build_order = order;
    }
}

impl ConfigurationProvider for MemoryWorkspace {
    fn config(&self, project: &ProjectId) -> Option<ProjectConfig> {
        let state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        state.configs.get(project).cloned()
    }

    fn build_order(&self) -> Vec<ProjectId> {
        let state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        state.build_order.clone()
    }
}

/// In-memory [`MarkerStore`].
#[derive(Debug, Default)]
pub struct MemoryMarkerStore {
    inner: Mutex<MarkerState>,
}

#[derive(Debug, Default)]
struct MarkerState {
    markers: FxHashMap<MarkerId, Marker>,
    next_id: u64,
}

impl MemoryMarkerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every marker in the store, ordered by creation.
    #[must_use]
    pub fn all_markers(&self) -> Vec<Marker> {
        let state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let mut markers: Vec<Marker> = state.markers.values().cloned().collect();
        markers.sort_by_key(Marker::id);
        markers
    }
}

impl MarkerStore for MemoryMarkerStore {
    fn add_marker(
        &self,
        project: &ProjectId,
        kind: MarkerKind,
        severity: Severity,
        priority: Priority,
        message: &str,
        location: &str,
    ) -> Result<MarkerId, MarkerStoreError> {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let id = MarkerId(state.next_id);
        state.next_id += 1;
        state.markers.insert(
            id,
            Marker {
                id,
                project: project.clone(),
                kind,
                severity,
                priority,
                message: message.to_owned(),
                location: location.to_owned(),
            },
        );
        Ok(id)
    }

    fn find_markers(&self, scope: MarkerScope<'_>, kind: MarkerKind) -> Vec<Marker> {
        let state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let mut markers: Vec<Marker> = state
            .markers
            .values()
            .filter(|marker| marker.kind == kind)
            .filter(|marker| match scope {
                MarkerScope::Workspace => true,
                MarkerScope::Project(project) => marker.project == *project,
            })
            .cloned()
            .collect();
        markers.sort_by_key(Marker::id);
        markers
    }

    fn delete_marker(&self, id: MarkerId) -> Result<(), MarkerStoreError> {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        state
            .markers
            .remove(&id)
            .map(|_| ())
            .ok_or(MarkerStoreError::StaleHandle(id))
    }

    fn update_marker(
        &self,
        id: MarkerId,
        message: &str,
        location: &str,
    ) -> Result<(), MarkerStoreError> {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let marker = state
            .markers
            .get_mut(&id)
            .ok_or(MarkerStoreError::StaleHandle(id))?;
        marker.message = message.to_owned();
        marker.location = location.to_owned();
        Ok(())
    }
}

/// In-memory [`DiagnosticSource`].
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    inner: Mutex<FxHashMap<ProjectId, Vec<Diagnostic>>>,
}

impl MemoryDiagnostics {
    /// Creates a source with no diagnostics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the diagnostics reported for `project`.
    pub fn set_diagnostics(&self, project: &ProjectId, diagnostics: Vec<Diagnostic>) {
        let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        map.insert(project.clone(), diagnostics);
    }
}

impl DiagnosticSource for MemoryDiagnostics {
    fn diagnostics(&self, project: &ProjectId) -> Vec<Diagnostic> {
        let map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        map.get(project).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticCategory;

    #[test]
    fn workspace_reports_insertion_order() {
        let workspace = MemoryWorkspace::new();
        workspace.insert_project(ProjectId::new("b"), ProjectConfig::default());
        workspace.insert_project(ProjectId::new("a"), ProjectConfig::default());
        assert_eq!(
            workspace.build_order(),
            vec![ProjectId::new("b"), ProjectId::new("a")]
        );
    }

    #[test]
    fn reinserting_keeps_build_order_position() {
        let workspace = MemoryWorkspace::new();
        workspace.insert_project(ProjectId::new("a"), ProjectConfig::default());
        workspace.insert_project(ProjectId::new("b"), ProjectConfig::default());
        workspace.insert_project(ProjectId::new("a"), ProjectConfig::default());
        assert_eq!(
            workspace.build_order(),
            vec![ProjectId::new("a"), ProjectId::new("b")]
        );
    }

    #[test]
    fn marker_store_round_trip() {
        let store = MemoryMarkerStore::new();
        let project = ProjectId::new("a");
        let id = store
            .add_marker(
                &project,
                MarkerKind::Followup,
                Severity::Error,
                Priority::High,
                "not built",
                "b",
            )
            .unwrap();

        let found = store.find_markers(MarkerScope::Project(&project), MarkerKind::Followup);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), id);
        assert_eq!(found[0].location(), "b");

        store.update_marker(id, "still not built", "c").unwrap();
        let found = store.find_markers(MarkerScope::Workspace, MarkerKind::Followup);
        assert_eq!(found[0].location(), "c");

        store.delete_marker(id).unwrap();
        assert!(matches!(
            store.delete_marker(id),
            Err(MarkerStoreError::StaleHandle(_))
        ));
        assert!(store.all_markers().is_empty());
    }

    #[test]
    fn find_markers_filters_by_kind() {
        let store = MemoryMarkerStore::new();
        let project = ProjectId::new("a");
        store
            .add_marker(
                &project,
                MarkerKind::Engine,
                Severity::Error,
                Priority::Normal,
                "participant failed",
                "",
            )
            .unwrap();
        assert!(
            store
                .find_markers(MarkerScope::Workspace, MarkerKind::Followup)
                .is_empty()
        );
    }

    #[test]
    fn diagnostics_default_to_empty() {
        let source = MemoryDiagnostics::new();
        assert!(source.diagnostics(&ProjectId::new("a")).is_empty());

        source.set_diagnostics(
            &ProjectId::new("a"),
            vec![Diagnostic::error(DiagnosticCategory::Toolchain, "bad")],
        );
        assert_eq!(source.diagnostics(&ProjectId::new("a")).len(), 1);
    }
}
