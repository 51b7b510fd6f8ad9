use delta::{DeltaNode, has_structural_change};
use model::{
    CancelToken, ConfigurationProvider, Marker, MarkerKind, MarkerScope, MarkerStore, Priority,
    ProjectId, Severity, SnapshotStore,
};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

/// State of a project after one prevention check.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PreventionState {
    /// No structural change was recorded for the project this pass; marker
    /// work was skipped entirely.
    Skipped,
    /// The project can build. Stale prevention markers, if this project
    /// held one, were swept.
    Normal,
    /// The project lacks its build prerequisite; the pass was cancelled and
    /// markers were propagated.
    Blocked,
}

/// Workspace-global build-prevention state machine.
///
/// See the crate documentation for the convergence protocol.
pub struct PreventionPropagator<'a> {
    provider: &'a dyn ConfigurationProvider,
    markers: &'a dyn MarkerStore,
    snapshots: &'a SnapshotStore,
}

impl<'a> PreventionPropagator<'a> {
    /// Creates a propagator over the given collaborators.
    #[must_use]
    pub fn new(
        provider: &'a dyn ConfigurationProvider,
        markers: &'a dyn MarkerStore,
        snapshots: &'a SnapshotStore,
    ) -> Self {
        Self {
            provider,
            markers,
            snapshots,
        }
    }

    /// Runs the prevention check for `project`.
    ///
    /// A pass with no delta, or whose delta carries nothing beyond
    /// marker-only changes, does no marker work at all for this project;
    /// other projects still evaluate independently because the marker state
    /// is workspace-global. `built` lists the projects the scheduler has
    /// already visited this pass; the remainder of the build order forms
    /// the unbuilt set that receives followup markers when this project
    /// blocks. `cancel` is the pass-wide cancellation token.
    pub fn run(
        &self,
        project: &ProjectId,
        delta: Option<&DeltaNode>,
        built: &[ProjectId],
        cancel: &CancelToken,
    ) -> PreventionState {
        if !delta.is_some_and(has_structural_change) {
            debug!(%project, "no structural change this pass, skipping prevention check");
            return PreventionState::Skipped;
        }

        let old_errors = self.markers_by_project(MarkerKind::PrerequisiteMissing);
        let old_followups = self.markers_by_project(MarkerKind::Followup);

        if self.is_blocked(project) {
            self.prevent_build(project, &old_errors, old_followups, built, cancel);
            // Force full reconsideration once the prerequisite shows up.
            self.snapshots.request_forced_build(project);
            return PreventionState::Blocked;
        }

        // Only projects that hold a stale marker themselves bother to
        // sweep; the first one cleans the whole workspace and the rest
        // find nothing left.
        if old_errors.contains_key(project) || old_followups.contains_key(project) {
            debug!(%project, "build no longer prevented, sweeping stale markers");
            self.remove_all(old_errors.into_values());
            self.remove_all(old_followups.into_values());
        }
        PreventionState::Normal
    }

    /// A project blocks when it is fully wired for dependent builds but the
    /// prerequisite file is gone. An unreadable configuration never blocks;
    /// the other builders are left to continue.
    fn is_blocked(&self, project: &ProjectId) -> bool {
        self.provider.config(project).is_some_and(|config| {
            config.has_dependent_nature
                && config.has_trigger_builder
                && config.has_build_descriptor
                && !config.has_prerequisite
        })
    }

    fn prevent_build(
        &self,
        project: &ProjectId,
        old_errors: &FxHashMap<ProjectId, Marker>,
        old_followups: FxHashMap<ProjectId, Marker>,
        built: &[ProjectId],
        cancel: &CancelToken,
    ) {
        // Cancel first: no further project in this pass may start building.
        cancel.cancel();
        warn!(%project, "build prerequisite missing, cancelling the workspace build pass");

        // Converge the error marker: keep an existing one on this project,
        // drop any on other (since-fixed) projects, create if absent.
        let mut add_error = true;
        for (owner, marker) in old_errors {
            if owner == project {
                add_error = false;
            } else if let Err(error) = self.markers.delete_marker(marker.id()) {
                warn!(project = %owner, %error, "could not remove stale prerequisite marker");
            }
        }
        if add_error {
            self.add_marker(
                project,
                MarkerKind::PrerequisiteMissing,
                "Build prerequisite file missing; this and other projects will not be built.",
                project.as_str(),
            );
        }

        self.converge_followups(project, old_followups, built);
    }

    /// Ensures followup markers exist on exactly the unbuilt set, each
    /// naming `blocker` as cause: up-to-date markers are kept, outdated
    /// ones updated in place, missing ones created, and markers on
    /// projects outside the set removed.
    fn converge_followups(
        &self,
        blocker: &ProjectId,
        old_followups: FxHashMap<ProjectId, Marker>,
        built: &[ProjectId],
    ) {
        let message = followup_message(blocker);
        let mut to_remove = old_followups;

        for unbuilt in self.unbuilt_projects(blocker, built) {
            if let Some(existing) = to_remove.remove(&unbuilt) {
                if existing.location() == blocker.as_str() {
                    continue;
                }
                if let Err(error) =
                    self.markers
                        .update_marker(existing.id(), &message, blocker.as_str())
                {
                    warn!(project = %unbuilt, %error, "could not update followup marker");
                }
            } else {
                self.add_marker(&unbuilt, MarkerKind::Followup, &message, blocker.as_str());
            }
        }

        self.remove_all(to_remove.into_values());
    }

    /// The projects of the build order not yet visited this pass, excluding
    /// the blocked project itself.
    fn unbuilt_projects(&self, project: &ProjectId, built: &[ProjectId]) -> Vec<ProjectId> {
        self.provider
            .build_order()
            .into_iter()
            .filter(|candidate| candidate != project && !built.contains(candidate))
            .collect()
    }

    fn markers_by_project(&self, kind: MarkerKind) -> FxHashMap<ProjectId, Marker> {
        self.markers
            .find_markers(MarkerScope::Workspace, kind)
            .into_iter()
            .map(|marker| (marker.project().clone(), marker))
            .collect()
    }

    fn add_marker(&self, project: &ProjectId, kind: MarkerKind, message: &str, location: &str) {
        if let Err(error) = self.markers.add_marker(
            project,
            kind,
            Severity::Error,
            Priority::High,
            message,
            location,
        ) {
            warn!(%project, %error, "could not attach prevention marker");
        }
    }

    fn remove_all(&self, markers: impl Iterator<Item = Marker>) {
        for marker in markers {
            if let Err(error) = self.markers.delete_marker(marker.id()) {
                warn!(
                    project = %marker.project(),
                    %error,
                    "could not remove stale prevention marker"
                );
            }
        }
    }
}

fn followup_message(blocker: &ProjectId) -> String {
    format!("Project was not built because of project {blocker}")
}
