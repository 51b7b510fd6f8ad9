use std::time::Instant;

use delta::{Classification, DeltaNode, classify};
use model::{
    BuildDecision, BuildKind, CancelToken, ConfigurationProvider, Diagnostic, DiagnosticCategory,
    EngineConfig, MarkerKind, MarkerScope, MarkerStore, Priority, ProjectId, Severity,
    SnapshotStore,
};
use rules::PathRuleSet;
use tracing::{debug, warn};

use crate::diff::{DiagnosticVerdict, diff_diagnostics};

/// One build request as delivered by the host scheduler.
#[derive(Clone, Debug)]
pub struct BuildInvocation {
    /// Project being decided.
    pub project: ProjectId,
    /// Kind of build the scheduler requested.
    pub kind: BuildKind,
    /// Resource delta since the last processed state, or `None` when the
    /// platform has no change information.
    pub delta: Option<DeltaNode>,
}

/// Applies the ordered build-decision policy for one project per pass.
///
/// The policy, first match wins:
///
/// 1. a full or clean build always builds (and clears the force flag);
/// 2. a blocked-on-dependency diagnostic skips, reusing the declared
///    dependency list;
/// 3. the one-shot force flag builds;
/// 4. a decisive diagnostic diff builds;
/// 5. a missing delta builds;
/// 6. an indecisive rule set builds;
/// 7. otherwise the delta classification decides.
///
/// `decide` upholds a no-throw contract: collaborator failures are logged
/// and defaulted, never propagated.
pub struct DecisionController<'a> {
    provider: &'a dyn ConfigurationProvider,
    markers: &'a dyn MarkerStore,
    snapshots: &'a SnapshotStore,
    config: EngineConfig,
}

impl<'a> DecisionController<'a> {
    /// Creates a controller over the given collaborators.
    ///
    /// `config` is expected to be re-read once per pass (for example via
    /// [`EngineConfig::from_env`]); the controller itself never caches
    /// anything across passes.
    #[must_use]
    pub fn new(
        provider: &'a dyn ConfigurationProvider,
        markers: &'a dyn MarkerStore,
        snapshots: &'a SnapshotStore,
        config: EngineConfig,
    ) -> Self {
        Self {
            provider,
            markers,
            snapshots,
            config,
        }
    }

    /// Decides whether `invocation.project` must build this pass.
    pub fn decide(
        &self,
        invocation: &BuildInvocation,
        diagnostics: &[Diagnostic],
        cancel: &CancelToken,
    ) -> BuildDecision {
        let start = Instant::now();
        let project = &invocation.project;
        debug!(%project, kind = ?invocation.kind, "deciding build");

        let decision = self.apply_policy(invocation, diagnostics, cancel);

        if decision.is_build() {
            debug!(%project, elapsed = ?start.elapsed(), "decided: build");
        } else {
            debug!(
                %project,
                elapsed = ?start.elapsed(),
                "decided: skip, resource changes only occurred in output or ignored folders"
            );
        }
        decision
    }

    fn apply_policy(
        &self,
        invocation: &BuildInvocation,
        diagnostics: &[Diagnostic],
        cancel: &CancelToken,
    ) -> BuildDecision {
        let project = &invocation.project;

        if matches!(invocation.kind, BuildKind::Full | BuildKind::Clean) {
            self.snapshots.take_force_build(project);
            return self.build(project);
        }

        if diagnostics
            .iter()
            .any(|d| d.category == DiagnosticCategory::BlockedOnDependency)
        {
            debug!(%project, "blocked until another project builds, skipping");
            return BuildDecision::skip(self.reused_dependencies(project));
        }

        if self.snapshots.take_force_build(project) {
            debug!(%project, "force-build flag consumed, building");
            return self.build(project);
        }

        if diff_diagnostics(project, diagnostics, self.snapshots) == DiagnosticVerdict::Build {
            return self.build(project);
        }

        let Some(delta) = invocation.delta.as_ref() else {
            debug!(%project, "no delta available, building");
            return self.build(project);
        };

        let Some(config) = self.provider.config(project) else {
            // Unreadable configuration degrades to a build, with a marker
            // so the user sees why decisions stopped being incremental.
            warn!(%project, "project configuration unreadable, building");
            let decision = self.build(project);
            if let Err(error) = self.markers.add_marker(
                project,
                MarkerKind::Engine,
                Severity::Error,
                Priority::Normal,
                &format!("Could not read build configuration of project {project}"),
                project.as_str(),
            ) {
                warn!(%project, %error, "could not attach configuration error marker");
            }
            return decision;
        };

        let rules = match PathRuleSet::compile(
            &config.source_dirs,
            &config.output_dirs,
            &config.ignore_globs,
        ) {
            Ok(rules) => rules,
            Err(error) => {
                warn!(%project, %error, "could not compile path rules, building");
                return self.build(project);
            }
        };

        if rules.is_indecisive() {
            debug!(%project, "no path rules derivable, building");
            return self.build(project);
        }

        match classify(Some(delta), &rules, &self.config, cancel) {
            Classification::Build => self.build(project),
            Classification::Cancelled => {
                // Fail safe: an aborted walk must never read as "nothing to
                // do".
                debug!(%project, "classification cancelled, building conservatively");
                self.build(project)
            }
            Classification::Skip => BuildDecision::skip(self.reused_dependencies(project)),
        }
    }

    /// Marks the decision as build, clearing this engine's markers from the
    /// previous pass so the build starts from a clean diagnostic slate.
    fn build(&self, project: &ProjectId) -> BuildDecision {
        for marker in self
            .markers
            .find_markers(MarkerScope::Project(project), MarkerKind::Engine)
        {
            if let Err(error) = self.markers.delete_marker(marker.id()) {
                warn!(%project, %error, "could not clear engine marker");
            }
        }
        BuildDecision::build()
    }

    /// Computes the dependency projects reported on a skip so the scheduler
    /// keeps delivering deltas for them.
    ///
    /// The declared dependencies come first, then the declared parent.
    /// Dependencies without a workspace project are omitted; any failure
    /// yields an empty list rather than failing the decision.
    fn reused_dependencies(&self, project: &ProjectId) -> Vec<ProjectId> {
        let Some(config) = self.provider.config(project) else {
            warn!(%project, "configuration unreadable while collecting dependencies");
            return Vec::new();
        };

        let mut dependencies: Vec<ProjectId> = Vec::new();
        for dependency in config.dependencies.iter().chain(config.parent.as_ref()) {
            if dependency == project || dependencies.contains(dependency) {
                continue;
            }
            if self.provider.config(dependency).is_none() {
                debug!(%project, %dependency, "dependency not in workspace, omitted");
                continue;
            }
            dependencies.push(dependency.clone());
        }
        dependencies
    }
}
