use crate::project::ProjectId;

/// Kind of build the host scheduler requested.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum BuildKind {
    /// Delta-driven build; the decision engine may skip it.
    Incremental,
    /// Full rebuild requested by the user or the host. Always builds.
    Full,
    /// Clean build. Always builds.
    Clean,
}

/// Final verdict of one build decision.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The external build engine must run for this project.
    Build,
    /// Nothing relevant changed; the build is skipped.
    Skip,
}

/// Result of one invocation of the decision controller.
///
/// Computed and consumed within a single build-pass call; never stored.
/// `reused_dependencies` is only meaningful on [`Outcome::Skip`]: it feeds
/// the scheduler a synthetic dependency edge so future deltas for those
/// projects are still delivered to this one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildDecision {
    /// Whether to build or skip.
    pub outcome: Outcome,
    /// Dependency projects to report to the scheduler on skip.
    pub reused_dependencies: Vec<ProjectId>,
}

impl BuildDecision {
    /// A decision to run the build.
    #[must_use]
    pub const fn build() -> Self {
        Self {
            outcome: Outcome::Build,
            reused_dependencies: Vec::new(),
        }
    }

    /// A decision to skip the build, reporting `dependencies` for
    /// scheduling.
    #[must_use]
    pub const fn skip(dependencies: Vec<ProjectId>) -> Self {
        Self {
            outcome: Outcome::Skip,
            reused_dependencies: dependencies,
        }
    }

    /// Returns `true` when the outcome is [`Outcome::Build`].
    #[must_use]
    pub fn is_build(&self) -> bool {
        self.outcome == Outcome::Build
    }
}
