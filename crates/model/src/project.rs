use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Stable identity of a workspace project.
///
/// Every per-project structure in the workspace (snapshots, markers,
/// configuration) is keyed by this type. Identity is the project name as the
/// host workspace knows it; two handles to the same project always compare
/// equal.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Creates a project identity from the host's project name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the project name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Per-project facts derived from the host's effective build configuration.
///
/// A fresh value is produced for every build pass; the configuration may
/// change between passes without a corresponding resource delta, so nothing
/// derived from it is cached across passes.
///
/// Paths are project-relative. Ignore patterns use shell-style glob syntax;
/// a single entry may carry several comma-separated patterns, which the rule
/// compiler splits apart.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Declared compile-source directories. Changes under these always
    /// trigger a build.
    pub source_dirs: Vec<PathBuf>,
    /// Declared build-output directories. Changes under these never trigger
    /// a build on their own.
    pub output_dirs: Vec<PathBuf>,
    /// Configured ignore patterns (glob syntax, possibly comma-separated).
    pub ignore_globs: Vec<String>,
    /// Declared dependency projects, in declaration order.
    pub dependencies: Vec<ProjectId>,
    /// Declared parent project, if any. Counts as a dependency when
    /// computing reuse lists.
    pub parent: Option<ProjectId>,
    /// Whether the project has the dependent-build nature configured.
    pub has_dependent_nature: bool,
    /// Whether the triggering builder is configured on the project.
    pub has_trigger_builder: bool,
    /// Whether the project's build descriptor file is present.
    pub has_build_descriptor: bool,
    /// Whether the build-prerequisite file the triggering builder requires
    /// is present.
    pub has_prerequisite: bool,
}

/// Read-only view of the host's project configuration layer.
///
/// Implementations resolve a project to its current effective configuration
/// and expose the workspace-wide build order. A `None` configuration means
/// the configuration could not be read this pass; callers degrade to their
/// conservative default rather than failing.
pub trait ConfigurationProvider {
    /// Returns the current effective configuration for `project`, or `None`
    /// when it cannot be read or the project is not in the workspace.
    fn config(&self, project: &ProjectId) -> Option<ProjectConfig>;

    /// Returns the workspace build order: the topological list of all
    /// projects the scheduler visits in one pass.
    fn build_order(&self) -> Vec<ProjectId>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_id_round_trips_name() {
        let id = ProjectId::new("core-lib");
        assert_eq!(id.as_str(), "core-lib");
        assert_eq!(id.to_string(), "core-lib");
    }

    #[test]
    fn project_config_deserializes_with_defaults() {
        let config: ProjectConfig =
            serde_json::from_str(r#"{"source_dirs": ["src/main/java"]}"#).unwrap();
        assert_eq!(config.source_dirs, vec![PathBuf::from("src/main/java")]);
        assert!(config.output_dirs.is_empty());
        assert!(!config.has_dependent_nature);
        assert!(config.parent.is_none());
    }

    #[test]
    fn project_id_serializes_transparently() {
        let json = serde_json::to_string(&ProjectId::new("app")).unwrap();
        assert_eq!(json, r#""app""#);
    }
}
