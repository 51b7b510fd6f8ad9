use crate::marker::Severity;
use crate::project::ProjectId;

/// Category of a diagnostic as reported by the host's diagnostic sources.
///
/// The marker-diff engine partitions on this to decide whether a changed
/// diagnostic count warrants a rebuild.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DiagnosticCategory {
    /// Produced by the language tool-chain (compiler and friends).
    Toolchain,
    /// Produced by this build engine itself during a previous pass.
    Engine,
    /// The project cannot proceed until another project's build completes.
    /// Diagnostics in this category suppress rebuild attempts entirely.
    BlockedOnDependency,
}

/// One current diagnostic attached to a project.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Source category of the diagnostic.
    pub category: DiagnosticCategory,
    /// Severity as reported by the source.
    pub severity: Severity,
    /// User-visible message.
    pub message: String,
}

impl Diagnostic {
    /// Creates an error-severity diagnostic.
    #[must_use]
    pub fn error(category: DiagnosticCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// Creates a warning-severity diagnostic.
    #[must_use]
    pub fn warning(category: DiagnosticCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    /// Returns `true` for error-severity diagnostics.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Read-only view of the diagnostics currently attached to a project.
pub trait DiagnosticSource {
    /// Returns the current diagnostics for `project`.
    fn diagnostics(&self, project: &ProjectId) -> Vec<Diagnostic>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_severity() {
        assert!(Diagnostic::error(DiagnosticCategory::Toolchain, "boom").is_error());
        assert!(!Diagnostic::warning(DiagnosticCategory::Engine, "meh").is_error());
    }
}
