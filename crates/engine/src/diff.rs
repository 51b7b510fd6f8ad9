use model::{Diagnostic, DiagnosticCategory, ProjectId, SnapshotStore};
use tracing::debug;

/// Verdict of the diagnostic-count comparison.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DiagnosticVerdict {
    /// The counts demand a build attempt.
    Build,
    /// The project is waiting on another project; building now would only
    /// thrash.
    DontBuild,
    /// The counts say nothing either way; fall through to delta analysis.
    Undetermined,
}

/// Compares the project's current diagnostics against the previous pass.
///
/// Diagnostics are partitioned into tool-chain errors and errors this
/// engine attached itself. Engine errors always warrant a retry (a failed
/// participant may have left inconsistent output). Tool-chain errors
/// warrant a build when their count moved in either direction since the
/// previous pass. A "blocked on another project" diagnostic suppresses
/// building entirely; only the other project's build can clear it.
///
/// The observed counts are written back to the snapshot on every call,
/// before the verdict is returned, so the same stable counts can never
/// re-trigger a build on the next pass.
pub fn diff_diagnostics(
    project: &ProjectId,
    diagnostics: &[Diagnostic],
    snapshots: &SnapshotStore,
) -> DiagnosticVerdict {
    let blocked = diagnostics
        .iter()
        .any(|d| d.category == DiagnosticCategory::BlockedOnDependency);
    let relevant_errors = diagnostics
        .iter()
        .filter(|d| d.category == DiagnosticCategory::Toolchain && d.is_error())
        .count();
    let engine_errors = diagnostics
        .iter()
        .filter(|d| d.category == DiagnosticCategory::Engine && d.is_error())
        .count();

    // Unconditional state advance: the counts are recorded even on the
    // early returns below.
    let previous = snapshots.with(project, |snapshot| {
        let previous = snapshot.previous_error_count.replace(relevant_errors);
        snapshot.previous_engine_error_count = engine_errors;
        previous
    });

    if blocked {
        debug!(%project, "waiting on another project, not building");
        return DiagnosticVerdict::DontBuild;
    }

    if engine_errors > 0 {
        debug!(%project, engine_errors, "engine reported failures last pass, retrying");
        return DiagnosticVerdict::Build;
    }

    match previous {
        Some(previous) if previous != relevant_errors => {
            debug!(%project, previous, current = relevant_errors, "error count changed, building");
            DiagnosticVerdict::Build
        }
        // First observation: a non-zero count might resolve via a build,
        // but that is for the delta to decide.
        _ => DiagnosticVerdict::Undetermined,
    }
}
