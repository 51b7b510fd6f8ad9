use model::{CancelToken, EngineConfig};
use rules::{ForceMatch, PathRuleSet};
use tracing::debug;

use crate::node::{ChangeFlags, ChangeKind, DeltaNode, ResourceKind};

/// Result of classifying a delta against a rule set.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Classification {
    /// The recorded changes require a build.
    Build,
    /// Every recorded change is confined to ignored paths; no build is
    /// needed.
    Skip,
    /// The pass was cancelled mid-walk. Callers must not treat this as
    /// [`Classification::Skip`]; the conservative mapping is to build.
    Cancelled,
}

/// Per-node verdict of the traversal.
enum Visit {
    /// Nothing decisive here; keep walking siblings (children already
    /// handled).
    Continue,
    /// Ignore this subtree entirely.
    Prune,
    /// A significant change was found; the walk stops.
    Decided,
    /// Cancellation was observed; the walk stops without a verdict.
    Cancelled,
}

/// Classifies a resource delta: do the recorded changes require a build?
///
/// Walks the tree depth-first in pre-order with early termination. At each
/// node, force rules are consulted before ignore rules, so an explicit
/// source root nested inside an ignored output folder still forces a
/// build.
///
/// A missing delta (`None`) means the platform has no change information,
/// for example on the very first pass after workspace load; that always
/// classifies as [`Classification::Build`]. A delta consisting of a bare
/// project node with no children historically appears when a parent
/// project changes without producing per-resource deltas; it classifies
/// according to [`EngineConfig::build_on_empty_delta`].
pub fn classify(
    delta: Option<&DeltaNode>,
    rules: &PathRuleSet,
    config: &EngineConfig,
    cancel: &CancelToken,
) -> Classification {
    let Some(root) = delta else {
        debug!("no delta available, classifying as build needed");
        return Classification::Build;
    };

    if root.resource() == ResourceKind::Project && root.children().is_empty() {
        // No affected children under the project node. Parent-project
        // changes do not produce per-resource deltas, so the safe reading
        // is "something changed that we cannot see".
        if config.build_on_empty_delta {
            debug!("empty project delta, classifying as build needed");
            return Classification::Build;
        }
        debug!("empty project delta, configured to skip");
        return Classification::Skip;
    }

    match visit(root, rules, cancel) {
        Visit::Decided => Classification::Build,
        Visit::Cancelled => Classification::Cancelled,
        Visit::Continue | Visit::Prune => Classification::Skip,
    }
}

fn visit(node: &DeltaNode, rules: &PathRuleSet, cancel: &CancelToken) -> Visit {
    if cancel.is_cancelled() {
        return Visit::Cancelled;
    }

    if node.change() == ChangeKind::NoChange {
        return Visit::Prune;
    }

    if node.resource() == ResourceKind::Project && node.flags().contains(ChangeFlags::DESCRIPTION) {
        debug!("project description changed, build needed");
        return Visit::Decided;
    }

    let force = rules.force_match(node.path());
    if force == ForceMatch::Under {
        debug!(path = %node.path().display(), "change under source root, build needed");
        return Visit::Decided;
    }

    // An ancestor of a source root must be descended into even when an
    // ignore rule also covers it; force wins over ignore.
    if force != ForceMatch::Ancestor {
        if rules.is_ignored(node.path()) {
            return Visit::Prune;
        }
        if node.resource() == ResourceKind::File {
            // A file change outside every known classification is
            // conservatively significant.
            debug!(path = %node.path().display(), "unclassified file change, build needed");
            return Visit::Decided;
        }
    }

    for child in node.children() {
        match visit(child, rules, cancel) {
            Visit::Decided => return Visit::Decided,
            Visit::Cancelled => return Visit::Cancelled,
            Visit::Continue | Visit::Prune => {}
        }
    }
    Visit::Continue
}

/// Returns `true` when the delta records anything beyond marker-only
/// annotation changes.
///
/// Added and removed resources are structural. A changed resource with no
/// detail flags is transparent (only its descendants matter); one whose
/// flags are exactly the marker flag is not structural; any other flag
/// combination is.
#[must_use]
pub fn has_structural_change(root: &DeltaNode) -> bool {
    if matches!(root.change(), ChangeKind::Added | ChangeKind::Removed) {
        return true;
    }
    let flags = root.flags();
    if !flags.is_empty() && !flags.is_markers_only() {
        return true;
    }
    root.children().iter().any(has_structural_change)
}
