use std::fmt;

use crate::project::ProjectId;

/// Severity of a diagnostic marker.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Severity {
    /// Informational annotation.
    Info,
    /// Warning that does not block anything.
    Warning,
    /// Error visible to the user and to downstream decisions.
    Error,
}

/// Display priority of a marker in the host UI.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Priority {
    /// Default priority.
    Normal,
    /// Shown before normal-priority markers.
    High,
}

/// Kind of a marker owned by this engine.
///
/// Kinds are disjoint namespaces: convergence guarantees ("at most one per
/// project") hold per kind.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum MarkerKind {
    /// A failure reported by the build engine itself (for example a build
    /// participant that threw during the previous pass).
    Engine,
    /// The build-prerequisite file is missing; the project cancelled the
    /// workspace build pass.
    PrerequisiteMissing,
    /// The project was not built solely because another project cancelled
    /// the pass. The marker's location names the offending project.
    Followup,
}

/// Opaque handle to a marker inside a [`MarkerStore`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct MarkerId(pub(crate) u64);

impl MarkerId {
    /// Creates a marker id from a raw store-assigned value.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// One diagnostic marker attached to a project.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Marker {
    pub(crate) id: MarkerId,
    pub(crate) project: ProjectId,
    pub(crate) kind: MarkerKind,
    pub(crate) severity: Severity,
    pub(crate) priority: Priority,
    pub(crate) message: String,
    pub(crate) location: String,
}

impl Marker {
    /// Returns the store handle for this marker.
    #[must_use]
    pub const fn id(&self) -> MarkerId {
        self.id
    }

    /// Returns the project the marker is attached to.
    #[must_use]
    pub fn project(&self) -> &ProjectId {
        &self.project
    }

    /// Returns the marker kind.
    #[must_use]
    pub const fn kind(&self) -> MarkerKind {
        self.kind
    }

    /// Returns the marker severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the marker priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the user-visible message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the location attribute. For [`MarkerKind::Followup`] markers
    /// this names the project that caused the build to be prevented.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }
}

/// Scope of a marker query.
#[derive(Clone, Copy, Debug)]
pub enum MarkerScope<'a> {
    /// Markers on any project in the workspace.
    Workspace,
    /// Markers on one specific project.
    Project(&'a ProjectId),
}

/// Error reported by marker mutation.
#[derive(Debug, thiserror::Error)]
pub enum MarkerStoreError {
    /// The marker handle no longer refers to a live marker, typically
    /// because another builder instance deleted it first.
    #[error("marker {0} no longer exists")]
    StaleHandle(MarkerId),
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Workspace-global marker storage.
///
/// The host platform backs this with its own marker facility; tests use the
/// in-memory implementation in [`crate::memory`]. All operations are
/// synchronous. Mutation failures are expected to be rare and recoverable:
/// the decision engines log them and re-derive the intended state on the
/// next pass rather than tracking partial success.
pub trait MarkerStore {
    /// Attaches a new marker and returns its handle.
    fn add_marker(
        &self,
        project: &ProjectId,
        kind: MarkerKind,
        severity: Severity,
        priority: Priority,
        message: &str,
        location: &str,
    ) -> Result<MarkerId, MarkerStoreError>;

    /// Finds all markers of `kind` within `scope`, in stable (creation)
    /// order.
    fn find_markers(&self, scope: MarkerScope<'_>, kind: MarkerKind) -> Vec<Marker>;

    /// Deletes the marker behind `id`.
    fn delete_marker(&self, id: MarkerId) -> Result<(), MarkerStoreError>;

    /// Replaces the message and location attributes of an existing marker.
    fn update_marker(
        &self,
        id: MarkerId,
        message: &str,
        location: &str,
    ) -> Result<(), MarkerStoreError>;
}
