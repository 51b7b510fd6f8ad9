use std::ops::BitOr;
use std::path::{Path, PathBuf};

/// Kind of resource a delta node describes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ResourceKind {
    /// The project itself. Always the root of a delta, exactly once.
    Project,
    /// A folder below the project.
    Folder,
    /// A file. File nodes have no children.
    File,
}

/// Kind of change recorded for one resource.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ChangeKind {
    /// The resource appeared since the last processed state.
    Added,
    /// The resource disappeared.
    Removed,
    /// The resource exists on both sides and something about it changed.
    Changed,
    /// The resource itself did not change; it appears only as an interior
    /// node on the way to changed descendants.
    NoChange,
}

/// Bitmask detailing what changed about a [`ChangeKind::Changed`] resource.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct ChangeFlags(u32);

impl ChangeFlags {
    /// No detail flags.
    pub const EMPTY: Self = Self(0);
    /// The file contents changed.
    pub const CONTENT: Self = Self(1);
    /// The project description (metadata such as the dependency list)
    /// changed. Only meaningful on project nodes.
    pub const DESCRIPTION: Self = Self(1 << 1);
    /// Only diagnostic markers on the resource changed.
    pub const MARKERS: Self = Self(1 << 2);
    /// The resource was deleted and replaced by another with the same path.
    pub const REPLACED: Self = Self(1 << 3);

    /// Returns `true` if every flag in `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if no flags are set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the marker flag is the only one set.
    #[must_use]
    pub const fn is_markers_only(self) -> bool {
        self.0 == Self::MARKERS.0
    }
}

impl BitOr for ChangeFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// One node of a resource delta tree.
///
/// Paths are project-relative; the root project node carries the empty
/// path. The snapshot is immutable once taken: this crate only ever reads
/// it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeltaNode {
    path: PathBuf,
    resource: ResourceKind,
    change: ChangeKind,
    flags: ChangeFlags,
    children: Vec<DeltaNode>,
}

impl DeltaNode {
    /// Creates the root project node of a delta.
    #[must_use]
    pub fn project(children: Vec<DeltaNode>) -> Self {
        Self {
            path: PathBuf::new(),
            resource: ResourceKind::Project,
            change: ChangeKind::Changed,
            flags: ChangeFlags::EMPTY,
            children,
        }
    }

    /// Creates a folder node.
    #[must_use]
    pub fn folder(path: impl Into<PathBuf>, change: ChangeKind, children: Vec<DeltaNode>) -> Self {
        Self {
            path: path.into(),
            resource: ResourceKind::Folder,
            change,
            flags: ChangeFlags::EMPTY,
            children,
        }
    }

    /// Creates a file node.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>, change: ChangeKind) -> Self {
        Self {
            path: path.into(),
            resource: ResourceKind::File,
            change,
            flags: ChangeFlags::EMPTY,
            children: Vec::new(),
        }
    }

    /// Sets the change-detail flags.
    #[must_use]
    pub fn with_flags(mut self, flags: ChangeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Returns the project-relative path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the resource kind.
    #[must_use]
    pub const fn resource(&self) -> ResourceKind {
        self.resource
    }

    /// Returns the change kind.
    #[must_use]
    pub const fn change(&self) -> ChangeKind {
        self.change
    }

    /// Returns the change-detail flags.
    #[must_use]
    pub const fn flags(&self) -> ChangeFlags {
        self.flags
    }

    /// Returns the child nodes in platform order.
    #[must_use]
    pub fn children(&self) -> &[DeltaNode] {
        &self.children
    }
}
