#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `model` holds the data types and collaborator seams shared by every crate
//! in the buildgate workspace. The decision engine itself lives in the
//! `engine` and `prevent` crates; this crate defines what those engines
//! operate *on*: project identities and configuration, diagnostic markers,
//! the per-project snapshot carried between build passes, the engine-wide
//! configuration toggle, and the cancellation token representing one
//! workspace build pass.
//!
//! # Design
//!
//! - [`ProjectId`] is a cheap, hashable identity used to key every
//!   per-project structure. [`ProjectConfig`] carries the facts the host's
//!   configuration layer derives for a project: declared source and output
//!   directories, ignore patterns, dependencies, and the presence flags the
//!   prevention propagator qualifies on.
//! - Mutable workspace state is reached exclusively through narrow traits --
//!   [`ConfigurationProvider`], [`MarkerStore`], [`DiagnosticSource`] -- so
//!   the convergence logic in `engine` and `prevent` stays testable against
//!   the in-memory implementations in [`memory`].
//! - [`SnapshotStore`] owns the only state that survives across passes
//!   inside one workspace session: previous marker counts and the one-shot
//!   force-build flag. It is keyed by project and guarded by a mutex so
//!   read-modify-write sequences cannot tear even if the host ever overlaps
//!   passes.
//!
//! # Invariants
//!
//! - The force-build flag is consume-once: [`SnapshotStore::take_force_build`]
//!   clears it in the same locked step that observes it.
//! - Snapshots are session-scoped. Nothing in this crate persists to disk;
//!   a fresh process starts from empty stores.
//! - Marker identity is stable: a [`MarkerId`] handed out by a store refers
//!   to the same marker until that marker is deleted.
//!
//! # Errors
//!
//! Marker mutation surfaces [`MarkerStoreError`] (for example a stale
//! [`MarkerId`] after another instance already deleted the marker). Callers
//! in the decision engines treat these as best-effort failures: logged and
//! accepted, never propagated out of a decision.
//!
//! # Examples
//!
//! ```
//! use model::{ProjectId, SnapshotStore};
//!
//! let snapshots = SnapshotStore::new();
//! let project = ProjectId::new("app");
//!
//! snapshots.request_forced_build(&project);
//! assert!(snapshots.take_force_build(&project));
//! // consume-once: the flag is gone after the first take
//! assert!(!snapshots.take_force_build(&project));
//! ```

mod cancel;
mod config;
mod decision;
mod diagnostic;
mod marker;
pub mod memory;
mod project;
mod snapshot;

pub use cancel::CancelToken;
pub use config::{EngineConfig, NO_BUILD_ON_EMPTY_DELTA_ENV};
pub use decision::{BuildDecision, BuildKind, Outcome};
pub use diagnostic::{Diagnostic, DiagnosticCategory, DiagnosticSource};
pub use marker::{
    Marker, MarkerId, MarkerKind, MarkerScope, MarkerStore, MarkerStoreError, Priority, Severity,
};
pub use project::{ConfigurationProvider, ProjectConfig, ProjectId};
pub use snapshot::{DiagnosticSnapshot, SnapshotStore};
