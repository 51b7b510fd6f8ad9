#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `engine` decides, once per project per build pass, whether the external
//! build engine has to run. The host scheduler hands it the build kind, the
//! resource delta, and the project's current diagnostics; the controller
//! applies an ordered policy over those inputs and yields either "build" or
//! "skip, and report these dependency projects so future deltas keep
//! flowing".
//!
//! # Design
//!
//! - [`diff_diagnostics`] compares the current diagnostic counts against the
//!   snapshot from the previous pass. A changed error count in either
//!   direction is itself a reason to build: new errors may need a build to
//!   re-evaluate, and disappeared errors mean downstream state should
//!   refresh. The comparison is deliberately tri-state; "nothing changed"
//!   does not mean "do not build", it means "ask the delta".
//! - [`DecisionController`] owns the policy ordering. First match wins:
//!   full/clean builds and the one-shot force flag short-circuit to build,
//!   a blocked project short-circuits to skip, then the marker diff, then
//!   the delta classification. Collaborators are injected as trait objects
//!   so the whole policy is exercised in tests against in-memory stores.
//! - `decide` never fails. Every fallible collaborator call is caught,
//!   logged, and replaced by its conservative default; a thrown error
//!   would read to the host as "the whole workspace build pass aborted".
//!
//! # Invariants
//!
//! - The force-build flag is consumed by the same decision step that
//!   observes it, including on the full/clean path where its value is
//!   irrelevant.
//! - The marker diff persists the observed counts on every invocation,
//!   regardless of verdict, so a stable count can never re-trigger.
//! - Engine-owned markers on the project are cleared whenever the outcome
//!   is build; a skip touches no markers.
//!
//! # Examples
//!
//! ```
//! use engine::{BuildInvocation, DecisionController};
//! use model::memory::{MemoryMarkerStore, MemoryWorkspace};
//! use model::{
//!     BuildKind, CancelToken, EngineConfig, Outcome, ProjectConfig, ProjectId, SnapshotStore,
//! };
//!
//! let workspace = MemoryWorkspace::new();
//! let project = ProjectId::new("app");
//! workspace.insert_project(project.clone(), ProjectConfig::default());
//! let markers = MemoryMarkerStore::new();
//! let snapshots = SnapshotStore::new();
//!
//! let controller =
//!     DecisionController::new(&workspace, &markers, &snapshots, EngineConfig::default());
//! let invocation = BuildInvocation {
//!     project,
//!     kind: BuildKind::Full,
//!     delta: None,
//! };
//! let decision = controller.decide(&invocation, &[], &CancelToken::new());
//! assert_eq!(decision.outcome, Outcome::Build);
//! ```

mod controller;
mod diff;

pub use controller::{BuildInvocation, DecisionController};
pub use diff::{DiagnosticVerdict, diff_diagnostics};
