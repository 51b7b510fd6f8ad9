#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `prevent` guards the workspace build graph against half-configured
//! projects. A project that carries the dependent-build nature and the
//! triggering builder, has its build descriptor, but is missing the
//! required build-prerequisite file must not be built into default output
//! locations -- and because the host scheduler aborts the *whole* pass in
//! that case, every other project silently loses its build too. This crate
//! cancels the pass explicitly and converges workspace marker state so the
//! user can see both the offender and everything it dragged down.
//!
//! # Design
//!
//! One [`PreventionPropagator`] instance runs per project per pass, but all
//! instances mutate the same workspace-global marker state. There is no
//! shared "pass context" between instances, so convergence has to be
//! derivable from the marker store alone:
//!
//! - A blocked project claims the single prerequisite-missing error marker
//!   (removing stale ones on other projects), cancels the pass, and then
//!   walks the not-yet-built tail of the build order, creating, updating,
//!   or deleting followup markers until they match exactly that set.
//! - A healthy project only does cleanup work when it *itself* carries a
//!   stale marker; in a large graph the first such project sweeps the
//!   workspace clean and the rest find nothing to do.
//!
//! Repeated runs with no intervening change are no-ops after the first
//! convergence: every operation checks existing state before mutating.
//!
//! # Invariants
//!
//! - At most one prerequisite-missing marker exists workspace-wide after a
//!   pass, and it sits on the blocked project.
//! - After a blocked pass, exactly the unbuilt projects carry followup
//!   markers, each naming the blocked project as cause.
//! - Marker-store failures are logged and accepted; the next pass
//!   re-derives the intended state from scratch.
//!
//! # Examples
//!
//! ```
//! use delta::{ChangeKind, DeltaNode};
//! use model::memory::{MemoryMarkerStore, MemoryWorkspace};
//! use model::{CancelToken, ProjectConfig, ProjectId, SnapshotStore};
//! use prevent::{PreventionPropagator, PreventionState};
//!
//! let workspace = MemoryWorkspace::new();
//! let blocked = ProjectId::new("app");
//! workspace.insert_project(
//!     blocked.clone(),
//!     ProjectConfig {
//!         has_dependent_nature: true,
//!         has_trigger_builder: true,
//!         has_build_descriptor: true,
//!         has_prerequisite: false,
//!         ..ProjectConfig::default()
//!     },
//! );
//! let markers = MemoryMarkerStore::new();
//! let snapshots = SnapshotStore::new();
//! let cancel = CancelToken::new();
//!
//! let change = DeltaNode::project(vec![DeltaNode::file(".buildpath", ChangeKind::Removed)]);
//! let propagator = PreventionPropagator::new(&workspace, &markers, &snapshots);
//! let state = propagator.run(&blocked, Some(&change), &[], &cancel);
//! assert_eq!(state, PreventionState::Blocked);
//! assert!(cancel.is_cancelled());
//! ```

mod propagator;

pub use propagator::{PreventionPropagator, PreventionState};
