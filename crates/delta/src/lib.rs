#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `delta` models the hierarchical resource change-set the host platform
//! hands the build scheduler for each pass, and classifies it against a
//! project's path rules: do the recorded changes require the external build
//! engine to run, or did everything happen inside output folders and
//! ignored paths?
//!
//! # Design
//!
//! - [`DeltaNode`] mirrors the project's resource tree. Each node carries
//!   its project-relative path, a resource kind, a change kind, and a
//!   change-flags bitmask. The tree is constructed by the host, read-only
//!   here, and discarded after the pass.
//! - [`classify`] walks the tree depth-first in pre-order with early
//!   termination. Each node yields one of *continue*, *prune subtree*, or
//!   *decided*; the tri-state replaces the control-flow exception a
//!   less careful implementation would use to abort the walk, and keeps
//!   "cancelled" distinct from "classified as not needed".
//! - [`has_structural_change`] is the cheaper pre-check used by the
//!   prevention propagator: it only asks whether anything beyond marker
//!   annotations changed at all.
//!
//! # Invariants
//!
//! - A missing delta always classifies as [`Classification::Build`]; when
//!   the platform cannot say what changed, rebuilding is the only safe
//!   answer.
//! - Force rules are consulted before ignore rules at every node, so a
//!   source root nested inside an ignored folder still decides the build.
//! - Cancellation surfaces as [`Classification::Cancelled`], never as
//!   "no build needed".
//!
//! # Examples
//!
//! ```
//! use delta::{ChangeKind, Classification, DeltaNode, classify};
//! use model::{CancelToken, EngineConfig};
//! use rules::PathRuleSet;
//!
//! let rules = PathRuleSet::compile(&["src".into()], &["target".into()], &[])
//!     .expect("rules compile");
//! let delta = DeltaNode::project(vec![DeltaNode::folder(
//!     "target",
//!     ChangeKind::Changed,
//!     vec![DeltaNode::file("target/app.jar", ChangeKind::Changed)],
//! )]);
//!
//! let classification = classify(
//!     Some(&delta),
//!     &rules,
//!     &EngineConfig::default(),
//!     &CancelToken::new(),
//! );
//! assert_eq!(classification, Classification::Skip);
//! ```

mod classify;
mod node;

pub use classify::{Classification, classify, has_structural_change};
pub use node::{ChangeFlags, ChangeKind, DeltaNode, ResourceKind};

#[cfg(test)]
mod tests;
