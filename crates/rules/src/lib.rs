#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `rules` compiles a project's path configuration into the rule set the
//! delta classifier consults: *force* rules for declared compile-source
//! directories (changes under them always trigger a build) and *ignore*
//! rules for build-output directories and configured ignore patterns
//! (changes under them never trigger a build on their own). Rules match
//! against normalized project-relative paths.
//!
//! # Design
//!
//! - [`PathRule`] carries the user-visible rule: a [`RuleClass`] plus a
//!   pattern. Force and ignore rules are path-prefix tests; ignore-glob
//!   rules compile into shell-style glob matchers.
//! - [`PathRuleSet`] owns the compiled representation. Construction
//!   normalizes configured patterns the way the host's configuration layer
//!   delivers them: comma-separated lists are split, backslashes become
//!   forward slashes, and a trailing separator marks a directory pattern
//!   whose contents match as well.
//! - [`PathRuleSet::force_match`] distinguishes a path *under* a source
//!   root (decides the build immediately) from a path that is an *ancestor*
//!   of one (the walk must continue downward to reach the root). Collapsing
//!   the two would either miss builds or stop walks too early.
//!
//! # Invariants
//!
//! - Force rules win over ignore rules: callers check
//!   [`force_match`](PathRuleSet::force_match) before
//!   [`is_ignored`](PathRuleSet::is_ignored). A source root nested inside
//!   an ignored output folder still forces a build.
//! - Glob matching is case-sensitive and does not cross directory
//!   boundaries except through `**`.
//! - A rule set with no force rules and no ignore rules is *indecisive*:
//!   callers must treat it as "cannot classify, build" rather than
//!   "nothing ignored".
//! - Rule sets are recomputed every build pass. Configuration can change
//!   between passes without a resource delta, so nothing here is cached.
//!
//! # Errors
//!
//! [`PathRuleSet::compile`] reports [`RuleError`] when an ignore pattern
//! does not form a valid glob. The error carries the offending pattern and
//! the underlying [`globset::Error`].
//!
//! # Examples
//!
//! ```
//! use rules::{ForceMatch, PathRuleSet};
//! use std::path::Path;
//!
//! let rules = PathRuleSet::compile(
//!     &["src/main/java".into()],
//!     &["target".into()],
//!     &["*.log".to_owned()],
//! )
//! .expect("rules compile");
//!
//! assert_eq!(
//!     rules.force_match(Path::new("src/main/java/App.java")),
//!     ForceMatch::Under,
//! );
//! assert_eq!(rules.force_match(Path::new("src")), ForceMatch::Ancestor);
//! assert!(rules.is_ignored(Path::new("target/classes/App.class")));
//! assert!(rules.is_ignored(Path::new("debug.log")));
//! ```

mod error;
mod rule;
mod set;

pub use error::RuleError;
pub use rule::{PathRule, RuleClass};
pub use set::{ForceMatch, PathRuleSet};

#[cfg(test)]
mod tests;
