use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};

use crate::error::RuleError;
use crate::rule::{PathRule, RuleClass, expand_ignore_entry};

/// Result of testing a path against the force rules.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ForceMatch {
    /// The path equals or lies under a declared source root: the change is
    /// significant and the classification is decided.
    Under,
    /// The path is a proper ancestor of a declared source root: children
    /// must still be examined to reach the root.
    Ancestor,
    /// No relation to any force rule.
    None,
}

/// Compiled, immutable set of force and ignore rules for one build pass.
///
/// Built via [`compile`](Self::compile) from the project's effective
/// configuration, or via [`from_rules`](Self::from_rules) from explicit
/// [`PathRule`] values. All matching operates on normalized
/// project-relative paths.
#[derive(Debug, Default)]
pub struct PathRuleSet {
    force_paths: Vec<PathBuf>,
    ignore_paths: Vec<PathBuf>,
    ignore_globs: Vec<GlobMatcher>,
}

impl PathRuleSet {
    /// Compiles the rule set for one pass from the project configuration.
    ///
    /// `source_dirs` become force rules. `output_dirs` become prefix ignore
    /// rules; a directory nested under an earlier-listed one is dropped
    /// because the ancestor rule subsumes it. Each entry of `ignore_globs`
    /// may carry several comma-separated glob patterns and is expanded via
    /// the normalization described on [`PathRule`].
    ///
    /// # Errors
    ///
    /// Returns [`RuleError`] if any expanded ignore pattern is not a valid
    /// glob.
    pub fn compile(
        source_dirs: &[PathBuf],
        output_dirs: &[PathBuf],
        ignore_globs: &[String],
    ) -> Result<Self, RuleError> {
        let mut rules: Vec<PathRule> = source_dirs.iter().cloned().map(PathRule::force).collect();

        let mut kept: Vec<&PathBuf> = Vec::with_capacity(output_dirs.len());
        for dir in output_dirs {
            if kept.iter().any(|ancestor| dir.starts_with(ancestor)) {
                continue;
            }
            kept.push(dir);
            rules.push(PathRule::ignore(dir.clone()));
        }

        for entry in ignore_globs {
            rules.extend(expand_ignore_entry(entry));
        }

        Self::from_rules(rules)
    }

    /// Builds a rule set from explicit rules.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError`] if a glob rule's pattern cannot be compiled.
    pub fn from_rules<I>(rules: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = PathRule>,
    {
        let mut set = Self::default();
        for rule in rules {
            match rule.class() {
                RuleClass::Force => set.force_paths.push(PathBuf::from(rule.pattern())),
                RuleClass::Ignore => set.ignore_paths.push(PathBuf::from(rule.pattern())),
                RuleClass::IgnoreGlob => {
                    let glob = GlobBuilder::new(rule.pattern())
                        .literal_separator(true)
                        .build()
                        .map_err(|source| RuleError::new(rule.pattern().to_owned(), source))?;
                    set.ignore_globs.push(glob.compile_matcher());
                }
            }
        }
        Ok(set)
    }

    /// Tests `path` against the force rules.
    ///
    /// The ancestor case matters: a folder on the way down to a source root
    /// must not be pruned, but only a path at or below the root itself
    /// decides the build.
    #[must_use]
    pub fn force_match(&self, path: &Path) -> ForceMatch {
        if self.force_paths.iter().any(|root| path.starts_with(root)) {
            return ForceMatch::Under;
        }
        if self
            .force_paths
            .iter()
            .any(|root| root.starts_with(path) && root.as_path() != path)
        {
            return ForceMatch::Ancestor;
        }
        ForceMatch::None
    }

    /// Returns `true` iff `path` equals or lies under a declared source
    /// root.
    #[must_use]
    pub fn is_forced(&self, path: &Path) -> bool {
        self.force_match(path) == ForceMatch::Under
    }

    /// Returns `true` iff `path` lies under an output directory or matches
    /// a configured ignore pattern.
    #[must_use]
    pub fn is_ignored(&self, path: &Path) -> bool {
        if self.ignore_paths.iter().any(|dir| path.starts_with(dir)) {
            return true;
        }
        self.ignore_globs.iter().any(|glob| glob.is_match(path))
    }

    /// Returns `true` when no rules could be derived at all.
    ///
    /// An indecisive rule set cannot classify anything; callers must fall
    /// back to "build needed" instead of treating every path as
    /// unignored.
    #[must_use]
    pub fn is_indecisive(&self) -> bool {
        self.force_paths.is_empty() && self.ignore_paths.is_empty() && self.ignore_globs.is_empty()
    }
}
