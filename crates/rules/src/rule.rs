use std::path::PathBuf;

/// Classification of a single path rule.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum RuleClass {
    /// Changes under the path always trigger a build. Derived from declared
    /// compile-source directories.
    Force,
    /// Changes under the path never trigger a build on their own. Derived
    /// from declared build-output directories.
    Ignore,
    /// Like [`RuleClass::Ignore`] but the pattern is a shell-style glob
    /// rather than a path prefix.
    IgnoreGlob,
}

/// One force-or-ignore rule prior to compilation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PathRule {
    class: RuleClass,
    pattern: String,
}

impl PathRule {
    /// Creates a force rule for a source directory.
    #[must_use]
    pub fn force(path: impl Into<PathBuf>) -> Self {
        Self {
            class: RuleClass::Force,
            pattern: path_to_pattern(path.into()),
        }
    }

    /// Creates an ignore rule for an output directory.
    #[must_use]
    pub fn ignore(path: impl Into<PathBuf>) -> Self {
        Self {
            class: RuleClass::Ignore,
            pattern: path_to_pattern(path.into()),
        }
    }

    /// Creates a glob ignore rule for a configured ignore pattern.
    #[must_use]
    pub fn ignore_glob(pattern: impl Into<String>) -> Self {
        Self {
            class: RuleClass::IgnoreGlob,
            pattern: pattern.into(),
        }
    }

    /// Returns the rule class.
    #[must_use]
    pub const fn class(&self) -> RuleClass {
        self.class
    }

    /// Returns the pattern text.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

fn path_to_pattern(path: PathBuf) -> String {
    normalize_separators(&path.to_string_lossy())
}

/// Rewrites backslash separators to forward slashes. Configured patterns
/// arrive in whatever convention the project file was written with.
pub(crate) fn normalize_separators(pattern: &str) -> String {
    pattern.replace('\\', "/")
}

/// Expands one configured ignore entry into glob rules.
///
/// An entry may hold several comma-separated patterns. Each pattern is
/// trimmed and separator-normalized; a trailing separator marks a directory
/// pattern, which expands to the directory itself plus everything below it.
pub(crate) fn expand_ignore_entry(entry: &str) -> Vec<PathRule> {
    let mut rules = Vec::new();
    for raw in entry.split(',') {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let mut pattern = normalize_separators(raw);
        if let Some(stem) = pattern.strip_suffix('/') {
            rules.push(PathRule::ignore_glob(stem));
            pattern = format!("{stem}/**");
        }
        rules.push(PathRule::ignore_glob(pattern));
    }
    rules
}
