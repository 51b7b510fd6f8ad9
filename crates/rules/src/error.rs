use std::fmt;

/// Error produced when an ignore pattern cannot be compiled into a matcher.
#[derive(Debug)]
pub struct RuleError {
    pattern: String,
    source: globset::Error,
}

impl RuleError {
    pub(crate) fn new(pattern: String, source: globset::Error) -> Self {
        Self { pattern, source }
    }

    /// Returns the offending pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to compile ignore pattern '{}': {}",
            self.pattern, self.source
        )
    }
}

impl std::error::Error for RuleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
