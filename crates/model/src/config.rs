use serde::{Deserialize, Serialize};

/// Environment variable disabling the conservative empty-delta rebuild.
///
/// When set to `1` or `true` (case-insensitive), a delta that consists of a
/// bare project node with no children classifies as "no build needed"
/// instead of the default "always build". Intended for very large
/// workspaces where the conservative default causes too many rebuilds; the
/// trade-off is that dependent projects may be left stale when a parent
/// project generates new sources without producing a delta.
pub const NO_BUILD_ON_EMPTY_DELTA_ENV: &str = "BUILDGATE_NO_BUILD_ON_EMPTY_DELTA";

/// Engine-wide configuration, read once per build pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Whether an empty delta on the project node triggers a build.
    /// Defaults to `true` (conservative). See
    /// [`NO_BUILD_ON_EMPTY_DELTA_ENV`].
    pub build_on_empty_delta: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            build_on_empty_delta: true,
        }
    }
}

impl EngineConfig {
    /// Builds the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(NO_BUILD_ON_EMPTY_DELTA_ENV).ok().as_deref())
    }

    fn from_env_value(value: Option<&str>) -> Self {
        let disabled = value.is_some_and(|v| {
            let v = v.trim();
            v == "1" || v.eq_ignore_ascii_case("true")
        });
        Self {
            build_on_empty_delta: !disabled,
        }
    }
}
