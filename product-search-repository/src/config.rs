//! Configuration types for the search adapter.

use std::fmt;
use std::str::FromStr;

/// The index products are stored in unless a call names another one.
pub const DEFAULT_INDEX: &str = "products";

/// Fuzziness used by fuzzy queries: one edit from 3 characters, two from 4.
pub const DEFAULT_FUZZINESS: &str = "AUTO:3,4";

/// When writes become visible to search.
///
/// Maps onto the engine's `refresh` parameter for create, update and delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RefreshPolicy {
    /// Visible after the next periodic refresh.
    #[default]
    None,
    /// Refresh the affected shards immediately.
    Immediate,
    /// Block until the next refresh makes the write visible.
    WaitFor,
}

impl FromStr for RefreshPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "false" | "none" => Ok(Self::None),
            "true" | "immediate" => Ok(Self::Immediate),
            "wait_for" => Ok(Self::WaitFor),
            other => Err(format!(
                "unknown refresh policy '{}', expected false, true or wait_for",
                other
            )),
        }
    }
}

impl fmt::Display for RefreshPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "false"),
            Self::Immediate => write!(f, "true"),
            Self::WaitFor => write!(f, "wait_for"),
        }
    }
}

/// Configuration for the search adapter.
#[derive(Debug, Clone)]
pub struct SearchIndexConfig {
    /// Index used by the HTTP surface.
    pub default_index: String,
    /// Refresh behaviour for document writes.
    pub refresh: RefreshPolicy,
    /// Fuzziness sent with fuzzy queries.
    pub fuzziness: String,
}

impl Default for SearchIndexConfig {
    fn default() -> Self {
        Self {
            default_index: DEFAULT_INDEX.to_string(),
            refresh: RefreshPolicy::None,
            fuzziness: DEFAULT_FUZZINESS.to_string(),
        }
    }
}

impl SearchIndexConfig {
    /// Create a config targeting a custom default index.
    pub fn with_index(index: impl Into<String>) -> Self {
        Self {
            default_index: index.into(),
            ..Default::default()
        }
    }

    /// Set the refresh policy for writes.
    pub fn refresh(mut self, refresh: RefreshPolicy) -> Self {
        self.refresh = refresh;
        self
    }
}
