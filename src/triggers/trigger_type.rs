//! Trigger types.
//!
//! A trigger type names the in-world occurrence an executor reacts to
//! (`ENTER`, `LEAVE`, `GAME_START`, ...). The host defines which exist and
//! fires them; the engine treats them as opaque upper-case names.

use serde::{Deserialize, Serialize};

/// Name of a trigger type. Always stored upper-case.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TriggerType(String);

impl TriggerType {
    /// Create a trigger type, normalising the name to upper-case.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().to_uppercase())
    }

    /// The normalised name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TriggerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TriggerType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
