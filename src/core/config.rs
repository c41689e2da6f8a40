//! Engine configuration.
//!
//! Hosts build a [`RulesConfig`] at startup. It fixes the seed for reward
//! draws and names the action that may still run in a disabled area.

use serde::{Deserialize, Serialize};

use super::RuleRng;

/// Default name of the action allowed to run in a disabled area.
pub const DEFAULT_ENABLE_ACTION: &str = "SET_ENABLED";

/// Engine-wide settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Seed for the reward/selection RNG. `None` seeds from entropy.
    pub seed: Option<u64>,

    /// Action name exempt from the disabled-area check (case-insensitive).
    pub enable_action: String,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            seed: None,
            enable_action: DEFAULT_ENABLE_ACTION.to_string(),
        }
    }
}

impl RulesConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Rename the enable action.
    #[must_use]
    pub fn with_enable_action(mut self, name: impl Into<String>) -> Self {
        self.enable_action = name.into();
        self
    }

    /// Build the RNG described by this configuration.
    #[must_use]
    pub fn build_rng(&self) -> RuleRng {
        match self.seed {
            Some(seed) => RuleRng::new(seed),
            None => RuleRng::from_entropy(),
        }
    }

    /// True if `action` is the configured enable action.
    #[must_use]
    pub fn is_enable_action(&self, action: &str) -> bool {
        action.eq_ignore_ascii_case(&self.enable_action)
    }
}
