//! The area runtime an executor is attached to.
//!
//! Regions and nodes are owned by the host. Executors read the enabled flag,
//! and actions may flip it or hand rewards to the host.

use crate::rewards::RewardEntry;

use super::ParticipantId;

/// A region or node that owns trigger executors.
pub trait Area {
    /// Area name, unique within its minigame.
    fn name(&self) -> &str;

    /// Disabled areas only run their enable action.
    fn is_enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);

    /// Hand selected rewards to the host for granting.
    fn grant_rewards(&mut self, recipient: Option<ParticipantId>, rewards: Vec<RewardEntry>);
}

/// In-memory area that records what happens to it.
#[derive(Clone, Debug)]
pub struct AreaState {
    pub name: String,
    pub enabled: bool,
    /// Every grant made through this area, in order.
    pub granted: Vec<(Option<ParticipantId>, Vec<RewardEntry>)>,
}

impl AreaState {
    /// Create an enabled area.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            granted: Vec::new(),
        }
    }

    /// Start disabled (builder pattern).
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

impl Area for AreaState {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn grant_rewards(&mut self, recipient: Option<ParticipantId>, rewards: Vec<RewardEntry>) {
        self.granted.push((recipient, rewards));
    }
}
