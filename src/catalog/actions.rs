//! Stock actions.

use crate::core::{ActionError, Result, RuleError};
use crate::rewards::Rewards;
use crate::store::{Section, Value};
use crate::triggers::{Action, ActionContext};

use super::registry::LoadContext;

/// Enables or disables the owning area.
///
/// This is the action an executor still runs while its area is disabled, so
/// a disabled area can be switched back on by its own rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetEnabledAction {
    state: bool,
}

impl SetEnabledAction {
    pub fn new(state: bool) -> Self {
        Self { state }
    }

    #[must_use]
    pub fn state(&self) -> bool {
        self.state
    }

    pub fn set_state(&mut self, state: bool) {
        self.state = state;
    }
}

impl Default for SetEnabledAction {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Action for SetEnabledAction {
    fn name(&self) -> &str {
        "SET_ENABLED"
    }

    fn category(&self) -> &str {
        "Region/Node Actions"
    }

    fn requires_participant(&self) -> bool {
        false
    }

    fn execute(&mut self, ctx: &mut ActionContext<'_>) -> std::result::Result<(), ActionError> {
        tracing::debug!(area = ctx.area.name(), enabled = self.state, "Setting area state");
        ctx.area.set_enabled(self.state);
        Ok(())
    }

    fn save(&self, section: &mut Section) {
        section.set("state", self.state);
    }

    fn load(&mut self, section: &Section, _ctx: &mut LoadContext<'_>) -> Result<()> {
        if let Some(state) = section.optional_bool("state")? {
            self.state = state;
        }
        Ok(())
    }
}

/// Draws from a reward pool and grants the result to the participant.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RewardAction {
    rewards: Rewards,
}

impl RewardAction {
    pub fn new(rewards: Rewards) -> Self {
        Self { rewards }
    }

    #[must_use]
    pub fn rewards(&self) -> &Rewards {
        &self.rewards
    }

    pub fn rewards_mut(&mut self) -> &mut Rewards {
        &mut self.rewards
    }
}

impl Action for RewardAction {
    fn name(&self) -> &str {
        "REWARD"
    }

    fn category(&self) -> &str {
        "Player Actions"
    }

    fn requires_participant(&self) -> bool {
        true
    }

    fn execute(&mut self, ctx: &mut ActionContext<'_>) -> std::result::Result<(), ActionError> {
        let prize = self.rewards.select_reward(ctx.rng);
        if prize.is_empty() {
            return Ok(());
        }

        let recipient = ctx.participant.map(|p| p.id());
        tracing::debug!(area = ctx.area.name(), count = prize.len(), "Granting rewards");
        ctx.area.grant_rewards(recipient, prize);
        Ok(())
    }

    fn save(&self, section: &mut Section) {
        self.rewards.save(section.create_section("rewards"));
    }

    fn load(&mut self, section: &Section, ctx: &mut LoadContext<'_>) -> Result<()> {
        self.rewards = Rewards::new();
        match section.get("rewards") {
            None => Ok(()),
            Some(Value::Section(pool)) => {
                let nested = self.rewards.load(pool, ctx.registry.reward_kinds())?;
                ctx.report.merge(nested);
                Ok(())
            }
            Some(_) => Err(RuleError::malformed("rewards", "expected a section")),
        }
    }
}
