//! Trigger executors.
//!
//! A [`TriggerExecutor`] binds one trigger type on one area to an ordered
//! list of conditions and actions, plus a fire-count limit.
//!
//! ## Fire counting
//!
//! Counters are keyed by [`CounterKey`]. A global executor only ever touches
//! [`CounterKey::Global`]; a per-player executor only touches
//! [`CounterKey::Participant`]. A counter that has reached the limit stays
//! exhausted until [`TriggerExecutor::clear_triggers`] or
//! [`TriggerExecutor::remove_trigger`].
//!
//! ## Persisted shape
//!
//! ```text
//! actions.<i>.type         = <action name>
//! actions.<i>.*            = action fields
//! conditions.<i>.type      = <condition name>
//! conditions.<i>.inverted  = true          # only if inverted
//! conditions.<i>.*         = condition fields
//! isTriggeredPerPlayer     = true          # only if true
//! triggerCount             = <n>           # only if nonzero
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::catalog::{LoadContext, RuleRegistry};
use crate::core::{
    Area, LoadReport, Participant, ParticipantId, Result, RuleError, RuleRng, RulesConfig,
};
use crate::store::{Section, Value};

use super::action::{Action, ActionContext};
use super::condition::{ConditionContext, ConfiguredCondition};
use super::trigger_type::TriggerType;

/// Key of a fire counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CounterKey {
    /// Shared counter for executors that are not per-player.
    Global,
    /// Counter for one participant.
    Participant(ParticipantId),
}

/// Conditions, actions and fire counters for one trigger on one area.
pub struct TriggerExecutor {
    trigger: TriggerType,
    owner: String,
    conditions: Vec<ConfiguredCondition>,
    actions: Vec<Box<dyn Action>>,
    trigger_per_player: bool,
    /// Maximum fires per counter. 0 = unlimited.
    trigger_count: u32,
    counters: FxHashMap<CounterKey, u32>,
    config: RulesConfig,
}

impl TriggerExecutor {
    /// Create an empty executor for `trigger` on the area named `owner`.
    pub fn new(trigger: TriggerType, owner: impl Into<String>) -> Self {
        Self {
            trigger,
            owner: owner.into(),
            conditions: Vec::new(),
            actions: Vec::new(),
            trigger_per_player: false,
            trigger_count: 0,
            counters: FxHashMap::default(),
            config: RulesConfig::default(),
        }
    }

    /// Apply engine configuration (builder pattern).
    #[must_use]
    pub fn with_config(mut self, config: &RulesConfig) -> Self {
        self.config = config.clone();
        self
    }

    /// Add a condition (builder pattern).
    #[must_use]
    pub fn with_condition(mut self, condition: ConfiguredCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Add an action (builder pattern).
    #[must_use]
    pub fn with_action(mut self, action: Box<dyn Action>) -> Self {
        self.actions.push(action);
        self
    }

    /// Count fires per participant instead of globally (builder pattern).
    #[must_use]
    pub fn per_player(mut self) -> Self {
        self.trigger_per_player = true;
        self
    }

    /// Limit the number of fires (builder pattern). 0 = unlimited.
    #[must_use]
    pub fn with_trigger_count(mut self, count: u32) -> Self {
        self.trigger_count = count;
        self
    }

    #[must_use]
    pub fn trigger(&self) -> &TriggerType {
        &self.trigger
    }

    /// Name of the owning area.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn conditions(&self) -> &[ConfiguredCondition] {
        &self.conditions
    }

    pub fn condition_mut(&mut self, index: usize) -> Option<&mut ConfiguredCondition> {
        self.conditions.get_mut(index)
    }

    pub fn add_condition(&mut self, condition: ConfiguredCondition) {
        self.conditions.push(condition);
    }

    pub fn remove_condition(&mut self, index: usize) -> Option<ConfiguredCondition> {
        (index < self.conditions.len()).then(|| self.conditions.remove(index))
    }

    #[must_use]
    pub fn actions(&self) -> &[Box<dyn Action>] {
        &self.actions
    }

    pub fn action_mut(&mut self, index: usize) -> Option<&mut (dyn Action + 'static)> {
        self.actions.get_mut(index).map(|action| action.as_mut())
    }

    pub fn add_action(&mut self, action: Box<dyn Action>) {
        self.actions.push(action);
    }

    pub fn remove_action(&mut self, index: usize) -> Option<Box<dyn Action>> {
        (index < self.actions.len()).then(|| self.actions.remove(index))
    }

    #[must_use]
    pub fn is_trigger_per_player(&self) -> bool {
        self.trigger_per_player
    }

    pub fn set_trigger_per_player(&mut self, per_player: bool) {
        self.trigger_per_player = per_player;
    }

    #[must_use]
    pub fn trigger_count(&self) -> u32 {
        self.trigger_count
    }

    pub fn set_trigger_count(&mut self, count: u32) {
        self.trigger_count = count;
    }

    /// Counter that applies to `participant` in the current mode.
    ///
    /// `None` when per-player and no participant is supplied.
    fn counter_key(&self, participant: Option<&dyn Participant>) -> Option<CounterKey> {
        if self.trigger_per_player {
            participant.map(|p| CounterKey::Participant(p.id()))
        } else {
            Some(CounterKey::Global)
        }
    }

    /// Current value of a counter (absent = 0).
    #[must_use]
    pub fn fire_count(&self, key: CounterKey) -> u32 {
        self.counters.get(&key).copied().unwrap_or(0)
    }

    /// True if the fire-count limit still allows firing.
    #[must_use]
    pub fn can_be_triggered(&self, participant: Option<&dyn Participant>) -> bool {
        if self.trigger_count == 0 {
            return true;
        }
        match self.counter_key(participant) {
            Some(key) => self.fire_count(key) < self.trigger_count,
            None => true,
        }
    }

    /// True if every applicable condition passes and the limit allows firing.
    ///
    /// Conditions that require a participant are skipped when none is given.
    #[must_use]
    pub fn can_trigger(&self, participant: Option<&dyn Participant>, area: &dyn Area) -> bool {
        let ctx = ConditionContext::new(participant, area);

        for condition in &self.conditions {
            if condition.requires_participant() && participant.is_none() {
                continue;
            }
            if !condition.evaluate(&ctx) {
                tracing::debug!(
                    trigger = %self.trigger,
                    area = %self.owner,
                    condition = condition.name(),
                    "Condition failed"
                );
                return false;
            }
        }

        self.can_be_triggered(participant)
    }

    /// Run the configured actions in order.
    ///
    /// While the area is disabled only the enable action runs. Actions that
    /// need a participant are skipped without one. If at least one action
    /// ran, the relevant counter is incremented once. Returns the number of
    /// actions that ran.
    pub fn execute(
        &mut self,
        participant: Option<&dyn Participant>,
        area: &mut dyn Area,
        rng: &mut RuleRng,
    ) -> Result<usize> {
        let mut executed = 0;

        for action in self.actions.iter_mut() {
            if !area.is_enabled() && !self.config.is_enable_action(action.name()) {
                continue;
            }
            if action.requires_participant() && participant.is_none() {
                continue;
            }

            let mut ctx = ActionContext {
                participant,
                area: &mut *area,
                rng: &mut *rng,
            };
            action
                .execute(&mut ctx)
                .map_err(|source| RuleError::ActionFailed {
                    action: action.name().to_string(),
                    source,
                })?;
            executed += 1;
        }

        if executed > 0 {
            self.record_fire(participant);
        }

        tracing::debug!(
            trigger = %self.trigger,
            area = %self.owner,
            executed,
            "Executed trigger actions"
        );
        Ok(executed)
    }

    fn record_fire(&mut self, participant: Option<&dyn Participant>) {
        if let Some(key) = self.counter_key(participant) {
            *self.counters.entry(key).or_insert(0) += 1;
        }
    }

    /// Reset every counter.
    pub fn clear_triggers(&mut self) {
        self.counters.clear();
    }

    /// Reset one participant's counter.
    pub fn remove_trigger(&mut self, participant: ParticipantId) {
        self.counters.remove(&CounterKey::Participant(participant));
    }

    /// Write actions, conditions and non-default flags into `section`.
    pub fn save(&self, section: &mut Section) {
        for (index, action) in self.actions.iter().enumerate() {
            let action_section = section.create_section(&format!("actions.{}", index));
            action_section.set("type", action.name());
            action.save(action_section);
        }

        for (index, condition) in self.conditions.iter().enumerate() {
            condition.save(section.create_section(&format!("conditions.{}", index)));
        }

        if self.trigger_per_player {
            section.set("isTriggeredPerPlayer", true);
        }
        if self.trigger_count != 0 {
            section.set("triggerCount", self.trigger_count);
        }
    }

    /// Replace actions, conditions and flags with those in `section`.
    ///
    /// Unknown action/condition names abort the load. Malformed entries are
    /// skipped and reported. Nothing changes unless the load succeeds. Fire
    /// counters are left untouched.
    pub fn load(&mut self, section: &Section, registry: &RuleRegistry) -> Result<LoadReport> {
        let mut report = LoadReport::new();
        let mut actions = Vec::new();
        let mut conditions = Vec::new();

        for (key, value) in children(section, "actions", &mut report)? {
            let path = format!("actions.{}", key);
            match Self::load_action(&path, value, registry, &mut report) {
                Ok(action) => {
                    actions.push(action);
                    report.loaded += 1;
                }
                Err(err) => report.skip(err)?,
            }
        }

        for (key, value) in children(section, "conditions", &mut report)? {
            let path = format!("conditions.{}", key);
            match Self::load_condition(&path, value, registry) {
                Ok(condition) => {
                    conditions.push(condition);
                    report.loaded += 1;
                }
                Err(err) => report.skip(err)?,
            }
        }

        let per_player = match section.optional_bool("isTriggeredPerPlayer") {
            Ok(value) => value.unwrap_or(false),
            Err(err) => {
                report.skip(err)?;
                false
            }
        };

        let count = match section.optional_i64("triggerCount") {
            Ok(value) => match u32::try_from(value.unwrap_or(0)) {
                Ok(count) => count,
                Err(_) => {
                    report.skip(RuleError::malformed("triggerCount", "must be a non-negative count"))?;
                    0
                }
            },
            Err(err) => {
                report.skip(err)?;
                0
            }
        };

        self.actions = actions;
        self.conditions = conditions;
        self.trigger_per_player = per_player;
        self.trigger_count = count;
        Ok(report)
    }

    fn load_action(
        path: &str,
        value: &Value,
        registry: &RuleRegistry,
        report: &mut LoadReport,
    ) -> Result<Box<dyn Action>> {
        let entry = value
            .as_section()
            .ok_or_else(|| RuleError::malformed(path, "expected a section"))?;
        let name = entry.require_str("type").map_err(|_| RuleError::malformed(path, "missing 'type'"))?;

        let mut action = registry.resolve_action(name)?;
        let mut ctx = LoadContext::new(registry, report);
        action.load(entry, &mut ctx)?;
        Ok(action)
    }

    fn load_condition(path: &str, value: &Value, registry: &RuleRegistry) -> Result<ConfiguredCondition> {
        let entry = value
            .as_section()
            .ok_or_else(|| RuleError::malformed(path, "expected a section"))?;
        let name = entry.require_str("type").map_err(|_| RuleError::malformed(path, "missing 'type'"))?;

        let mut condition = registry.resolve_condition(name)?;
        condition.load(entry)?;

        let mut configured = ConfiguredCondition::new(condition);
        configured.set_inverted(entry.optional_bool("inverted")?.unwrap_or(false));
        Ok(configured)
    }
}

/// Children of the list section at `key`, or none if it is absent.
fn children<'s>(
    section: &'s Section,
    key: &str,
    report: &mut LoadReport,
) -> Result<Vec<(&'s str, &'s Value)>> {
    match section.get(key) {
        None => Ok(Vec::new()),
        Some(Value::Section(list)) => Ok(list.iter().collect()),
        Some(_) => {
            report.skip(RuleError::malformed(key, "expected a section"))?;
            Ok(Vec::new())
        }
    }
}

impl std::fmt::Debug for TriggerExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerExecutor")
            .field("trigger", &self.trigger)
            .field("owner", &self.owner)
            .field("conditions", &self.conditions)
            .field("actions", &self.actions)
            .field("trigger_per_player", &self.trigger_per_player)
            .field("trigger_count", &self.trigger_count)
            .field("counters", &self.counters)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActionError, AreaState, ParticipantSnapshot};
    use crate::triggers::Condition;

    struct Log;

    impl Action for Log {
        fn name(&self) -> &str {
            "LOG"
        }

        fn category(&self) -> &str {
            "Test"
        }

        fn requires_participant(&self) -> bool {
            false
        }

        fn execute(&mut self, _ctx: &mut ActionContext<'_>) -> std::result::Result<(), ActionError> {
            Ok(())
        }

        fn save(&self, _section: &mut Section) {}

        fn load(&mut self, _section: &Section, _ctx: &mut LoadContext<'_>) -> Result<()> {
            Ok(())
        }
    }

    struct Fails;

    impl Action for Fails {
        fn name(&self) -> &str {
            "FAILS"
        }

        fn category(&self) -> &str {
            "Test"
        }

        fn requires_participant(&self) -> bool {
            false
        }

        fn execute(&mut self, _ctx: &mut ActionContext<'_>) -> std::result::Result<(), ActionError> {
            Err("boom".into())
        }

        fn save(&self, _section: &mut Section) {}

        fn load(&mut self, _section: &Section, _ctx: &mut LoadContext<'_>) -> Result<()> {
            Ok(())
        }
    }

    struct Never;

    impl Condition for Never {
        fn name(&self) -> &str {
            "NEVER"
        }

        fn category(&self) -> &str {
            "Test"
        }

        fn requires_participant(&self) -> bool {
            false
        }

        fn check(&self, _ctx: &ConditionContext<'_>) -> bool {
            false
        }

        fn save(&self, _section: &mut Section) {}

        fn load(&mut self, _section: &Section) -> Result<()> {
            Ok(())
        }
    }

    fn executor() -> TriggerExecutor {
        TriggerExecutor::new(TriggerType::new("ENTER"), "arena")
    }

    #[test]
    fn test_unlimited_by_default() {
        let mut exec = executor().with_action(Box::new(Log));
        let mut area = AreaState::new("arena");
        let mut rng = RuleRng::new(1);

        for _ in 0..10 {
            assert!(exec.can_trigger(None, &area));
            exec.execute(None, &mut area, &mut rng).unwrap();
        }
        assert_eq!(exec.fire_count(CounterKey::Global), 10);
    }

    #[test]
    fn test_one_increment_per_execute() {
        let mut exec = executor()
            .with_action(Box::new(Log))
            .with_action(Box::new(Log))
            .with_action(Box::new(Log));
        let mut area = AreaState::new("arena");
        let mut rng = RuleRng::new(1);

        assert_eq!(exec.execute(None, &mut area, &mut rng).unwrap(), 3);
        assert_eq!(exec.fire_count(CounterKey::Global), 1);
    }

    #[test]
    fn test_inverted_condition() {
        let area = AreaState::new("arena");
        let exec = executor().with_condition(ConfiguredCondition::new(Box::new(Never)));
        assert!(!exec.can_trigger(None, &area));

        let exec = executor().with_condition(ConfiguredCondition::new(Box::new(Never)).inverted());
        assert!(exec.can_trigger(None, &area));
    }

    #[test]
    fn test_action_failure_propagates_without_increment() {
        let mut exec = executor()
            .with_action(Box::new(Log))
            .with_action(Box::new(Fails))
            .with_trigger_count(1);
        let mut area = AreaState::new("arena");
        let mut rng = RuleRng::new(1);

        let err = exec.execute(None, &mut area, &mut rng).unwrap_err();
        assert!(matches!(err, RuleError::ActionFailed { ref action, .. } if action == "FAILS"));
        assert_eq!(exec.fire_count(CounterKey::Global), 0);
        assert!(exec.can_be_triggered(None));
    }

    #[test]
    fn test_per_player_without_participant() {
        let mut exec = executor()
            .with_action(Box::new(Log))
            .per_player()
            .with_trigger_count(1);
        let mut area = AreaState::new("arena");
        let mut rng = RuleRng::new(1);

        exec.execute(None, &mut area, &mut rng).unwrap();
        assert!(exec.can_be_triggered(None));
        assert_eq!(exec.fire_count(CounterKey::Global), 0);
    }

    #[test]
    fn test_remove_trigger_rearms_one_participant() {
        let mut exec = executor()
            .with_action(Box::new(Log))
            .per_player()
            .with_trigger_count(1);
        let mut area = AreaState::new("arena");
        let mut rng = RuleRng::new(1);
        let a = ParticipantSnapshot::new(ParticipantId::new());
        let b = ParticipantSnapshot::new(ParticipantId::new());

        exec.execute(Some(&a), &mut area, &mut rng).unwrap();
        exec.execute(Some(&b), &mut area, &mut rng).unwrap();
        assert!(!exec.can_be_triggered(Some(&a)));
        assert!(!exec.can_be_triggered(Some(&b)));

        exec.remove_trigger(a.id);
        assert!(exec.can_be_triggered(Some(&a)));
        assert!(!exec.can_be_triggered(Some(&b)));
    }

    #[test]
    fn test_remove_action_and_condition() {
        let mut exec = executor()
            .with_action(Box::new(Log))
            .with_condition(ConfiguredCondition::new(Box::new(Never)));

        assert!(exec.remove_action(3).is_none());
        assert!(exec.remove_action(0).is_some());
        assert!(exec.remove_condition(0).is_some());
        assert!(exec.actions().is_empty());
        assert!(exec.conditions().is_empty());
    }

    #[test]
    fn test_save_omits_defaults() {
        let exec = executor().with_action(Box::new(Log));
        let mut section = Section::new();
        exec.save(&mut section);

        assert_eq!(section.get_str("actions.0.type"), Some("LOG"));
        assert!(!section.contains("isTriggeredPerPlayer"));
        assert!(!section.contains("triggerCount"));
    }
}
