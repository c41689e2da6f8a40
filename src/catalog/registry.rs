//! Name-keyed catalog of conditions, actions and reward kinds.
//!
//! Persisted configurations refer to components by name. The registry maps
//! each upper-case name to a factory that builds a fresh, default-configured
//! instance, which is then filled in by its `load`.

use rustc_hash::FxHashMap;

use crate::core::{ComponentKind, LoadReport, Result, RuleError};
use crate::rewards::RewardKinds;
use crate::triggers::{Action, Condition};

use super::actions::{RewardAction, SetEnabledAction};
use super::conditions::{MatchTeamCondition, MinigameTimerCondition};

/// Builds a default-configured condition.
pub type ConditionFactory = fn() -> Box<dyn Condition>;

/// Builds a default-configured action.
pub type ActionFactory = fn() -> Box<dyn Action>;

/// Registry of every known rule component.
///
/// ## Example
///
/// ```
/// use minigame_rules::catalog::RuleRegistry;
///
/// let registry = RuleRegistry::with_defaults();
/// let condition = registry.resolve_condition("match_team").unwrap();
/// assert_eq!(condition.name(), "MATCH_TEAM");
/// assert!(registry.resolve_action("EXPLODE").is_err());
/// ```
#[derive(Default)]
pub struct RuleRegistry {
    conditions: FxHashMap<String, ConditionFactory>,
    actions: FxHashMap<String, ActionFactory>,
    reward_kinds: RewardKinds,
}

impl RuleRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the stock conditions, actions and reward kinds.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self {
            reward_kinds: RewardKinds::with_defaults(),
            ..Self::default()
        };
        registry.register_condition(|| Box::new(MatchTeamCondition::default()));
        registry.register_condition(|| Box::new(MinigameTimerCondition::default()));
        registry.register_action(|| Box::new(SetEnabledAction::default()));
        registry.register_action(|| Box::new(RewardAction::default()));
        registry
    }

    /// Register a condition under the name its instances report.
    pub fn register_condition(&mut self, factory: ConditionFactory) {
        let name = factory().name().to_uppercase();
        self.conditions.insert(name, factory);
    }

    /// Register an action under the name its instances report.
    pub fn register_action(&mut self, factory: ActionFactory) {
        let name = factory().name().to_uppercase();
        self.actions.insert(name, factory);
    }

    /// Build a condition by name (case-insensitive).
    pub fn resolve_condition(&self, name: &str) -> Result<Box<dyn Condition>> {
        self.conditions
            .get(&name.to_uppercase())
            .map(|factory| factory())
            .ok_or_else(|| RuleError::unknown(ComponentKind::Condition, name))
    }

    /// Build an action by name (case-insensitive).
    pub fn resolve_action(&self, name: &str) -> Result<Box<dyn Action>> {
        self.actions
            .get(&name.to_uppercase())
            .map(|factory| factory())
            .ok_or_else(|| RuleError::unknown(ComponentKind::Action, name))
    }

    /// Registered condition names, sorted.
    #[must_use]
    pub fn condition_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.conditions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Registered action names, sorted.
    #[must_use]
    pub fn action_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.actions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn reward_kinds(&self) -> &RewardKinds {
        &self.reward_kinds
    }

    pub fn reward_kinds_mut(&mut self) -> &mut RewardKinds {
        &mut self.reward_kinds
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("conditions", &self.condition_names())
            .field("actions", &self.action_names())
            .field("reward_kinds", &self.reward_kinds)
            .finish()
    }
}

/// What an action gets while loading.
///
/// Actions that hold nested configuration (such as a reward pool) resolve
/// names through the registry and record skipped entries in the report.
pub struct LoadContext<'a> {
    pub registry: &'a RuleRegistry,
    pub report: &'a mut LoadReport,
}

impl<'a> LoadContext<'a> {
    pub fn new(registry: &'a RuleRegistry, report: &'a mut LoadReport) -> Self {
        Self { registry, report }
    }
}
