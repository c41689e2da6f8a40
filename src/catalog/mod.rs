//! Component catalog.
//!
//! Persisted executors name their conditions and actions; the catalog turns
//! those names back into instances.
//!
//! ## Key Components
//!
//! - [`RuleRegistry`]: Name to factory maps for conditions and actions, plus
//!   the reward kinds
//! - [`LoadContext`]: Registry and load report handed to actions while loading
//! - Stock conditions: [`MatchTeamCondition`], [`MinigameTimerCondition`]
//! - Stock actions: [`SetEnabledAction`], [`RewardAction`]
//!
//! ## Example Usage
//!
//! ```
//! use minigame_rules::catalog::RuleRegistry;
//! use minigame_rules::core::{AreaState, ParticipantId, ParticipantSnapshot, RuleRng, RulesConfig};
//! use minigame_rules::store::Section;
//! use minigame_rules::triggers::{AreaRules, TriggerType};
//!
//! let mut config = Section::new();
//! config.set("executors.0.trigger", "ENTER");
//! config.set("executors.0.conditions.0.type", "MATCH_TEAM");
//! config.set("executors.0.conditions.0.team", "BLUE");
//! config.set("executors.0.actions.0.type", "SET_ENABLED");
//! config.set("executors.0.actions.0.state", false);
//!
//! let registry = RuleRegistry::with_defaults();
//! let mut rules = AreaRules::new("arena", RulesConfig::default());
//! let report = rules.load(&config, &registry).unwrap();
//! assert!(report.is_clean());
//!
//! let mut area = AreaState::new("arena");
//! let mut rng = RuleRng::new(3);
//! let blue = ParticipantSnapshot::new(ParticipantId::new()).with_team("blue");
//!
//! rules.dispatch(&TriggerType::new("enter"), Some(&blue), &mut area, &mut rng).unwrap();
//! assert!(!area.enabled);
//! ```

mod actions;
mod conditions;
mod registry;

pub use actions::{RewardAction, SetEnabledAction};
pub use conditions::{MatchTeamCondition, MinigameTimerCondition};
pub use registry::{ActionFactory, ConditionFactory, LoadContext, RuleRegistry};
