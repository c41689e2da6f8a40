//! # minigame-rules
//!
//! Rule engine for minigame areas: trigger executors with fire-count limits,
//! and rarity-weighted reward selection.
//!
//! ## Design Principles
//!
//! 1. **Catalog-Agnostic**: The engine knows no concrete condition or action.
//!    Hosts register them by name in a `RuleRegistry`.
//!
//! 2. **Host-Owned World**: Areas and participants are traits. Actions change
//!    the world only through them, so the engine holds no world state.
//!
//! 3. **Deterministic When Seeded**: All randomness flows through `RuleRng`.
//!
//! ## Modules
//!
//! - `core`: Participants, areas, errors, RNG, configuration
//! - `store`: Hierarchical key/value sections used for persistence
//! - `rewards`: Rarity tiers, reward entries and groups, selection
//! - `triggers`: Conditions, actions, executors, per-area dispatch
//! - `catalog`: Name registry and stock conditions/actions

pub mod catalog;
pub mod core;
pub mod rewards;
pub mod store;
pub mod triggers;

// Re-export commonly used types
pub use crate::core::{
    Area, AreaState,
    ComponentKind, LoadReport, Result, RuleError,
    Participant, ParticipantId, ParticipantSnapshot,
    RuleRng, RulesConfig,
};

pub use crate::store::{Section, Value};

pub use crate::rewards::{Rarity, RewardEntry, RewardGroup, RewardKind, RewardKinds, Rewards};

pub use crate::triggers::{
    Action, ActionContext, AreaRules,
    Condition, ConditionContext, ConfiguredCondition,
    CounterKey, TriggerExecutor, TriggerType,
};

pub use crate::catalog::{LoadContext, RuleRegistry};
