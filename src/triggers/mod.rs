//! Trigger execution.
//!
//! Executors decide whether a configured reaction fires for an in-world
//! occurrence, and run it. The system is catalog-agnostic: conditions and
//! actions are trait objects resolved by name from a
//! [`RuleRegistry`](crate::catalog::RuleRegistry).
//!
//! ## Key Components
//!
//! - [`TriggerType`]: Name of the occurrence an executor reacts to
//! - [`Condition`] / [`ConfiguredCondition`]: Invertible predicates
//! - [`Action`]: Effects run in order
//! - [`TriggerExecutor`]: Conditions + actions + fire-count limits
//! - [`AreaRules`]: All executors of an area, dispatched by trigger type
//!
//! ## Example Usage
//!
//! ```
//! use minigame_rules::catalog::SetEnabledAction;
//! use minigame_rules::core::{AreaState, RuleRng};
//! use minigame_rules::triggers::{TriggerExecutor, TriggerType};
//!
//! let mut executor = TriggerExecutor::new(TriggerType::new("ENTER"), "arena")
//!     .with_action(Box::new(SetEnabledAction::new(false)))
//!     .with_trigger_count(1);
//!
//! let mut area = AreaState::new("arena");
//! let mut rng = RuleRng::new(42);
//!
//! assert!(executor.can_trigger(None, &area));
//! executor.execute(None, &mut area, &mut rng).unwrap();
//! assert!(!area.enabled);
//! assert!(!executor.can_trigger(None, &area));
//! ```

mod action;
mod condition;
mod executor;
mod registry;
mod trigger_type;

pub use action::{Action, ActionContext};
pub use condition::{Condition, ConditionContext, ConfiguredCondition};
pub use executor::{CounterKey, TriggerExecutor};
pub use registry::AreaRules;
pub use trigger_type::TriggerType;
