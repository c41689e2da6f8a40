//! Weighted reward selection.
//!
//! ## Key Components
//!
//! - [`Rarity`]: Five tiers with probability thresholds
//! - [`RewardEntry`]: A single reward of some kind and rarity
//! - [`RewardGroup`]: A named bundle awarded as a whole
//! - [`Rewards`]: The pool; performs selection with fallback
//! - [`RewardKinds`]: Catalog of known reward kinds
//!
//! ## Example Usage
//!
//! ```
//! use minigame_rules::core::RuleRng;
//! use minigame_rules::rewards::{Rarity, RewardEntry, Rewards};
//!
//! let mut rewards = Rewards::new();
//! rewards.add_reward(RewardEntry::item("GOLDEN_APPLE", Rarity::Rare));
//! rewards.add_reward(RewardEntry::money(10.0, Rarity::VeryCommon));
//!
//! let mut rng = RuleRng::new(42);
//! let prize = rewards.select_reward(&mut rng);
//! assert_eq!(prize.len(), 1);
//! ```

mod entry;
mod kinds;
mod rarity;
mod selector;

pub use entry::{RewardEntry, RewardGroup};
pub use kinds::{ItemReward, MoneyReward, RewardKind, RewardKinds, ITEM_REWARD, MONEY_REWARD};
pub use rarity::Rarity;
pub use selector::Rewards;
