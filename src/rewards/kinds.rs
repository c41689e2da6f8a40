//! Reward kinds.
//!
//! A reward kind gives meaning to an entry's payload. Granting is done by the
//! host; the engine only needs to know which kinds exist and whether a
//! payload is well formed.

use rustc_hash::FxHashMap;

use crate::core::{ComponentKind, Result, RuleError};
use crate::store::{Section, Value};

/// Kind name for item grants.
pub const ITEM_REWARD: &str = "ITEM";
/// Kind name for currency grants.
pub const MONEY_REWARD: &str = "MONEY";

/// A named reward behaviour.
pub trait RewardKind: Send + Sync {
    /// Upper-case kind name, as persisted in `type`.
    fn name(&self) -> &str;

    /// Check a payload before it is accepted.
    fn validate(&self, data: &Section) -> Result<()>;
}

/// Grants an item. Payload: `item` (string id or serialized item section).
#[derive(Clone, Copy, Debug, Default)]
pub struct ItemReward;

impl RewardKind for ItemReward {
    fn name(&self) -> &str {
        ITEM_REWARD
    }

    fn validate(&self, data: &Section) -> Result<()> {
        match data.get("item") {
            Some(Value::String(_)) | Some(Value::Section(_)) => Ok(()),
            Some(_) => Err(RuleError::malformed("data.item", "expected item id or item section")),
            None => Err(RuleError::malformed("data.item", "missing field")),
        }
    }
}

/// Grants currency. Payload: `money` (non-negative number).
#[derive(Clone, Copy, Debug, Default)]
pub struct MoneyReward;

impl RewardKind for MoneyReward {
    fn name(&self) -> &str {
        MONEY_REWARD
    }

    fn validate(&self, data: &Section) -> Result<()> {
        match data.get_f64("money") {
            Some(amount) if amount >= 0.0 => Ok(()),
            Some(_) => Err(RuleError::malformed("data.money", "amount must not be negative")),
            None => Err(RuleError::malformed("data.money", "missing or non-numeric amount")),
        }
    }
}

/// Name-keyed catalog of reward kinds.
#[derive(Default)]
pub struct RewardKinds {
    kinds: FxHashMap<String, Box<dyn RewardKind>>,
}

impl RewardKinds {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the stock `ITEM` and `MONEY` kinds.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut kinds = Self::new();
        kinds.register(ItemReward);
        kinds.register(MoneyReward);
        kinds
    }

    /// Register a kind, replacing any kind with the same name.
    pub fn register(&mut self, kind: impl RewardKind + 'static) {
        self.kinds.insert(kind.name().to_uppercase(), Box::new(kind));
    }

    /// Look up a kind by name (case-insensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn RewardKind> {
        self.kinds.get(&name.to_uppercase()).map(|k| k.as_ref())
    }

    /// Look up a kind, failing with `UnknownRuleComponent`.
    pub fn resolve(&self, name: &str) -> Result<&dyn RewardKind> {
        self.get(name)
            .ok_or_else(|| RuleError::unknown(ComponentKind::Reward, name))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl std::fmt::Debug for RewardKinds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.kinds.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_kinds() {
        let kinds = RewardKinds::with_defaults();
        assert_eq!(kinds.len(), 2);
        assert!(kinds.get("item").is_some());
        assert!(kinds.get("MONEY").is_some());
        assert!(matches!(
            kinds.resolve("XP"),
            Err(RuleError::UnknownRuleComponent { kind: ComponentKind::Reward, .. })
        ));
    }

    #[test]
    fn test_item_validation() {
        let mut data = Section::new();
        assert!(ItemReward.validate(&data).is_err());
        data.set("item", "DIAMOND_SWORD");
        assert!(ItemReward.validate(&data).is_ok());
        data.set("item", 4);
        assert!(ItemReward.validate(&data).is_err());
    }

    #[test]
    fn test_money_validation() {
        let mut data = Section::new();
        data.set("money", 25);
        assert!(MoneyReward.validate(&data).is_ok());
        data.set("money", -1.0);
        assert!(MoneyReward.validate(&data).is_err());
        data.set("money", "lots");
        assert!(MoneyReward.validate(&data).is_err());
    }
}
