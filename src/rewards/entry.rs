//! Reward entries and reward groups.
//!
//! Persisted shapes:
//!
//! ```text
//! <index>.type   = ITEM
//! <index>.rarity = RARE
//! <index>.data.* = kind-specific fields
//!
//! <group name>.rarity  = NORMAL
//! <group name>.<index> = entry, as above
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{LoadReport, Result, RuleError};
use crate::store::{Section, Value};

use super::kinds::{RewardKinds, ITEM_REWARD, MONEY_REWARD};
use super::rarity::Rarity;

/// A single weighted reward.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardEntry {
    kind: String,
    rarity: Rarity,
    data: Section,
}

impl RewardEntry {
    /// Create an entry with an empty payload.
    pub fn new(kind: impl Into<String>, rarity: Rarity) -> Self {
        Self {
            kind: kind.into().to_uppercase(),
            rarity,
            data: Section::new(),
        }
    }

    /// Item reward shorthand.
    pub fn item(item: impl Into<String>, rarity: Rarity) -> Self {
        Self::new(ITEM_REWARD, rarity).with_data("item", item.into())
    }

    /// Money reward shorthand.
    pub fn money(amount: f64, rarity: Rarity) -> Self {
        Self::new(MONEY_REWARD, rarity).with_data("money", amount)
    }

    /// Set a payload field (builder pattern).
    #[must_use]
    pub fn with_data(mut self, path: &str, value: impl Into<Value>) -> Self {
        self.data.set(path, value);
        self
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    pub fn set_rarity(&mut self, rarity: Rarity) {
        self.rarity = rarity;
    }

    #[must_use]
    pub fn data(&self) -> &Section {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Section {
        &mut self.data
    }

    /// Write this entry into `section` (`type`, `rarity`, `data`).
    pub fn save(&self, section: &mut Section) {
        section.set("type", self.kind.as_str());
        section.set("rarity", self.rarity.name());
        section.set("data", self.data.clone());
    }

    /// Read an entry in the current shape.
    ///
    /// An unregistered kind is an `UnknownRuleComponent`; anything else that
    /// is wrong with the section is `MalformedConfiguration`.
    pub fn load(section: &Section, kinds: &RewardKinds) -> Result<Self> {
        let kind = kinds.resolve(section.require_str("type")?)?;
        let rarity = section.require_str("rarity")?.parse::<Rarity>()?;
        let data = match section.get("data") {
            None => Section::new(),
            Some(Value::Section(data)) => data.clone(),
            Some(_) => return Err(RuleError::malformed("data", "expected a section")),
        };
        kind.validate(&data)?;

        Ok(Self {
            kind: kind.name().to_uppercase(),
            rarity,
            data,
        })
    }

    /// True if `section` uses the pre-`type` single item/money shape.
    #[must_use]
    pub fn is_legacy(section: &Section) -> bool {
        section.contains("item") || section.contains("money")
    }

    /// Upgrade a legacy `item`/`money` section into the current shape.
    ///
    /// The kind is inferred from whichever leaf is present; `item` wins if
    /// both are.
    pub fn load_legacy(section: &Section, kinds: &RewardKinds) -> Result<Self> {
        let (kind_name, field) = if section.contains("item") {
            (ITEM_REWARD, "item")
        } else {
            (MONEY_REWARD, "money")
        };
        let kind = kinds.resolve(kind_name)?;
        let rarity = section.require_str("rarity")?.parse::<Rarity>()?;

        let mut data = Section::new();
        if let Some(value) = section.get(field) {
            data.set(field, value.clone());
        }
        kind.validate(&data)?;

        Ok(Self {
            kind: kind.name().to_uppercase(),
            rarity,
            data,
        })
    }
}

/// A named bundle of entries that is awarded as a whole.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardGroup {
    name: String,
    rarity: Rarity,
    items: Vec<RewardEntry>,
}

impl RewardGroup {
    /// Create an empty group.
    pub fn new(name: impl Into<String>, rarity: Rarity) -> Self {
        Self {
            name: name.into(),
            rarity,
            items: Vec::new(),
        }
    }

    /// Add an entry (builder pattern).
    #[must_use]
    pub fn with_item(mut self, entry: RewardEntry) -> Self {
        self.items.push(entry);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    pub fn set_rarity(&mut self, rarity: Rarity) {
        self.rarity = rarity;
    }

    /// The group's entries, in order.
    #[must_use]
    pub fn items(&self) -> &[RewardEntry] {
        &self.items
    }

    pub fn add_item(&mut self, entry: RewardEntry) {
        self.items.push(entry);
    }

    /// Remove the entry at `index`.
    pub fn remove_item(&mut self, index: usize) -> Option<RewardEntry> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Write `rarity` and the indexed entries into `section`.
    pub fn save(&self, section: &mut Section) {
        section.set("rarity", self.rarity.name());
        for (index, entry) in self.items.iter().enumerate() {
            entry.save(section.create_section(&index.to_string()));
        }
    }

    /// Read a group stored under `name`.
    ///
    /// Malformed member entries are skipped and reported; a missing or bad
    /// group rarity fails the whole group.
    pub fn load(name: &str, section: &Section, kinds: &RewardKinds) -> Result<(Self, LoadReport)> {
        let rarity = section
            .require_str("rarity")
            .and_then(str::parse::<Rarity>)
            .map_err(|err| match err {
                RuleError::MalformedConfiguration { reason, .. } => {
                    RuleError::malformed(format!("{}.rarity", name), reason)
                }
                other => other,
            })?;

        let mut group = Self::new(name, rarity);
        let mut report = LoadReport::new();

        for (key, value) in section.iter() {
            if key == "rarity" {
                continue;
            }
            let loaded = match value.as_section() {
                Some(entry) if RewardEntry::is_legacy(entry) => RewardEntry::load_legacy(entry, kinds),
                Some(entry) => RewardEntry::load(entry, kinds),
                None => Err(RuleError::malformed(
                    format!("{}.{}", name, key),
                    "expected an entry section",
                )),
            };
            match loaded {
                Ok(entry) => {
                    group.items.push(entry);
                    report.loaded += 1;
                }
                Err(err) => report.skip(err)?,
            }
        }

        Ok((group, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_builders() {
        let sword = RewardEntry::item("DIAMOND_SWORD", Rarity::Rare);
        assert_eq!(sword.kind(), ITEM_REWARD);
        assert_eq!(sword.rarity(), Rarity::Rare);
        assert_eq!(sword.data().get_str("item"), Some("DIAMOND_SWORD"));

        let cash = RewardEntry::money(12.5, Rarity::Common);
        assert_eq!(cash.kind(), MONEY_REWARD);
        assert_eq!(cash.data().get_f64("money"), Some(12.5));
    }

    #[test]
    fn test_entry_save_load() {
        let kinds = RewardKinds::with_defaults();
        let entry = RewardEntry::item("APPLE", Rarity::VeryCommon);

        let mut section = Section::new();
        entry.save(&mut section);
        assert_eq!(section.get_str("type"), Some("ITEM"));
        assert_eq!(section.get_str("rarity"), Some("VERY_COMMON"));
        assert_eq!(section.get_str("data.item"), Some("APPLE"));

        let loaded = RewardEntry::load(&section, &kinds).unwrap();
        assert_eq!(loaded, entry);
    }

    #[test]
    fn test_entry_load_errors() {
        let kinds = RewardKinds::with_defaults();

        let mut missing_rarity = Section::new();
        missing_rarity.set("type", "ITEM");
        missing_rarity.set("data.item", "APPLE");
        assert!(matches!(
            RewardEntry::load(&missing_rarity, &kinds),
            Err(RuleError::MalformedConfiguration { .. })
        ));

        let mut unknown = Section::new();
        unknown.set("type", "XP");
        unknown.set("rarity", "RARE");
        assert!(matches!(
            RewardEntry::load(&unknown, &kinds),
            Err(RuleError::UnknownRuleComponent { .. })
        ));

        let mut bad_rarity = Section::new();
        bad_rarity.set("type", "MONEY");
        bad_rarity.set("rarity", "MYTHIC");
        bad_rarity.set("data.money", 3);
        assert!(matches!(
            RewardEntry::load(&bad_rarity, &kinds),
            Err(RuleError::MalformedConfiguration { .. })
        ));
    }

    #[test]
    fn test_legacy_money_upgrade() {
        let kinds = RewardKinds::with_defaults();
        let mut legacy = Section::new();
        legacy.set("money", 50.0);
        legacy.set("rarity", "RARE");

        assert!(RewardEntry::is_legacy(&legacy));
        let entry = RewardEntry::load_legacy(&legacy, &kinds).unwrap();
        assert_eq!(entry.kind(), MONEY_REWARD);
        assert_eq!(entry.rarity(), Rarity::Rare);
        assert_eq!(entry.data().get_f64("money"), Some(50.0));
    }

    #[test]
    fn test_group_remove_item() {
        let mut group = RewardGroup::new("loot", Rarity::Normal)
            .with_item(RewardEntry::item("A", Rarity::Normal))
            .with_item(RewardEntry::item("B", Rarity::Normal));

        assert!(group.remove_item(5).is_none());
        let removed = group.remove_item(0).unwrap();
        assert_eq!(removed.data().get_str("item"), Some("A"));
        assert_eq!(group.items().len(), 1);
    }

    #[test]
    fn test_group_save_load() {
        let kinds = RewardKinds::with_defaults();
        let group = RewardGroup::new("starter", Rarity::Common)
            .with_item(RewardEntry::item("BREAD", Rarity::Common))
            .with_item(RewardEntry::money(5.0, Rarity::Common));

        let mut section = Section::new();
        group.save(&mut section);

        let (loaded, report) = RewardGroup::load("starter", &section, &kinds).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.loaded, 2);
        assert_eq!(loaded, group);
    }

    #[test]
    fn test_group_skips_malformed_members() {
        let kinds = RewardKinds::with_defaults();
        let mut section = Section::new();
        section.set("rarity", "NORMAL");
        section.set("0.type", "ITEM");
        section.set("0.rarity", "NORMAL");
        section.set("0.data.item", "BREAD");
        section.set("1.type", "ITEM");
        section.set("stray", 7);

        let (group, report) = RewardGroup::load("g", &section, &kinds).unwrap();
        assert_eq!(group.items().len(), 1);
        assert_eq!(report.skipped_count(), 2);
    }
}
