//! Rarity-weighted reward selection.
//!
//! [`Rewards`] owns a pool of single entries and groups. Selection draws a
//! target rarity, shuffles the pool, and takes the first candidate with that
//! rarity. When the target tier is empty the search widens: first toward
//! `VERY_COMMON`, then back from the original target toward `VERY_RARE`
//! (see [`Rarity::search_order`]). A non-empty pool therefore always yields
//! something.

use serde::{Deserialize, Serialize};

use crate::core::{LoadReport, Result, RuleError, RuleRng};
use crate::store::Section;

use super::entry::{RewardEntry, RewardGroup};
use super::kinds::RewardKinds;
use super::rarity::Rarity;

/// A selection candidate: one entry or a whole group.
#[derive(Clone, Copy, Debug)]
enum Candidate<'a> {
    Entry(&'a RewardEntry),
    Group(&'a RewardGroup),
}

impl Candidate<'_> {
    fn rarity(&self) -> Rarity {
        match self {
            Candidate::Entry(entry) => entry.rarity(),
            Candidate::Group(group) => group.rarity(),
        }
    }

    fn award(&self) -> Vec<RewardEntry> {
        match self {
            Candidate::Entry(entry) => vec![(*entry).clone()],
            Candidate::Group(group) => group.items().to_vec(),
        }
    }
}

/// The reward pool of a minigame, area or action.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rewards {
    items: Vec<RewardEntry>,
    groups: Vec<RewardGroup>,
}

impl Rewards {
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if there are neither entries nor groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.groups.is_empty()
    }

    /// Pick a reward.
    ///
    /// Returns a single entry, the full (copied) entry list of a group, or
    /// nothing if the pool is empty. Empty groups are never candidates, so a
    /// pool holding at least one entry always yields something.
    pub fn select_reward(&self, rng: &mut RuleRng) -> Vec<RewardEntry> {
        if self.is_empty() {
            return Vec::new();
        }

        let target = Rarity::from_roll(rng.gen_unit());

        let mut pool: Vec<Candidate<'_>> = self
            .items
            .iter()
            .map(Candidate::Entry)
            .chain(self.groups.iter().filter(|g| !g.is_empty()).map(Candidate::Group))
            .collect();
        rng.shuffle(&mut pool);

        Self::select_from(&pool, target)
    }

    fn select_from(pool: &[Candidate<'_>], target: Rarity) -> Vec<RewardEntry> {
        for rarity in target.search_order() {
            if let Some(candidate) = pool.iter().find(|c| c.rarity() == rarity) {
                tracing::debug!(
                    target_rarity = %target,
                    selected_rarity = %rarity,
                    "Selected reward candidate"
                );
                return candidate.award();
            }
        }
        Vec::new()
    }

    /// Add a single entry.
    pub fn add_reward(&mut self, entry: RewardEntry) {
        self.items.push(entry);
    }

    /// Remove the entry at `index`.
    pub fn remove_reward(&mut self, index: usize) -> Option<RewardEntry> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Single entries, in order.
    #[must_use]
    pub fn rewards(&self) -> &[RewardEntry] {
        &self.items
    }

    /// Create a new empty group and return it for filling.
    ///
    /// Group names share the key space with entry indices in the saved
    /// layout, so they must be non-empty, non-numeric, free of `.`, unique,
    /// and not `rarity`.
    pub fn add_group(&mut self, name: impl Into<String>, rarity: Rarity) -> Result<&mut RewardGroup> {
        let name = name.into();
        if !self.is_valid_group_name(&name) {
            return Err(RuleError::InvalidGroupName(name));
        }

        self.groups.push(RewardGroup::new(name, rarity));
        let last = self.groups.len() - 1;
        Ok(&mut self.groups[last])
    }

    fn is_valid_group_name(&self, name: &str) -> bool {
        !(name.is_empty()
            || name.contains('.')
            || is_index_key(name)
            || name.eq_ignore_ascii_case("rarity")
            || self.group(name).is_some())
    }

    /// Remove a group by name.
    pub fn remove_group(&mut self, name: &str) -> Option<RewardGroup> {
        let idx = self.groups.iter().position(|g| g.name() == name)?;
        Some(self.groups.remove(idx))
    }

    /// Groups, in order.
    #[must_use]
    pub fn groups(&self) -> &[RewardGroup] {
        &self.groups
    }

    #[must_use]
    pub fn group(&self, name: &str) -> Option<&RewardGroup> {
        self.groups.iter().find(|g| g.name() == name)
    }

    pub fn group_mut(&mut self, name: &str) -> Option<&mut RewardGroup> {
        self.groups.iter_mut().find(|g| g.name() == name)
    }

    /// Write entries under index keys and groups under their names.
    pub fn save(&self, section: &mut Section) {
        for (index, entry) in self.items.iter().enumerate() {
            entry.save(section.create_section(&index.to_string()));
        }
        for group in &self.groups {
            group.save(section.create_section(group.name()));
        }
    }

    /// Load entries and groups from `section`, appending to this pool.
    ///
    /// Each child key is one of:
    /// - a legacy `item`/`money` entry, upgraded to the current shape;
    /// - an entry with a `type` field;
    /// - otherwise a group named by the key. Numeric keys and names that
    ///   [`add_group`](Self::add_group) would reject are skipped.
    ///
    /// Malformed entries and groups are skipped and reported. An unknown
    /// reward kind aborts the load.
    pub fn load(&mut self, section: &Section, kinds: &RewardKinds) -> Result<LoadReport> {
        let mut report = LoadReport::new();

        for (key, value) in section.iter() {
            let Some(child) = value.as_section() else {
                report.skip(RuleError::malformed(key, "expected a section"))?;
                continue;
            };

            if RewardEntry::is_legacy(child) {
                match RewardEntry::load_legacy(child, kinds) {
                    Ok(entry) => {
                        tracing::debug!(key, kind = entry.kind(), "Upgraded legacy reward entry");
                        self.items.push(entry);
                        report.loaded += 1;
                    }
                    Err(err) => report.skip(err)?,
                }
            } else if child.contains("type") {
                match RewardEntry::load(child, kinds) {
                    Ok(entry) => {
                        self.items.push(entry);
                        report.loaded += 1;
                    }
                    Err(err) => report.skip(err)?,
                }
            } else if is_index_key(key) {
                report.skip(RuleError::malformed(key, "missing 'type'"))?;
            } else if !self.is_valid_group_name(key) {
                report.skip(RuleError::malformed(key, "invalid or duplicate group name"))?;
            } else {
                match RewardGroup::load(key, child, kinds) {
                    Ok((group, nested)) => {
                        self.groups.push(group);
                        report.loaded += 1;
                        report.merge(nested);
                    }
                    Err(err) => report.skip(err)?,
                }
            }
        }

        Ok(report)
    }
}

/// True for keys that hold entries in the saved layout (`0`, `1`, ...).
fn is_index_key(key: &str) -> bool {
    key.chars().all(|c| c.is_ascii_digit())
}
