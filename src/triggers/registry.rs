//! Per-area executor registry.
//!
//! An area (region or node) carries any number of executors. [`AreaRules`]
//! stores them, indexes them by trigger type, and dispatches a fired trigger
//! to every eligible executor.

use rustc_hash::FxHashMap;

use crate::catalog::RuleRegistry;
use crate::core::{Area, LoadReport, Participant, ParticipantId, Result, RuleError, RuleRng, RulesConfig};
use crate::store::Section;

use super::executor::TriggerExecutor;
use super::trigger_type::TriggerType;

/// The executors of one area.
#[derive(Debug)]
pub struct AreaRules {
    area: String,
    config: RulesConfig,

    /// All executors, in configuration order.
    executors: Vec<TriggerExecutor>,

    /// Index by trigger type for fast lookup.
    by_trigger: FxHashMap<TriggerType, Vec<usize>>,
}

impl AreaRules {
    /// Create an empty rule set for the area named `area`.
    pub fn new(area: impl Into<String>, config: RulesConfig) -> Self {
        Self {
            area: area.into(),
            config,
            executors: Vec::new(),
            by_trigger: FxHashMap::default(),
        }
    }

    /// Name of the owning area.
    #[must_use]
    pub fn area(&self) -> &str {
        &self.area
    }

    /// Create a new executor for `trigger` and return it for configuration.
    pub fn create(&mut self, trigger: TriggerType) -> &mut TriggerExecutor {
        let executor = TriggerExecutor::new(trigger, self.area.clone()).with_config(&self.config);
        let index = self.add(executor);
        &mut self.executors[index]
    }

    /// Add a pre-built executor, returns its index.
    pub fn add(&mut self, executor: TriggerExecutor) -> usize {
        let index = self.executors.len();
        self.by_trigger
            .entry(executor.trigger().clone())
            .or_default()
            .push(index);
        self.executors.push(executor);
        index
    }

    /// Remove the executor at `index`.
    pub fn remove(&mut self, index: usize) -> Option<TriggerExecutor> {
        if index >= self.executors.len() {
            return None;
        }
        let removed = self.executors.remove(index);
        self.reindex();
        Some(removed)
    }

    fn reindex(&mut self) {
        self.by_trigger.clear();
        for (index, executor) in self.executors.iter().enumerate() {
            self.by_trigger
                .entry(executor.trigger().clone())
                .or_default()
                .push(index);
        }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TriggerExecutor> {
        self.executors.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut TriggerExecutor> {
        self.executors.get_mut(index)
    }

    /// All executors, in configuration order.
    #[must_use]
    pub fn executors(&self) -> &[TriggerExecutor] {
        &self.executors
    }

    /// Executors bound to `trigger`, in configuration order.
    pub fn executors_for<'a>(&'a self, trigger: &TriggerType) -> impl Iterator<Item = &'a TriggerExecutor> + 'a {
        self.by_trigger
            .get(trigger)
            .into_iter()
            .flatten()
            .filter_map(move |&index| self.executors.get(index))
    }

    /// Fire `trigger`: every bound executor that can trigger is executed.
    ///
    /// Returns the number of executors that ran at least one action. The
    /// first action failure stops dispatch and is returned.
    pub fn dispatch(
        &mut self,
        trigger: &TriggerType,
        participant: Option<&dyn Participant>,
        area: &mut dyn Area,
        rng: &mut RuleRng,
    ) -> Result<usize> {
        let Some(indices) = self.by_trigger.get(trigger) else {
            return Ok(0);
        };

        let mut fired = 0;
        for &index in indices {
            let Some(executor) = self.executors.get_mut(index) else {
                continue;
            };
            if !executor.can_trigger(participant, &*area) {
                continue;
            }
            if executor.execute(participant, &mut *area, &mut *rng)? > 0 {
                fired += 1;
            }
        }

        tracing::debug!(trigger = %trigger, area = %self.area, fired, "Dispatched trigger");
        Ok(fired)
    }

    /// Reset the fire counters of every executor.
    pub fn clear_all_triggers(&mut self) {
        for executor in &mut self.executors {
            executor.clear_triggers();
        }
    }

    /// Reset one participant's counters on every executor.
    pub fn remove_participant(&mut self, participant: ParticipantId) {
        for executor in &mut self.executors {
            executor.remove_trigger(participant);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.executors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.executors.is_empty()
    }

    /// Write executors under `executors.<i>`, each with its `trigger` name.
    pub fn save(&self, section: &mut Section) {
        for (index, executor) in self.executors.iter().enumerate() {
            let exec_section = section.create_section(&format!("executors.{}", index));
            exec_section.set("trigger", executor.trigger().name());
            executor.save(exec_section);
        }
    }

    /// Replace all executors with those stored in `section`. An aborted load
    /// leaves the current executors in place.
    pub fn load(&mut self, section: &Section, registry: &RuleRegistry) -> Result<LoadReport> {
        let mut report = LoadReport::new();
        let mut executors = Vec::new();

        for (key, value) in section.section("executors").into_iter().flat_map(|list| list.iter()) {
            let path = format!("executors.{}", key);
            let Some(exec_section) = value.as_section() else {
                report.skip(RuleError::malformed(path, "expected a section"))?;
                continue;
            };
            let trigger = match exec_section.require_str("trigger") {
                Ok(name) => TriggerType::new(name),
                Err(_) => {
                    report.skip(RuleError::malformed(path, "missing 'trigger'"))?;
                    continue;
                }
            };

            let mut executor = TriggerExecutor::new(trigger, self.area.clone()).with_config(&self.config);
            let nested = executor.load(exec_section, registry)?;
            report.merge(nested);
            report.loaded += 1;
            executors.push(executor);
        }

        self.executors = executors;
        self.reindex();
        Ok(report)
    }
}
