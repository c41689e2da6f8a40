//! Trigger conditions.
//!
//! A condition is a named predicate over the participant (if any) and the
//! area. Implementations live in the catalog; an executor holds them wrapped
//! in [`ConfiguredCondition`], which adds the per-use `inverted` flag.

use crate::core::{Area, Participant, Result};
use crate::store::Section;

/// What a condition gets to look at.
pub struct ConditionContext<'a> {
    /// The participant involved, if the trigger has one.
    pub participant: Option<&'a dyn Participant>,
    /// The area owning the executor.
    pub area: &'a dyn Area,
}

impl<'a> ConditionContext<'a> {
    /// Create a new context.
    pub fn new(participant: Option<&'a dyn Participant>, area: &'a dyn Area) -> Self {
        Self { participant, area }
    }
}

/// A named boolean predicate.
///
/// Implementations are stateless apart from their configured parameters,
/// which they write and read through [`Condition::save`] / [`Condition::load`].
pub trait Condition {
    /// Unique upper-case name, persisted as `type`.
    fn name(&self) -> &str;

    /// Grouping label for menus.
    fn category(&self) -> &str;

    fn usable_on_regions(&self) -> bool {
        true
    }

    fn usable_on_nodes(&self) -> bool {
        true
    }

    /// If true, the executor skips this condition when no participant is
    /// supplied.
    fn requires_participant(&self) -> bool;

    /// Evaluate the predicate. Inversion is applied by the caller.
    fn check(&self, ctx: &ConditionContext<'_>) -> bool;

    /// Write configured parameters into `section`.
    fn save(&self, section: &mut Section);

    /// Read configured parameters from `section`.
    fn load(&mut self, section: &Section) -> Result<()>;
}

/// A condition as configured on an executor.
pub struct ConfiguredCondition {
    condition: Box<dyn Condition>,
    inverted: bool,
}

impl ConfiguredCondition {
    /// Wrap a condition, not inverted.
    pub fn new(condition: Box<dyn Condition>) -> Self {
        Self {
            condition,
            inverted: false,
        }
    }

    /// Invert the result (builder pattern).
    #[must_use]
    pub fn inverted(mut self) -> Self {
        self.inverted = true;
        self
    }

    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn set_inverted(&mut self, inverted: bool) {
        self.inverted = inverted;
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.condition.name()
    }

    #[must_use]
    pub fn requires_participant(&self) -> bool {
        self.condition.requires_participant()
    }

    #[must_use]
    pub fn condition(&self) -> &dyn Condition {
        self.condition.as_ref()
    }

    pub fn condition_mut(&mut self) -> &mut dyn Condition {
        self.condition.as_mut()
    }

    /// Evaluate with inversion applied.
    #[must_use]
    pub fn evaluate(&self, ctx: &ConditionContext<'_>) -> bool {
        self.condition.check(ctx) != self.inverted
    }

    /// Write `type`, `inverted` (only when set) and the condition's fields.
    pub fn save(&self, section: &mut Section) {
        section.set("type", self.condition.name());
        if self.inverted {
            section.set("inverted", true);
        }
        self.condition.save(section);
    }
}

impl std::fmt::Debug for ConfiguredCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfiguredCondition")
            .field("name", &self.condition.name())
            .field("inverted", &self.inverted)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AreaState, ParticipantId, ParticipantSnapshot};

    struct AreaEnabled;

    impl Condition for AreaEnabled {
        fn name(&self) -> &str {
            "AREA_ENABLED"
        }

        fn category(&self) -> &str {
            "Test"
        }

        fn requires_participant(&self) -> bool {
            false
        }

        fn check(&self, ctx: &ConditionContext<'_>) -> bool {
            ctx.area.is_enabled()
        }

        fn save(&self, _section: &mut Section) {}

        fn load(&mut self, _section: &Section) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_inversion() {
        let area = AreaState::new("arena");
        let ctx = ConditionContext::new(None, &area);

        let plain = ConfiguredCondition::new(Box::new(AreaEnabled));
        let inverted = ConfiguredCondition::new(Box::new(AreaEnabled)).inverted();

        assert!(plain.evaluate(&ctx));
        assert!(!inverted.evaluate(&ctx));
    }

    #[test]
    fn test_context_with_participant() {
        let area = AreaState::new("arena");
        let player = ParticipantSnapshot::new(ParticipantId::new()).with_team("RED");
        let ctx = ConditionContext::new(Some(&player), &area);

        assert_eq!(ctx.participant.and_then(|p| p.team()), Some("RED"));
    }

    #[test]
    fn test_save_writes_inverted_only_when_set() {
        let mut section = Section::new();
        ConfiguredCondition::new(Box::new(AreaEnabled)).save(&mut section);
        assert_eq!(section.get_str("type"), Some("AREA_ENABLED"));
        assert!(!section.contains("inverted"));

        let mut section = Section::new();
        ConfiguredCondition::new(Box::new(AreaEnabled)).inverted().save(&mut section);
        assert_eq!(section.get_bool("inverted"), Some(true));
    }
}
