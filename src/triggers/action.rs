//! Trigger actions.
//!
//! An action is a named effect run by an executor once its conditions pass.
//! Effects happen through the [`Area`] and participant the action is handed;
//! the engine itself keeps no record of them.

use crate::catalog::LoadContext;
use crate::core::{ActionError, Area, Participant, Result, RuleRng};
use crate::store::Section;

/// What an action gets to work with.
pub struct ActionContext<'a> {
    /// The participant involved, if the trigger has one.
    pub participant: Option<&'a dyn Participant>,
    /// The area owning the executor.
    pub area: &'a mut dyn Area,
    /// Random source for actions that draw (e.g. rewards).
    pub rng: &'a mut RuleRng,
}

/// A named effect.
pub trait Action {
    /// Unique upper-case name, persisted as `type`.
    fn name(&self) -> &str;

    /// Grouping label for menus.
    fn category(&self) -> &str;

    /// If true, the executor skips this action when no participant is
    /// supplied.
    fn requires_participant(&self) -> bool;

    /// Perform the effect. Errors propagate to the dispatcher.
    fn execute(&mut self, ctx: &mut ActionContext<'_>) -> std::result::Result<(), ActionError>;

    /// Write configured parameters into `section`.
    fn save(&self, section: &mut Section);

    /// Read configured parameters from `section`.
    fn load(&mut self, section: &Section, ctx: &mut LoadContext<'_>) -> Result<()>;
}

impl std::fmt::Debug for dyn Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Action({})", self.name())
    }
}
