//! Stock conditions.

use crate::core::{Result, RuleError};
use crate::store::Section;
use crate::triggers::{Condition, ConditionContext};

/// Passes when the participant is on the configured team.
///
/// Team names compare case-insensitively. A participant with no team never
/// matches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchTeamCondition {
    team: String,
}

impl MatchTeamCondition {
    pub fn new(team: impl Into<String>) -> Self {
        Self { team: team.into() }
    }

    #[must_use]
    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn set_team(&mut self, team: impl Into<String>) {
        self.team = team.into();
    }
}

impl Default for MatchTeamCondition {
    fn default() -> Self {
        Self::new("RED")
    }
}

impl Condition for MatchTeamCondition {
    fn name(&self) -> &str {
        "MATCH_TEAM"
    }

    fn category(&self) -> &str {
        "Team Conditions"
    }

    fn requires_participant(&self) -> bool {
        true
    }

    fn check(&self, ctx: &ConditionContext<'_>) -> bool {
        ctx.participant
            .and_then(|p| p.team())
            .is_some_and(|team| team.eq_ignore_ascii_case(&self.team))
    }

    fn save(&self, section: &mut Section) {
        section.set("team", self.team.as_str());
    }

    fn load(&mut self, section: &Section) -> Result<()> {
        if section.contains("team") {
            self.team = section.require_str("team")?.to_string();
        }
        Ok(())
    }
}

/// Passes when the participant's remaining minigame time lies in
/// `[min_time, max_time]` seconds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinigameTimerCondition {
    min_time: u64,
    max_time: u64,
}

impl MinigameTimerCondition {
    pub fn new(min_time: u64, max_time: u64) -> Self {
        Self { min_time, max_time }
    }

    #[must_use]
    pub fn min_time(&self) -> u64 {
        self.min_time
    }

    #[must_use]
    pub fn max_time(&self) -> u64 {
        self.max_time
    }

    pub fn set_range(&mut self, min_time: u64, max_time: u64) {
        self.min_time = min_time;
        self.max_time = max_time;
    }
}

impl Default for MinigameTimerCondition {
    fn default() -> Self {
        Self::new(5, 10)
    }
}

fn seconds(section: &Section, key: &str) -> Result<Option<u64>> {
    match section.optional_i64(key)? {
        None => Ok(None),
        Some(value) => u64::try_from(value)
            .map(Some)
            .map_err(|_| RuleError::malformed(key, "must be a non-negative number of seconds")),
    }
}

impl Condition for MinigameTimerCondition {
    fn name(&self) -> &str {
        "MINIGAME_TIMER"
    }

    fn category(&self) -> &str {
        "Minigame Conditions"
    }

    fn requires_participant(&self) -> bool {
        true
    }

    fn check(&self, ctx: &ConditionContext<'_>) -> bool {
        ctx.participant
            .and_then(|p| p.time_left())
            .is_some_and(|left| (self.min_time..=self.max_time).contains(&left))
    }

    fn save(&self, section: &mut Section) {
        section.set("minTime", self.min_time);
        section.set("maxTime", self.max_time);
    }

    fn load(&mut self, section: &Section) -> Result<()> {
        let min_time = seconds(section, "minTime")?.unwrap_or(self.min_time);
        let max_time = seconds(section, "maxTime")?.unwrap_or(self.max_time);
        if min_time > max_time {
            return Err(RuleError::malformed(
                "minTime",
                format!("{} exceeds maxTime {}", min_time, max_time),
            ));
        }
        self.set_range(min_time, max_time);
        Ok(())
    }
}
