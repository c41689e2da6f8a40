//! Participant identity and the runtime view conditions read from.
//!
//! Players and their sessions live in the host. The engine only needs a
//! stable identity (for fire counters) and a small snapshot of game state.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable unique identity of a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantId(Uuid);

impl ParticipantId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ParticipantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ParticipantId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// A player taking part in a minigame, as seen by conditions and actions.
pub trait Participant {
    /// Stable identity, used as the fire-counter key.
    fn id(&self) -> ParticipantId;

    /// Team the participant is on, if the game has teams.
    fn team(&self) -> Option<&str>;

    /// Seconds left on the participant's game timer, if one is running.
    fn time_left(&self) -> Option<u64>;
}

/// Plain participant snapshot.
///
/// Handy for hosts that build a view per event, and for tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParticipantSnapshot {
    pub id: ParticipantId,
    pub team: Option<String>,
    pub time_left: Option<u64>,
}

impl ParticipantSnapshot {
    /// Create a snapshot with no team and no timer.
    pub fn new(id: ParticipantId) -> Self {
        Self {
            id,
            team: None,
            time_left: None,
        }
    }

    /// Set the team (builder pattern).
    #[must_use]
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// Set the remaining game time (builder pattern).
    #[must_use]
    pub fn with_time_left(mut self, seconds: u64) -> Self {
        self.time_left = Some(seconds);
        self
    }
}

impl Participant for ParticipantSnapshot {
    fn id(&self) -> ParticipantId {
        self.id
    }

    fn team(&self) -> Option<&str> {
        self.team.as_deref()
    }

    fn time_left(&self) -> Option<u64> {
        self.time_left
    }
}
