//! Core engine types: participants, areas, RNG, configuration, errors.
//!
//! These are the seams to the host game: participants and areas are traits
//! the host implements, while RNG and configuration are injected.

pub mod area;
pub mod config;
pub mod error;
pub mod participant;
pub mod rng;

pub use area::{Area, AreaState};
pub use config::{RulesConfig, DEFAULT_ENABLE_ACTION};
pub use error::{ActionError, ComponentKind, LoadReport, Result, RuleError};
pub use participant::{Participant, ParticipantId, ParticipantSnapshot};
pub use rng::RuleRng;
