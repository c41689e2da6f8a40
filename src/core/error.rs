//! Error types shared by the trigger and reward engines.
//!
//! Load-time problems come in two flavours:
//! - [`RuleError::UnknownRuleComponent`] aborts the enclosing load.
//! - [`RuleError::MalformedConfiguration`] skips the offending entry; the
//!   skip is recorded in a [`LoadReport`] so callers can surface it.
//!
//! Runtime evaluation never fails on its own. Failures raised by an action
//! implementation are wrapped in [`RuleError::ActionFailed`] and propagated.

use thiserror::Error;

/// Boxed error returned by action implementations.
pub type ActionError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RuleError>;

/// Which catalog a component name was looked up in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Condition,
    Action,
    Reward,
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Condition => write!(f, "condition"),
            Self::Action => write!(f, "action"),
            Self::Reward => write!(f, "reward kind"),
        }
    }
}

/// Unified error type for rule loading and execution.
#[derive(Debug, Error)]
pub enum RuleError {
    /// A persisted name has no registered implementation.
    #[error("Unknown {kind}: {name}")]
    UnknownRuleComponent { kind: ComponentKind, name: String },

    /// A persisted section is missing a required field or holds a bad value.
    #[error("Malformed configuration at '{path}': {reason}")]
    MalformedConfiguration { path: String, reason: String },

    /// An action implementation failed while executing.
    #[error("Action {action} failed: {source}")]
    ActionFailed {
        action: String,
        #[source]
        source: ActionError,
    },

    /// A reward group name that cannot be stored alongside entry indices.
    #[error("Invalid reward group name: '{0}'")]
    InvalidGroupName(String),
}

impl RuleError {
    /// Create an unknown component error.
    pub fn unknown(kind: ComponentKind, name: impl Into<String>) -> Self {
        Self::UnknownRuleComponent {
            kind,
            name: name.into(),
        }
    }

    /// Create a malformed configuration error.
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedConfiguration {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if loading may continue past this error.
    #[must_use]
    pub fn is_skippable(&self) -> bool {
        matches!(self, Self::MalformedConfiguration { .. })
    }
}

/// Outcome of a load operation that completed.
///
/// Malformed entries are skipped rather than aborting the load; each skip is
/// kept here so the caller can report it.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Number of components, entries or groups that were loaded.
    pub loaded: usize,
    /// Errors for the entries that were skipped.
    pub skipped: Vec<RuleError>,
}

impl LoadReport {
    /// Create an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of skipped entries.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// True if nothing was skipped.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Fold a nested report into this one.
    pub fn merge(&mut self, other: LoadReport) {
        self.loaded += other.loaded;
        self.skipped.extend(other.skipped);
    }

    /// Record a skipped entry.
    ///
    /// Non-skippable errors are handed back so the caller can abort.
    pub(crate) fn skip(&mut self, error: RuleError) -> Result<()> {
        if error.is_skippable() {
            tracing::warn!("Skipping malformed entry: {}", error);
            self.skipped.push(error);
            Ok(())
        } else {
            Err(error)
        }
    }
}
