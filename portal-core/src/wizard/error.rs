//! Wizard error types

use thiserror::Error;

use super::step::WizardStep;

/// Errors raised while validating wizard answers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    /// A visible step has not been answered
    #[error("Step '{}' is incomplete", .0.title())]
    Incomplete(WizardStep),

    /// An answer was given but is not acceptable
    #[error("Invalid {field}: {reason}")]
    InvalidAnswer {
        /// Name of the offending field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// The step is not part of the current flow
    #[error("Step '{}' is not shown for the current answers", .0.title())]
    StepNotVisible(WizardStep),
}

impl WizardError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidAnswer {
            field,
            reason: reason.into(),
        }
    }
}
