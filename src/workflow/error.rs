//! Runtime errors of the transition protocol.

use crate::core::ConstraintsErrors;
use crate::graph::TriggerError;
use thiserror::Error;

/// Errors reported by state resolution, edge lookup, and the commit
/// protocol. Every failure is returned synchronously to the caller; the
/// engine performs no retries and swallows nothing.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// One or more constraints are unmet. Carries every error, not just
    /// the first.
    #[error("validation failed for action '{action}': {errors}")]
    ValidationFailed {
        action: String,
        errors: ConstraintsErrors,
    },

    /// The identifier names no declared state.
    #[error("unknown state '{0}'")]
    UnknownState(String),

    /// No edge is declared between the two states.
    #[error("no transition from '{origin}' to '{target}'")]
    NoSuchTransition { origin: String, target: String },

    /// A trigger failed during commit. The stored state is left unchanged
    /// because the commit order is validate, trigger, write.
    #[error("trigger failed during action '{action}': {cause}")]
    TriggerFailed { action: String, cause: TriggerError },
}
