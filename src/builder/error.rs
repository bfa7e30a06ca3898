//! Build errors for workflow and transition builders.

use thiserror::Error;

/// Errors that can occur while declaring a workflow.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Transition action not specified. Call .action(identifier)")]
    MissingAction,

    #[error("Transition origin state not specified. Call .from(identifier)")]
    MissingOrigin,

    #[error("Transition target state not specified. Call .to(identifier)")]
    MissingTarget,

    #[error("Default state not specified. Call .default_state(identifier) before .build()")]
    MissingDefaultState,

    #[error("Default state '{0}' is not a declared state")]
    UnknownDefaultState(String),

    #[error("No transitions defined. Add at least one transition")]
    NoTransitions,
}
