//! Core value types and validation logic.
//!
//! This module contains the pure heart of the engine:
//! - State identity tokens
//! - Constraint predicates, the exhaustive-AND resolver, and OR composition
//! - Transition records and the host-owned journal
//!
//! Nothing here performs side effects; triggers and state commits live in
//! the workflow layer.

mod journal;
mod state;
mod validation;

pub use journal::{Journal, TransitionRecord};
pub use state::State;
pub use validation::{resolve_constraints, Constraint, ConstraintsErrors, Error};
