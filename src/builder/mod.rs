//! Fluent declaration API for workflows and transitions.

pub mod error;
pub mod transition;
pub mod workflow;

pub use error::BuildError;
pub use transition::TransitionBuilder;
pub use workflow::WorkflowBuilder;

use crate::core::State;
use crate::graph::{Action, Transition};

/// Create an unguarded transition: no constraints, no triggers.
///
/// # Example
///
/// ```rust
/// use flowstate::builder::simple_transition;
///
/// let transition = simple_transition::<(), ()>("Close", "open", "closed");
/// assert_eq!(transition.action.identifier(), "Close");
/// assert_eq!(transition.origin.identifier(), "open");
/// assert_eq!(transition.target.identifier(), "closed");
/// ```
pub fn simple_transition<R, N>(action: &str, origin: &str, target: &str) -> Transition<R, N> {
    Transition::new(Action::new(action), State::new(origin), State::new(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_transition_is_unguarded() {
        let transition = simple_transition::<(), ()>("Close", "open", "closed");
        assert!(transition.action.constraints().is_empty());
        assert!(transition.action.triggers().is_empty());
        assert!(transition.action.check(&(), &()).is_ok());
    }
}
