//! Transition edges of the workflow graph.

use crate::core::State;
use crate::graph::action::Action;

/// An immutable directed edge: origin state, target state, and the action
/// guarding the move between them.
pub struct Transition<R, N> {
    pub action: Action<R, N>,
    pub origin: State,
    pub target: State,
}

impl<R, N> std::fmt::Debug for Transition<R, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("action", &self.action)
            .field("origin", &self.origin)
            .field("target", &self.target)
            .finish()
    }
}

impl<R, N> Transition<R, N> {
    /// Create a transition.
    pub fn new(action: Action<R, N>, origin: State, target: State) -> Self {
        Self {
            action,
            origin,
            target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_keeps_its_parts() {
        let transition: Transition<(), ()> = Transition::new(
            Action::new("Publish"),
            State::new("draft"),
            State::new("published"),
        );

        assert_eq!(transition.action.identifier(), "Publish");
        assert_eq!(transition.origin, State::new("draft"));
        assert_eq!(transition.target, State::new("published"));
    }
}
