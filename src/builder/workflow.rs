//! Builder for declaring workflows.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::State;
use crate::graph::{Transition, TransitionTable};
use crate::workflow::Workflow;
use std::collections::HashMap;

/// Builder for a workflow, with a fluent API.
///
/// States may be declared explicitly with [`state`](Self::state) or
/// implicitly through each transition's origin and target. The default
/// state is required and must be a declared state; `build` resolves it
/// once and fails otherwise.
pub struct WorkflowBuilder<R, N> {
    states: Vec<String>,
    transitions: Vec<Transition<R, N>>,
    default_state: Option<String>,
}

impl<R, N> WorkflowBuilder<R, N> {
    /// Create a new workflow builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            transitions: Vec::new(),
            default_state: None,
        }
    }

    /// Declare a state explicitly. States reachable through transitions
    /// are registered implicitly; this is for states with no edges yet.
    pub fn state(mut self, identifier: impl Into<String>) -> Self {
        self.states.push(identifier.into());
        self
    }

    /// Set the default state identifier (required).
    pub fn default_state(mut self, identifier: impl Into<String>) -> Self {
        self.default_state = Some(identifier.into());
        self
    }

    /// Add a transition from a builder.
    /// Returns an error if the builder is missing required fields.
    pub fn transition(mut self, builder: TransitionBuilder<R, N>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<R, N>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: Vec<Transition<R, N>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Build the workflow.
    pub fn build(self) -> Result<Workflow<R, N>, BuildError> {
        if self.transitions.is_empty() {
            return Err(BuildError::NoTransitions);
        }

        let mut states: HashMap<String, State> = HashMap::new();
        for identifier in &self.states {
            states
                .entry(identifier.clone())
                .or_insert_with(|| State::new(identifier.clone()));
        }
        for transition in &self.transitions {
            for state in [&transition.origin, &transition.target] {
                states
                    .entry(state.identifier().to_string())
                    .or_insert_with(|| state.clone());
            }
        }

        let identifier = self.default_state.ok_or(BuildError::MissingDefaultState)?;
        let default_state = states
            .get(&identifier)
            .cloned()
            .ok_or(BuildError::UnknownDefaultState(identifier))?;

        let table = TransitionTable::new(self.transitions);
        Ok(Workflow::new(states, table, default_state))
    }
}

impl<R, N> Default for WorkflowBuilder<R, N> {
    fn default() -> Self {
        Self::new()
    }
}
