//! The workflow: declared states, the transition table, and a default
//! state, plus the per-call item binding.
//!
//! A `Workflow` is built once through [`WorkflowBuilder`](crate::builder::WorkflowBuilder)
//! and is thereafter read-only, so it can be shared across threads without
//! synchronization. The only mutable surface of the whole engine is the
//! record's stored state identifier, written through the
//! [`WorkflowRecord`] collaborator.

mod error;
mod item;
mod record;

pub use error::WorkflowError;
pub use item::WorkflowItem;
pub use record::WorkflowRecord;

use crate::builder::WorkflowBuilder;
use crate::core::State;
use crate::graph::{Transition, TransitionTable};
use std::collections::HashMap;

/// An immutable workflow configuration: the declared states, the
/// transition table, and the default state.
///
/// `R` is the host's record type, `N` the namespace passed unchanged to
/// every constraint and trigger.
pub struct Workflow<R, N> {
    states: HashMap<String, State>,
    table: TransitionTable<R, N>,
    default_state: State,
}

impl<R, N> Workflow<R, N> {
    pub(crate) fn new(
        states: HashMap<String, State>,
        table: TransitionTable<R, N>,
        default_state: State,
    ) -> Self {
        Self {
            states,
            table,
            default_state,
        }
    }

    /// Start declaring a workflow.
    pub fn builder() -> WorkflowBuilder<R, N> {
        WorkflowBuilder::new()
    }

    /// Registry lookup by identifier.
    ///
    /// Fails with [`WorkflowError::UnknownState`] when the identifier was
    /// never declared.
    pub fn state(&self, identifier: &str) -> Result<&State, WorkflowError> {
        self.states
            .get(identifier)
            .ok_or_else(|| WorkflowError::UnknownState(identifier.to_string()))
    }

    /// All declared states, in no particular order.
    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.states.values()
    }

    /// The state a record without a stored identifier resolves to.
    pub fn default_state(&self) -> &State {
        &self.default_state
    }

    /// The transition table.
    pub fn transitions(&self) -> &TransitionTable<R, N> {
        &self.table
    }

    /// Exact edge lookup by state identifiers.
    pub fn find_transition(
        &self,
        origin: &str,
        target: &str,
    ) -> Result<&Transition<R, N>, WorkflowError> {
        let origin = self.state(origin)?;
        let target = self.state(target)?;
        self.table.find(origin, target)
    }
}

impl<R: WorkflowRecord, N> Workflow<R, N> {
    /// Resolve a record's effective current state.
    ///
    /// An unset stored identifier resolves to the default state. A stored
    /// identifier naming no declared state is a lookup failure, never a
    /// silent fallback.
    pub fn current_state(&self, record: &R) -> Result<&State, WorkflowError> {
        match record.stored_state() {
            Some(identifier) => self.state(identifier),
            None => Ok(&self.default_state),
        }
    }

    /// Bind a record and a namespace for querying and committing.
    pub fn item<'a>(&'a self, record: &'a mut R, namespace: &'a N) -> WorkflowItem<'a, R, N> {
        WorkflowItem::new(self, record, namespace)
    }
}
