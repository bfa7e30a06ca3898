//! The transition graph: actions, edges, and the indexed table.

mod action;
mod table;
mod transition;

pub use action::{Action, Trigger, TriggerError};
pub use table::TransitionTable;
pub use transition::Transition;
