//! Flowstate: a guarded finite-state workflow engine.
//!
//! A host application declares named states for a kind of record, guarded
//! *actions* that move a record from one state to another, and evaluates
//! or applies those actions against a concrete record plus a contextual
//! namespace (an acting role, a request context, anything the host wants
//! to thread through).
//!
//! # Core Concepts
//!
//! - **State**: immutable identity token, one per node in the graph
//! - **Constraint**: pure predicate over (record, namespace); composed
//!   with exhaustive AND and short-circuit OR, aggregating every error
//! - **Transition**: a directed edge guarded by an action's constraints,
//!   with triggers that run on commit
//! - **Workflow / WorkflowItem**: the built, read-only configuration and
//!   the short-lived binding used to query and commit moves
//!
//! The engine is fully synchronous, keeps no history of its own, and
//! touches the outside world only through the [`WorkflowRecord`]
//! collaborator trait. Commits follow validate, trigger, write: a failing
//! constraint or trigger leaves the record's stored state untouched.
//!
//! # Example
//!
//! ```rust
//! use flowstate::builder::TransitionBuilder;
//! use flowstate::{ConstraintsErrors, Error, Workflow, WorkflowRecord};
//!
//! #[derive(Default)]
//! struct Document {
//!     state: Option<String>,
//!     body: String,
//! }
//!
//! impl WorkflowRecord for Document {
//!     fn stored_state(&self) -> Option<&str> {
//!         self.state.as_deref()
//!     }
//!
//!     fn set_stored_state(&mut self, identifier: &str) {
//!         self.state = Some(identifier.to_string());
//!     }
//! }
//!
//! struct Session {
//!     role: String,
//! }
//!
//! let workflow: Workflow<Document, Session> = Workflow::builder()
//!     .default_state("draft")
//!     .transition(
//!         TransitionBuilder::new()
//!             .action("Publish")
//!             .from("draft")
//!             .to("published")
//!             .when(|doc: &Document, _session: &Session| {
//!                 if doc.body.is_empty() {
//!                     Err(ConstraintsErrors::new(Error::new("Body is empty.")))
//!                 } else {
//!                     Ok(())
//!                 }
//!             })
//!             .when(|_doc: &Document, session: &Session| {
//!                 if session.role == "publisher" {
//!                     Ok(())
//!                 } else {
//!                     Err(ConstraintsErrors::new(Error::new(
//!                         "Unauthorized. Missing the `publisher` role.",
//!                     )))
//!                 }
//!             }),
//!     )?
//!     .build()?;
//!
//! let mut doc = Document {
//!     body: "Some text here".to_string(),
//!     ..Document::default()
//! };
//! let session = Session {
//!     role: "publisher".to_string(),
//! };
//!
//! let mut item = workflow.item(&mut doc, &session);
//! assert_eq!(item.possible_transitions()?.len(), 1);
//!
//! item.transition_to("published")?;
//! assert_eq!(doc.state.as_deref(), Some("published"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod core;
pub mod graph;
pub mod workflow;

// Re-export the public surface at the crate root.
pub use builder::{BuildError, TransitionBuilder, WorkflowBuilder};
pub use core::{
    resolve_constraints, Constraint, ConstraintsErrors, Error, Journal, State, TransitionRecord,
};
pub use graph::{Action, Transition, TransitionTable, Trigger, TriggerError};
pub use workflow::{Workflow, WorkflowError, WorkflowItem, WorkflowRecord};
