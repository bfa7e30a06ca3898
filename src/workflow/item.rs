//! The per-call binding of a workflow, a record, and a namespace.

use crate::core::{State, TransitionRecord};
use crate::graph::Transition;
use crate::workflow::record::WorkflowRecord;
use crate::workflow::{Workflow, WorkflowError};
use chrono::Utc;
use uuid::Uuid;

/// Short-lived view of one record under one workflow.
///
/// A `WorkflowItem` borrows its three parts and holds no state of its own;
/// its lifetime is bounded by the call that created it. It answers "what
/// can I do" ([`possible_transitions`](Self::possible_transitions)) and
/// "do this" ([`transition_to`](Self::transition_to)).
///
/// # Example
///
/// ```rust
/// use flowstate::builder::TransitionBuilder;
/// use flowstate::{Workflow, WorkflowRecord};
///
/// #[derive(Default)]
/// struct Ticket {
///     state: Option<String>,
/// }
///
/// impl WorkflowRecord for Ticket {
///     fn stored_state(&self) -> Option<&str> {
///         self.state.as_deref()
///     }
///
///     fn set_stored_state(&mut self, identifier: &str) {
///         self.state = Some(identifier.to_string());
///     }
/// }
///
/// let workflow: Workflow<Ticket, ()> = Workflow::builder()
///     .default_state("open")
///     .transition(TransitionBuilder::new().action("Close").from("open").to("closed"))?
///     .build()?;
///
/// let mut ticket = Ticket::default();
/// let mut item = workflow.item(&mut ticket, &());
///
/// assert_eq!(item.possible_transitions()?.len(), 1);
/// let record = item.transition_to("closed")?;
/// assert_eq!(record.to.identifier(), "closed");
/// assert_eq!(ticket.stored_state(), Some("closed"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct WorkflowItem<'a, R, N> {
    workflow: &'a Workflow<R, N>,
    record: &'a mut R,
    namespace: &'a N,
}

impl<'a, R: WorkflowRecord, N> WorkflowItem<'a, R, N> {
    /// Bind a workflow, a record, and a namespace.
    pub fn new(workflow: &'a Workflow<R, N>, record: &'a mut R, namespace: &'a N) -> Self {
        Self {
            workflow,
            record,
            namespace,
        }
    }

    /// The record's effective current state: the stored identifier, or the
    /// workflow's default when unset.
    pub fn current_state(&self) -> Result<&'a State, WorkflowError> {
        self.workflow.current_state(&*self.record)
    }

    /// The transitions currently open from the record's state.
    ///
    /// Pure query: constraints are evaluated against the record's current
    /// data, triggers never run, nothing is mutated or cached.
    pub fn possible_transitions(&self) -> Result<Vec<&Transition<R, N>>, WorkflowError> {
        let origin = self.workflow.current_state(&*self.record)?;
        Ok(self
            .workflow
            .transitions()
            .available(origin, &*self.record, self.namespace)
            .collect())
    }

    /// Attempt to move the record to `target`.
    ///
    /// The protocol is validate, trigger, commit:
    /// 1. resolve the current and target states (`UnknownState`);
    /// 2. look up the exact edge (`NoSuchTransition`);
    /// 3. check the action's constraints (`ValidationFailed`, listing every
    ///    unmet constraint; nothing has been mutated);
    /// 4. run every trigger in declared order (`TriggerFailed` aborts with
    ///    the stored state untouched);
    /// 5. write the target identifier back through the record collaborator.
    ///
    /// Returns the [`TransitionRecord`] domain event on success.
    pub fn transition_to(&mut self, target: &str) -> Result<TransitionRecord, WorkflowError> {
        let workflow = self.workflow;
        let origin = workflow.current_state(&*self.record)?.clone();
        let target = workflow.state(target)?.clone();
        let transition = workflow.transitions().find(&origin, &target)?;

        if let Err(errors) = transition.action.check(&*self.record, self.namespace) {
            return Err(WorkflowError::ValidationFailed {
                action: transition.action.identifier().to_string(),
                errors,
            });
        }

        for trigger in transition.action.triggers() {
            trigger
                .run(transition, self.record, self.namespace)
                .map_err(|cause| WorkflowError::TriggerFailed {
                    action: transition.action.identifier().to_string(),
                    cause,
                })?;
        }

        self.record.set_stored_state(target.identifier());

        Ok(TransitionRecord {
            id: Uuid::new_v4(),
            action: transition.action.identifier().to_string(),
            from: origin,
            to: target,
            at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Constraint, ConstraintsErrors, Error};
    use crate::graph::{Action, Trigger};
    use crate::Workflow;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Doc {
        state: Option<String>,
        body: String,
    }

    impl WorkflowRecord for Doc {
        fn stored_state(&self) -> Option<&str> {
            self.state.as_deref()
        }

        fn set_stored_state(&mut self, identifier: &str) {
            self.state = Some(identifier.to_string());
        }
    }

    #[derive(Default)]
    struct Ctx {
        role: String,
        notifications: RefCell<Vec<String>>,
    }

    fn ctx(role: &str) -> Ctx {
        Ctx {
            role: role.to_string(),
            notifications: RefCell::new(Vec::new()),
        }
    }

    fn non_empty_body() -> Constraint<Doc, Ctx> {
        Constraint::new(|doc: &Doc, _ctx: &Ctx| {
            if doc.body.is_empty() {
                Err(ConstraintsErrors::new(Error::new("Body is empty.")))
            } else {
                Ok(())
            }
        })
    }

    fn role_required(role: &'static str) -> Constraint<Doc, Ctx> {
        Constraint::new(move |_doc: &Doc, ctx: &Ctx| {
            if ctx.role == role {
                Ok(())
            } else {
                Err(ConstraintsErrors::new(Error::new(format!(
                    "Unauthorized. Missing the `{role}` role."
                ))))
            }
        })
    }

    fn notify_trigger() -> Trigger<Doc, Ctx> {
        Trigger::new(|_trn: &Transition<Doc, Ctx>, _doc: &mut Doc, ctx: &Ctx| {
            ctx.notifications.borrow_mut().push("notified".to_string());
            Ok(())
        })
    }

    fn workflow() -> Workflow<Doc, Ctx> {
        Workflow::builder()
            .default_state("draft")
            .add_transition(Transition::new(
                Action::new("Submit")
                    .constraint(non_empty_body())
                    .constraint(role_required("owner"))
                    .trigger(notify_trigger()),
                State::new("draft"),
                State::new("submitted"),
            ))
            .add_transition(Transition::new(
                Action::new("Publish")
                    .constraint(non_empty_body())
                    .constraint(role_required("publisher")),
                State::new("submitted"),
                State::new("published"),
            ))
            .build()
            .unwrap()
    }

    #[test]
    fn unset_state_resolves_to_default() {
        let workflow = workflow();
        let mut doc = Doc::default();
        let namespace = ctx("owner");
        let item = workflow.item(&mut doc, &namespace);

        assert_eq!(item.current_state().unwrap(), &State::new("draft"));
    }

    #[test]
    fn unknown_stored_state_is_an_error() {
        let workflow = workflow();
        let mut doc = Doc {
            state: Some("limbo".to_string()),
            ..Doc::default()
        };
        let namespace = ctx("owner");
        let mut item = workflow.item(&mut doc, &namespace);

        assert!(matches!(
            item.possible_transitions().unwrap_err(),
            WorkflowError::UnknownState(identifier) if identifier == "limbo"
        ));
        assert!(matches!(
            item.transition_to("submitted").unwrap_err(),
            WorkflowError::UnknownState(identifier) if identifier == "limbo"
        ));
    }

    #[test]
    fn commit_validates_triggers_then_writes() {
        let workflow = workflow();
        let mut doc = Doc {
            body: "text".to_string(),
            ..Doc::default()
        };
        let namespace = ctx("owner");
        let mut item = workflow.item(&mut doc, &namespace);

        let record = item.transition_to("submitted").unwrap();
        assert_eq!(record.action, "Submit");
        assert_eq!(record.from, State::new("draft"));
        assert_eq!(record.to, State::new("submitted"));

        assert_eq!(doc.state.as_deref(), Some("submitted"));
        assert_eq!(*namespace.notifications.borrow(), vec!["notified"]);
    }

    #[test]
    fn triggers_run_once_each_in_declared_order() {
        let first = Trigger::new(|_trn: &Transition<Doc, Ctx>, _doc: &mut Doc, ctx: &Ctx| {
            ctx.notifications.borrow_mut().push("first".to_string());
            Ok(())
        });
        let second = Trigger::new(|_trn: &Transition<Doc, Ctx>, _doc: &mut Doc, ctx: &Ctx| {
            ctx.notifications.borrow_mut().push("second".to_string());
            Ok(())
        });

        let workflow: Workflow<Doc, Ctx> = Workflow::builder()
            .default_state("draft")
            .add_transition(Transition::new(
                Action::new("Submit").trigger(first).trigger(second),
                State::new("draft"),
                State::new("submitted"),
            ))
            .build()
            .unwrap();

        let mut doc = Doc::default();
        let namespace = ctx("owner");
        let mut item = workflow.item(&mut doc, &namespace);
        item.transition_to("submitted").unwrap();

        assert_eq!(*namespace.notifications.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn failed_validation_leaves_state_unchanged() {
        let workflow = workflow();
        let mut doc = Doc::default();
        let namespace = ctx("guest");
        let mut item = workflow.item(&mut doc, &namespace);

        let error = item.transition_to("submitted").unwrap_err();
        match error {
            WorkflowError::ValidationFailed { action, errors } => {
                assert_eq!(action, "Submit");
                assert_eq!(errors.len(), 2);
            }
            other => panic!("expected ValidationFailed, got {other:?}"),
        }

        assert_eq!(doc.state, None);
        assert!(namespace.notifications.borrow().is_empty());
    }

    #[test]
    fn failed_trigger_aborts_before_the_write() {
        let failing = Trigger::new(|_trn: &Transition<Doc, Ctx>, _doc: &mut Doc, _ctx: &Ctx| {
            Err("notifier unreachable".into())
        });

        let workflow: Workflow<Doc, Ctx> = Workflow::builder()
            .default_state("draft")
            .add_transition(Transition::new(
                Action::new("Submit").trigger(failing),
                State::new("draft"),
                State::new("submitted"),
            ))
            .build()
            .unwrap();

        let mut doc = Doc::default();
        let namespace = ctx("owner");
        let mut item = workflow.item(&mut doc, &namespace);

        let error = item.transition_to("submitted").unwrap_err();
        assert!(matches!(
            error,
            WorkflowError::TriggerFailed { ref action, .. } if action == "Submit"
        ));
        assert_eq!(doc.state, None);
    }

    #[test]
    fn no_edge_to_target_is_an_error() {
        let workflow = workflow();
        let mut doc = Doc {
            body: "text".to_string(),
            ..Doc::default()
        };
        let namespace = ctx("owner");
        let mut item = workflow.item(&mut doc, &namespace);

        let error = item.transition_to("published").unwrap_err();
        assert!(matches!(
            error,
            WorkflowError::NoSuchTransition { origin, target }
                if origin == "draft" && target == "published"
        ));
    }

    #[test]
    fn queries_reflect_the_new_state_after_commit() {
        let workflow = workflow();
        let mut doc = Doc {
            body: "text".to_string(),
            ..Doc::default()
        };

        let namespace = ctx("owner");
        let mut item = workflow.item(&mut doc, &namespace);
        item.transition_to("submitted").unwrap();

        let namespace = ctx("publisher");
        let item = workflow.item(&mut doc, &namespace);
        let open: Vec<&str> = item
            .possible_transitions()
            .unwrap()
            .into_iter()
            .map(|trn| trn.action.identifier())
            .collect();
        assert_eq!(open, vec!["Publish"]);
    }
}
