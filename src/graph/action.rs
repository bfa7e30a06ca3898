//! Actions: named, guarded operations with post-validation triggers.

use crate::core::{resolve_constraints, Constraint, ConstraintsErrors};
use crate::graph::transition::Transition;

/// Error raised by a trigger during commit. Hosts keep their own error
/// types; the engine only propagates the cause.
pub type TriggerError = Box<dyn std::error::Error + Send + Sync>;

/// Side-effecting callback invoked after successful validation.
///
/// Triggers run in declared order during commit, receiving the transition
/// being applied, the record, and the namespace. A failing trigger aborts
/// the commit and leaves the record's stored state unchanged.
pub struct Trigger<R, N> {
    run: TriggerFn<R, N>,
}

type TriggerFn<R, N> =
    Box<dyn Fn(&Transition<R, N>, &mut R, &N) -> Result<(), TriggerError> + Send + Sync>;

impl<R, N> Trigger<R, N> {
    /// Create a trigger from a callback.
    pub fn new<F>(run: F) -> Self
    where
        F: Fn(&Transition<R, N>, &mut R, &N) -> Result<(), TriggerError> + Send + Sync + 'static,
    {
        Self { run: Box::new(run) }
    }

    /// Invoke the trigger.
    pub fn run(
        &self,
        transition: &Transition<R, N>,
        record: &mut R,
        namespace: &N,
    ) -> Result<(), TriggerError> {
        (self.run)(transition, record, namespace)
    }
}

/// Named, guarded operation attached to one transition.
///
/// An action holds an ordered list of constraints (checked before the
/// transition may apply) and an ordered list of triggers (run during
/// commit, after validation). Actions are owned exclusively by the
/// transition that declares them; the same identifier string may repeat
/// across transitions.
///
/// # Example
///
/// ```rust
/// use flowstate::{Action, Constraint, ConstraintsErrors, Error};
///
/// struct Document {
///     body: String,
/// }
///
/// let publish = Action::<Document, ()>::new("Publish").constraint(Constraint::new(
///     |doc: &Document, _ns: &()| {
///         if doc.body.is_empty() {
///             Err(ConstraintsErrors::new(Error::new("Body is empty.")))
///         } else {
///             Ok(())
///         }
///     },
/// ));
///
/// let doc = Document { body: String::new() };
/// assert!(publish.check(&doc, &()).is_err());
/// ```
pub struct Action<R, N> {
    identifier: String,
    constraints: Vec<Constraint<R, N>>,
    triggers: Vec<Trigger<R, N>>,
}

impl<R, N> std::fmt::Debug for Action<R, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action")
            .field("identifier", &self.identifier)
            .field("constraints", &self.constraints.len())
            .field("triggers", &self.triggers.len())
            .finish()
    }
}

impl<R, N> Action<R, N> {
    /// Create an action with no constraints or triggers.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            constraints: Vec::new(),
            triggers: Vec::new(),
        }
    }

    /// Append a constraint.
    pub fn constraint(mut self, constraint: Constraint<R, N>) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Append a trigger.
    pub fn trigger(mut self, trigger: Trigger<R, N>) -> Self {
        self.triggers.push(trigger);
        self
    }

    /// The action's identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The declared constraints, in order.
    pub fn constraints(&self) -> &[Constraint<R, N>] {
        &self.constraints
    }

    /// The declared triggers, in order.
    pub fn triggers(&self) -> &[Trigger<R, N>] {
        &self.triggers
    }

    /// Check the constraints against the given record and namespace.
    ///
    /// An action with an empty constraint list always passes. Triggers are
    /// never invoked here; they run only on the commit path.
    pub fn check(&self, record: &R, namespace: &N) -> Result<(), ConstraintsErrors> {
        resolve_constraints(&self.constraints, record, namespace)
    }
}
