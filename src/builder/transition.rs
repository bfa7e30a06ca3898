//! Builder for declaring transitions.

use crate::builder::error::BuildError;
use crate::core::{Constraint, ConstraintsErrors, State};
use crate::graph::{Action, Transition, Trigger};

/// Builder for a single transition, with a fluent API.
///
/// # Example
///
/// ```rust
/// use flowstate::builder::TransitionBuilder;
/// use flowstate::{ConstraintsErrors, Error, Transition};
///
/// struct Doc {
///     body: String,
/// }
///
/// let transition: Transition<Doc, ()> = TransitionBuilder::new()
///     .action("Publish")
///     .from("draft")
///     .to("published")
///     .when(|doc: &Doc, _ns: &()| {
///         if doc.body.is_empty() {
///             Err(ConstraintsErrors::new(Error::new("Body is empty.")))
///         } else {
///             Ok(())
///         }
///     })
///     .build()?;
///
/// assert_eq!(transition.origin.identifier(), "draft");
/// # Ok::<(), flowstate::BuildError>(())
/// ```
pub struct TransitionBuilder<R, N> {
    action: Option<String>,
    origin: Option<String>,
    target: Option<String>,
    constraints: Vec<Constraint<R, N>>,
    triggers: Vec<Trigger<R, N>>,
}

impl<R, N> TransitionBuilder<R, N> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            action: None,
            origin: None,
            target: None,
            constraints: Vec::new(),
            triggers: Vec::new(),
        }
    }

    /// Set the action identifier (required).
    pub fn action(mut self, identifier: impl Into<String>) -> Self {
        self.action = Some(identifier.into());
        self
    }

    /// Set the origin state identifier (required).
    pub fn from(mut self, identifier: impl Into<String>) -> Self {
        self.origin = Some(identifier.into());
        self
    }

    /// Set the target state identifier (required).
    pub fn to(mut self, identifier: impl Into<String>) -> Self {
        self.target = Some(identifier.into());
        self
    }

    /// Append a constraint (optional).
    pub fn constraint(mut self, constraint: Constraint<R, N>) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Append a constraint from a closure (optional).
    pub fn when<F>(self, check: F) -> Self
    where
        F: Fn(&R, &N) -> Result<(), ConstraintsErrors> + Send + Sync + 'static,
    {
        self.constraint(Constraint::new(check))
    }

    /// Append a trigger (optional).
    pub fn trigger(mut self, trigger: Trigger<R, N>) -> Self {
        self.triggers.push(trigger);
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition<R, N>, BuildError> {
        let identifier = self.action.ok_or(BuildError::MissingAction)?;
        let origin = self.origin.ok_or(BuildError::MissingOrigin)?;
        let target = self.target.ok_or(BuildError::MissingTarget)?;

        let mut action = Action::new(identifier);
        for constraint in self.constraints {
            action = action.constraint(constraint);
        }
        for trigger in self.triggers {
            action = action.trigger(trigger);
        }

        Ok(Transition::new(
            action,
            State::new(origin),
            State::new(target),
        ))
    }
}

impl<R, N> Default for TransitionBuilder<R, N> {
    fn default() -> Self {
        Self::new()
    }
}
