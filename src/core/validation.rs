//! Constraint predicates and the validation resolver.
//!
//! Constraints are pure predicates over a record and an evaluation
//! namespace. The resolver composes them with exhaustive AND semantics:
//! every constraint runs regardless of earlier failures so callers get the
//! complete list of unmet requirements, not just the first. The `any`
//! combinator provides short-circuit OR composition on top.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single validation failure message.
///
/// Value type, structurally comparable.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct Error {
    message: String,
}

impl Error {
    /// Create an error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Ordered, non-empty aggregate of validation [`Error`]s.
///
/// Raised whenever one or more constraints fail. The public constructors
/// make an empty aggregate unrepresentable: a validation pass with no
/// failing constraints yields success, never an empty failure. Serializes
/// as a plain list of errors; deserialization rejects an empty list so the
/// invariant holds across the wire too.
///
/// # Example
///
/// ```rust
/// use flowstate::{ConstraintsErrors, Error};
///
/// let failure = ConstraintsErrors::new(Error::new("Body is empty."));
/// assert_eq!(failure.len(), 1);
///
/// // An empty vector is not a failure.
/// assert!(ConstraintsErrors::from_vec(vec![]).is_none());
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(into = "Vec<Error>", try_from = "Vec<Error>")]
pub struct ConstraintsErrors {
    errors: Vec<Error>,
}

impl ConstraintsErrors {
    /// Aggregate holding a single error.
    pub fn new(error: Error) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// Aggregate from a vector of errors, in order.
    ///
    /// Returns `None` for an empty vector.
    pub fn from_vec(errors: Vec<Error>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// The underlying errors, in declaration order.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Number of aggregated errors. Always at least one.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over the errors.
    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.errors.iter()
    }
}

impl From<Error> for ConstraintsErrors {
    fn from(error: Error) -> Self {
        Self::new(error)
    }
}

impl From<ConstraintsErrors> for Vec<Error> {
    fn from(failure: ConstraintsErrors) -> Self {
        failure.errors
    }
}

impl TryFrom<Vec<Error>> for ConstraintsErrors {
    type Error = Error;

    fn try_from(errors: Vec<Error>) -> Result<Self, Error> {
        Self::from_vec(errors)
            .ok_or_else(|| Error::new("an error aggregate must hold at least one error"))
    }
}

impl IntoIterator for ConstraintsErrors {
    type Item = Error;
    type IntoIter = std::vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConstraintsErrors {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ConstraintsErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.errors.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConstraintsErrors {}

/// Pure predicate over a record and an evaluation namespace.
///
/// A constraint either passes or reports one or more [`Error`]s. It must
/// not mutate the record. The check function is `Send + Sync` so a built
/// workflow can be shared across threads.
///
/// # Example
///
/// ```rust
/// use flowstate::{Constraint, ConstraintsErrors, Error};
///
/// struct Document {
///     body: String,
/// }
///
/// struct Context {
///     role: String,
/// }
///
/// let non_empty = Constraint::new(|doc: &Document, _ctx: &Context| {
///     if doc.body.is_empty() {
///         Err(ConstraintsErrors::new(Error::new("Body is empty.")))
///     } else {
///         Ok(())
///     }
/// });
///
/// let doc = Document { body: "text".to_string() };
/// let ctx = Context { role: "owner".to_string() };
/// assert!(non_empty.check(&doc, &ctx).is_ok());
/// ```
pub struct Constraint<R, N> {
    check: Box<dyn Fn(&R, &N) -> Result<(), ConstraintsErrors> + Send + Sync>,
}

impl<R, N> Constraint<R, N> {
    /// Create a constraint from a check function.
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&R, &N) -> Result<(), ConstraintsErrors> + Send + Sync + 'static,
    {
        Self {
            check: Box::new(check),
        }
    }

    /// OR composition over sub-constraints.
    ///
    /// Evaluates each sub-constraint in order and succeeds immediately on
    /// the first success, discarding any errors collected so far. If every
    /// sub-constraint fails, the result aggregates all of their errors in
    /// order. An empty list passes.
    ///
    /// An `any` constraint is itself a constraint, so it composes as one
    /// element of an action's constraint list.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flowstate::{Constraint, ConstraintsErrors, Error};
    ///
    /// struct Doc;
    /// struct Ctx {
    ///     role: String,
    /// }
    ///
    /// fn role_required(role: &'static str) -> Constraint<Doc, Ctx> {
    ///     Constraint::new(move |_doc: &Doc, ctx: &Ctx| {
    ///         if ctx.role == role {
    ///             Ok(())
    ///         } else {
    ///             Err(ConstraintsErrors::new(Error::new(format!(
    ///                 "Unauthorized. Missing the `{role}` role."
    ///             ))))
    ///         }
    ///     })
    /// }
    ///
    /// let owner_or_publisher =
    ///     Constraint::any(vec![role_required("owner"), role_required("publisher")]);
    ///
    /// let ctx = Ctx { role: "publisher".to_string() };
    /// assert!(owner_or_publisher.check(&Doc, &ctx).is_ok());
    ///
    /// let ctx = Ctx { role: "guest".to_string() };
    /// let failure = owner_or_publisher.check(&Doc, &ctx).unwrap_err();
    /// assert_eq!(failure.len(), 2);
    /// ```
    pub fn any(constraints: Vec<Constraint<R, N>>) -> Self
    where
        R: 'static,
        N: 'static,
    {
        Constraint::new(move |record, namespace| {
            let mut errors = Vec::new();
            for constraint in &constraints {
                match constraint.check(record, namespace) {
                    Ok(()) => return Ok(()),
                    Err(failure) => errors.extend(failure),
                }
            }
            match ConstraintsErrors::from_vec(errors) {
                Some(failure) => Err(failure),
                None => Ok(()),
            }
        })
    }

    /// Evaluate the constraint against a record and namespace.
    pub fn check(&self, record: &R, namespace: &N) -> Result<(), ConstraintsErrors> {
        (self.check)(record, namespace)
    }
}

/// Exhaustive AND over a constraint list.
///
/// Every constraint in the sequence is evaluated regardless of earlier
/// failures. Returns `Ok(())` only if all pass; otherwise the concatenation
/// of every individual error, in declaration order.
pub fn resolve_constraints<R, N>(
    constraints: &[Constraint<R, N>],
    record: &R,
    namespace: &N,
) -> Result<(), ConstraintsErrors> {
    let mut errors = Vec::new();
    for constraint in constraints {
        if let Err(failure) = constraint.check(record, namespace) {
            errors.extend(failure);
        }
    }
    match ConstraintsErrors::from_vec(errors) {
        Some(failure) => Err(failure),
        None => Ok(()),
    }
}
