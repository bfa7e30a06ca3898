//! State identity tokens.
//!
//! A `State` is an immutable, hashable name for one node in the workflow
//! graph. States are interned once at declaration time and compared by
//! identifier only.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named node in the workflow graph.
///
/// Two states are equal exactly when their identifiers are equal, and the
/// hash follows the identifier, so a `State` can key lookup tables.
///
/// # Example
///
/// ```rust
/// use flowstate::State;
///
/// let draft = State::new("draft");
/// let same = State::new("draft");
/// let published = State::new("published");
///
/// assert_eq!(draft, same);
/// assert_ne!(draft, published);
/// assert_eq!(draft.identifier(), "draft");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State {
    identifier: String,
}

impl State {
    /// Create a state from its identifier.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }

    /// The state's identifier, as stored on records and used in lookups.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier)
    }
}
