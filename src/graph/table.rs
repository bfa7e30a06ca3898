//! The transition table: indexed storage for the workflow's edges.

use crate::core::State;
use crate::graph::transition::Transition;
use crate::workflow::WorkflowError;
use std::collections::HashMap;

/// The set of declared transitions, indexed for exact (origin, target)
/// lookup and for ordered iteration over an origin's outgoing edges.
///
/// The table holds at most one transition per (origin, target) pair. When
/// the input declares the same pair twice, the last registration wins and
/// replaces the earlier one in place, keeping its original position in the
/// origin bucket.
pub struct TransitionTable<R, N> {
    transitions: Vec<Transition<R, N>>,
    // origin -> target -> index into `transitions`
    edges: HashMap<String, HashMap<String, usize>>,
    // origin -> indices in registration order
    buckets: HashMap<String, Vec<usize>>,
}

impl<R, N> TransitionTable<R, N> {
    /// Build a table from an ordered collection of transitions.
    pub fn new(transitions: Vec<Transition<R, N>>) -> Self {
        let mut table = Self {
            transitions: Vec::new(),
            edges: HashMap::new(),
            buckets: HashMap::new(),
        };
        for transition in transitions {
            table.insert(transition);
        }
        table
    }

    fn insert(&mut self, transition: Transition<R, N>) {
        let origin = transition.origin.identifier().to_string();
        let target = transition.target.identifier().to_string();

        let by_target = self.edges.entry(origin.clone()).or_default();
        if let Some(&index) = by_target.get(&target) {
            // Duplicate (origin, target) pair: last registered wins.
            self.transitions[index] = transition;
        } else {
            let index = self.transitions.len();
            by_target.insert(target, index);
            self.buckets.entry(origin).or_default().push(index);
            self.transitions.push(transition);
        }
    }

    /// The transitions currently in the table, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Transition<R, N>> {
        self.transitions.iter()
    }

    /// Number of distinct (origin, target) edges.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Whether the table holds no transitions.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// All outgoing edges from `origin`, unfiltered, in bucket order.
    pub fn outgoing<'t>(&'t self, origin: &State) -> impl Iterator<Item = &'t Transition<R, N>> {
        let bucket = self
            .buckets
            .get(origin.identifier())
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        bucket.iter().map(move |&index| &self.transitions[index])
    }

    /// The outgoing edges from `origin` whose action currently passes its
    /// constraints, in bucket order.
    ///
    /// The returned iterator is lazy and recomputed fresh on every call; it
    /// is a pure query reflecting the record's current data, never a cache.
    pub fn available<'t>(
        &'t self,
        origin: &State,
        record: &'t R,
        namespace: &'t N,
    ) -> impl Iterator<Item = &'t Transition<R, N>> + 't {
        self.outgoing(origin)
            .filter(move |transition| transition.action.check(record, namespace).is_ok())
    }

    /// Exact edge lookup.
    ///
    /// Fails with [`WorkflowError::NoSuchTransition`] naming both states
    /// when no edge is declared between them.
    pub fn find(&self, origin: &State, target: &State) -> Result<&Transition<R, N>, WorkflowError> {
        self.edges
            .get(origin.identifier())
            .and_then(|by_target| by_target.get(target.identifier()))
            .map(|&index| &self.transitions[index])
            .ok_or_else(|| WorkflowError::NoSuchTransition {
                origin: origin.identifier().to_string(),
                target: target.identifier().to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Constraint, ConstraintsErrors, Error};
    use crate::graph::action::Action;

    struct Doc {
        body: String,
    }

    fn non_empty_body() -> Constraint<Doc, ()> {
        Constraint::new(|doc: &Doc, _ns: &()| {
            if doc.body.is_empty() {
                Err(ConstraintsErrors::new(Error::new("Body is empty.")))
            } else {
                Ok(())
            }
        })
    }

    fn edge(action: &str, origin: &str, target: &str) -> Transition<Doc, ()> {
        Transition::new(Action::new(action), State::new(origin), State::new(target))
    }

    fn guarded_edge(action: &str, origin: &str, target: &str) -> Transition<Doc, ()> {
        Transition::new(
            Action::new(action).constraint(non_empty_body()),
            State::new(origin),
            State::new(target),
        )
    }

    #[test]
    fn find_returns_the_declared_edge() {
        let table = TransitionTable::new(vec![
            edge("Publish", "draft", "published"),
            edge("Submit", "draft", "submitted"),
        ]);

        let transition = table
            .find(&State::new("draft"), &State::new("submitted"))
            .unwrap();
        assert_eq!(transition.action.identifier(), "Submit");
    }

    #[test]
    fn find_fails_on_undeclared_pair() {
        let table = TransitionTable::new(vec![edge("Publish", "draft", "published")]);

        let error = table
            .find(&State::new("published"), &State::new("draft"))
            .unwrap_err();
        assert!(matches!(
            error,
            WorkflowError::NoSuchTransition { origin, target }
                if origin == "published" && target == "draft"
        ));
    }

    #[test]
    fn duplicate_pair_last_registration_wins() {
        let table = TransitionTable::new(vec![
            edge("First", "draft", "published"),
            edge("Other", "draft", "submitted"),
            edge("Second", "draft", "published"),
        ]);

        assert_eq!(table.len(), 2);

        let transition = table
            .find(&State::new("draft"), &State::new("published"))
            .unwrap();
        assert_eq!(transition.action.identifier(), "Second");

        // The replacement keeps the pair's original bucket position.
        let order: Vec<&str> = table
            .outgoing(&State::new("draft"))
            .map(|trn| trn.action.identifier())
            .collect();
        assert_eq!(order, vec!["Second", "Other"]);
    }

    #[test]
    fn available_filters_by_constraints_in_bucket_order() {
        let table = TransitionTable::new(vec![
            guarded_edge("Publish", "draft", "published"),
            edge("Discard", "draft", "discarded"),
            edge("Retract", "published", "draft"),
        ]);

        let empty = Doc {
            body: String::new(),
        };
        let open: Vec<&str> = table
            .available(&State::new("draft"), &empty, &())
            .map(|trn| trn.action.identifier())
            .collect();
        assert_eq!(open, vec!["Discard"]);

        let filled = Doc {
            body: "text".to_string(),
        };
        let open: Vec<&str> = table
            .available(&State::new("draft"), &filled, &())
            .map(|trn| trn.action.identifier())
            .collect();
        assert_eq!(open, vec!["Publish", "Discard"]);
    }

    #[test]
    fn available_is_recomputed_each_call() {
        let table = TransitionTable::new(vec![guarded_edge("Publish", "draft", "published")]);

        let mut doc = Doc {
            body: String::new(),
        };
        assert_eq!(table.available(&State::new("draft"), &doc, &()).count(), 0);

        doc.body = "text".to_string();
        assert_eq!(table.available(&State::new("draft"), &doc, &()).count(), 1);
    }

    #[test]
    fn available_from_unknown_origin_is_empty() {
        let table = TransitionTable::new(vec![edge("Publish", "draft", "published")]);
        let doc = Doc {
            body: "text".to_string(),
        };
        assert_eq!(table.available(&State::new("orphan"), &doc, &()).count(), 0);
    }
}
