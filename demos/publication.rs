//! Publication Workflow
//!
//! This example demonstrates a role-gated editorial workflow.
//!
//! Key concepts:
//! - String-identified states (draft -> submitted -> published)
//! - Constraints gate transitions (non-empty body, acting role)
//! - OR composition (retraction allowed to owner or publisher)
//! - A trigger fires on submission, before the state is written
//!
//! Run with: cargo run --example publication

use flowstate::builder::TransitionBuilder;
use flowstate::{
    Constraint, ConstraintsErrors, Error, Transition, Trigger, Workflow, WorkflowRecord,
};
use std::cell::RefCell;

// Document entity
#[derive(Default)]
struct Document {
    state: Option<String>,
    body: String,
}

impl WorkflowRecord for Document {
    fn stored_state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    fn set_stored_state(&mut self, identifier: &str) {
        self.state = Some(identifier.to_string());
    }
}

// Evaluation namespace: who is acting, and a place to collect notifications
#[derive(Default)]
struct Session {
    role: String,
    notifications: RefCell<Vec<String>>,
}

fn non_empty_body() -> Constraint<Document, Session> {
    Constraint::new(|doc: &Document, _session: &Session| {
        if doc.body.is_empty() {
            Err(ConstraintsErrors::new(Error::new("Body is empty.")))
        } else {
            Ok(())
        }
    })
}

fn role_required(role: &'static str) -> Constraint<Document, Session> {
    Constraint::new(move |_doc: &Document, session: &Session| {
        if session.role == role {
            Ok(())
        } else {
            Err(ConstraintsErrors::new(Error::new(format!(
                "Unauthorized. Missing the `{role}` role."
            ))))
        }
    })
}

fn build_workflow() -> Result<Workflow<Document, Session>, Box<dyn std::error::Error>> {
    let notify = Trigger::new(
        |trn: &Transition<Document, Session>, _doc: &mut Document, session: &Session| {
            session
                .notifications
                .borrow_mut()
                .push(format!("{} applied", trn.action.identifier()));
            Ok(())
        },
    );

    let workflow = Workflow::builder()
        .default_state("draft")
        .transition(
            TransitionBuilder::new()
                .action("Submit")
                .from("draft")
                .to("submitted")
                .constraint(non_empty_body())
                .constraint(role_required("owner"))
                .trigger(notify),
        )?
        .transition(
            TransitionBuilder::new()
                .action("Publish")
                .from("submitted")
                .to("published")
                .constraint(non_empty_body())
                .constraint(role_required("publisher")),
        )?
        .transition(
            TransitionBuilder::new()
                .action("Retract")
                .from("published")
                .to("draft")
                .constraint(Constraint::any(vec![
                    role_required("owner"),
                    role_required("publisher"),
                ])),
        )?
        .build()?;

    Ok(workflow)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let workflow = build_workflow()?;

    let mut doc = Document::default();
    let owner = Session {
        role: "owner".to_string(),
        ..Session::default()
    };

    // An empty draft offers nothing.
    {
        let item = workflow.item(&mut doc, &owner);
        println!(
            "empty draft, as owner: {} transitions available",
            item.possible_transitions()?.len()
        );
    }

    // Fill in the body and submit.
    doc.body = "Some text here".to_string();
    {
        let mut item = workflow.item(&mut doc, &owner);
        for transition in item.possible_transitions()? {
            println!(
                "available: {} ({} -> {})",
                transition.action.identifier(),
                transition.origin,
                transition.target
            );
        }

        let record = item.transition_to("submitted")?;
        println!("committed: {} at {}", record.action, record.at);
    }
    println!("notifications: {:?}", owner.notifications.borrow());

    // The owner cannot publish; the full error list comes back at once.
    {
        let mut item = workflow.item(&mut doc, &owner);
        if let Err(error) = item.transition_to("published") {
            println!("as owner: {error}");
        }
    }

    // The publisher can.
    let publisher = Session {
        role: "publisher".to_string(),
        ..Session::default()
    };
    let mut item = workflow.item(&mut doc, &publisher);
    item.transition_to("published")?;
    println!("final state: {}", doc.state.as_deref().unwrap_or("<unset>"));

    Ok(())
}
