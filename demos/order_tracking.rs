//! Order Tracking Workflow
//!
//! This example demonstrates order lifecycle tracking with a journal.
//!
//! Key concepts:
//! - Order states (open -> paid -> shipped -> delivered)
//! - Business validation rules on each move
//! - Collecting TransitionRecord events into a host-owned Journal
//! - A failing trigger aborting a commit
//!
//! Run with: cargo run --example order_tracking

use flowstate::builder::TransitionBuilder;
use flowstate::{
    ConstraintsErrors, Error, Journal, Transition, Trigger, Workflow, WorkflowRecord,
};

// Order entity
struct Order {
    state: Option<String>,
    total: f64,
    items: Vec<String>,
    paid: f64,
}

impl WorkflowRecord for Order {
    fn stored_state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    fn set_stored_state(&mut self, identifier: &str) {
        self.state = Some(identifier.to_string());
    }
}

// Namespace: whether the carrier integration is reachable.
struct Shipping {
    carrier_online: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let book_shipment = Trigger::new(
        |_trn: &Transition<Order, Shipping>, order: &mut Order, shipping: &Shipping| {
            if !shipping.carrier_online {
                return Err("carrier integration offline".into());
            }
            order.items.sort();
            Ok(())
        },
    );

    let workflow: Workflow<Order, Shipping> = Workflow::builder()
        .default_state("open")
        .transition(
            TransitionBuilder::new()
                .action("Pay")
                .from("open")
                .to("paid")
                .when(|order: &Order, _shipping: &Shipping| {
                    if order.paid < order.total {
                        Err(ConstraintsErrors::new(Error::new(format!(
                            "Outstanding balance: {:.2}",
                            order.total - order.paid
                        ))))
                    } else {
                        Ok(())
                    }
                }),
        )?
        .transition(
            TransitionBuilder::new()
                .action("Ship")
                .from("paid")
                .to("shipped")
                .when(|order: &Order, _shipping: &Shipping| {
                    if order.items.is_empty() {
                        Err(ConstraintsErrors::new(Error::new("Nothing to ship.")))
                    } else {
                        Ok(())
                    }
                })
                .trigger(book_shipment),
        )?
        .transition(
            TransitionBuilder::new()
                .action("Deliver")
                .from("shipped")
                .to("delivered"),
        )?
        .build()?;

    let mut order = Order {
        state: None,
        total: 42.5,
        items: vec!["keyboard".to_string(), "cable".to_string()],
        paid: 42.5,
    };
    let mut journal = Journal::new();

    // Pay, then try to ship while the carrier is down.
    let offline = Shipping {
        carrier_online: false,
    };
    {
        let mut item = workflow.item(&mut order, &offline);
        journal = journal.record(item.transition_to("paid")?);

        match item.transition_to("shipped") {
            Err(error) => println!("shipping failed: {error}"),
            Ok(_) => unreachable!("carrier is offline"),
        }
    }
    // The failed trigger left the order in its paid state.
    println!("state after failure: {}", order.state.as_deref().unwrap());

    // Carrier back online: ship and deliver.
    let online = Shipping {
        carrier_online: true,
    };
    let mut item = workflow.item(&mut order, &online);
    journal = journal.record(item.transition_to("shipped")?);
    journal = journal.record(item.transition_to("delivered")?);

    let path: Vec<&str> = journal.path().iter().map(|s| s.identifier()).collect();
    println!("journey: {}", path.join(" -> "));
    if let Some(duration) = journal.duration() {
        println!("took {duration:?}");
    }

    Ok(())
}
