//! Example: Walking a Linear Workflow
//!
//! Demonstrates: defining steps, walking every route, and exporting the graph
//!
//! Run with: `cargo run --example linear_walk`

use caminar::{Advance, Case, Field, Flow, Form, Seed, Step};
use std::sync::Arc;

#[derive(Debug)]
struct Submit {
    form: Arc<Form>,
}

#[derive(Debug)]
struct Pay {
    form: Arc<Form>,
}

#[derive(Debug)]
struct Deliver {
    form: Arc<Form>,
}

fn accepted(case: &Case) -> bool {
    case["ok"].as_bool() == Some(true)
}

impl Step for Submit {
    fn name(&self) -> &str {
        "submit order"
    }

    fn form(&self) -> &Form {
        &self.form
    }

    fn advance(&self, case: &Case) -> Advance {
        if accepted(case) {
            Advance::next(Pay {
                form: Arc::clone(&self.form),
            })
        } else {
            Advance::error("order abandoned")
        }
    }
}

impl Step for Pay {
    fn name(&self) -> &str {
        "pay"
    }

    fn form(&self) -> &Form {
        &self.form
    }

    fn advance(&self, case: &Case) -> Advance {
        if accepted(case) {
            Advance::next(Deliver {
                form: Arc::clone(&self.form),
            })
        } else {
            Advance::error("payment declined")
        }
    }
}

impl Step for Deliver {
    fn name(&self) -> &str {
        "deliver"
    }

    fn form(&self) -> &Form {
        &self.form
    }

    fn advance(&self, case: &Case) -> Advance {
        if accepted(case) {
            Advance::finished("order complete")
        } else {
            Advance::error("delivery rejected")
        }
    }
}

fn main() -> caminar::CaminarResult<()> {
    println!("=== Caminar: Linear Workflow Walk ===\n");

    let form = Arc::new(Form::new([(
        "ok",
        Field::choice([("yes", true), ("no", false)])?,
    )])?);
    let mut flow = Flow::new(Submit { form }).with_seed(Seed::from_u64(2024));

    for priority in 0..=2 {
        let routes = flow.walk(priority);
        println!("priority {priority}: {} route(s)", routes.len());
        for (i, route) in routes.iter().enumerate() {
            println!("  {:>2}. {route}", i + 1);
        }
        println!();
    }

    println!("{}\n", flow.summary());
    println!("{}", flow.build_graph().to_dot());
    Ok(())
}
