//! The contract between a workflow and the walker.
//!
//! A workflow is a set of [`Step`] implementations. Each step exposes the
//! [`Form`] of inputs it accepts and an [`advance`](Step::advance) function
//! that either hands over to a freshly built next step or ends the route.
//!
//! ```
//! use std::sync::Arc;
//! use caminar::{Advance, Case, Field, Form, Step};
//!
//! #[derive(Debug)]
//! struct Confirm {
//!     form: Arc<Form>,
//! }
//!
//! impl Step for Confirm {
//!     fn name(&self) -> &str {
//!         "confirm"
//!     }
//!
//!     fn form(&self) -> &Form {
//!         &self.form
//!     }
//!
//!     fn advance(&self, case: &Case) -> Advance {
//!         match case["ok"].as_bool() {
//!             Some(true) => Advance::finished("confirmed"),
//!             Some(false) => Advance::error("declined"),
//!             None => Advance::fault("ok is not a boolean"),
//!         }
//!     }
//! }
//!
//! let form = Form::new([("ok", Field::choice([("yes", true), ("no", false)])?)])?;
//! let step = Confirm { form: Arc::new(form) };
//! let case = step.form().cases(0).next().unwrap();
//! assert!(matches!(step.advance(&case), Advance::Finished(_)));
//! # Ok::<(), caminar::CaminarError>(())
//! ```

use crate::form::{Case, Form};
use std::fmt;

/// One point of the workflow state machine
///
/// Steps are values: `advance` builds the next step instead of mutating the
/// current one. Steps of the same kind should share one [`Form`] (for
/// example through an `Arc<Form>` field).
///
/// Replaying the same cases against a freshly built start step must reach an
/// equivalent step; the walker relies on this when it backtracks.
pub trait Step: fmt::Debug {
    /// Display name, used as the graph node
    fn name(&self) -> &str;

    /// Inputs accepted at this step
    fn form(&self) -> &Form;

    /// Apply one case
    fn advance(&self, case: &Case) -> Advance;
}

/// Outcome of [`Step::advance`]
#[derive(Debug)]
pub enum Advance {
    /// Move on to the next step
    Continue(Box<dyn Step>),
    /// The workflow completed successfully
    Finished(String),
    /// The workflow ended in an expected domain error
    DomainError(String),
    /// The step's own logic is defective
    Fault(String),
}

impl Advance {
    /// Continue with the given step
    #[must_use]
    pub fn next(step: impl Step + 'static) -> Self {
        Self::Continue(Box::new(step))
    }

    /// Successful completion
    #[must_use]
    pub fn finished(message: impl Into<String>) -> Self {
        Self::Finished(message.into())
    }

    /// Expected domain error
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::DomainError(message.into())
    }

    /// Defect in the step logic
    #[must_use]
    pub fn fault(message: impl Into<String>) -> Self {
        Self::Fault(message.into())
    }

    /// Whether this outcome ends the route
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Continue(_))
    }
}
