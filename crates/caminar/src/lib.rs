//! Caminar: combinatorial test-case generation and workflow path exploration
//!
//! Caminar (Spanish: "to walk") describes the inputs of each step of a
//! business workflow as a [`Form`] of typed fields, generates tiered test
//! [`Case`]s for it, and walks every route through the workflow that those
//! cases can take. The routes merge into a labeled [`Graph`] that can be
//! rendered with Graphviz.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    CAMINAR Architecture                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Field /    │    │ Flow       │    │ Graph      │            │
//! │   │ Form       │───►│ walker     │───►│ DOT +      │            │
//! │   │ (cases)    │    │ (routes)   │    │ Graphviz   │            │
//! │   └────────────┘    └────────────┘    └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use caminar::{Field, Form, Priority};
//!
//! let form = Form::new([
//!     ("quantity", Field::integer(1, 10)?),
//!     ("express", Field::choice([("no", false), ("yes", true)])?),
//! ])?;
//! assert_eq!(form.case_count(Priority::BASELINE), 1);
//! for case in form.cases(1) {
//!     println!("{case}");
//! }
//! # Ok::<(), caminar::CaminarError>(())
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

/// Walk settings loaded from YAML
pub mod config;

/// Value domains and their tiered candidates
pub mod field;

/// Route exploration, graph merging, and rendering
pub mod flow;

/// Forms and the cases they generate
pub mod form;

mod result;
mod seed;

/// The step contract implemented by workflows
pub mod step;

pub use config::WalkConfig;
pub use field::{Candidate, Field, FieldSpec, Tier, Tiers, Value};
pub use flow::{
    Defect, Destination, Edge, Flow, Graph, Hop, Leaf, LeafKind, Rendered, Renderer, Replay,
    Route, WalkSummary,
};
pub use form::{Case, CaseEntry, Cases, Form, FormSpec, NamedFieldSpec, Priority};
pub use result::{CaminarError, CaminarResult};
pub use seed::{Seed, ValueRng};
pub use step::{Advance, Step};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::{
        Advance, CaminarError, CaminarResult, Case, Field, Flow, Form, Graph, LeafKind, Priority,
        Seed, Step, Value,
    };
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_prelude_covers_authoring() {
        use crate::prelude::*;
        let form = Form::new([("x", Field::integer(0, 5).unwrap())]).unwrap();
        assert_eq!(form.case_count(Priority::BASELINE), 1);
    }
}
