//! Run report of a walk.

use super::route::{LeafKind, Route};
use crate::form::Priority;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fault found during a walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defect {
    /// 1-based route number
    pub route: usize,
    /// Step whose case faulted
    pub step: String,
    /// Label of the faulting case
    pub case: String,
    /// Fault message
    pub message: String,
}

impl fmt::Display for Defect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "route {}: {} [{}]: {}",
            self.route, self.step, self.case, self.message
        )
    }
}

/// Counts and defects of one walk
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WalkSummary {
    /// Priority the walk ran at
    pub priority: Priority,
    /// Total routes
    pub routes: usize,
    /// Routes ending in success
    pub finished: usize,
    /// Routes ending in an expected domain error
    pub domain_errors: usize,
    /// Faults, in route order
    pub defects: Vec<Defect>,
}

impl WalkSummary {
    /// Summarize walked routes
    #[must_use]
    pub fn from_routes(priority: Priority, routes: &[Route]) -> Self {
        let mut summary = Self {
            priority,
            routes: routes.len(),
            ..Self::default()
        };
        for (i, route) in routes.iter().enumerate() {
            let leaf = route.leaf();
            match leaf.kind {
                LeafKind::Finished => summary.finished += 1,
                LeafKind::DomainError => summary.domain_errors += 1,
                LeafKind::Fault => {
                    let last = &route.hops()[route.len() - 1];
                    summary.defects.push(Defect {
                        route: i + 1,
                        step: last.from.clone(),
                        case: last.case.label().to_string(),
                        message: leaf.message.clone(),
                    });
                }
            }
        }
        summary
    }

    /// Number of fault routes
    #[must_use]
    pub fn faults(&self) -> usize {
        self.defects.len()
    }

    /// Whether any route faulted
    #[must_use]
    pub fn has_defects(&self) -> bool {
        !self.defects.is_empty()
    }
}

impl fmt::Display for WalkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "priority:      {}", self.priority)?;
        writeln!(f, "routes:        {}", self.routes)?;
        writeln!(f, "finished:      {}", self.finished)?;
        writeln!(f, "domain errors: {}", self.domain_errors)?;
        write!(f, "faults:        {}", self.faults())?;
        if self.has_defects() {
            f.write_str("\ndefects found:")?;
            for defect in &self.defects {
                write!(f, "\n  {defect}")?;
            }
        }
        Ok(())
    }
}
