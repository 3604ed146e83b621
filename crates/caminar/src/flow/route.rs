//! Routes recorded by the walker.

use crate::form::{Case, Priority};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a route ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafKind {
    /// The workflow completed
    Finished,
    /// The workflow rejected the input as expected
    DomainError,
    /// The step logic misbehaved (fault outcome, panic, or replay divergence)
    Fault,
}

impl fmt::Display for LeafKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Finished => "finished",
            Self::DomainError => "error",
            Self::Fault => "fault",
        })
    }
}

/// Terminal marker closing a route
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Leaf {
    /// Outcome kind
    pub kind: LeafKind,
    /// Message given by the step
    pub message: String,
}

impl Leaf {
    /// Create a leaf
    #[must_use]
    pub fn new(kind: LeafKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LeafKind::Fault => write!(f, "fault: {}", self.message),
            _ => f.write_str(&self.message),
        }
    }
}

/// Where a hop leads
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    /// Another step, by display name
    Step(String),
    /// End of the route
    Leaf(Leaf),
}

impl Destination {
    /// The leaf, if this destination ends the route
    #[must_use]
    pub const fn leaf(&self) -> Option<&Leaf> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Step(_) => None,
        }
    }

    /// Whether this destination is another step
    #[must_use]
    pub const fn is_step(&self) -> bool {
        matches!(self, Self::Step(_))
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Step(name) => f.write_str(name),
            Self::Leaf(leaf) => fmt::Display::fmt(leaf, f),
        }
    }
}

/// One transition: a case applied at a step and where it led
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hop {
    /// Name of the step the case was applied to
    pub from: String,
    /// The applied case
    pub case: Case,
    /// Resulting step or leaf
    pub to: Destination,
}

/// A path from the start step to a leaf
///
/// Every hop but the last leads to a step; the last leads to a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    hops: Vec<Hop>,
}

impl Route {
    /// Close an open path with its final hop
    pub(crate) fn close(path: &[Hop], last: Hop) -> Self {
        debug_assert!(last.to.leaf().is_some());
        let mut hops = path.to_vec();
        hops.push(last);
        Self { hops }
    }

    /// Hops in order
    #[must_use]
    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    /// Number of hops, the closing one included
    #[must_use]
    pub fn len(&self) -> usize {
        self.hops.len()
    }

    /// Routes always have at least the closing hop
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    /// How the route ended
    ///
    /// # Panics
    ///
    /// Never panics for routes produced by a walk.
    #[must_use]
    pub fn leaf(&self) -> &Leaf {
        self.hops
            .last()
            .and_then(|hop| hop.to.leaf())
            .expect("a closed route ends in a leaf")
    }

    /// Names of the visited steps, start first
    pub fn steps(&self) -> impl Iterator<Item = &str> + '_ {
        self.hops.iter().map(|hop| hop.from.as_str())
    }

    /// Cases applied along the route
    pub fn cases(&self) -> impl Iterator<Item = &Case> + '_ {
        self.hops.iter().map(|hop| &hop.case)
    }

    /// Sum of the case priorities along the route
    #[must_use]
    pub fn cost(&self) -> u32 {
        self.cases().map(|c| u32::from(c.priority().value())).sum()
    }

    /// Number of hops whose case is at or above `priority`
    #[must_use]
    pub fn hops_at_least(&self, priority: Priority) -> usize {
        self.cases().filter(|c| c.priority() >= priority).count()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for hop in &self.hops {
            write!(f, "{} --[{}]--> ", hop.from, hop.case.label())?;
        }
        match self.hops.last() {
            Some(hop) => write!(f, "{}", hop.to),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::field::Tier;
    use crate::form::CaseEntry;

    fn case(label: &str, tier: Tier) -> Case {
        Case::new(vec![CaseEntry::new("f", label, 1, tier)])
    }

    fn route() -> Route {
        let path = vec![Hop {
            from: "submit".into(),
            case: case("yes", Tier::Baseline),
            to: Destination::Step("pay".into()),
        }];
        Route::close(
            &path,
            Hop {
                from: "pay".into(),
                case: case("bad", Tier::Invalid),
                to: Destination::Leaf(Leaf::new(LeafKind::DomainError, "declined")),
            },
        )
    }

    #[test]
    fn test_route_accessors() {
        let route = route();
        assert_eq!(route.len(), 2);
        assert!(!route.is_empty());
        assert_eq!(route.steps().collect::<Vec<_>>(), vec!["submit", "pay"]);
        assert_eq!(route.leaf().kind, LeafKind::DomainError);
        assert_eq!(route.cost(), 2);
        assert_eq!(route.hops_at_least(Priority::BOUNDARY), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            route().to_string(),
            "submit --[yes]--> pay --[bad]--> declined"
        );
        assert_eq!(
            Leaf::new(LeafKind::Fault, "boom").to_string(),
            "fault: boom"
        );
        assert_eq!(LeafKind::DomainError.to_string(), "error");
    }
}
