//! Depth-first exploration of a workflow.

use super::graph::Graph;
use super::route::{Destination, Hop, Leaf, LeafKind, Route};
use super::summary::WalkSummary;
use crate::form::{Case, Priority};
use crate::seed::{Seed, ValueRng};
use crate::step::{Advance, Step};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info, trace, warn};

/// A workflow rooted at a start step
///
/// `walk` enumerates every route the cases of the given priority can take,
/// replaying the route prefix from the start step before each sibling case so
/// that steps touching external state see a consistent history.
///
/// A panicking step ends its route as a fault. The process panic hook still
/// runs for it, so callers wanting quiet output install their own hook around
/// `walk`.
#[derive(Debug)]
pub struct Flow {
    start: Box<dyn Step>,
    seed: Option<Seed>,
    priority: Priority,
    routes: Vec<Route>,
}

impl Flow {
    /// Create a flow from its start step
    #[must_use]
    pub fn new(start: impl Step + 'static) -> Self {
        Self::from_boxed(Box::new(start))
    }

    /// Create a flow from a boxed start step
    #[must_use]
    pub fn from_boxed(start: Box<dyn Step>) -> Self {
        Self {
            start,
            seed: None,
            priority: Priority::BASELINE,
            routes: Vec::new(),
        }
    }

    /// Draw field values from a fixed seed instead of process entropy
    #[must_use]
    pub fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The start step
    #[must_use]
    pub fn start(&self) -> &dyn Step {
        self.start.as_ref()
    }

    /// Priority of the last walk
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Explore all routes at `priority`, replacing any earlier result
    ///
    /// A case is skipped when its priority plus the priorities already spent
    /// on the route would exceed `priority`.
    pub fn walk(&mut self, priority: impl Into<Priority>) -> &[Route] {
        let ceiling = priority.into();
        let mut rng = self.seed.map_or_else(ValueRng::from_entropy, ValueRng::new);
        info!(start = self.start.name(), priority = %ceiling, "walking flow");

        let mut walker = Walker {
            start: self.start.as_ref(),
            ceiling,
            rng: &mut rng,
            routes: Vec::new(),
        };
        walker.explore(self.start.as_ref(), &mut Vec::new(), 0);
        let routes = walker.routes;

        self.priority = ceiling;
        self.routes = routes;
        info!(routes = self.routes.len(), "walk complete");
        &self.routes
    }

    /// Routes of the last walk
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Merge the routes of the last walk into a transition graph
    #[must_use]
    pub fn build_graph(&self) -> Graph {
        Graph::from_routes(&self.routes)
    }

    /// Counts and defects of the last walk
    #[must_use]
    pub fn summary(&self) -> WalkSummary {
        WalkSummary::from_routes(self.priority, &self.routes)
    }

    /// Apply `cases` in order, starting from the start step
    ///
    /// Stops at the first terminal outcome. Two replays of the same cases
    /// against equivalent start steps yield equal results.
    #[must_use]
    pub fn replay<'c>(&self, cases: impl IntoIterator<Item = &'c Case>) -> Replay {
        let mut steps = vec![self.start.name().to_string()];
        let mut current: Option<Box<dyn Step>> = None;
        for case in cases {
            let step: &dyn Step = current.as_deref().unwrap_or(self.start.as_ref());
            match guarded_advance(step, case) {
                Advance::Continue(next) => {
                    steps.push(next.name().to_string());
                    current = Some(next);
                }
                outcome => {
                    return Replay {
                        steps,
                        end: terminal_leaf(outcome),
                    };
                }
            }
        }
        Replay { steps, end: None }
    }
}

/// Result of [`Flow::replay`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay {
    /// Names of the reached steps, start first
    pub steps: Vec<String>,
    /// Terminal outcome, if one was reached
    pub end: Option<Leaf>,
}

struct Walker<'a> {
    start: &'a dyn Step,
    ceiling: Priority,
    rng: &'a mut ValueRng,
    routes: Vec<Route>,
}

impl Walker<'_> {
    fn explore(&mut self, step: &dyn Step, path: &mut Vec<Hop>, spent: u8) {
        let cases = step.form().cases_with(self.ceiling, self.rng);
        let mut fresh = true;

        for case in cases {
            let cost = case.priority().value();
            if spent + cost > self.ceiling.value() {
                trace!(step = step.name(), case = %case, "pruned");
                continue;
            }

            // the first case sees the step as reached; later ones need a replay
            let replayed;
            let live: &dyn Step = if fresh || path.is_empty() {
                step
            } else {
                match self.resync(path) {
                    Ok(next) => {
                        replayed = next;
                        replayed.as_ref()
                    }
                    Err(message) => {
                        warn!(step = step.name(), %message, "replay diverged");
                        let leaf = Leaf::new(LeafKind::Fault, message);
                        self.close(path, step.name(), case, leaf);
                        continue;
                    }
                }
            };
            fresh = false;

            debug!(step = live.name(), case = %case, "advance");
            let from = live.name().to_string();
            match guarded_advance(live, &case) {
                Advance::Continue(next) => {
                    path.push(Hop {
                        from,
                        case,
                        to: Destination::Step(next.name().to_string()),
                    });
                    self.explore(next.as_ref(), path, spent + cost);
                    path.pop();
                }
                outcome => {
                    if let Some(leaf) = terminal_leaf(outcome) {
                        self.close(path, &from, case, leaf);
                    }
                }
            }
        }
    }

    /// Rebuild the step at the end of `path` from the start step
    fn resync(&self, path: &[Hop]) -> Result<Box<dyn Step>, String> {
        let mut current: Option<Box<dyn Step>> = None;
        for hop in path {
            let step: &dyn Step = match &current {
                Some(step) => step.as_ref(),
                None => self.start,
            };
            let next = match guarded_advance(step, &hop.case) {
                Advance::Continue(next) => next,
                outcome => {
                    let reached = terminal_leaf(outcome).map_or_else(String::new, |l| l.to_string());
                    return Err(format!(
                        "replay of {} ended early at {:?}",
                        hop.case.label(),
                        reached
                    ));
                }
            };
            let expected = hop.to.to_string();
            if next.name() != expected {
                return Err(format!(
                    "replay of {} reached {} instead of {}",
                    hop.case.label(),
                    next.name(),
                    expected
                ));
            }
            current = Some(next);
        }
        current.ok_or_else(|| "nothing to replay".to_string())
    }

    fn close(&mut self, path: &[Hop], from: &str, case: Case, leaf: Leaf) {
        let number = self.routes.len() + 1;
        match leaf.kind {
            LeafKind::Fault => {
                warn!(route = number, step = from, case = %case, message = %leaf.message, "fault");
            }
            kind => info!(route = number, step = from, %kind, message = %leaf.message, "route closed"),
        }
        let last = Hop {
            from: from.to_string(),
            case,
            to: Destination::Leaf(leaf),
        };
        self.routes.push(Route::close(path, last));
    }
}

/// Run `advance`, turning a panic into a fault outcome
fn guarded_advance(step: &dyn Step, case: &Case) -> Advance {
    match panic::catch_unwind(AssertUnwindSafe(|| step.advance(case))) {
        Ok(outcome) => outcome,
        Err(payload) => Advance::Fault(format!("panicked: {}", panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

fn terminal_leaf(outcome: Advance) -> Option<Leaf> {
    match outcome {
        Advance::Continue(_) => None,
        Advance::Finished(message) => Some(Leaf::new(LeafKind::Finished, message)),
        Advance::DomainError(message) => Some(Leaf::new(LeafKind::DomainError, message)),
        Advance::Fault(message) => Some(Leaf::new(LeafKind::Fault, message)),
    }
}
