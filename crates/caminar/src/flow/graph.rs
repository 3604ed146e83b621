//! Merged transition graph and its DOT export.

use super::route::{Destination, Route};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// One merged transition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    /// Name of the source step
    pub source: String,
    /// Target step or leaf
    pub dest: Destination,
    /// Distinct case labels, first-seen order
    pub labels: Vec<String>,
}

impl Edge {
    /// All labels as one string
    #[must_use]
    pub fn label(&self) -> String {
        self.labels.join(" / ")
    }

    /// Whether the edge ends a route
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !self.dest.is_step()
    }
}

/// Set of merged edges built from walked routes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Graph {
    edges: Vec<Edge>,
}

/// Routes sharing one node sequence
struct Group {
    sources: Vec<String>,
    dests: Vec<Destination>,
    labels: Vec<Vec<String>>,
}

impl Graph {
    /// Merge routes into edges
    ///
    /// Routes with the same node sequence are merged hop by hop; the labels of
    /// each merged hop keep their first-seen order. Identical edges coming
    /// from different sequences appear once.
    #[must_use]
    pub fn from_routes(routes: &[Route]) -> Self {
        let mut index: HashMap<(String, Vec<Destination>), usize> = HashMap::new();
        let mut groups: Vec<Group> = Vec::new();

        for route in routes {
            let Some(first) = route.hops().first() else {
                continue;
            };
            let dests: Vec<Destination> = route.hops().iter().map(|h| h.to.clone()).collect();
            let key = (first.from.clone(), dests);
            let at = *index.entry(key).or_insert_with_key(|(_, dests)| {
                groups.push(Group {
                    sources: route.steps().map(str::to_string).collect(),
                    dests: dests.clone(),
                    labels: vec![Vec::new(); dests.len()],
                });
                groups.len() - 1
            });
            for (labels, hop) in groups[at].labels.iter_mut().zip(route.hops()) {
                let label = hop.case.label();
                if !labels.iter().any(|l| l == label) {
                    labels.push(label.to_string());
                }
            }
        }

        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        for group in groups {
            let hops = group.sources.into_iter().zip(group.dests).zip(group.labels);
            for ((source, dest), labels) in hops {
                let edge = Edge {
                    source,
                    dest,
                    labels,
                };
                if seen.insert(edge.clone()) {
                    edges.push(edge);
                }
            }
        }
        Self { edges }
    }

    /// All edges
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of edges
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether there are no edges
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Edges between two steps
    pub fn step_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(|e| !e.is_terminal())
    }

    /// Edges ending a route
    pub fn leaf_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(|e| e.is_terminal())
    }

    /// Export in DOT format
    #[must_use]
    pub fn to_dot(&self) -> String {
        let mut dot = String::new();
        dot.push_str("digraph {\n");
        dot.push_str("    node [shape=\"box\"];\n");
        dot.push_str("    edge [fontsize=\"12\" fontcolor=\"blue\"];\n");
        for edge in &self.edges {
            dot.push_str(&format!(
                "    \"{}\" -> \"{}\" [ label = \"{}\" ];\n",
                display(&edge.source),
                display(&edge.dest.to_string()),
                display(&edge.label())
            ));
        }
        dot.push_str("}\n");
        dot
    }
}

/// Quote-safe DOT text with each run of whitespace turned into a line break
#[must_use]
pub fn display(text: &str) -> String {
    text.split_whitespace()
        .map(|word| word.replace('\\', "\\\\").replace('"', "\\\""))
        .collect::<Vec<_>>()
        .join("\\n")
}
