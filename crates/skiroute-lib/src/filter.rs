//! Constraint filter applied to the edge set before any search runs.

use std::collections::HashSet;

use crate::difficulty::Difficulty;
use crate::model::{Edge, EdgeId, EdgeKind};

/// Constraints a route request places on usable edges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteConstraints {
    /// Hardest trail difficulty the route may use.
    pub max_difficulty: Difficulty,
    /// Lifts that must not be ridden.
    pub avoid_lifts: HashSet<EdgeId>,
}

impl RouteConstraints {
    pub fn new(max_difficulty: Difficulty) -> Self {
        Self {
            max_difficulty,
            avoid_lifts: HashSet::new(),
        }
    }

    pub fn avoiding(mut self, lifts: impl IntoIterator<Item = EdgeId>) -> Self {
        self.avoid_lifts.extend(lifts);
        self
    }

    /// Whether `edge` may appear in a route under these constraints.
    pub fn allows(&self, edge: &Edge) -> bool {
        match edge.kind {
            EdgeKind::Lift => !self.avoid_lifts.contains(&edge.id),
            EdgeKind::Trail => edge
                .difficulty
                .as_deref()
                .map_or(true, |label| self.max_difficulty.admits(label)),
        }
    }

    /// Copy the permitted subset of `edges`, preserving input order.
    pub fn filter(&self, edges: &[Edge]) -> Vec<Edge> {
        let filtered: Vec<Edge> = edges
            .iter()
            .filter(|edge| self.allows(edge))
            .cloned()
            .collect();

        tracing::debug!(
            kept = filtered.len(),
            dropped = edges.len() - filtered.len(),
            max_difficulty = %self.max_difficulty,
            avoided_lifts = self.avoid_lifts.len(),
            "filtered resort edges"
        );
        filtered
    }
}

/// Return the edges usable under a difficulty ceiling and a lift blacklist.
///
/// The input slice is left untouched; the result keeps the input order so
/// search tie-breaks stay deterministic.
pub fn filter_edges(
    edges: &[Edge],
    max_difficulty: Difficulty,
    avoid_lifts: &HashSet<EdgeId>,
) -> Vec<Edge> {
    RouteConstraints {
        max_difficulty,
        avoid_lifts: avoid_lifts.clone(),
    }
    .filter(edges)
}
