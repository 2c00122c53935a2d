use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::time::Instant;

use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{build_graph, Graph};
use crate::model::{Edge, Point, PointId};

/// Cost charged for an edge whose travel time is missing or not positive.
pub const FALLBACK_EDGE_COST: f64 = 1.0;

/// How many frontier pops happen between deadline checks.
const DEADLINE_CHECK_INTERVAL: usize = 64;

/// Search cost of a single edge, in minutes.
pub fn edge_cost(edge: &Edge) -> f64 {
    match edge.estimated_time_minutes {
        Some(minutes) if minutes.is_finite() && minutes > 0.0 => minutes,
        _ => FALLBACK_EDGE_COST,
    }
}

/// Total search cost of an edge sequence.
pub fn path_cost(path: &[Edge]) -> f64 {
    path.iter().map(edge_cost).sum()
}

/// Lower bound on the remaining cost from a point to the goal.
///
/// Implementations must never overestimate, or the returned path may not
/// be the cheapest one.
pub trait Heuristic {
    fn estimate(&self, graph: &Graph, from: PointId, goal: PointId) -> f64;
}

/// Heuristic that always answers zero, turning A* into plain Dijkstra.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _graph: &Graph, _from: PointId, _goal: PointId) -> f64 {
        0.0
    }
}

/// Straight-line travel time at an upper-bound speed.
#[derive(Debug, Clone, Copy)]
pub struct StraightLineHeuristic {
    /// Fastest plausible travel speed over the snow or on a lift.
    pub max_speed_m_per_min: f64,
}

impl Heuristic for StraightLineHeuristic {
    fn estimate(&self, graph: &Graph, from: PointId, goal: PointId) -> f64 {
        if self.max_speed_m_per_min <= 0.0 {
            return 0.0;
        }
        // Unlocated points have no usable distance; zero stays a lower bound.
        let (Some(current), Some(target)) = (
            graph.point(from).and_then(Point::location),
            graph.point(goal).and_then(Point::location),
        ) else {
            return 0.0;
        };
        current.distance_to(&target) / self.max_speed_m_per_min
    }
}

/// Per-call search options.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions {
    /// Abort with [`Error::SearchDeadlineExceeded`] once this instant passes.
    pub deadline: Option<Instant>,
}

/// Find the cheapest edge sequence from `start` to `goal`.
///
/// Returns `Some(vec![])` when `start == goal` and `None` when the goal is
/// unreachable or either endpoint is missing from the graph.
pub fn find_shortest_path(
    points: &[Point],
    edges: &[Edge],
    start: PointId,
    goal: PointId,
) -> Option<Vec<Edge>> {
    let graph = build_graph(points, edges);
    // Without a deadline the search cannot fail.
    search(&graph, start, goal, &ZeroHeuristic, &SearchOptions::default())
        .ok()
        .flatten()
}

/// Run Dijkstra's algorithm over a prebuilt graph.
pub fn find_route_dijkstra(
    graph: &Graph,
    start: PointId,
    goal: PointId,
    options: &SearchOptions,
) -> Result<Option<Vec<Edge>>> {
    search(graph, start, goal, &ZeroHeuristic, options)
}

/// Run A* guided by `heuristic` over a prebuilt graph.
pub fn find_route_a_star(
    graph: &Graph,
    start: PointId,
    goal: PointId,
    heuristic: &dyn Heuristic,
    options: &SearchOptions,
) -> Result<Option<Vec<Edge>>> {
    search(graph, start, goal, heuristic, options)
}

fn search(
    graph: &Graph,
    start: PointId,
    goal: PointId,
    heuristic: &dyn Heuristic,
    options: &SearchOptions,
) -> Result<Option<Vec<Edge>>> {
    if start == goal {
        return Ok(Some(Vec::new()));
    }
    if !graph.contains(start) || !graph.contains(goal) {
        debug!(start, goal, "route endpoint missing from graph");
        return Ok(None);
    }

    let mut cost_so_far: HashMap<PointId, f64> = HashMap::new();
    let mut came_from: HashMap<PointId, (PointId, &Edge)> = HashMap::new();
    let mut frontier = BinaryHeap::new();
    let mut sequence = 0u64;
    let mut expanded = 0usize;

    cost_so_far.insert(start, 0.0);
    frontier.push(QueueEntry::new(
        start,
        0.0,
        heuristic.estimate(graph, start, goal),
        sequence,
    ));

    while let Some(entry) = frontier.pop() {
        let current_cost = match cost_so_far.get(&entry.node) {
            Some(best) if entry.cost.0 > *best => continue,
            Some(best) => *best,
            None => continue,
        };

        if entry.node == goal {
            break;
        }

        expanded += 1;
        if let Some(deadline) = options.deadline {
            if expanded % DEADLINE_CHECK_INTERVAL == 0 && Instant::now() >= deadline {
                return Err(Error::SearchDeadlineExceeded { expanded });
            }
        }

        for edge in graph.neighbours(entry.node) {
            let next = edge.end_point_id;
            let next_cost = current_cost + edge_cost(edge);
            let improves = cost_so_far
                .get(&next)
                .map_or(true, |recorded| next_cost < *recorded);
            if !improves {
                continue;
            }

            cost_so_far.insert(next, next_cost);
            came_from.insert(next, (entry.node, edge));
            sequence += 1;
            frontier.push(QueueEntry::new(
                next,
                next_cost,
                heuristic.estimate(graph, next, goal),
                sequence,
            ));
        }
    }

    if !came_from.contains_key(&goal) {
        debug!(start, goal, expanded, "no route between points");
        return Ok(None);
    }

    let path = reconstruct_path(&came_from, start, goal);
    debug!(
        start,
        goal,
        expanded,
        edges = path.len(),
        cost = path_cost(&path),
        "route found"
    );
    Ok(Some(path))
}

fn reconstruct_path(
    came_from: &HashMap<PointId, (PointId, &Edge)>,
    start: PointId,
    goal: PointId,
) -> Vec<Edge> {
    let mut path = Vec::new();
    let mut current = goal;
    while current != start {
        let Some((previous, edge)) = came_from.get(&current) else {
            break;
        };
        path.push((*edge).clone());
        current = *previous;
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: PointId,
    cost: FloatOrd,
    priority: FloatOrd,
    sequence: u64,
}

impl QueueEntry {
    fn new(node: PointId, cost: f64, heuristic: f64, sequence: u64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            priority: FloatOrd(cost + heuristic),
            sequence,
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap; equal priorities
        // pop in insertion order.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
