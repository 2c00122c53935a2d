//! Route planning strategies.
//!
//! Each search algorithm sits behind the `RoutePlanner` trait so
//! `plan_route` never needs to know which one it is running.

use crate::config::RoutingConfig;
use crate::error::Result;
use crate::graph::Graph;
use crate::model::{Edge, PointId};
use crate::path::{
    find_route_a_star, find_route_dijkstra, SearchOptions, StraightLineHeuristic,
};

use super::RouteAlgorithm;

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Execute the search on an already filtered graph.
    ///
    /// Returns `Ok(Some(path))` if a route is found, `Ok(None)` otherwise.
    fn find_path(
        &self,
        graph: &Graph,
        start: PointId,
        goal: PointId,
        options: &SearchOptions,
    ) -> Result<Option<Vec<Edge>>>;
}

/// Uniform-cost search over edge travel times.
#[derive(Debug, Clone, Default)]
pub struct DijkstraPlanner;

impl RoutePlanner for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_path(
        &self,
        graph: &Graph,
        start: PointId,
        goal: PointId,
        options: &SearchOptions,
    ) -> Result<Option<Vec<Edge>>> {
        find_route_dijkstra(graph, start, goal, options)
    }
}

/// A* planner guided by straight-line distance to the goal.
///
/// The heuristic divides great-circle distance by a speed bound; as long as
/// no edge is travelled faster than that bound the result matches Dijkstra.
#[derive(Debug, Clone)]
pub struct AStarPlanner {
    heuristic: StraightLineHeuristic,
}

impl AStarPlanner {
    pub fn new(max_speed_m_per_min: f64) -> Self {
        Self {
            heuristic: StraightLineHeuristic {
                max_speed_m_per_min,
            },
        }
    }
}

impl RoutePlanner for AStarPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn find_path(
        &self,
        graph: &Graph,
        start: PointId,
        goal: PointId,
        options: &SearchOptions,
    ) -> Result<Option<Vec<Edge>>> {
        find_route_a_star(graph, start, goal, &self.heuristic, options)
    }
}

/// Select the planner for `algorithm`.
pub fn select_planner(algorithm: RouteAlgorithm, config: &RoutingConfig) -> Box<dyn RoutePlanner> {
    match algorithm {
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner),
        RouteAlgorithm::AStar => Box::new(AStarPlanner::new(config.max_speed_m_per_min)),
    }
}
