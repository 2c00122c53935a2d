//! Route planning for a single resort.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported search algorithms (Dijkstra, A*)
//! - [`RouteRequest`] - Start, goal and constraints for one request
//! - [`RoutePlan`] - Searched edges plus the reduced display steps
//! - [`plan_route`] - Main entry point: filter, build graph, search, reduce
//!
//! Every call builds its own graph and search state from the snapshot it is
//! handed, so concurrent calls need no coordination.
//!
//! # Example
//!
//! ```ignore
//! use skiroute_lib::{load_resort_json, plan_route, RouteRequest, RoutingConfig};
//!
//! let resort = load_resort_json("resort.json".as_ref())?;
//! let request = RouteRequest::new(resort.id, 1, 3);
//! match plan_route(&resort, &request, &RoutingConfig::default())? {
//!     Some(plan) => println!("{} steps", plan.steps.len()),
//!     None => println!("no route found"),
//! }
//! ```

mod planner;

pub use planner::{select_planner, AStarPlanner, DijkstraPlanner, RoutePlanner};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RoutingConfig;
use crate::error::{Error, Result};
use crate::filter::RouteConstraints;
use crate::graph::build_graph;
use crate::model::{Edge, PointId, Resort};
use crate::path::path_cost;
use crate::reduce::{reduce_to_steps, RouteStep};

/// Supported search algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RouteAlgorithm {
    /// Dijkstra's algorithm over travel time.
    #[default]
    #[serde(rename = "dijkstra")]
    Dijkstra,
    /// A* search guided by straight-line distance.
    #[serde(rename = "a-star")]
    AStar,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::AStar => "a-star",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteAlgorithm {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(RouteAlgorithm::Dijkstra),
            "a-star" | "a_star" | "astar" | "a*" => Ok(RouteAlgorithm::AStar),
            _ => Err(Error::InvalidAlgorithm {
                value: value.to_string(),
            }),
        }
    }
}

/// High-level route planning request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub ski_area_id: i64,
    pub start: PointId,
    pub goal: PointId,
    pub algorithm: RouteAlgorithm,
    pub constraints: RouteConstraints,
}

impl RouteRequest {
    /// Request with no constraints beyond the full difficulty scale.
    pub fn new(ski_area_id: i64, start: PointId, goal: PointId) -> Self {
        Self {
            ski_area_id,
            start,
            goal,
            algorithm: RouteAlgorithm::default(),
            constraints: RouteConstraints::default(),
        }
    }

    pub fn with_constraints(mut self, constraints: RouteConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_algorithm(mut self, algorithm: RouteAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub ski_area_id: i64,
    pub start: PointId,
    pub goal: PointId,
    /// Searched edges in travel order.
    pub edges: Vec<Edge>,
    /// Display steps after merging and connector suppression.
    pub steps: Vec<RouteStep>,
    /// Search cost of the route in minutes.
    pub total_minutes: f64,
}

impl RoutePlan {
    /// Number of edges travelled.
    pub fn hop_count(&self) -> usize {
        self.edges.len()
    }

    /// Start and goal coincide; there is nothing to travel.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Compute a route through `resort`.
///
/// Returns `Ok(None)` when no route satisfies the constraints and a plan
/// with no edges when start and goal are the same point. Errors are kept
/// for malformed requests and aborted searches.
pub fn plan_route(
    resort: &Resort,
    request: &RouteRequest,
    config: &RoutingConfig,
) -> Result<Option<RoutePlan>> {
    if request.ski_area_id != resort.id {
        return Err(Error::ResortNotFound {
            id: request.ski_area_id,
        });
    }

    let usable = request.constraints.filter(&resort.edges);
    let graph = build_graph(&resort.points, &usable);
    let planner = select_planner(request.algorithm, config);

    debug!(
        resort = resort.id,
        points = graph.point_count(),
        edges = graph.edge_count(),
        algorithm = %planner.algorithm(),
        start = request.start,
        goal = request.goal,
        "planning route"
    );

    let Some(edges) =
        planner.find_path(&graph, request.start, request.goal, &config.search_options())?
    else {
        return Ok(None);
    };

    let steps = reduce_to_steps(&edges, &graph, &config.reduce_options());
    let total_minutes = path_cost(&edges);

    Ok(Some(RoutePlan {
        algorithm: planner.algorithm(),
        ski_area_id: resort.id,
        start: request.start,
        goal: request.goal,
        edges,
        steps,
        total_minutes,
    }))
}
