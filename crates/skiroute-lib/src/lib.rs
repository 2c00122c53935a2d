//! Skiroute library entry points.
//!
//! This crate loads a ski resort's lift and trail network (from a JSON
//! snapshot or a resort database), filters it by difficulty and lift
//! closures, runs shortest-time searches over it and reduces the result to
//! the steps a skier follows. Higher-level consumers (the CLI) should only
//! depend on the functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod config;
pub mod db;
pub mod difficulty;
pub mod error;
pub mod filter;
pub mod geo;
pub mod graph;
pub mod model;
pub mod output;
pub mod path;
pub mod reduce;
pub mod routing;
pub mod snapshot;

pub use config::RoutingConfig;
pub use db::{list_ski_areas, load_resort, SkiArea};
pub use difficulty::{difficulty_rank, Difficulty};
pub use error::{Error, Result};
pub use filter::{filter_edges, RouteConstraints};
pub use geo::Coordinates;
pub use graph::{build_graph, Graph};
pub use model::{Edge, EdgeId, EdgeKind, Point, PointId, PointKind, Resort};
pub use output::{RouteRenderMode, RouteStatus, RouteSummary};
pub use path::{
    edge_cost, find_route_a_star, find_route_dijkstra, find_shortest_path, path_cost, Heuristic,
    SearchOptions, StraightLineHeuristic, ZeroHeuristic,
};
pub use reduce::{coalesce_steps, reduce_to_steps, ReduceOptions, RouteStep};
pub use routing::{
    plan_route, select_planner, RouteAlgorithm, RoutePlan, RoutePlanner, RouteRequest,
};
pub use snapshot::{load_resort_json, read_resort_json, write_resort_json};
