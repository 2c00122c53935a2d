//! Turn a raw edge path into the short list of steps a skier reads.
//!
//! Trails are stored as one segment per intersection, so consecutive
//! segments of the same trail collapse into one step. Short connector
//! steps are noise once merged and get dropped.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;
use crate::graph::Graph;
use crate::model::{Edge, EdgeId, EdgeKind};

/// Name the resort data gives to segments that belong to no trail.
pub const DEFAULT_CONNECTOR_NAME: &str = "Connector";

/// Connector steps at or under this many minutes are dropped.
pub const DEFAULT_CONNECTOR_THRESHOLD_MINUTES: f64 = 1.0;

/// One user-facing instruction: ride a lift or ski a named trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    pub id: EdgeId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    pub estimated_time_minutes: f64,
    pub start_coords: Coordinates,
    pub end_coords: Coordinates,
}

impl RouteStep {
    fn from_edge(edge: &Edge, graph: &Graph) -> Self {
        Self {
            id: edge.id,
            name: edge.name.clone(),
            kind: edge.kind,
            estimated_time_minutes: edge.estimated_time_minutes.unwrap_or(0.0),
            start_coords: graph.coordinates(edge.start_point_id),
            end_coords: graph.coordinates(edge.end_point_id),
        }
    }

    fn continues(&self, next: &RouteStep) -> bool {
        self.kind == EdgeKind::Trail && next.kind == EdgeKind::Trail && self.name == next.name
    }

    fn absorb(&mut self, next: RouteStep) {
        self.estimated_time_minutes += next.estimated_time_minutes;
        self.end_coords = next.end_coords;
    }
}

/// Rules for connector suppression.
#[derive(Debug, Clone, PartialEq)]
pub struct ReduceOptions {
    pub connector_name: String,
    pub connector_threshold_minutes: f64,
}

impl Default for ReduceOptions {
    fn default() -> Self {
        Self {
            connector_name: DEFAULT_CONNECTOR_NAME.to_string(),
            connector_threshold_minutes: DEFAULT_CONNECTOR_THRESHOLD_MINUTES,
        }
    }
}

impl ReduceOptions {
    pub fn with_threshold(threshold_minutes: f64) -> Self {
        Self {
            connector_threshold_minutes: threshold_minutes,
            ..Self::default()
        }
    }

    fn suppresses(&self, step: &RouteStep) -> bool {
        step.name == self.connector_name
            && step.estimated_time_minutes <= self.connector_threshold_minutes
    }
}

/// Reduce a searched edge path into display steps.
///
/// Same-named trail segments merge, short connectors drop, and trail runs
/// left adjacent by a dropped connector merge again.
/// `graph` only serves coordinate lookups; unknown points resolve to `0,0`.
/// Output keeps path order.
pub fn reduce_to_steps(path: &[Edge], graph: &Graph, options: &ReduceOptions) -> Vec<RouteStep> {
    let raw = path.iter().map(|edge| RouteStep::from_edge(edge, graph));
    let merged = coalesce_steps(raw);
    let before = merged.len();

    let kept: Vec<RouteStep> = merged
        .into_iter()
        .filter(|step| !options.suppresses(step))
        .collect();
    let suppressed = before - kept.len();

    // Dropping a connector can leave two runs of the same trail side by side.
    let steps = if suppressed > 0 {
        coalesce_steps(kept)
    } else {
        kept
    };

    tracing::debug!(
        edges = path.len(),
        steps = steps.len(),
        suppressed,
        "reduced route"
    );
    steps
}

/// Merge consecutive trail steps that share a name.
pub fn coalesce_steps(steps: impl IntoIterator<Item = RouteStep>) -> Vec<RouteStep> {
    let mut output = Vec::new();
    let mut current: Option<RouteStep> = None;

    for step in steps {
        if let Some(accumulator) = current.as_mut() {
            if accumulator.continues(&step) {
                accumulator.absorb(step);
                continue;
            }
        }
        if let Some(done) = current.replace(step) {
            output.push(done);
        }
    }
    output.extend(current);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;
    use crate::model::{Point, PointKind};

    fn graph() -> Graph {
        let points: Vec<Point> = (1..=6)
            .map(|id| Point {
                id,
                name: None,
                kind: PointKind::Intersection,
                lat: Some(id as f64),
                lng: Some(-(id as f64)),
                aliases: Vec::new(),
            })
            .collect();
        build_graph(&points, &[])
    }

    fn summary(steps: &[RouteStep]) -> Vec<(&str, f64, EdgeKind)> {
        steps
            .iter()
            .map(|step| (step.name.as_str(), step.estimated_time_minutes, step.kind))
            .collect()
    }

    #[test]
    fn merges_consecutive_segments_of_one_trail() {
        let path = vec![
            Edge::trail(1, "Trestle", "blue", 1, 2, 5.0),
            Edge::trail(2, "Trestle", "blue", 2, 3, 4.0),
            Edge::lift(3, "LiftA", 3, 4, 8.0),
        ];
        let steps = reduce_to_steps(&path, &graph(), &ReduceOptions::default());
        assert_eq!(
            summary(&steps),
            vec![("Trestle", 9.0, EdgeKind::Trail), ("LiftA", 8.0, EdgeKind::Lift)]
        );
        assert_eq!(steps[0].id, EdgeId::Segment(1));
        assert_eq!(steps[0].start_coords, Coordinates { lat: 1.0, lng: -1.0 });
        assert_eq!(steps[0].end_coords, Coordinates { lat: 3.0, lng: -3.0 });
    }

    #[test]
    fn lifts_with_the_same_name_are_not_merged() {
        let path = vec![
            Edge::lift(1, "Quad", 1, 2, 5.0),
            Edge::lift(2, "Quad", 2, 3, 5.0),
        ];
        let steps = reduce_to_steps(&path, &graph(), &ReduceOptions::default());
        assert_eq!(steps.len(), 2);
    }

    #[test]
    fn short_connectors_are_dropped_long_ones_kept() {
        let path = vec![
            Edge::trail(1, "Trestle", "blue", 1, 2, 5.0),
            Edge::connector(2, "Connector", 2, 3, 0.5),
            Edge::lift(3, "LiftA", 3, 4, 8.0),
            Edge::connector(4, "Connector", 4, 5, 5.0),
        ];
        let steps = reduce_to_steps(&path, &graph(), &ReduceOptions::default());
        assert_eq!(
            summary(&steps),
            vec![
                ("Trestle", 5.0, EdgeKind::Trail),
                ("LiftA", 8.0, EdgeKind::Lift),
                ("Connector", 5.0, EdgeKind::Trail),
            ]
        );
    }

    #[test]
    fn connector_threshold_applies_to_the_merged_time() {
        let path = vec![
            Edge::connector(1, "Connector", 1, 2, 0.5),
            Edge::connector(2, "Connector", 2, 3, 0.75),
        ];
        let steps = reduce_to_steps(&path, &graph(), &ReduceOptions::default());
        assert_eq!(summary(&steps), vec![("Connector", 1.25, EdgeKind::Trail)]);

        let steps = reduce_to_steps(&path, &graph(), &ReduceOptions::with_threshold(2.0));
        assert!(steps.is_empty());
    }

    #[test]
    fn threshold_is_inclusive() {
        let path = vec![Edge::connector(1, "Connector", 1, 2, 1.0)];
        assert!(reduce_to_steps(&path, &graph(), &ReduceOptions::default()).is_empty());
    }

    #[test]
    fn trail_runs_split_by_a_dropped_connector_rejoin() {
        let path = vec![
            Edge::trail(1, "Trestle", "blue", 1, 2, 5.0),
            Edge::connector(2, "Connector", 2, 3, 0.2),
            Edge::trail(3, "Trestle", "blue", 3, 4, 4.0),
        ];
        let steps = reduce_to_steps(&path, &graph(), &ReduceOptions::default());
        assert_eq!(summary(&steps), vec![("Trestle", 9.0, EdgeKind::Trail)]);
        assert_eq!(steps[0].end_coords, Coordinates { lat: 4.0, lng: -4.0 });
    }

    #[test]
    fn empty_path_reduces_to_no_steps() {
        assert!(reduce_to_steps(&[], &graph(), &ReduceOptions::default()).is_empty());
    }

    /// Feed reduced steps back in as one edge each.
    fn as_edges(steps: &[RouteStep]) -> Vec<Edge> {
        steps
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let from = index as i64 + 1;
                let minutes = step.estimated_time_minutes;
                match step.kind {
                    EdgeKind::Lift => Edge::lift(from, &step.name, from, from + 1, minutes),
                    EdgeKind::Trail => Edge::trail(from, &step.name, "blue", from, from + 1, minutes),
                }
            })
            .collect()
    }

    #[test]
    fn reducing_twice_changes_nothing() {
        let path = vec![
            Edge::trail(1, "Trestle", "blue", 1, 2, 5.0),
            Edge::trail(2, "Trestle", "blue", 2, 3, 4.0),
            Edge::lift(3, "LiftA", 3, 4, 8.0),
            Edge::connector(4, "Connector", 4, 5, 0.5),
            Edge::trail(5, "Outlaw", "black", 5, 6, 3.0),
            Edge::connector(6, "Connector", 6, 5, 0.3),
            Edge::trail(7, "Outlaw", "black", 5, 6, 2.0),
            Edge::connector(8, "Connector", 6, 1, 4.0),
        ];
        let options = ReduceOptions::default();
        let once = reduce_to_steps(&path, &graph(), &options);
        assert_eq!(
            summary(&once),
            vec![
                ("Trestle", 9.0, EdgeKind::Trail),
                ("LiftA", 8.0, EdgeKind::Lift),
                ("Outlaw", 5.0, EdgeKind::Trail),
                ("Connector", 4.0, EdgeKind::Trail),
            ]
        );

        let twice = reduce_to_steps(&as_edges(&once), &graph(), &options);
        assert_eq!(summary(&twice), summary(&once));

        let filtered: Vec<RouteStep> = coalesce_steps(once.clone())
            .into_iter()
            .filter(|step| !options.suppresses(step))
            .collect();
        assert_eq!(filtered, once);
    }
}
