use std::collections::HashMap;

use tracing::warn;

use crate::geo::Coordinates;
use crate::model::{Edge, Point, PointId};

/// Adjacency view over one resort snapshot, built fresh for each request.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    points: HashMap<PointId, Point>,
    adjacency: HashMap<PointId, Vec<Edge>>,
    edge_count: usize,
}

impl Graph {
    /// Outgoing edges of `point`, in input order. Unknown points have none.
    pub fn neighbours(&self, point: PointId) -> &[Edge] {
        self.adjacency
            .get(&point)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.points.get(&id)
    }

    pub fn contains(&self, id: PointId) -> bool {
        self.points.contains_key(&id) || self.adjacency.contains_key(&id)
    }

    /// Coordinates of `id`, or the `0,0` origin when the point is unknown.
    pub fn coordinates(&self, id: PointId) -> Coordinates {
        self.points
            .get(&id)
            .map(Point::coordinates)
            .unwrap_or(Coordinates::ORIGIN)
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}

/// Build the routing graph from flat point and edge lists.
///
/// Every point and every edge endpoint gets an adjacency entry, so
/// destination-only points are fine. Edges whose endpoints are missing from
/// `points` are kept: search only needs ids, and coordinate lookups fall
/// back to the origin.
pub fn build_graph(points: &[Point], edges: &[Edge]) -> Graph {
    let mut adjacency: HashMap<PointId, Vec<Edge>> = HashMap::with_capacity(points.len());
    for point in points {
        adjacency.entry(point.id).or_default();
    }

    let index: HashMap<PointId, Point> = points
        .iter()
        .map(|point| (point.id, point.clone()))
        .collect();

    let mut dangling_edges = 0usize;
    for edge in edges {
        if !index.contains_key(&edge.start_point_id) || !index.contains_key(&edge.end_point_id) {
            dangling_edges += 1;
        }
        adjacency
            .entry(edge.start_point_id)
            .or_default()
            .push(edge.clone());
        adjacency.entry(edge.end_point_id).or_default();
    }

    if dangling_edges > 0 {
        warn!(
            dangling_edges,
            "edges reference points missing from the snapshot"
        );
    }

    Graph {
        points: index,
        adjacency,
        edge_count: edges.len(),
    }
}
