//! Resort snapshot types shared by the loaders, the graph and the planner.
//!
//! Points and edges are plain read-only records. Edges reference points by
//! id only, so a snapshot can be handed to the planner without any
//! pointer fix-up.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geo::Coordinates;

/// Numeric identifier for a point of interest, unique within a resort.
pub type PointId = i64;

/// Minimum similarity for a name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.6;

/// Category tag attached to a point. Only the UI cares about it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PointKind {
    Lodge,
    Intersection,
    LiftTop,
    LiftBottom,
    #[default]
    Node,
    Other(String),
}

impl PointKind {
    pub fn as_str(&self) -> &str {
        match self {
            PointKind::Lodge => "lodge",
            PointKind::Intersection => "intersection",
            PointKind::LiftTop => "lift_top",
            PointKind::LiftBottom => "lift_bottom",
            PointKind::Node => "node",
            PointKind::Other(value) => value,
        }
    }
}

impl From<String> for PointKind {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().replace('-', "_").as_str() {
            "lodge" => PointKind::Lodge,
            "intersection" => PointKind::Intersection,
            "lift_top" => PointKind::LiftTop,
            "lift_bottom" => PointKind::LiftBottom,
            "node" => PointKind::Node,
            _ => PointKind::Other(value),
        }
    }
}

impl From<PointKind> for String {
    fn from(kind: PointKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for PointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point of interest in the resort graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: PointKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl Point {
    /// Surveyed position, when the data has both coordinates.
    pub fn location(&self) -> Option<Coordinates> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                Some(Coordinates { lat, lng })
            }
            _ => None,
        }
    }

    pub fn has_location(&self) -> bool {
        self.location().is_some()
    }

    /// Display position; points without a location sit at `0,0`.
    pub fn coordinates(&self) -> Coordinates {
        self.location().unwrap_or(Coordinates::ORIGIN)
    }

    /// Name shown to users; unnamed connector points fall back to their id.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("#{}", self.id))
    }

    fn matches_name(&self, query: &str) -> bool {
        self.name
            .iter()
            .chain(self.aliases.iter())
            .any(|candidate| candidate.eq_ignore_ascii_case(query))
    }
}

/// Identifier of a traversable edge, scoped by the record it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EdgeId {
    Lift(i64),
    Segment(i64),
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeId::Lift(id) => write!(f, "lift-{id}"),
            EdgeId::Segment(id) => write!(f, "segment-{id}"),
        }
    }
}

impl FromStr for EdgeId {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let invalid = || Error::InvalidEdgeId {
            value: value.to_string(),
        };
        let (prefix, raw) = value.split_once('-').ok_or_else(invalid)?;
        let id: i64 = raw.parse().map_err(|_| invalid())?;
        match prefix {
            "lift" => Ok(EdgeId::Lift(id)),
            "segment" => Ok(EdgeId::Segment(id)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for EdgeId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<EdgeId> for String {
    fn from(id: EdgeId) -> Self {
        id.to_string()
    }
}

/// Classification of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Lift,
    Trail,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::Lift => f.write_str("lift"),
            EdgeKind::Trail => f.write_str("trail"),
        }
    }
}

/// Directed connection between two points.
///
/// A lift or segment that can be travelled both ways needs two records;
/// nothing synthesises the reverse direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    pub start_point_id: PointId,
    pub end_point_id: PointId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trail_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time_minutes: Option<f64>,
    #[serde(default)]
    pub requires_hike: bool,
}

impl Edge {
    /// Build a lift edge.
    pub fn lift(
        id: i64,
        name: impl Into<String>,
        start: PointId,
        end: PointId,
        minutes: f64,
    ) -> Self {
        Self {
            id: EdgeId::Lift(id),
            kind: EdgeKind::Lift,
            start_point_id: start,
            end_point_id: end,
            name: name.into(),
            difficulty: None,
            trail_id: None,
            estimated_time_minutes: Some(minutes),
            requires_hike: false,
        }
    }

    /// Build a trail segment edge. The segment carries its trail's name and
    /// its own id doubles as the trail id until [`Edge::in_trail`] says otherwise.
    pub fn trail(
        id: i64,
        name: impl Into<String>,
        difficulty: impl Into<String>,
        start: PointId,
        end: PointId,
        minutes: f64,
    ) -> Self {
        Self {
            id: EdgeId::Segment(id),
            kind: EdgeKind::Trail,
            start_point_id: start,
            end_point_id: end,
            name: name.into(),
            difficulty: Some(difficulty.into()),
            trail_id: Some(id),
            estimated_time_minutes: Some(minutes),
            requires_hike: false,
        }
    }

    /// Build a connector segment: a trail edge that belongs to no trail.
    pub fn connector(
        id: i64,
        name: impl Into<String>,
        start: PointId,
        end: PointId,
        minutes: f64,
    ) -> Self {
        Self {
            id: EdgeId::Segment(id),
            kind: EdgeKind::Trail,
            start_point_id: start,
            end_point_id: end,
            name: name.into(),
            difficulty: None,
            trail_id: None,
            estimated_time_minutes: Some(minutes),
            requires_hike: false,
        }
    }

    pub fn in_trail(mut self, trail_id: i64) -> Self {
        self.trail_id = Some(trail_id);
        self
    }

    pub fn is_connector(&self) -> bool {
        self.kind == EdgeKind::Trail && self.trail_id.is_none()
    }
}

/// Per-request snapshot of one ski area.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resort {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "nodes", alias = "points", default)]
    pub points: Vec<Point>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Resort {
    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.points.iter().find(|point| point.id == id)
    }

    /// Lookup a point by name or alias, ignoring ASCII case.
    pub fn point_by_name(&self, name: &str) -> Option<&Point> {
        self.points.iter().find(|point| point.matches_name(name))
    }

    /// Resolve a user supplied point reference: a numeric id or a name/alias.
    pub fn resolve_point(&self, query: &str) -> Result<PointId> {
        let query = query.trim();
        if let Ok(id) = query.parse::<PointId>() {
            if self.point(id).is_some() {
                return Ok(id);
            }
        }
        self.point_by_name(query)
            .map(|point| point.id)
            .ok_or_else(|| Error::UnknownPoint {
                name: query.to_string(),
                suggestions: self.fuzzy_point_matches(query, 3),
            })
    }

    /// Resolve a lift reference: `lift-<id>`, a bare lift id, or a lift name.
    pub fn resolve_lift(&self, query: &str) -> Result<EdgeId> {
        let query = query.trim();
        let by_id = query
            .parse::<EdgeId>()
            .ok()
            .or_else(|| query.parse::<i64>().ok().map(EdgeId::Lift));

        self.lifts()
            .find(|edge| Some(edge.id) == by_id || edge.name.eq_ignore_ascii_case(query))
            .map(|edge| edge.id)
            .ok_or_else(|| Error::UnknownLift {
                name: query.to_string(),
            })
    }

    pub fn lifts(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|edge| edge.kind == EdgeKind::Lift)
    }

    /// Suggest up to `limit` point names or aliases that resemble `query`.
    pub fn fuzzy_point_matches(&self, query: &str, limit: usize) -> Vec<String> {
        let needle = query.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .points
            .iter()
            .flat_map(|point| point.name.iter().chain(point.aliases.iter()))
            .map(|candidate| {
                let haystack = candidate.to_lowercase();
                let score = if haystack.contains(&needle) || needle.contains(&haystack) {
                    1.0
                } else {
                    strsim::normalized_damerau_levenshtein(&needle, &haystack)
                };
                (score, candidate.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));

        let mut suggestions: Vec<String> = Vec::new();
        for (_, name) in scored {
            if suggestions.iter().any(|existing| existing == name) {
                continue;
            }
            suggestions.push(name.to_string());
            if suggestions.len() == limit {
                break;
            }
        }
        suggestions
    }
}
