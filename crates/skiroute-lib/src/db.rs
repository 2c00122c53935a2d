use std::path::Path;

use rusqlite::{Connection, OpenFlags, OptionalExtension, Row};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{Edge, EdgeId, EdgeKind, Point, PointKind, Resort};
use crate::reduce::DEFAULT_CONNECTOR_NAME;

const SKI_AREAS_TABLE: &str = "ski_areas";
const POINTS_TABLE: &str = "points_of_interest";
const LIFTS_TABLE: &str = "lifts";
const TRAILS_TABLE: &str = "trails";
const SEGMENTS_TABLE: &str = "trail_segments";

/// Row of the `ski_areas` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkiArea {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Optional columns that older resort databases may lack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SchemaFeatures {
    point_aliases: bool,
    requires_hike: bool,
}

/// List every ski area stored in the database.
pub fn list_ski_areas(db_path: &Path) -> Result<Vec<SkiArea>> {
    let connection = open(db_path)?;
    detect_schema(&connection)?;

    let mut stmt = connection.prepare(&format!(
        "SELECT id, name, location FROM {SKI_AREAS_TABLE} ORDER BY id"
    ))?;
    let rows = stmt.query_map([], |row| {
        Ok(SkiArea {
            id: row.get(0)?,
            name: row.get(1)?,
            location: row.get(2)?,
        })
    })?;

    let mut areas = Vec::new();
    for row in rows {
        areas.push(row?);
    }
    Ok(areas)
}

/// Load one ski area's pathfinding graph from a resort database.
///
/// Lifts become `lift` edges. Trail segments become `trail` edges named
/// after their trail and carrying its difficulty; segments without a trail
/// are connectors named [`DEFAULT_CONNECTOR_NAME`]. Lifts come first, then
/// segments, each ordered by id, so search tie-breaks are reproducible.
pub fn load_resort(db_path: &Path, ski_area_id: i64) -> Result<Resort> {
    let connection = open(db_path)?;
    let features = detect_schema(&connection)?;
    debug!(path = %db_path.display(), ski_area_id, ?features, "loading resort");

    let name: String = connection
        .query_row(
            &format!("SELECT name FROM {SKI_AREAS_TABLE} WHERE id = ?1"),
            [ski_area_id],
            |row| row.get(0),
        )
        .optional()?
        .ok_or(Error::ResortNotFound { id: ski_area_id })?;

    let points = load_points(&connection, ski_area_id, features)?;
    let mut edges = load_lifts(&connection, ski_area_id)?;
    edges.extend(load_segments(&connection, ski_area_id, features)?);

    debug!(
        ski_area_id,
        points = points.len(),
        edges = edges.len(),
        "resort loaded"
    );

    Ok(Resort {
        id: ski_area_id,
        name,
        points,
        edges,
    })
}

fn open(db_path: &Path) -> Result<Connection> {
    if !db_path.exists() {
        return Err(Error::SnapshotNotFound {
            path: db_path.to_path_buf(),
        });
    }
    Ok(Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY,
    )?)
}

fn detect_schema(connection: &Connection) -> Result<SchemaFeatures> {
    let required: [(&str, &[&str]); 5] = [
        (SKI_AREAS_TABLE, &["id", "name"]),
        (
            POINTS_TABLE,
            &["id", "ski_area_id", "name", "type", "latitude", "longitude"],
        ),
        (
            LIFTS_TABLE,
            &[
                "id",
                "ski_area_id",
                "name",
                "start_point_id",
                "end_point_id",
                "estimated_time_minutes",
            ],
        ),
        (TRAILS_TABLE, &["id", "ski_area_id", "name", "difficulty"]),
        (
            SEGMENTS_TABLE,
            &[
                "id",
                "trail_id",
                "start_point_id",
                "end_point_id",
                "estimated_time_minutes",
            ],
        ),
    ];

    for (table, columns) in required {
        if !table_exists(connection, table)? || !table_has_columns(connection, table, columns)? {
            return Err(Error::UnsupportedSchema);
        }
    }

    Ok(SchemaFeatures {
        point_aliases: table_has_columns(connection, POINTS_TABLE, &["aliases"])?,
        requires_hike: table_has_columns(connection, SEGMENTS_TABLE, &["requires_hike"])?,
    })
}

fn load_points(
    connection: &Connection,
    ski_area_id: i64,
    features: SchemaFeatures,
) -> Result<Vec<Point>> {
    let aliases = if features.point_aliases {
        "aliases"
    } else {
        "NULL"
    };
    let sql = format!(
        "SELECT id, name, type, latitude, longitude, {aliases} \
         FROM {POINTS_TABLE} WHERE ski_area_id = ?1 ORDER BY id"
    );

    let mut stmt = connection.prepare(&sql)?;
    let rows = stmt.query_map([ski_area_id], row_to_point)?;

    let mut points = Vec::new();
    for row in rows {
        points.push(row?);
    }
    Ok(points)
}

fn row_to_point(row: &Row<'_>) -> rusqlite::Result<Point> {
    let id: i64 = row.get(0)?;
    let raw_aliases: Option<String> = row.get(5)?;
    Ok(Point {
        id,
        name: row.get(1)?,
        kind: row
            .get::<_, Option<String>>(2)?
            .map(PointKind::from)
            .unwrap_or_default(),
        lat: row.get(3)?,
        lng: row.get(4)?,
        aliases: raw_aliases
            .map(|raw| parse_aliases(id, &raw))
            .unwrap_or_default(),
    })
}

/// Aliases are stored as a JSON array; a plain comma-separated list is
/// accepted too.
fn parse_aliases(point_id: i64, raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if trimmed.starts_with('[') {
        return match serde_json::from_str::<Vec<String>>(trimmed) {
            Ok(aliases) => aliases,
            Err(err) => {
                warn!(point_id, error = %err, "ignoring malformed point aliases");
                Vec::new()
            }
        };
    }
    trimmed
        .split(',')
        .map(str::trim)
        .filter(|alias| !alias.is_empty())
        .map(str::to_string)
        .collect()
}

fn load_lifts(connection: &Connection, ski_area_id: i64) -> Result<Vec<Edge>> {
    let sql = format!(
        "SELECT id, name, start_point_id, end_point_id, estimated_time_minutes \
         FROM {LIFTS_TABLE} WHERE ski_area_id = ?1 ORDER BY id"
    );
    let mut stmt = connection.prepare(&sql)?;
    let rows = stmt.query_map([ski_area_id], |row| {
        Ok(Edge {
            id: EdgeId::Lift(row.get(0)?),
            kind: EdgeKind::Lift,
            start_point_id: row.get(2)?,
            end_point_id: row.get(3)?,
            name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            difficulty: None,
            trail_id: None,
            estimated_time_minutes: row.get(4)?,
            requires_hike: false,
        })
    })?;

    let mut lifts = Vec::new();
    for row in rows {
        lifts.push(row?);
    }
    Ok(lifts)
}

/// Segments carry no ski area of their own; they belong to the area of
/// their start point.
fn load_segments(
    connection: &Connection,
    ski_area_id: i64,
    features: SchemaFeatures,
) -> Result<Vec<Edge>> {
    let requires_hike = if features.requires_hike {
        "s.requires_hike"
    } else {
        "0"
    };
    let sql = format!(
        "SELECT s.id, s.trail_id, t.name, t.difficulty, s.start_point_id, s.end_point_id, \
                s.estimated_time_minutes, {requires_hike} \
         FROM {SEGMENTS_TABLE} s \
         JOIN {POINTS_TABLE} p ON p.id = s.start_point_id \
         LEFT JOIN {TRAILS_TABLE} t ON t.id = s.trail_id \
         WHERE p.ski_area_id = ?1 \
         ORDER BY s.id"
    );

    let mut stmt = connection.prepare(&sql)?;
    let rows = stmt.query_map([ski_area_id], |row| {
        let trail_id: Option<i64> = row.get(1)?;
        let trail_name: Option<String> = row.get(2)?;
        Ok(Edge {
            id: EdgeId::Segment(row.get(0)?),
            kind: EdgeKind::Trail,
            start_point_id: row.get(4)?,
            end_point_id: row.get(5)?,
            name: trail_name.unwrap_or_else(|| DEFAULT_CONNECTOR_NAME.to_string()),
            difficulty: row.get(3)?,
            trail_id,
            estimated_time_minutes: row.get(6)?,
            requires_hike: row.get::<_, Option<bool>>(7)?.unwrap_or(false),
        })
    })?;

    let mut segments = Vec::new();
    let mut orphaned = 0usize;
    for row in rows {
        let segment = row?;
        if segment.trail_id.is_some() && segment.difficulty.is_none() {
            orphaned += 1;
        }
        segments.push(segment);
    }

    if orphaned > 0 {
        warn!(
            orphaned,
            "trail segments reference trails without a difficulty"
        );
    }

    Ok(segments)
}

fn table_exists(connection: &Connection, table: &str) -> Result<bool> {
    let mut stmt = connection
        .prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 LIMIT 1")?;
    let mut rows = stmt.query([table])?;
    Ok(rows.next()?.is_some())
}

fn table_has_columns(connection: &Connection, table: &str, required: &[&str]) -> Result<bool> {
    let pragma = format!("PRAGMA table_info('{table}')");
    let mut stmt = connection.prepare(&pragma)?;
    let mut rows = stmt.query([])?;

    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        columns.push(name);
    }

    Ok(required.iter().all(|required| {
        columns
            .iter()
            .any(|column| column.eq_ignore_ascii_case(required))
    }))
}
