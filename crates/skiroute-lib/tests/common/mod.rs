//! Common test utilities and fixture helpers.
//!
//! Integration tests share the sample resort snapshot under `docs/fixtures`
//! and a builder that writes the same resort into a throwaway SQLite
//! database.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};
use skiroute_lib::{load_resort_json, Edge, EdgeKind, Point, PointKind, Resort};
use tempfile::TempDir;

/// Path to fixtures directory used by tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Path to the sample resort snapshot.
#[allow(dead_code)]
pub fn sample_resort_path() -> PathBuf {
    fixtures_dir().join("sample_resort.json")
}

/// The "Powder Ridge" sample resort.
#[allow(dead_code)]
pub fn sample_resort() -> Resort {
    load_resort_json(&sample_resort_path()).expect("sample resort fixture loads")
}

/// Named point at the given coordinates.
#[allow(dead_code)]
pub fn point(id: i64, name: &str, lat: f64, lng: f64) -> Point {
    Point {
        id,
        name: Some(name.to_string()),
        kind: PointKind::Node,
        lat: Some(lat),
        lng: Some(lng),
        aliases: Vec::new(),
    }
}

/// Resort with id 1 over the given points and edges.
#[allow(dead_code)]
pub fn resort(points: Vec<Point>, edges: Vec<Edge>) -> Resort {
    Resort {
        id: 1,
        name: "Test Mountain".to_string(),
        points,
        edges,
    }
}

/// Temporary resort database. The directory is removed on drop.
#[allow(dead_code)]
pub struct ResortDb {
    _temp_dir: TempDir,
    pub path: PathBuf,
}

#[allow(dead_code)]
impl ResortDb {
    /// Write `resort` into a fresh database, plus an empty second ski area.
    pub fn with_resort(resort: &Resort) -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = temp_dir.path().join("resorts.db");
        let connection = Connection::open(&path).expect("create database");
        create_schema(&connection);
        insert_resort(&connection, resort);
        connection
            .execute(
                "INSERT INTO ski_areas (id, name, location) VALUES (?1, ?2, ?3)",
                params![resort.id + 1, "Empty Hill", Option::<String>::None],
            )
            .expect("insert second ski area");
        Self {
            _temp_dir: temp_dir,
            path,
        }
    }

    /// Database that has none of the resort tables.
    pub fn unrelated() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = temp_dir.path().join("other.db");
        let connection = Connection::open(&path).expect("create database");
        connection
            .execute_batch("CREATE TABLE systems (id INTEGER PRIMARY KEY, name TEXT);")
            .expect("create unrelated table");
        Self {
            _temp_dir: temp_dir,
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn create_schema(connection: &Connection) {
    connection
        .execute_batch(
            "CREATE TABLE ski_areas (
                 id INTEGER PRIMARY KEY,
                 name TEXT NOT NULL,
                 location TEXT
             );
             CREATE TABLE points_of_interest (
                 id INTEGER PRIMARY KEY,
                 ski_area_id INTEGER NOT NULL REFERENCES ski_areas(id),
                 name TEXT,
                 type TEXT,
                 latitude REAL,
                 longitude REAL,
                 aliases TEXT
             );
             CREATE TABLE lifts (
                 id INTEGER PRIMARY KEY,
                 ski_area_id INTEGER NOT NULL REFERENCES ski_areas(id),
                 name TEXT,
                 start_point_id INTEGER NOT NULL,
                 end_point_id INTEGER NOT NULL,
                 estimated_time_minutes REAL
             );
             CREATE TABLE trails (
                 id INTEGER PRIMARY KEY,
                 ski_area_id INTEGER NOT NULL REFERENCES ski_areas(id),
                 name TEXT NOT NULL,
                 difficulty TEXT
             );
             CREATE TABLE trail_segments (
                 id INTEGER PRIMARY KEY,
                 trail_id INTEGER REFERENCES trails(id),
                 start_point_id INTEGER NOT NULL,
                 end_point_id INTEGER NOT NULL,
                 estimated_time_minutes REAL,
                 requires_hike INTEGER NOT NULL DEFAULT 0
             );",
        )
        .expect("create resort schema");
}

fn insert_resort(connection: &Connection, resort: &Resort) {
    connection
        .execute(
            "INSERT INTO ski_areas (id, name, location) VALUES (?1, ?2, ?3)",
            params![resort.id, resort.name, "Colorado"],
        )
        .expect("insert ski area");

    for point in &resort.points {
        let aliases = if point.aliases.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&point.aliases).expect("encode aliases"))
        };
        connection
            .execute(
                "INSERT INTO points_of_interest (id, ski_area_id, name, type, latitude, longitude, aliases)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    point.id,
                    resort.id,
                    point.name,
                    point.kind.as_str(),
                    point.lat,
                    point.lng,
                    aliases
                ],
            )
            .expect("insert point");
    }

    for edge in &resort.edges {
        let raw_id: i64 = edge
            .id
            .to_string()
            .rsplit('-')
            .next()
            .and_then(|id| id.parse().ok())
            .expect("numeric edge id");
        match edge.kind {
            EdgeKind::Lift => {
                connection
                    .execute(
                        "INSERT INTO lifts (id, ski_area_id, name, start_point_id, end_point_id, estimated_time_minutes)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                        params![
                            raw_id,
                            resort.id,
                            edge.name,
                            edge.start_point_id,
                            edge.end_point_id,
                            edge.estimated_time_minutes
                        ],
                    )
                    .expect("insert lift");
            }
            EdgeKind::Trail => {
                if let Some(trail_id) = edge.trail_id {
                    connection
                        .execute(
                            "INSERT OR IGNORE INTO trails (id, ski_area_id, name, difficulty)
                             VALUES (?1, ?2, ?3, ?4)",
                            params![trail_id, resort.id, edge.name, edge.difficulty],
                        )
                        .expect("insert trail");
                }
                connection
                    .execute(
                        "INSERT INTO trail_segments (id, trail_id, start_point_id, end_point_id, estimated_time_minutes, requires_hike)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                        params![
                            raw_id,
                            edge.trail_id,
                            edge.start_point_id,
                            edge.end_point_id,
                            edge.estimated_time_minutes,
                            edge.requires_hike
                        ],
                    )
                    .expect("insert trail segment");
            }
        }
    }
}
