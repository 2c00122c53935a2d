//! JSON resort snapshots.
//!
//! A snapshot is the pathfinding graph of one ski area as exported by the
//! storage layer: `{ "id", "name", "nodes": [...], "edges": [...] }` with
//! the field names used throughout [`crate::model`].

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::Resort;

/// Load a resort snapshot from a JSON file.
pub fn load_resort_json(path: &Path) -> Result<Resort> {
    if !path.exists() {
        return Err(Error::SnapshotNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path)?;
    let resort = read_resort_json(BufReader::new(file))?;
    debug!(
        path = %path.display(),
        resort = resort.id,
        points = resort.points.len(),
        edges = resort.edges.len(),
        "loaded resort snapshot"
    );
    Ok(resort)
}

/// Parse a resort snapshot from any reader.
pub fn read_resort_json(reader: impl Read) -> Result<Resort> {
    Ok(serde_json::from_reader(reader)?)
}

/// Write a resort snapshot as pretty-printed JSON.
pub fn write_resort_json(resort: &Resort, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, resort)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EdgeId, EdgeKind, PointKind};

    #[test]
    fn parses_the_storage_export_shape() {
        let json = r#"{
            "id": 3,
            "name": "Powder Ridge",
            "nodes": [
                {"id": 1, "name": "Base", "type": "lodge", "lat": 40.1, "lng": -105.2},
                {"id": 2, "name": null, "type": "node", "lat": 40.2, "lng": -105.3}
            ],
            "edges": [
                {"id": "lift-4", "type": "lift", "start_point_id": 1, "end_point_id": 2,
                 "name": "Summit Express", "estimated_time_minutes": 8},
                {"id": "segment-9", "type": "trail", "start_point_id": 2, "end_point_id": 1,
                 "name": "Connector", "difficulty": null, "trail_id": null,
                 "estimated_time_minutes": null, "requires_hike": true}
            ]
        }"#;

        let resort = read_resort_json(json.as_bytes()).unwrap();
        assert_eq!(resort.id, 3);
        assert_eq!(resort.points[0].kind, PointKind::Lodge);
        assert_eq!(resort.points[1].name, None);
        assert_eq!(resort.edges[0].id, EdgeId::Lift(4));
        assert_eq!(resort.edges[0].estimated_time_minutes, Some(8.0));
        assert_eq!(resort.edges[1].kind, EdgeKind::Trail);
        assert!(resort.edges[1].is_connector());
        assert!(resort.edges[1].requires_hike);
        assert_eq!(resort.edges[1].estimated_time_minutes, None);
    }

    #[test]
    fn rejects_malformed_edge_ids() {
        let json = r#"{"id": 1, "nodes": [], "edges": [
            {"id": "chairlift-1", "type": "lift", "start_point_id": 1, "end_point_id": 2}
        ]}"#;
        assert!(matches!(
            read_resort_json(json.as_bytes()),
            Err(Error::Json(_))
        ));
    }
}
