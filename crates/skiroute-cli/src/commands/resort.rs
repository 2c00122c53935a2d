//! Resort loading and the listing subcommands.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::debug;

use skiroute_lib::{list_ski_areas, load_resort, load_resort_json, Resort};
use skiroute_cli::output::{
    print_output, render_lifts, render_points, render_ski_areas, OutputFormat,
};

/// Where the resort graph comes from.
#[derive(Debug, Clone)]
pub enum ResortSource {
    Snapshot(PathBuf),
    Database { path: PathBuf, ski_area: i64 },
}

impl ResortSource {
    /// Pick a source from the global `--resort`, `--database` and
    /// `--ski-area` options.
    pub fn from_options(
        resort: Option<&Path>,
        database: Option<&Path>,
        ski_area: Option<i64>,
    ) -> Result<Self> {
        match (resort, database, ski_area) {
            (Some(path), None, None) => Ok(ResortSource::Snapshot(path.to_path_buf())),
            (None, Some(path), Some(ski_area)) => Ok(ResortSource::Database {
                path: path.to_path_buf(),
                ski_area,
            }),
            (None, Some(_), None) => bail!("--database requires --ski-area"),
            (Some(_), None, Some(_)) => bail!("--ski-area only applies with --database"),
            (Some(_), Some(_), _) => bail!("use either --resort or --database, not both"),
            (None, None, _) => bail!("no resort given; pass --resort <json> or --database <sqlite> --ski-area <id>"),
        }
    }

    pub fn load(&self) -> Result<Resort> {
        let resort = match self {
            ResortSource::Snapshot(path) => load_resort_json(path)
                .with_context(|| format!("failed to load resort snapshot {}", path.display()))?,
            ResortSource::Database { path, ski_area } => load_resort(path, *ski_area)
                .with_context(|| {
                    format!("failed to load ski area {} from {}", ski_area, path.display())
                })?,
        };
        debug!(
            resort = resort.id,
            points = resort.points.len(),
            edges = resort.edges.len(),
            "resort ready"
        );
        Ok(resort)
    }
}

/// Handle the points subcommand.
pub fn handle_points(source: &ResortSource, format: OutputFormat) -> Result<()> {
    let resort = source.load()?;
    print_output(&render_points(&resort, format)?)?;
    Ok(())
}

/// Handle the lifts subcommand.
pub fn handle_lifts(source: &ResortSource, format: OutputFormat) -> Result<()> {
    let resort = source.load()?;
    print_output(&render_lifts(&resort, format)?)?;
    Ok(())
}

/// Handle the areas subcommand: list the ski areas of a resort database.
pub fn handle_areas(database: Option<&Path>, format: OutputFormat) -> Result<()> {
    let Some(path) = database else {
        bail!("areas needs --database <sqlite>");
    };
    let areas = list_ski_areas(path)
        .with_context(|| format!("failed to read ski areas from {}", path.display()))?;
    print_output(&render_ski_areas(&areas, format)?)?;
    Ok(())
}
