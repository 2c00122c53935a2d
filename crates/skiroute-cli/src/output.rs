//! Output formatting for route rendering.
//!
//! Every renderer builds a `String` so the formats can be tested without
//! capturing stdout; `print_*` helpers write the result.

use std::fmt::Write as _;
use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;
use skiroute_lib::{EdgeKind, Resort, RouteRenderMode, RouteStatus, RouteSummary, SkiArea};

use crate::terminal::ColorPalette;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Numbered instructions with minutes per step.
    #[default]
    Text,
    /// Markdown-flavoured output for chat or notes apps.
    Rich,
    /// Compact one line per step.
    Note,
    /// Step names only, prefixed `+`, `|` and `-`.
    Basic,
    /// Colored tree with lift and trail tags.
    Enhanced,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    fn render_mode(self) -> RouteRenderMode {
        match self {
            OutputFormat::Rich => RouteRenderMode::RichText,
            OutputFormat::Note => RouteRenderMode::Note,
            _ => RouteRenderMode::PlainText,
        }
    }
}

/// Render a route summary in the requested format.
///
/// `resort` supplies trail difficulties for the enhanced view.
pub fn render_route(
    summary: &RouteSummary,
    resort: &Resort,
    format: OutputFormat,
    palette: ColorPalette,
) -> io::Result<String> {
    match format {
        OutputFormat::Json => to_json(summary),
        OutputFormat::Basic if summary.status == RouteStatus::Found => Ok(render_basic(summary)),
        OutputFormat::Enhanced if summary.status == RouteStatus::Found => {
            Ok(EnhancedRenderer::new(palette).render(summary, resort))
        }
        _ => Ok(summary.render(format.render_mode())),
    }
}

/// Render a route summary as `+`/`|`/`-` prefixed step names.
pub fn render_basic(summary: &RouteSummary) -> String {
    let len = summary.steps.len();
    let mut buffer = String::new();
    for (i, entry) in summary.steps.iter().enumerate() {
        let prefix = if i == 0 {
            '+'
        } else if i + 1 == len {
            '-'
        } else {
            '|'
        };
        let _ = writeln!(buffer, "{} {}", prefix, entry.step.name);
    }
    let _ = writeln!(buffer, "about {} minutes", summary.total_minutes.round());
    buffer
}

/// Renderer for the enhanced format with colored tags.
pub struct EnhancedRenderer {
    palette: ColorPalette,
}

impl EnhancedRenderer {
    #[must_use]
    pub const fn new(palette: ColorPalette) -> Self {
        Self { palette }
    }

    pub fn render(&self, summary: &RouteSummary, resort: &Resort) -> String {
        let p = &self.palette;
        let start = summary.start.name.as_deref().unwrap_or("<unnamed>");
        let goal = summary.goal.name.as_deref().unwrap_or("<unnamed>");

        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route from {}{}{} to {}{}{} ({} steps, about {} minutes):",
            p.white_bold,
            start,
            p.reset,
            p.white_bold,
            goal,
            p.reset,
            summary.steps.len(),
            summary.total_minutes.round()
        );
        let _ = writeln!(buffer, "{}START{} {}", p.tag_start, p.reset, start);

        let len = summary.steps.len();
        for (i, entry) in summary.steps.iter().enumerate() {
            let branch = if i + 1 == len { "`-" } else { "|-" };
            let step = &entry.step;
            let tag = match step.kind {
                EdgeKind::Lift => format!("{}LIFT {}", p.tag_lift, p.reset),
                EdgeKind::Trail => format!("{}TRAIL{}", p.tag_trail, p.reset),
            };
            let difficulty = resort
                .edges
                .iter()
                .find(|edge| edge.id == step.id)
                .and_then(|edge| edge.difficulty.as_deref())
                .map(|label| format!(" {}{}{}", p.difficulty(label), label, p.reset))
                .unwrap_or_default();
            let _ = writeln!(
                buffer,
                " {}{}{} {} {}{}{}{} {}({} min){}",
                p.gray,
                branch,
                p.reset,
                tag,
                p.white_bold,
                step.name,
                p.reset,
                difficulty,
                p.gray,
                entry.minutes,
                p.reset
            );
        }

        let _ = writeln!(buffer, "{}GOAL {} {}", p.tag_goal, p.reset, goal);
        buffer
    }
}

#[derive(Serialize)]
struct PointRow<'a> {
    id: i64,
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lng: Option<f64>,
    #[serde(skip_serializing_if = "no_aliases")]
    aliases: &'a [String],
}

fn no_aliases(aliases: &&[String]) -> bool {
    aliases.is_empty()
}

/// List the resort's points, named ones only.
pub fn render_points(resort: &Resort, format: OutputFormat) -> io::Result<String> {
    let rows: Vec<PointRow<'_>> = resort
        .points
        .iter()
        .filter_map(|point| {
            point.name.as_deref().map(|name| PointRow {
                id: point.id,
                name,
                kind: point.kind.as_str(),
                lat: point.lat,
                lng: point.lng,
                aliases: &point.aliases,
            })
        })
        .collect();

    if format == OutputFormat::Json {
        return to_json(&rows);
    }

    let mut buffer = String::new();
    let _ = writeln!(buffer, "Points in {} ({}):", resort.name, rows.len());
    for row in &rows {
        let _ = write!(buffer, "{:>6}  {} [{}]", row.id, row.name, row.kind);
        if !row.aliases.is_empty() {
            let _ = write!(buffer, " aka {}", row.aliases.join(", "));
        }
        buffer.push('\n');
    }
    Ok(buffer)
}

#[derive(Serialize)]
struct LiftRow<'a> {
    id: String,
    name: &'a str,
    from: String,
    to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    estimated_time_minutes: Option<f64>,
}

/// List the resort's lifts with the ids `--avoid-lift` accepts.
pub fn render_lifts(resort: &Resort, format: OutputFormat) -> io::Result<String> {
    let point_name = |id| {
        resort
            .point(id)
            .map(|point| point.display_name())
            .unwrap_or_else(|| format!("#{id}"))
    };
    let rows: Vec<LiftRow<'_>> = resort
        .lifts()
        .map(|edge| LiftRow {
            id: edge.id.to_string(),
            name: &edge.name,
            from: point_name(edge.start_point_id),
            to: point_name(edge.end_point_id),
            estimated_time_minutes: edge.estimated_time_minutes,
        })
        .collect();

    if format == OutputFormat::Json {
        return to_json(&rows);
    }

    let mut buffer = String::new();
    let _ = writeln!(buffer, "Lifts in {} ({}):", resort.name, rows.len());
    for row in &rows {
        let _ = write!(buffer, "{:>10}  {}: {} -> {}", row.id, row.name, row.from, row.to);
        if let Some(minutes) = row.estimated_time_minutes {
            let _ = write!(buffer, " ({} min)", minutes);
        }
        buffer.push('\n');
    }
    Ok(buffer)
}

/// List ski areas stored in a resort database.
pub fn render_ski_areas(areas: &[SkiArea], format: OutputFormat) -> io::Result<String> {
    if format == OutputFormat::Json {
        return to_json(areas);
    }
    let mut buffer = String::new();
    for area in areas {
        let _ = write!(buffer, "{:>6}  {}", area.id, area.name);
        if let Some(location) = area.location.as_deref() {
            let _ = write!(buffer, " ({location})");
        }
        buffer.push('\n');
    }
    Ok(buffer)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> io::Result<String> {
    let mut json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    json.push('\n');
    Ok(json)
}

/// Write rendered output to stdout.
pub fn print_output(rendered: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()
}
