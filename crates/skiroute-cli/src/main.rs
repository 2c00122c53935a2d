mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use skiroute_cli::output::OutputFormat;
use skiroute_cli::terminal::ColorPalette;
use skiroute_lib::{Difficulty, RouteAlgorithm};

use commands::resort::{handle_areas, handle_lifts, handle_points, ResortSource};
use commands::route::{handle_route_command, RouteCommandArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "Ski resort route planner")]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone)]
struct GlobalOptions {
    /// JSON resort snapshot to plan on.
    #[arg(long, global = true, value_name = "JSON")]
    resort: Option<PathBuf>,

    /// SQLite resort database; requires --ski-area.
    #[arg(long, global = true, value_name = "SQLITE")]
    database: Option<PathBuf>,

    /// Ski area id inside --database.
    #[arg(long, global = true, value_name = "ID")]
    ski_area: Option<i64>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Disable ANSI colors in the enhanced format.
    #[arg(long, global = true)]
    no_color: bool,
}

impl GlobalOptions {
    fn source(&self) -> Result<ResortSource> {
        ResortSource::from_options(
            self.resort.as_deref(),
            self.database.as_deref(),
            self.ski_area,
        )
    }

    fn palette(&self) -> ColorPalette {
        if self.no_color {
            ColorPalette::plain()
        } else {
            ColorPalette::detect()
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan the fastest route between two points.
    Route(RouteArgs),
    /// List the named points of interest.
    Points,
    /// List lifts and the ids accepted by --avoid-lift.
    Lifts,
    /// List the ski areas stored in --database.
    Areas,
}

#[derive(Args, Debug)]
struct RouteArgs {
    /// Starting point: id, name or alias.
    #[arg(long = "from")]
    from: String,

    /// Destination point: id, name or alias.
    #[arg(long = "to")]
    to: String,

    /// Hardest trail difficulty allowed (green, blue, blue-black, black, double_black).
    #[arg(long, default_value = "double_black")]
    max_difficulty: Difficulty,

    /// Lift to avoid: `lift-<id>`, a bare id or the lift name. Repeatable.
    #[arg(long = "avoid-lift", value_name = "LIFT")]
    avoid_lift: Vec<String>,

    /// Search algorithm (dijkstra or a-star). Defaults to SKIROUTE_ALGORITHM.
    #[arg(long)]
    algorithm: Option<RouteAlgorithm>,

    /// Connector steps at or under this many minutes are hidden.
    #[arg(long, value_name = "MINUTES")]
    connector_threshold: Option<f64>,
}

impl From<RouteArgs> for RouteCommandArgs {
    fn from(args: RouteArgs) -> Self {
        RouteCommandArgs {
            from: args.from,
            to: args.to,
            max_difficulty: args.max_difficulty,
            avoid_lifts: args.avoid_lift,
            algorithm: args.algorithm,
            connector_threshold: args.connector_threshold,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Command::Route(args) => handle_route_command(
            &global.source()?,
            global.format,
            global.palette(),
            &args.into(),
        ),
        Command::Points => handle_points(&global.source()?, global.format),
        Command::Lifts => handle_lifts(&global.source()?, global.format),
        Command::Areas => handle_areas(global.database.as_deref(), global.format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
