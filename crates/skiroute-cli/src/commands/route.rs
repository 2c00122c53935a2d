//! Route command handler for planning a trip between two points.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use skiroute_cli::output::{print_output, render_route, OutputFormat};
use skiroute_cli::terminal::ColorPalette;
use skiroute_lib::{
    plan_route, Difficulty, Resort, RouteAlgorithm, RouteConstraints, RouteRequest, RouteSummary,
    RoutingConfig,
};

use super::resort::ResortSource;

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting point id, name or alias.
    pub from: String,
    /// Destination point id, name or alias.
    pub to: String,
    /// Hardest trail difficulty allowed.
    pub max_difficulty: Difficulty,
    /// Lifts to avoid, as `lift-<id>`, a bare id or a lift name.
    pub avoid_lifts: Vec<String>,
    /// Overrides the configured algorithm.
    pub algorithm: Option<RouteAlgorithm>,
    /// Overrides the configured connector suppression threshold.
    pub connector_threshold: Option<f64>,
}

impl RouteCommandArgs {
    /// Resolve names against `resort` and build the library request.
    pub fn to_request(&self, resort: &Resort, config: &RoutingConfig) -> Result<RouteRequest> {
        let start = resort
            .resolve_point(&self.from)
            .context("could not resolve --from")?;
        let goal = resort
            .resolve_point(&self.to)
            .context("could not resolve --to")?;

        let mut avoid = Vec::with_capacity(self.avoid_lifts.len());
        for lift in &self.avoid_lifts {
            avoid.push(resort.resolve_lift(lift).context("could not resolve --avoid-lift")?);
        }

        Ok(RouteRequest::new(resort.id, start, goal)
            .with_algorithm(self.algorithm.unwrap_or(config.algorithm))
            .with_constraints(RouteConstraints::new(self.max_difficulty).avoiding(avoid)))
    }

    /// Environment configuration with command-line overrides applied.
    pub fn effective_config(&self, mut config: RoutingConfig) -> RoutingConfig {
        if let Some(threshold) = self.connector_threshold {
            config.connector_threshold_minutes = threshold;
        }
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }
        config
    }
}

/// Handle the route subcommand.
///
/// "No route" is a normal outcome: it is rendered and the command succeeds.
pub fn handle_route_command(
    source: &ResortSource,
    format: OutputFormat,
    palette: ColorPalette,
    args: &RouteCommandArgs,
) -> Result<()> {
    let resort = source.load()?;
    let config = args.effective_config(RoutingConfig::from_env());
    let request = args.to_request(&resort, &config)?;

    let started = Instant::now();
    let plan = plan_route(&resort, &request, &config).with_context(|| {
        format!(
            "route planning from {} to {} failed",
            args.from, args.to
        )
    })?;
    info!(
        elapsed_us = started.elapsed().as_micros() as u64,
        found = plan.is_some(),
        "route planned"
    );

    let summary = match &plan {
        Some(plan) => RouteSummary::from_plan(&resort, plan),
        None => RouteSummary::no_route(&resort, request.algorithm, request.start, request.goal),
    };
    print_output(&render_route(&summary, &resort, format, palette)?)?;
    Ok(())
}
