//! Routing configuration.
//!
//! # Environment Variables
//!
//! - `SKIROUTE_CONNECTOR_NAME`: name of trail-less connector segments (default `Connector`)
//! - `SKIROUTE_CONNECTOR_THRESHOLD_MINUTES`: connector steps at or below this are hidden (default `1`)
//! - `SKIROUTE_ALGORITHM`: `dijkstra` (default) or `a-star`
//! - `SKIROUTE_MAX_SPEED_M_PER_MIN`: speed bound for the A* heuristic (default `1000`)
//! - `SKIROUTE_SEARCH_TIMEOUT_MS`: per-search deadline; unset means no deadline

use std::fmt::Display;
use std::str::FromStr;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::path::SearchOptions;
use crate::reduce::{ReduceOptions, DEFAULT_CONNECTOR_NAME, DEFAULT_CONNECTOR_THRESHOLD_MINUTES};
use crate::routing::RouteAlgorithm;

/// Default speed bound for the straight-line heuristic: 60 km/h.
pub const DEFAULT_MAX_SPEED_M_PER_MIN: f64 = 1000.0;

pub const ENV_CONNECTOR_NAME: &str = "SKIROUTE_CONNECTOR_NAME";
pub const ENV_CONNECTOR_THRESHOLD: &str = "SKIROUTE_CONNECTOR_THRESHOLD_MINUTES";
pub const ENV_ALGORITHM: &str = "SKIROUTE_ALGORITHM";
pub const ENV_MAX_SPEED: &str = "SKIROUTE_MAX_SPEED_M_PER_MIN";
pub const ENV_SEARCH_TIMEOUT_MS: &str = "SKIROUTE_SEARCH_TIMEOUT_MS";

/// Tunables for the planner and the step reducer.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingConfig {
    pub connector_name: String,
    pub connector_threshold_minutes: f64,
    pub algorithm: RouteAlgorithm,
    pub max_speed_m_per_min: f64,
    pub search_timeout: Option<Duration>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            connector_name: DEFAULT_CONNECTOR_NAME.to_string(),
            connector_threshold_minutes: DEFAULT_CONNECTOR_THRESHOLD_MINUTES,
            algorithm: RouteAlgorithm::default(),
            max_speed_m_per_min: DEFAULT_MAX_SPEED_M_PER_MIN,
            search_timeout: None,
        }
    }
}

impl RoutingConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; unparsable values keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let connector_name = lookup(ENV_CONNECTOR_NAME)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.connector_name);

        let connector_threshold_minutes = parse_or(
            &lookup,
            ENV_CONNECTOR_THRESHOLD,
            defaults.connector_threshold_minutes,
        );
        let algorithm = parse_or(&lookup, ENV_ALGORITHM, defaults.algorithm);
        let max_speed_m_per_min = parse_or(&lookup, ENV_MAX_SPEED, defaults.max_speed_m_per_min);
        let search_timeout = lookup(ENV_SEARCH_TIMEOUT_MS).and_then(|raw| {
            match raw.trim().parse::<u64>() {
                Ok(ms) => Some(Duration::from_millis(ms)),
                Err(err) => {
                    warn!(key = ENV_SEARCH_TIMEOUT_MS, value = %raw, error = %err, "ignoring invalid setting");
                    None
                }
            }
        });

        Self {
            connector_name,
            connector_threshold_minutes,
            algorithm,
            max_speed_m_per_min,
            search_timeout,
        }
    }

    pub fn reduce_options(&self) -> ReduceOptions {
        ReduceOptions {
            connector_name: self.connector_name.clone(),
            connector_threshold_minutes: self.connector_threshold_minutes,
        }
    }

    /// Search options for a search starting now.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            deadline: self.search_timeout.map(|timeout| Instant::now() + timeout),
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(err) => {
            warn!(key, value = %raw, error = %err, "ignoring invalid setting");
            default
        }
    }
}
