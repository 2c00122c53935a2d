use std::fmt::Write;

use serde::Serialize;

use crate::model::{EdgeKind, PointId, Resort};
use crate::reduce::RouteStep;
use crate::routing::{RouteAlgorithm, RoutePlan};

/// Outcome of a routing request as shown to users.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    Found,
    AlreadyThere,
    NoRoute,
}

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    RichText,
    Note,
}

/// Endpoint within a planned route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteEndpoint {
    pub id: PointId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RouteEndpoint {
    fn resolve(resort: &Resort, id: PointId) -> Self {
        Self {
            id,
            name: resort.point(id).and_then(|point| point.name.clone()),
        }
    }

    fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("point {}", self.id))
    }
}

/// One numbered instruction of a summary.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SummaryStep {
    pub index: usize,
    pub instruction: String,
    /// Step time rounded to whole minutes.
    pub minutes: f64,
    #[serde(flatten)]
    pub step: RouteStep,
}

impl SummaryStep {
    fn from_step(index: usize, step: &RouteStep) -> Self {
        Self {
            index,
            instruction: format!("{} {}", verb(step.kind), step.name),
            minutes: step.estimated_time_minutes.round(),
            step: step.clone(),
        }
    }
}

fn verb(kind: EdgeKind) -> &'static str {
    match kind {
        EdgeKind::Lift => "Take the",
        EdgeKind::Trail => "Ski down",
    }
}

/// Structured representation of a routing result that consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub status: RouteStatus,
    pub resort: String,
    pub algorithm: RouteAlgorithm,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub total_minutes: f64,
    pub steps: Vec<SummaryStep>,
}

impl RouteSummary {
    /// Summarise a successful plan with resolved point names.
    pub fn from_plan(resort: &Resort, plan: &RoutePlan) -> Self {
        let status = if plan.is_trivial() {
            RouteStatus::AlreadyThere
        } else {
            RouteStatus::Found
        };
        Self {
            status,
            resort: resort.name.clone(),
            algorithm: plan.algorithm,
            start: RouteEndpoint::resolve(resort, plan.start),
            goal: RouteEndpoint::resolve(resort, plan.goal),
            total_minutes: plan.total_minutes,
            steps: plan
                .steps
                .iter()
                .enumerate()
                .map(|(index, step)| SummaryStep::from_step(index + 1, step))
                .collect(),
        }
    }

    /// Summary for a request that has no route under its constraints.
    pub fn no_route(
        resort: &Resort,
        algorithm: RouteAlgorithm,
        start: PointId,
        goal: PointId,
    ) -> Self {
        Self {
            status: RouteStatus::NoRoute,
            resort: resort.name.clone(),
            algorithm,
            start: RouteEndpoint::resolve(resort, start),
            goal: RouteEndpoint::resolve(resort, goal),
            total_minutes: 0.0,
            steps: Vec::new(),
        }
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match self.status {
            RouteStatus::NoRoute => {
                return format!(
                    "No route found from {} to {}.\n",
                    self.start.display_name(),
                    self.goal.display_name()
                )
            }
            RouteStatus::AlreadyThere => {
                return format!(
                    "Already at {}; no steps needed.\n",
                    self.start.display_name()
                )
            }
            RouteStatus::Found if self.steps.is_empty() => {
                return format!(
                    "Route found from {} to {}, but no displayable steps remain.\n",
                    self.start.display_name(),
                    self.goal.display_name()
                )
            }
            RouteStatus::Found => {}
        }

        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::RichText => self.render_rich(),
            RouteRenderMode::Note => self.render_note(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} steps, about {} minutes, algorithm: {})",
            self.start.display_name(),
            self.goal.display_name(),
            self.steps.len(),
            self.total_minutes.round(),
            self.algorithm
        );
        for step in &self.steps {
            let _ = writeln!(
                buffer,
                "{:>3}. {} (about {} minutes)",
                step.index, step.instruction, step.minutes
            );
        }
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Route** _{} → {}_ ({} steps, about {} minutes, algorithm: `{}`)",
            self.start.display_name(),
            self.goal.display_name(),
            self.steps.len(),
            self.total_minutes.round(),
            self.algorithm
        );
        for entry in &self.steps {
            let _ = writeln!(
                buffer,
                "* {:>2}. {} **{}** (`{}`, ~{} min)",
                entry.index,
                verb(entry.step.kind),
                entry.step.name,
                entry.step.id,
                entry.minutes
            );
        }
        buffer
    }

    fn render_note(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "{} -> {}",
            self.start.display_name(),
            self.goal.display_name()
        );
        for entry in &self.steps {
            let _ = writeln!(buffer, "{} ({}m)", entry.step.name, entry.minutes);
        }
        buffer
    }
}
