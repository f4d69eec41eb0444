use std::time::{Duration, Instant};

use colored::Colorize;
use serde::Serialize;

use crate::browser::Session;
use crate::error::{FailureKind, SmokeError};
use crate::scenario::{ScenarioCtx, StoreScenario};
use crate::util;

/// Outcome of one scenario attempt. Produced exactly once per scenario,
/// appended in execution order, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub passed: bool,
    pub failure: Option<FailureKind>,
    pub message: String,
    pub duration: Duration,
}

impl ScenarioResult {
    pub fn from_outcome(
        name: &str,
        outcome: Result<(), SmokeError>,
        duration: Duration,
    ) -> Self {
        match outcome {
            Ok(()) => Self {
                scenario_name: name.to_string(),
                passed: true,
                failure: None,
                message: "Passed".to_string(),
                duration,
            },
            Err(err) => Self {
                scenario_name: name.to_string(),
                passed: false,
                failure: Some(err.kind()),
                message: err.to_string(),
                duration,
            },
        }
    }

    /// The one-line report form: name plus Passed/Failed with the failure
    /// kind annotated.
    #[must_use]
    pub fn status_line(&self) -> String {
        match self.failure {
            None => format!("{}: Passed", self.scenario_name),
            Some(kind) => format!("{}: Failed ({kind})", self.scenario_name),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub profile_label: String,
    pub artifacts_dir: String,
    pub capture_artifacts: bool,
}

/// Runs every scenario against the shared session, in order.
///
/// Failures are classified and recorded; one scenario's failure never
/// prevents later scenarios from running. No retries, and no runner-level
/// deadline beyond the waits inside each scenario body.
pub async fn run_all(
    session: &Session,
    scenarios: &[(String, Box<dyn StoreScenario>)],
    ctx: &mut ScenarioCtx,
    options: &RunOptions,
) -> Vec<ScenarioResult> {
    let mut results = Vec::with_capacity(scenarios.len());

    for (key, scenario) in scenarios {
        let started = Instant::now();
        let outcome = scenario.run(session, ctx).await;
        let duration = started.elapsed();

        match &outcome {
            Ok(()) => {
                println!(
                    "✅ [{}] {} - {:?}",
                    options.profile_label.green(),
                    scenario.name(),
                    duration
                );
            }
            Err(err) => {
                eprintln!(
                    "❌ [{}] {} - {:?}: {} [{}]",
                    options.profile_label.red(),
                    scenario.name(),
                    duration,
                    err,
                    err.kind()
                );
                if options.capture_artifacts {
                    let dir = util::artifacts_dir(&options.artifacts_dir, &options.profile_label, key);
                    let _ = util::capture_artifacts(session.driver(), &dir, err).await;
                }
            }
        }

        results.push(ScenarioResult::from_outcome(scenario.name(), outcome, duration));
    }

    results
}
