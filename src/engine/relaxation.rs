//! The relaxation cascade orchestrating solve attempts.

use std::time::Duration;

use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::models::{ScheduleOutcome, ScheduleRequest};

use super::assemble::assemble;
use super::context::SolveContext;
use super::model::{AttemptOutcome, PostingConflict, build_model};
use super::plan::{RELAXATION_LEVELS, SolvePlan};

/// The scheduling engine.
///
/// Holds only configuration; every [`Scheduler::solve`] call builds its own
/// context and model, so a single instance can serve concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    config: EngineConfig,
}

impl Scheduler {
    /// Creates a scheduler with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Solves a scheduling request under the relaxation cascade.
    ///
    /// Levels are attempted strictly in order and the first solution found
    /// is accepted; a solution at level `n` is always preferred over any
    /// solution a later level could produce. Validation failures are
    /// errors, while exhaustion of all levels is a reported outcome.
    pub fn solve(&self, request: &ScheduleRequest) -> EngineResult<ScheduleOutcome> {
        let ctx = SolveContext::new(request, &self.config)?;
        let budget = Duration::from_secs(self.config.time_budget_secs);
        info!(
            month = %request.month,
            employees = ctx.roster.len(),
            duties = ctx.n_duties(),
            "starting relaxation cascade"
        );

        let mut notes = Vec::new();
        for level in 0..RELAXATION_LEVELS {
            let plan = SolvePlan::at_level(&self.config.weights, level);
            info!(level, "building model");
            // A rejected post at build time is already a proof of
            // infeasibility for this level.
            let attempt = match build_model(&ctx, &plan) {
                Ok(model) => model.solve(budget),
                Err(PostingConflict) => AttemptOutcome::Infeasible,
            };
            match attempt {
                AttemptOutcome::Solved(attempt) => {
                    info!(
                        level,
                        objective = attempt.objective,
                        proven_optimal = attempt.proven_optimal,
                        "schedule accepted"
                    );
                    // Notes cover only the rejected levels before this one.
                    return Ok(ScheduleOutcome::Solved(assemble(&ctx, &attempt, level, notes)));
                }
                AttemptOutcome::Infeasible => {
                    warn!(level, "model infeasible, relaxing");
                }
                AttemptOutcome::Inconclusive => {
                    warn!(level, "time budget exhausted without a solution, relaxing");
                }
            }
            notes.push(SolvePlan::describe(level).to_string());
        }

        warn!("all relaxation levels exhausted");
        Ok(ScheduleOutcome::Exhausted {
            relaxation_notes: notes,
        })
    }

    /// Returns the scheduler's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
