//! Constraint model construction for one solve attempt.
//!
//! The builder turns a [`SolveContext`] and a [`SolvePlan`] into a pumpkin
//! constraint model: 0-1 shift indicator variables, the hard rules that hold
//! at every relaxation level, the auxiliary variables the plan asks for, and
//! a single objective variable tied to the weighted penalty sum. Auxiliary
//! variables are kept in collections indexed by employee and day, so nothing
//! is ever looked up by generated variable names.
//!
//! Posting a constraint runs root propagation; a rejected post means the
//! level is already proven infeasible, and the builder stops there rather
//! than touching the now-inconsistent solver again.

use std::time::Duration;

use pumpkin_solver::Solver;
use pumpkin_solver::constraints as cp;
use pumpkin_solver::optimisation::OptimisationDirection;
use pumpkin_solver::optimisation::linear_sat_unsat::LinearSatUnsat;
use pumpkin_solver::results::{OptimisationResult, ProblemSolution};
use pumpkin_solver::termination::TimeBudget;
use pumpkin_solver::variables::{DomainId, TransformableVariable};
use tracing::debug;

use super::context::SolveContext;
use super::plan::SolvePlan;

/// A constraint was rejected at posting time: root propagation already
/// proves this attempt infeasible before any search starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PostingConflict;

/// A constraint model ready to be handed to the solver.
pub(crate) struct BuiltModel {
    solver: Solver,
    /// Shift indicator variables, indexed `[employee][day][shift]`.
    shift_vars: Vec<Vec<Vec<DomainId>>>,
    /// The objective variable the solver minimizes.
    objective: DomainId,
    n_shifts: usize,
    off_shift: usize,
}

/// The solver's verdict on one attempt.
pub(crate) enum AttemptOutcome {
    /// A solution was found; `proven_optimal` distinguishes optimal from
    /// merely feasible.
    Solved(SolvedAttempt),
    /// The model is infeasible at this relaxation level.
    Infeasible,
    /// The time budget ran out before any solution was found.
    Inconclusive,
}

/// Variable values read back from an accepted solution.
pub(crate) struct SolvedAttempt {
    /// Whether the solver proved optimality before the budget ran out.
    pub proven_optimal: bool,
    /// Resolved shift index per `[employee][day]`.
    pub shifts: Vec<Vec<usize>>,
    /// The objective value of the solution.
    pub objective: i64,
}

/// Builds the constraint model for one (context, plan) pair.
///
/// Returns [`PostingConflict`] as soon as any posted constraint is
/// rejected; the caller treats that as attempt infeasibility. No variables
/// or constraints are created after a failed post.
pub(crate) fn build_model(
    ctx: &SolveContext,
    plan: &SolvePlan,
) -> Result<BuiltModel, PostingConflict> {
    let mut solver = Solver::default();
    let tag = solver.new_constraint_tag();

    let n_employees = ctx.roster.len();
    let n_days = ctx.n_days;
    let n_duties = ctx.n_duties();
    let n_shifts = ctx.n_shifts();
    let holiday = ctx.holiday_shift();
    let off = ctx.off_shift();

    // Shift indicators: w[e][d][s] == 1 iff employee e holds shift s on day d.
    let shift_vars: Vec<Vec<Vec<DomainId>>> = (0..n_employees)
        .map(|_| {
            (0..n_days)
                .map(|_| (0..n_shifts).map(|_| solver.new_bounded_integer(0, 1)).collect())
                .collect()
        })
        .collect();

    // Exactly one shift per employee and day.
    for row in shift_vars.iter().flatten() {
        let terms: Vec<_> = row.iter().map(|v| v.scaled(1)).collect();
        solver
            .add_constraint(cp::equals(terms, 1, tag))
            .post()
            .map_err(|_| PostingConflict)?;
    }

    // Daily coverage: one employee per duty, except the periodic duty which
    // is covered only on even-parity days from its anchor.
    for d in 0..n_days {
        for s in 0..n_duties {
            let covered = match ctx.periodic {
                Some(p) if p.duty == s => {
                    if ctx.periodic_covered(d).unwrap_or(true) { 1 } else { 0 }
                }
                _ => 1,
            };
            let terms: Vec<_> = (0..n_employees)
                .map(|e| shift_vars[e][d][s].scaled(1))
                .collect();
            solver
                .add_constraint(cp::equals(terms, covered, tag))
                .post()
                .map_err(|_| PostingConflict)?;
        }
    }

    // Mandatory rest: a duty on day d forces off on day d+1.
    for e in 0..n_employees {
        for d in 0..n_days.saturating_sub(1) {
            for s in 0..n_duties {
                let terms = vec![
                    shift_vars[e][d + 1][off].scaled(1),
                    shift_vars[e][d][s].scaled(-1),
                ];
                solver
                    .add_constraint(cp::greater_than_or_equals(terms, 0, tag))
                    .post()
                    .map_err(|_| PostingConflict)?;
            }
        }
    }

    // Off requires a duty on the previous day.
    for e in 0..n_employees {
        for d in 1..n_days {
            let mut terms: Vec<_> = (0..n_duties)
                .map(|s| shift_vars[e][d - 1][s].scaled(1))
                .collect();
            terms.push(shift_vars[e][d][off].scaled(-1));
            solver
                .add_constraint(cp::greater_than_or_equals(terms, 0, tag))
                .post()
                .map_err(|_| PostingConflict)?;
        }
    }

    // Never two consecutive off days.
    for e in 0..n_employees {
        for d in 0..n_days.saturating_sub(1) {
            let terms = vec![
                shift_vars[e][d][off].scaled(1),
                shift_vars[e][d + 1][off].scaled(1),
            ];
            solver
                .add_constraint(cp::less_than_or_equals(terms, 1, tag))
                .post()
                .map_err(|_| PostingConflict)?;
        }
    }

    // Hard leave: forced holiday shifts, unconditional at every level.
    for (e, days) in ctx.hard_leave.iter().enumerate() {
        for &day in days {
            let terms = vec![shift_vars[e][day][holiday].scaled(1)];
            solver
                .add_constraint(cp::equals(terms, 1, tag))
                .post()
                .map_err(|_| PostingConflict)?;
        }
    }

    // Cross-month continuity.
    let mut cross_month_vars: Vec<DomainId> = Vec::new();
    for (e, tail) in ctx.tail.iter().enumerate() {
        if tail.duty_day_before {
            let terms = vec![shift_vars[e][0][off].scaled(1)];
            solver
                .add_constraint(cp::equals(terms, 1, tag))
                .post()
                .map_err(|_| PostingConflict)?;
        }
        if tail.duty_two_days_before {
            if plan.soft_cross_month {
                // Indicator equal to "works any duty on day 0"; exactly-one
                // keeps the duty sum within 0..=1.
                let indicator = solver.new_bounded_integer(0, 1);
                let mut terms = vec![indicator.scaled(1)];
                terms.extend((0..n_duties).map(|s| shift_vars[e][0][s].scaled(-1)));
                solver
                    .add_constraint(cp::equals(terms, 0, tag))
                    .post()
                    .map_err(|_| PostingConflict)?;
                cross_month_vars.push(indicator);
            } else {
                // Strictest level: any day-0 duty is structurally banned.
                for s in 0..n_duties {
                    let terms = vec![shift_vars[e][0][s].scaled(1)];
                    solver
                        .add_constraint(cp::equals(terms, 0, tag))
                        .post()
                        .map_err(|_| PostingConflict)?;
                }
            }
        }
    }

    // Works-a-duty flags.
    let mut duty_flags: Vec<Vec<DomainId>> = Vec::with_capacity(n_employees);
    for e in 0..n_employees {
        let mut flags = Vec::with_capacity(n_days);
        for d in 0..n_days {
            let flag = solver.new_bounded_integer(0, 1);
            let mut terms = vec![flag.scaled(1)];
            terms.extend((0..n_duties).map(|s| shift_vars[e][d][s].scaled(-1)));
            solver
                .add_constraint(cp::equals(terms, 0, tag))
                .post()
                .map_err(|_| PostingConflict)?;
            flags.push(flag);
        }
        duty_flags.push(flags);
    }

    // Double-duty windows: indicator equal to "duty on d and duty on d+2",
    // kept per employee for the counts below.
    let mut double_duty_windows: Vec<Vec<DomainId>> = vec![Vec::new(); n_employees];
    if plan.double_duty_terms {
        for e in 0..n_employees {
            for d in 0..n_days.saturating_sub(2) {
                let window = solver.new_bounded_integer(0, 1);
                let and_terms = vec![
                    window.scaled(1),
                    duty_flags[e][d].scaled(-1),
                    duty_flags[e][d + 2].scaled(-1),
                ];
                solver
                    .add_constraint(cp::greater_than_or_equals(and_terms, -1, tag))
                    .post()
                    .map_err(|_| PostingConflict)?;
                for &day in &[d, d + 2] {
                    let cap = vec![duty_flags[e][day].scaled(1), window.scaled(-1)];
                    solver
                        .add_constraint(cp::greater_than_or_equals(cap, 0, tag))
                        .post()
                        .map_err(|_| PostingConflict)?;
                }
                double_duty_windows[e].push(window);
            }
        }
    }

    // Fairness gap: max and min of per-employee double-duty counts,
    // strictest level only.
    let count_bound = (n_days / 2) as i32;
    let fairness = if plan.fairness_gap {
        let mut counts: Vec<DomainId> = Vec::with_capacity(n_employees);
        for e in 0..n_employees {
            let count = solver.new_bounded_integer(0, count_bound);
            let mut terms = vec![count.scaled(1)];
            terms.extend(double_duty_windows[e].iter().map(|w| w.scaled(-1)));
            solver
                .add_constraint(cp::equals(terms, 0, tag))
                .post()
                .map_err(|_| PostingConflict)?;
            counts.push(count);
        }
        let max = solver.new_bounded_integer(0, count_bound);
        let min = solver.new_bounded_integer(0, count_bound);
        solver
            .add_constraint(cp::maximum(counts.clone(), max, tag))
            .post()
            .map_err(|_| PostingConflict)?;
        solver
            .add_constraint(cp::minimum(counts, min, tag))
            .post()
            .map_err(|_| PostingConflict)?;
        Some((max, min))
    } else {
        None
    };

    // Holiday violations: 1 iff the requested day is not a holiday shift.
    let mut holiday_violations: Vec<DomainId> = Vec::with_capacity(ctx.holiday_requests.len());
    for &(e, day) in &ctx.holiday_requests {
        let violation = solver.new_bounded_integer(0, 1);
        let terms = vec![violation.scaled(1), shift_vars[e][day][holiday].scaled(1)];
        solver
            .add_constraint(cp::equals(terms, 1, tag))
            .post()
            .map_err(|_| PostingConflict)?;
        holiday_violations.push(violation);
    }

    // Objective: a single variable equal to the weighted penalty sum.
    let w = &plan.weights;
    let windows_total: usize = double_duty_windows.iter().map(Vec::len).sum();
    let relief_terms = if ctx.roster.relief().is_some() {
        n_days * n_duties
    } else {
        0
    };
    let mut upper: i64 = w.relief as i64 * relief_terms as i64
        + w.holiday as i64 * holiday_violations.len() as i64
        + w.double_duty as i64 * windows_total as i64
        + w.cross_month as i64 * cross_month_vars.len() as i64;
    if fairness.is_some() {
        upper += w.fairness_gap as i64 * count_bound as i64;
    }
    let mut lower: i64 = 0;
    if plan.preference_terms {
        for penalty in ctx.preferences.values() {
            if *penalty >= 0 {
                upper += *penalty as i64;
            } else {
                lower += *penalty as i64;
            }
        }
    }
    let objective = solver.new_bounded_integer(clamp(lower), clamp(upper));

    let mut terms = vec![objective.scaled(1)];
    if let Some(relief) = ctx.roster.relief() {
        for d in 0..n_days {
            for s in 0..n_duties {
                terms.push(shift_vars[relief][d][s].scaled(-w.relief));
            }
        }
    }
    for violation in &holiday_violations {
        terms.push(violation.scaled(-w.holiday));
    }
    for window in double_duty_windows.iter().flatten() {
        terms.push(window.scaled(-w.double_duty));
    }
    for indicator in &cross_month_vars {
        terms.push(indicator.scaled(-w.cross_month));
    }
    if let Some((max, min)) = fairness {
        terms.push(max.scaled(-w.fairness_gap));
        terms.push(min.scaled(w.fairness_gap));
    }
    if plan.preference_terms {
        for (&(e, day, duty), &penalty) in &ctx.preferences {
            terms.push(shift_vars[e][day][duty].scaled(-penalty));
        }
    }
    solver
        .add_constraint(cp::equals(terms, 0, tag))
        .post()
        .map_err(|_| PostingConflict)?;

    Ok(BuiltModel {
        solver,
        shift_vars,
        objective,
        n_shifts,
        off_shift: off,
    })
}

fn clamp(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

impl BuiltModel {
    /// Minimizes the objective within the time budget and reads the
    /// solution back, if one exists.
    pub fn solve(mut self, budget: Duration) -> AttemptOutcome {
        let mut brancher = self.solver.default_brancher();
        let mut termination = TimeBudget::starting_now(budget);

        fn noop_callback<B>(
            _: &Solver,
            _: pumpkin_solver::results::SolutionReference,
            _: &B,
        ) {
        }
        let result = self.solver.optimise(
            &mut brancher,
            &mut termination,
            LinearSatUnsat::new(OptimisationDirection::Minimise, self.objective, noop_callback),
        );

        let (solution, proven_optimal) = match result {
            OptimisationResult::Optimal(solution) => (solution, true),
            OptimisationResult::Satisfiable(solution) => (solution, false),
            OptimisationResult::Unsatisfiable => return AttemptOutcome::Infeasible,
            OptimisationResult::Unknown => return AttemptOutcome::Inconclusive,
        };

        let shifts: Vec<Vec<usize>> = self
            .shift_vars
            .iter()
            .map(|days| {
                days.iter()
                    .map(|row| {
                        // The exactly-one constraint guarantees a match.
                        (0..self.n_shifts)
                            .find(|&s| solution.get_integer_value(row[s]) == 1)
                            .unwrap_or(self.off_shift)
                    })
                    .collect()
            })
            .collect();
        let objective = i64::from(solution.get_integer_value(self.objective));
        debug!(objective, proven_optimal, "solver returned a solution");

        AttemptOutcome::Solved(SolvedAttempt {
            proven_optimal,
            shifts,
            objective,
        })
    }
}
