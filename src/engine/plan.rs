//! Objective weights and the relaxation ladder.
//!
//! Each relaxation level is modeled as an explicit policy transforming the
//! solve plan, applied in a fixed order. Level `n` is the base plan with the
//! first `n` policies applied, which keeps every step independently
//! testable and makes the ladder strictly monotonic by construction.

use serde::{Deserialize, Serialize};

/// Number of relaxation levels attempted before declaring infeasibility.
pub const RELAXATION_LEVELS: u8 = 4;

/// Weights for the soft terms of the scheduling objective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectiveWeights {
    /// Penalty per duty assignment of the relief employee.
    pub relief: i32,
    /// Penalty per violated holiday request.
    pub holiday: i32,
    /// Penalty per double-duty (duty, off, duty) occurrence.
    pub double_duty: i32,
    /// Penalty for working a duty on day 0 after a duty two days before the
    /// month boundary.
    pub cross_month: i32,
    /// Penalty per unit of max-minus-min spread of double-duty counts.
    pub fairness_gap: i32,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            relief: 10,
            holiday: 50,
            double_duty: 15,
            cross_month: 20,
            fairness_gap: 30,
        }
    }
}

/// One step of the relaxation ladder.
///
/// Policies are cumulative: level `n` applies the first `n` policies of
/// [`RelaxationPolicy::ladder`] to the base plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaxationPolicy {
    /// Drop the fairness-gap term and per-day preference terms; the
    /// cross-month double-duty rule becomes a penalty instead of a ban.
    RelaxFairness,
    /// Cut the relief-usage weight to a tenth, effectively unlocking the
    /// relief employee.
    UnlockRelief,
    /// Cut the holiday-violation weight to a tenth and stop tracking
    /// double-duty windows.
    RelaxHolidays,
}

impl RelaxationPolicy {
    /// The fixed order in which policies are applied.
    pub fn ladder() -> [RelaxationPolicy; 3] {
        [
            RelaxationPolicy::RelaxFairness,
            RelaxationPolicy::UnlockRelief,
            RelaxationPolicy::RelaxHolidays,
        ]
    }

    /// Applies this policy to a solve plan.
    pub fn apply(&self, plan: &mut SolvePlan) {
        match self {
            RelaxationPolicy::RelaxFairness => {
                plan.fairness_gap = false;
                plan.preference_terms = false;
                plan.soft_cross_month = true;
            }
            RelaxationPolicy::UnlockRelief => {
                plan.weights.relief /= 10;
            }
            RelaxationPolicy::RelaxHolidays => {
                plan.weights.holiday /= 10;
                plan.double_duty_terms = false;
            }
        }
    }
}

/// The fully resolved term set and weights for one solve attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolvePlan {
    /// The relaxation level this plan realizes (0-3).
    pub level: u8,
    /// Effective objective weights at this level.
    pub weights: ObjectiveWeights,
    /// Whether the max-minus-min double-duty spread is penalized.
    pub fairness_gap: bool,
    /// Whether per-(employee, day, duty) preference terms are in the objective.
    pub preference_terms: bool,
    /// Whether double-duty windows are tracked and penalized.
    pub double_duty_terms: bool,
    /// Whether a duty two days before the month boundary yields a penalized
    /// indicator (true) or a structural day-0 duty ban (false).
    pub soft_cross_month: bool,
}

impl SolvePlan {
    /// Builds the plan for a relaxation level by folding the policy ladder
    /// over the base weights.
    pub fn at_level(base: &ObjectiveWeights, level: u8) -> Self {
        let mut plan = Self {
            level,
            weights: base.clone(),
            fairness_gap: true,
            preference_terms: true,
            double_duty_terms: true,
            soft_cross_month: false,
        };
        for policy in RelaxationPolicy::ladder().iter().take(level as usize) {
            policy.apply(&mut plan);
        }
        plan
    }

    /// Human-readable description of the relaxation a level applies,
    /// used in diagnostic notes for rejected attempts.
    pub fn describe(level: u8) -> &'static str {
        match level {
            0 => "all soft rules active",
            1 => "double-duty balance relaxed (fairness gap tolerated)",
            2 => "relief employee fully unlocked (usage penalty reduced)",
            _ => "holiday requests may be overridden (violation penalty reduced)",
        }
    }
}
