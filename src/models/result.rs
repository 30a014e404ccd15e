//! Schedule result models.

use serde::{Deserialize, Serialize};

/// Display label used for the mandatory post-duty rest shift.
pub const OFF_LABEL: &str = "off";

/// The outcome of a scheduling run.
///
/// Infeasibility after the full relaxation cascade is an expected, handled
/// outcome and is reported here rather than as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScheduleOutcome {
    /// A schedule was found at some relaxation level.
    Solved(ScheduleResult),
    /// All four relaxation levels were attempted without a solution.
    Exhausted {
        /// Notes describing the relaxations attempted at every level.
        relaxation_notes: Vec<String>,
    },
}

impl ScheduleOutcome {
    /// Whether a schedule was produced.
    pub fn is_solved(&self) -> bool {
        matches!(self, ScheduleOutcome::Solved(_))
    }

    /// Returns the schedule result, if one was produced.
    pub fn result(&self) -> Option<&ScheduleResult> {
        match self {
            ScheduleOutcome::Solved(result) => Some(result),
            ScheduleOutcome::Exhausted { .. } => None,
        }
    }
}

/// A successfully assembled schedule, read-only to downstream consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// The target year.
    pub year: i32,
    /// The target month (1-12).
    pub month: u32,
    /// Number of days in the target month.
    pub day_count: u32,
    /// The relaxation level the accepted solution was found at (0-3).
    pub relaxation_level: u8,
    /// Notes describing the relaxations at earlier, rejected levels.
    pub relaxation_notes: Vec<String>,
    /// The objective value of the accepted solution.
    pub objective: i64,
    /// Per-employee schedules, in roster order.
    pub rows: Vec<EmployeeSchedule>,
}

/// One employee's resolved month, with fairness and satisfaction counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeSchedule {
    /// The employee name.
    pub employee: String,
    /// Resolved shift label for each day of the month.
    pub shifts: Vec<String>,
    /// Number of assignments per duty location, in duty order.
    pub duty_counts: Vec<u32>,
    /// Total duty assignments across all locations.
    pub total_duty_count: u32,
    /// Number of double-duty (duty, off, duty) patterns worked.
    pub double_duty_count: u32,
    /// Number of requested holiday days.
    pub holidays_requested: u32,
    /// Number of requested holiday days actually assigned the holiday shift.
    pub holidays_satisfied: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> ScheduleResult {
        ScheduleResult {
            year: 2025,
            month: 6,
            day_count: 30,
            relaxation_level: 1,
            relaxation_notes: vec!["all soft rules active".to_string()],
            objective: 45,
            rows: vec![EmployeeSchedule {
                employee: "Alex".to_string(),
                shifts: vec!["Station A".to_string(), OFF_LABEL.to_string()],
                duty_counts: vec![1],
                total_duty_count: 1,
                double_duty_count: 0,
                holidays_requested: 0,
                holidays_satisfied: 0,
            }],
        }
    }

    #[test]
    fn test_solved_outcome_accessors() {
        let outcome = ScheduleOutcome::Solved(sample_result());
        assert!(outcome.is_solved());
        assert_eq!(outcome.result().unwrap().relaxation_level, 1);
    }

    #[test]
    fn test_exhausted_outcome_has_no_result() {
        let outcome = ScheduleOutcome::Exhausted {
            relaxation_notes: vec!["note".to_string()],
        };
        assert!(!outcome.is_solved());
        assert!(outcome.result().is_none());
    }

    #[test]
    fn test_outcome_serialization_tags() {
        let solved = serde_json::to_value(ScheduleOutcome::Solved(sample_result())).unwrap();
        assert_eq!(solved["status"], "solved");
        assert_eq!(solved["relaxation_level"], 1);

        let exhausted = serde_json::to_value(ScheduleOutcome::Exhausted {
            relaxation_notes: vec![],
        })
        .unwrap();
        assert_eq!(exhausted["status"], "exhausted");
    }

    #[test]
    fn test_outcome_roundtrip() {
        let outcome = ScheduleOutcome::Solved(sample_result());
        let json = serde_json::to_string(&outcome).unwrap();
        let back: ScheduleOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(outcome, back);
    }
}
