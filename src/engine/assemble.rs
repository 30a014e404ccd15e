//! Assembly of solver output into the read-only schedule result.
//!
//! Shift indices from an accepted solution are resolved back to display
//! labels, and the per-employee counters are derived directly from the
//! resolved schedule rather than read out of solver variables, so they
//! stay accurate at every relaxation level.

use crate::models::{EmployeeSchedule, ScheduleResult};

use super::context::SolveContext;
use super::model::SolvedAttempt;

/// Builds the final schedule result from an accepted solve attempt.
pub(crate) fn assemble(
    ctx: &SolveContext,
    attempt: &SolvedAttempt,
    level: u8,
    relaxation_notes: Vec<String>,
) -> ScheduleResult {
    let n_duties = ctx.n_duties();
    let holiday = ctx.holiday_shift();

    let rows = ctx
        .roster
        .names()
        .iter()
        .enumerate()
        .map(|(e, name)| {
            let assigned = &attempt.shifts[e];
            let shifts: Vec<String> = assigned
                .iter()
                .map(|&s| ctx.shift_label(s).to_string())
                .collect();

            let mut duty_counts = vec![0u32; n_duties];
            for &s in assigned {
                if s < n_duties {
                    duty_counts[s] += 1;
                }
            }
            let total_duty_count = duty_counts.iter().sum();

            let double_duty_count = (0..assigned.len().saturating_sub(2))
                .filter(|&d| assigned[d] < n_duties && assigned[d + 2] < n_duties)
                .count() as u32;

            let requested: Vec<usize> = ctx
                .holiday_requests
                .iter()
                .filter(|(emp, _)| *emp == e)
                .map(|&(_, day)| day)
                .collect();
            let holidays_satisfied =
                requested.iter().filter(|&&day| assigned[day] == holiday).count() as u32;

            EmployeeSchedule {
                employee: name.clone(),
                shifts,
                duty_counts,
                total_duty_count,
                double_duty_count,
                holidays_requested: requested.len() as u32,
                holidays_satisfied,
            }
        })
        .collect();

    ScheduleResult {
        year: ctx.year,
        month: ctx.month,
        day_count: ctx.n_days as u32,
        relaxation_level: level,
        relaxation_notes,
        objective: attempt.objective,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::models::{DutyLocation, ScheduleRequest, TargetMonth};

    fn context_with_request(employees: Vec<&str>) -> SolveContext {
        let request = ScheduleRequest::new(
            TargetMonth::new(2025, 6),
            employees.into_iter().map(String::from).collect(),
            vec![DutyLocation::new("Station A")],
        );
        SolveContext::new(&request, &EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_labels_and_counters() {
        let mut ctx = context_with_request(vec!["Alex"]);
        ctx.holiday_requests.insert((0, 3));
        ctx.n_days = 5;

        // duty, off, duty, holiday, duty: two double-duty windows (0,2) and
        // (2,4); the holiday request on day 3 is satisfied.
        let attempt = SolvedAttempt {
            proven_optimal: true,
            shifts: vec![vec![0, 2, 0, 1, 0]],
            objective: 0,
        };
        let result = assemble(&ctx, &attempt, 0, vec![]);

        let row = &result.rows[0];
        assert_eq!(row.shifts, vec!["Station A", "off", "Station A", "holiday", "Station A"]);
        assert_eq!(row.duty_counts, vec![3]);
        assert_eq!(row.total_duty_count, 3);
        assert_eq!(row.double_duty_count, 2);
        assert_eq!(row.holidays_requested, 1);
        assert_eq!(row.holidays_satisfied, 1);
    }

    #[test]
    fn test_unsatisfied_holiday_request_is_counted() {
        let mut ctx = context_with_request(vec!["Alex"]);
        ctx.holiday_requests.insert((0, 0));
        ctx.n_days = 2;

        let attempt = SolvedAttempt {
            proven_optimal: false,
            shifts: vec![vec![0, 2]],
            objective: 50,
        };
        let result = assemble(&ctx, &attempt, 3, vec!["note".to_string()]);

        assert_eq!(result.relaxation_level, 3);
        assert_eq!(result.relaxation_notes, vec!["note"]);
        assert_eq!(result.objective, 50);
        assert_eq!(result.rows[0].holidays_requested, 1);
        assert_eq!(result.rows[0].holidays_satisfied, 0);
    }

    #[test]
    fn test_rows_follow_roster_order() {
        let mut ctx = context_with_request(vec!["Alex", "Blair"]);
        ctx.n_days = 1;
        let attempt = SolvedAttempt {
            proven_optimal: true,
            shifts: vec![vec![0], vec![2]],
            objective: 0,
        };
        let result = assemble(&ctx, &attempt, 0, vec![]);
        assert_eq!(result.rows[0].employee, "Alex");
        assert_eq!(result.rows[1].employee, "Blair");
        assert_eq!(result.rows[1].total_duty_count, 0);
    }
}
