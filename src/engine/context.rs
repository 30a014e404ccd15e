//! Solve context: validated, id-resolved request state for one invocation.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Roster, ScheduleRequest, TailFlags};

/// The periodic duty and its coverage anchor.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PeriodicDuty {
    /// Index of the periodic duty location.
    pub duty: usize,
    /// Anchor date of the every-other-day rule.
    pub anchor: NaiveDate,
}

/// A validated scheduling request with every name resolved to an ordinal id.
///
/// Requirement-set entries naming employees or duties absent from the
/// request are dropped here; the cross-month tail in particular tolerates
/// roster turnover between months.
#[derive(Debug)]
pub(crate) struct SolveContext {
    pub year: i32,
    pub month: u32,
    pub n_days: usize,
    pub roster: Roster,
    pub duty_names: Vec<String>,
    pub holiday_label: String,
    pub periodic: Option<PeriodicDuty>,
    first_day: NaiveDate,
    /// Hard-leave days per employee.
    pub hard_leave: Vec<BTreeSet<usize>>,
    /// Resolved signed preference penalties keyed by (employee, day, duty).
    pub preferences: HashMap<(usize, usize, usize), i32>,
    /// Resolved holiday requests as (employee, day) pairs.
    pub holiday_requests: BTreeSet<(usize, usize)>,
    /// Cross-month tail flags per employee.
    pub tail: Vec<TailFlags>,
}

impl SolveContext {
    /// Validates a request against the configuration and resolves all names.
    pub fn new(request: &ScheduleRequest, config: &EngineConfig) -> EngineResult<Self> {
        let roster = Roster::new(request.employees.clone(), request.relief.as_deref())?;

        if request.duties.is_empty() {
            return Err(EngineError::NoDuties);
        }
        let mut periodic = None;
        for (duty, location) in request.duties.iter().enumerate() {
            if let Some(anchor) = location.periodic_anchor {
                if periodic.is_some() {
                    return Err(EngineError::MultiplePeriodicDuties {
                        name: location.name.clone(),
                    });
                }
                periodic = Some(PeriodicDuty { duty, anchor });
            }
        }

        let first_day = request.month.first_day()?;
        let n_days = request.month.day_count()? as usize;
        let duty_names: Vec<String> = request.duties.iter().map(|d| d.name.clone()).collect();

        let mut hard_leave = vec![BTreeSet::new(); roster.len()];
        for (name, days) in &request.hard_leave.0 {
            if let Some(employee) = roster.index_of(name) {
                for &day in days {
                    if (day as usize) < n_days {
                        hard_leave[employee].insert(day as usize);
                    }
                }
            }
        }

        // Priority tables expand into preference entries appended after the
        // free-text ones, so in the fold below they take precedence.
        let mut expanded = request.preferences.clone();
        expanded.apply_priorities(
            &request.priorities,
            &config.priority_penalties,
            n_days as u32,
        );
        let mut preferences = HashMap::new();
        for entry in expanded.entries() {
            let Some(employee) = roster.index_of(&entry.employee) else {
                continue;
            };
            let Some(duty) = duty_names.iter().position(|d| *d == entry.duty) else {
                continue;
            };
            if (entry.day as usize) < n_days {
                preferences.insert((employee, entry.day as usize, duty), entry.penalty);
            }
        }

        let mut holiday_requests = BTreeSet::new();
        for req in &request.holiday_requests.0 {
            if let Some(employee) = roster.index_of(&req.employee) {
                if (req.day as usize) < n_days {
                    holiday_requests.insert((employee, req.day as usize));
                }
            }
        }

        let mut tail = vec![TailFlags::default(); roster.len()];
        for (name, flags) in &request.cross_month_tail.0 {
            // Unknown employees in the tail are dropped without comment.
            if let Some(employee) = roster.index_of(name) {
                tail[employee] = *flags;
            }
        }

        Ok(Self {
            year: request.month.year,
            month: request.month.month,
            n_days,
            roster,
            duty_names,
            holiday_label: request.holiday_label.clone(),
            periodic,
            first_day,
            hard_leave,
            preferences,
            holiday_requests,
            tail,
        })
    }

    /// Number of duty locations.
    pub fn n_duties(&self) -> usize {
        self.duty_names.len()
    }

    /// Number of shift kinds: every duty, then holiday, then off.
    pub fn n_shifts(&self) -> usize {
        self.n_duties() + 2
    }

    /// Shift index of the holiday shift.
    pub fn holiday_shift(&self) -> usize {
        self.n_duties()
    }

    /// Shift index of the mandatory-rest off shift.
    pub fn off_shift(&self) -> usize {
        self.n_duties() + 1
    }

    /// Display label for a shift index.
    pub fn shift_label(&self, shift: usize) -> &str {
        if shift < self.n_duties() {
            &self.duty_names[shift]
        } else if shift == self.holiday_shift() {
            &self.holiday_label
        } else {
            crate::models::OFF_LABEL
        }
    }

    /// Whether the periodic duty is staffed on the given day.
    ///
    /// Coverage follows even parity of the day offset from the anchor date;
    /// `rem_euclid` keeps the rule stable for anchors after the month start.
    pub fn periodic_covered(&self, day: usize) -> Option<bool> {
        self.periodic.map(|p| {
            let offset = (self.first_day - p.anchor).num_days() + day as i64;
            offset.rem_euclid(2) == 0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CrossMonthTail, DutyLocation, PreferenceEntry, ScheduleRequest, TargetMonth,
    };
    use proptest::prelude::*;

    fn base_request() -> ScheduleRequest {
        ScheduleRequest::new(
            TargetMonth::new(2025, 6),
            vec!["Alex".to_string(), "Blair".to_string(), "Casey".to_string()],
            vec![DutyLocation::new("Station A")],
        )
    }

    #[test]
    fn test_context_shape() {
        let ctx = SolveContext::new(&base_request(), &EngineConfig::default()).unwrap();
        assert_eq!(ctx.n_days, 30);
        assert_eq!(ctx.n_duties(), 1);
        assert_eq!(ctx.n_shifts(), 3);
        assert_eq!(ctx.holiday_shift(), 1);
        assert_eq!(ctx.off_shift(), 2);
        assert_eq!(ctx.shift_label(0), "Station A");
        assert_eq!(ctx.shift_label(1), "holiday");
        assert_eq!(ctx.shift_label(2), "off");
    }

    #[test]
    fn test_no_duties_is_error() {
        let mut request = base_request();
        request.duties.clear();
        let result = SolveContext::new(&request, &EngineConfig::default());
        assert!(matches!(result, Err(EngineError::NoDuties)));
    }

    #[test]
    fn test_two_periodic_duties_is_error() {
        let anchor = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let mut request = base_request();
        request.duties = vec![
            DutyLocation::periodic("Patrol", anchor),
            DutyLocation::periodic("Escort", anchor),
        ];
        let result = SolveContext::new(&request, &EngineConfig::default());
        assert!(matches!(
            result,
            Err(EngineError::MultiplePeriodicDuties { name }) if name == "Escort"
        ));
    }

    #[test]
    fn test_unknown_names_in_requirement_sets_are_dropped() {
        let mut request = base_request();
        request.hard_leave.insert("Nobody", 1);
        request.holiday_requests.insert("Nobody", 2);
        request.preferences.push(PreferenceEntry {
            employee: "Nobody".to_string(),
            day: 0,
            duty: "Station A".to_string(),
            penalty: 5,
        });
        let mut recorded = HashMap::new();
        recorded.insert("Nobody".to_string(), vec!["Station A".to_string()]);
        request.cross_month_tail =
            CrossMonthTail::from_recorded_days(&recorded, &["Station A".to_string()]);

        let ctx = SolveContext::new(&request, &EngineConfig::default()).unwrap();
        assert!(ctx.hard_leave.iter().all(|days| days.is_empty()));
        assert!(ctx.holiday_requests.is_empty());
        assert!(ctx.preferences.is_empty());
        assert!(ctx.tail.iter().all(|t| *t == TailFlags::default()));
    }

    #[test]
    fn test_out_of_range_days_are_dropped() {
        let mut request = base_request();
        request.hard_leave.insert("Alex", 99);
        request.holiday_requests.insert("Blair", 30);
        let ctx = SolveContext::new(&request, &EngineConfig::default()).unwrap();
        assert!(ctx.hard_leave[0].is_empty());
        assert!(ctx.holiday_requests.is_empty());
    }

    #[test]
    fn test_priority_expansion_overrides_free_text_preference() {
        let mut request = base_request();
        request.preferences.push(PreferenceEntry {
            employee: "Alex".to_string(),
            day: 3,
            duty: "Station A".to_string(),
            penalty: -5,
        });
        request
            .priorities
            .0
            .entry("Alex".to_string())
            .or_default()
            .insert("Station A".to_string(), 1);

        let ctx = SolveContext::new(&request, &EngineConfig::default()).unwrap();
        // Priority level 1 maps to 10 under the default table and wins.
        assert_eq!(ctx.preferences[&(0, 3, 0)], 10);
    }

    #[test]
    fn test_periodic_parity_from_anchor() {
        // Anchor two days before the month start: day 0 has even offset.
        let anchor = NaiveDate::from_ymd_opt(2025, 5, 30).unwrap();
        let mut request = base_request();
        request.duties.push(DutyLocation::periodic("Patrol", anchor));
        let ctx = SolveContext::new(&request, &EngineConfig::default()).unwrap();
        assert_eq!(ctx.periodic_covered(0), Some(true));
        assert_eq!(ctx.periodic_covered(1), Some(false));
        assert_eq!(ctx.periodic_covered(2), Some(true));
    }

    #[test]
    fn test_periodic_anchor_after_month_start() {
        // Anchor inside the month: days before it must keep alternating
        // with the same parity.
        let anchor = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
        let mut request = base_request();
        request.duties.push(DutyLocation::periodic("Patrol", anchor));
        let ctx = SolveContext::new(&request, &EngineConfig::default()).unwrap();
        assert_eq!(ctx.periodic_covered(3), Some(true)); // anchor day itself
        assert_eq!(ctx.periodic_covered(2), Some(false));
        assert_eq!(ctx.periodic_covered(1), Some(true));
    }

    proptest! {
        #[test]
        fn prop_periodic_coverage_alternates(anchor_offset in -60i64..60, day in 0usize..27) {
            let anchor = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
                + chrono::Duration::days(anchor_offset);
            let mut request = base_request();
            request.duties.push(DutyLocation::periodic("Patrol", anchor));
            let ctx = SolveContext::new(&request, &EngineConfig::default()).unwrap();
            let today = ctx.periodic_covered(day).unwrap();
            let next = ctx.periodic_covered(day + 1).unwrap();
            prop_assert_ne!(today, next);
        }
    }
}
