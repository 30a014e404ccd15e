//! The immutable request context consumed by the engine.

use serde::{Deserialize, Serialize};

use super::month::TargetMonth;
use super::requirements::{
    CrossMonthTail, HardLeave, HolidayRequests, PriorityTable, SoftPreferences,
};
use super::roster::DutyLocation;

fn default_holiday_label() -> String {
    "holiday".to_string()
}

/// A complete, self-contained scheduling request.
///
/// Every solve invocation receives its own request context; the engine holds
/// no month or roster state between calls, so overlapping builds can never
/// observe each other's context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// The target month.
    pub month: TargetMonth,
    /// Ordered unique employee name list.
    pub employees: Vec<String>,
    /// Optional designation of one employee as the relief substitute.
    #[serde(default)]
    pub relief: Option<String>,
    /// Ordered duty-location list; at most one may be periodic.
    pub duties: Vec<DutyLocation>,
    /// Display name used for the holiday shift in results.
    #[serde(default = "default_holiday_label")]
    pub holiday_label: String,
    /// Days forced to the holiday shift.
    #[serde(default)]
    pub hard_leave: HardLeave,
    /// Signed per-(employee, day, duty) soft preference penalties.
    #[serde(default)]
    pub preferences: SoftPreferences,
    /// Stored per-employee duty priorities, expanded through the configured
    /// penalty table when the solve context is built.
    #[serde(default)]
    pub priorities: PriorityTable,
    /// Days on which the holiday shift is preferred but not forced.
    #[serde(default)]
    pub holiday_requests: HolidayRequests,
    /// Duty state carried over from the previous month's tail.
    #[serde(default)]
    pub cross_month_tail: CrossMonthTail,
}

impl ScheduleRequest {
    /// Creates a minimal request with no requirement sets.
    pub fn new(month: TargetMonth, employees: Vec<String>, duties: Vec<DutyLocation>) -> Self {
        Self {
            month,
            employees,
            relief: None,
            duties,
            holiday_label: default_holiday_label(),
            hard_leave: HardLeave::new(),
            preferences: SoftPreferences::new(),
            priorities: PriorityTable::default(),
            holiday_requests: HolidayRequests::new(),
            cross_month_tail: CrossMonthTail::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_request() {
        let json = r#"{
            "month": { "year": 2025, "month": 6 },
            "employees": ["Alex", "Blair", "Casey"],
            "duties": [{ "name": "Station A" }]
        }"#;

        let request: ScheduleRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.month, TargetMonth::new(2025, 6));
        assert_eq!(request.employees.len(), 3);
        assert_eq!(request.holiday_label, "holiday");
        assert!(request.relief.is_none());
        assert!(!request.duties[0].is_periodic());
    }

    #[test]
    fn test_deserialize_periodic_duty_and_relief() {
        let json = r#"{
            "month": { "year": 2025, "month": 6 },
            "employees": ["Alex", "Relief"],
            "relief": "Relief",
            "duties": [
                { "name": "Station A" },
                { "name": "Patrol", "periodic_anchor": "2025-06-01" }
            ],
            "holiday_label": "leave"
        }"#;

        let request: ScheduleRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.relief.as_deref(), Some("Relief"));
        assert!(request.duties[1].is_periodic());
        assert_eq!(request.holiday_label, "leave");
    }

    #[test]
    fn test_request_roundtrip() {
        let request = ScheduleRequest::new(
            TargetMonth::new(2025, 7),
            vec!["Alex".to_string()],
            vec![DutyLocation::new("Station A")],
        );
        let json = serde_json::to_string(&request).unwrap();
        let back: ScheduleRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request, back);
    }
}
