//! Request types for the roster engine API.
//!
//! The wire format is flatter than the domain model: months are plain
//! `year`/`month` fields, requirement sets are plain maps and lists, and
//! cross-month state arrives as the recorded trailing shift labels of the
//! previous month rather than pre-derived flags.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    CrossMonthTail, DutyLocation, HardLeave, HolidayRequests, PreferenceEntry, PriorityTable,
    ScheduleRequest, SoftPreferences, TargetMonth,
};

fn default_holiday_label() -> String {
    "holiday".to_string()
}

/// A duty location in a scheduling request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DutyBody {
    /// The duty location name.
    pub name: String,
    /// If set, the duty is staffed every other day counted from this date.
    #[serde(default)]
    pub periodic_anchor: Option<NaiveDate>,
}

/// A soft-preference entry in a scheduling request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceBody {
    /// The employee name.
    pub employee: String,
    /// Zero-based day index within the target month.
    pub day: u32,
    /// The duty location name the penalty applies to.
    pub duty: String,
    /// Signed penalty; negative rewards the assignment.
    pub penalty: i32,
}

/// A requested holiday day in a scheduling request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayRequestBody {
    /// The employee name.
    pub employee: String,
    /// Zero-based day index within the target month.
    pub day: u32,
}

/// The body of a POST /schedule request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequestBody {
    /// The target year.
    pub year: i32,
    /// The target month (1-12).
    pub month: u32,
    /// Ordered unique employee names.
    pub employees: Vec<String>,
    /// Optional relief employee designation.
    #[serde(default)]
    pub relief: Option<String>,
    /// Ordered duty locations.
    pub duties: Vec<DutyBody>,
    /// Display name used for the holiday shift in results.
    #[serde(default = "default_holiday_label")]
    pub holiday_label: String,
    /// Days forced to the holiday shift, per employee.
    #[serde(default)]
    pub hard_leave: HashMap<String, Vec<u32>>,
    /// Soft-preference penalties.
    #[serde(default)]
    pub preferences: Vec<PreferenceBody>,
    /// Stored duty-priority levels (0-3) per employee and duty.
    #[serde(default)]
    pub priorities: HashMap<String, HashMap<String, u8>>,
    /// Days on which employees request the holiday shift.
    #[serde(default)]
    pub holiday_requests: Vec<HolidayRequestBody>,
    /// Trailing shift labels from the previous month, oldest first, used to
    /// derive cross-month continuity constraints.
    #[serde(default)]
    pub previous_month: HashMap<String, Vec<String>>,
}

impl From<ScheduleRequestBody> for ScheduleRequest {
    fn from(body: ScheduleRequestBody) -> Self {
        let duty_names: Vec<String> = body.duties.iter().map(|d| d.name.clone()).collect();
        let duties = body
            .duties
            .into_iter()
            .map(|d| match d.periodic_anchor {
                Some(anchor) => DutyLocation::periodic(d.name, anchor),
                None => DutyLocation::new(d.name),
            })
            .collect();

        let mut hard_leave = HardLeave::new();
        for (employee, days) in body.hard_leave {
            for day in days {
                hard_leave.insert(employee.clone(), day);
            }
        }

        let mut preferences = SoftPreferences::new();
        for p in body.preferences {
            preferences.push(PreferenceEntry {
                employee: p.employee,
                day: p.day,
                duty: p.duty,
                penalty: p.penalty,
            });
        }

        let mut holiday_requests = HolidayRequests::new();
        for r in body.holiday_requests {
            holiday_requests.insert(r.employee, r.day);
        }

        ScheduleRequest {
            month: TargetMonth::new(body.year, body.month),
            employees: body.employees,
            relief: body.relief,
            duties,
            holiday_label: body.holiday_label,
            hard_leave,
            preferences,
            priorities: PriorityTable(body.priorities),
            holiday_requests,
            cross_month_tail: CrossMonthTail::from_recorded_days(
                &body.previous_month,
                &duty_names,
            ),
        }
    }
}
