//! Core data models for the roster scheduling engine.
//!
//! This module contains all the domain models used throughout the engine.

mod month;
mod request;
mod requirements;
mod result;
mod roster;

pub use month::TargetMonth;
pub use request::ScheduleRequest;
pub use requirements::{
    CrossMonthTail, HardLeave, HolidayRequest, HolidayRequests, PreferenceEntry, PriorityTable,
    SoftPreferences, TailFlags,
};
pub use result::{EmployeeSchedule, OFF_LABEL, ScheduleOutcome, ScheduleResult};
pub use roster::{DutyLocation, Roster};
