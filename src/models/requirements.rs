//! Structured requirement sets consumed by the scheduling engine.
//!
//! These types form the output contract of the external requirement
//! translator (free-text request parsing and stored priority tables live
//! outside this crate). The engine only ever sees the structured data
//! defined here, keyed by employee name; names that do not resolve against
//! the current roster are silently dropped during context construction,
//! matching the behavior of requests referencing employees that have since
//! left the roster.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// Days forced to the holiday shift per employee, non-negotiable at every
/// relaxation level. Day indices are zero-based within the target month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardLeave(pub HashMap<String, BTreeSet<u32>>);

impl HardLeave {
    /// Creates an empty hard-leave set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces the given day to the holiday shift for the given employee.
    pub fn insert(&mut self, employee: impl Into<String>, day: u32) {
        self.0.entry(employee.into()).or_default().insert(day);
    }
}

/// A single signed soft-preference penalty for assigning an employee to a
/// duty on a day. Negative penalties reward the assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceEntry {
    /// The employee name.
    pub employee: String,
    /// Zero-based day index within the target month.
    pub day: u32,
    /// The duty location name the penalty applies to.
    pub duty: String,
    /// Signed penalty added to the objective when the assignment is made.
    pub penalty: i32,
}

/// Per-employee duty priority levels (0-3), mapped through a configurable
/// penalty table. Level 0 is an extremely heavy soft penalty, not a ban.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityTable(pub HashMap<String, HashMap<String, u8>>);

/// Ordered soft-preference penalties. Later entries for the same
/// (employee, day, duty) key override earlier ones, so expanded priority
/// tables take precedence over free-text preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftPreferences {
    entries: Vec<PreferenceEntry>,
}

impl SoftPreferences {
    /// Creates an empty preference set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a preference entry.
    pub fn push(&mut self, entry: PreferenceEntry) {
        self.entries.push(entry);
    }

    /// Returns the entries in insertion order.
    pub fn entries(&self) -> &[PreferenceEntry] {
        &self.entries
    }

    /// Expands a priority table into per-day preference entries.
    ///
    /// Each (employee, duty, priority) cell maps through `penalties`; levels
    /// with a positive penalty produce one entry per day of the month,
    /// appended after any existing entries so they take precedence.
    pub fn apply_priorities(
        &mut self,
        priorities: &PriorityTable,
        penalties: &BTreeMap<u8, i32>,
        n_days: u32,
    ) {
        for (employee, duties) in &priorities.0 {
            for (duty, level) in duties {
                let penalty = penalties.get(level).copied().unwrap_or(0);
                if penalty > 0 {
                    for day in 0..n_days {
                        self.entries.push(PreferenceEntry {
                            employee: employee.clone(),
                            day,
                            duty: duty.clone(),
                            penalty,
                        });
                    }
                }
            }
        }
    }
}

/// A day on which an employee prefers (but is not forced) to hold the
/// holiday shift. Violations cost a configurable penalty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HolidayRequest {
    /// The employee name.
    pub employee: String,
    /// Zero-based day index within the target month.
    pub day: u32,
}

/// The set of requested holiday days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRequests(pub BTreeSet<HolidayRequest>);

impl HolidayRequests {
    /// Creates an empty request set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the holiday shift for the given employee and day.
    pub fn insert(&mut self, employee: impl Into<String>, day: u32) {
        self.0.insert(HolidayRequest {
            employee: employee.into(),
            day,
        });
    }
}

/// Whether an employee worked a duty on the last two days of the previous
/// month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TailFlags {
    /// Worked a duty on the final day of the previous month (relative day -1).
    pub duty_day_before: bool,
    /// Worked a duty two days before the month boundary (relative day -2).
    pub duty_two_days_before: bool,
}

/// Cross-month continuity state, derived from the last recorded days of the
/// previous month's schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossMonthTail(pub HashMap<String, TailFlags>);

impl CrossMonthTail {
    /// Creates an empty tail (no cross-month constraints).
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives tail flags from the last recorded shift labels of the
    /// previous month.
    ///
    /// `recorded` maps each employee name to up to three trailing shift
    /// labels, oldest first. A label counts as a duty exactly when it
    /// matches one of `duty_names`; blank or unrecognized labels (including
    /// unrecorded days) count as non-duty.
    pub fn from_recorded_days(
        recorded: &HashMap<String, Vec<String>>,
        duty_names: &[String],
    ) -> Self {
        let mut entries = HashMap::new();
        for (employee, labels) in recorded {
            let mut flags = TailFlags::default();
            let len = labels.len();
            for (i, label) in labels.iter().enumerate() {
                // Oldest-first: the last entry is relative day -1.
                let relative = -((len - i) as i32);
                let is_duty = duty_names.iter().any(|d| d == label);
                match relative {
                    -1 => flags.duty_day_before = is_duty,
                    -2 => flags.duty_two_days_before = is_duty,
                    _ => {}
                }
            }
            entries.insert(employee.clone(), flags);
        }
        Self(entries)
    }

    /// Returns the tail flags recorded for an employee, if any.
    pub fn get(&self, employee: &str) -> Option<TailFlags> {
        self.0.get(employee).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duty_names() -> Vec<String> {
        vec!["Station A".to_string(), "Patrol".to_string()]
    }

    #[test]
    fn test_hard_leave_insert() {
        let mut leave = HardLeave::new();
        leave.insert("Alex", 2);
        leave.insert("Alex", 4);
        assert_eq!(leave.0["Alex"].len(), 2);
    }

    #[test]
    fn test_priority_expansion_uses_penalty_table() {
        let mut priorities = PriorityTable::default();
        priorities
            .0
            .entry("Alex".to_string())
            .or_default()
            .insert("Station A".to_string(), 1);

        let penalties = BTreeMap::from([(0u8, 1000), (1, 10), (2, 5), (3, 0)]);
        let mut prefs = SoftPreferences::new();
        prefs.apply_priorities(&priorities, &penalties, 5);

        assert_eq!(prefs.entries().len(), 5);
        assert!(prefs.entries().iter().all(|e| e.penalty == 10));
    }

    #[test]
    fn test_priority_level_three_expands_to_nothing() {
        let mut priorities = PriorityTable::default();
        priorities
            .0
            .entry("Alex".to_string())
            .or_default()
            .insert("Patrol".to_string(), 3);

        let penalties = BTreeMap::from([(0u8, 1000), (1, 10), (2, 5), (3, 0)]);
        let mut prefs = SoftPreferences::new();
        prefs.apply_priorities(&priorities, &penalties, 31);
        assert!(prefs.entries().is_empty());
    }

    #[test]
    fn test_priority_zero_is_heavy_penalty_not_ban() {
        let mut priorities = PriorityTable::default();
        priorities
            .0
            .entry("Casey".to_string())
            .or_default()
            .insert("Station A".to_string(), 0);

        let penalties = BTreeMap::from([(0u8, 1000), (1, 10), (2, 5), (3, 0)]);
        let mut prefs = SoftPreferences::new();
        prefs.apply_priorities(&priorities, &penalties, 3);
        assert_eq!(prefs.entries().len(), 3);
        assert!(prefs.entries().iter().all(|e| e.penalty == 1000));
    }

    #[test]
    fn test_tail_from_recorded_days() {
        let mut recorded = HashMap::new();
        // Oldest first: day -3 off, day -2 duty, day -1 off.
        recorded.insert(
            "Alex".to_string(),
            vec!["off".to_string(), "Patrol".to_string(), "off".to_string()],
        );
        let tail = CrossMonthTail::from_recorded_days(&recorded, &duty_names());
        let flags = tail.get("Alex").unwrap();
        assert!(!flags.duty_day_before);
        assert!(flags.duty_two_days_before);
    }

    #[test]
    fn test_tail_blank_labels_count_as_non_duty() {
        let mut recorded = HashMap::new();
        recorded.insert("Blair".to_string(), vec![String::new(), String::new()]);
        let tail = CrossMonthTail::from_recorded_days(&recorded, &duty_names());
        assert_eq!(tail.get("Blair").unwrap(), TailFlags::default());
    }

    #[test]
    fn test_tail_short_record_is_day_minus_one() {
        let mut recorded = HashMap::new();
        recorded.insert("Casey".to_string(), vec!["Station A".to_string()]);
        let tail = CrossMonthTail::from_recorded_days(&recorded, &duty_names());
        let flags = tail.get("Casey").unwrap();
        assert!(flags.duty_day_before);
        assert!(!flags.duty_two_days_before);
    }
}
