//! Roster and duty location models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A named shift type requiring daily coverage.
///
/// At most one duty location on a request may be *periodic*: it is staffed
/// only on days where the offset from its anchor date has even parity, and
/// left unstaffed on the other days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyLocation {
    /// Display name of the duty location.
    pub name: String,
    /// Anchor date of the every-other-day coverage rule, if this duty is periodic.
    #[serde(default)]
    pub periodic_anchor: Option<NaiveDate>,
}

impl DutyLocation {
    /// Creates a regular duty location requiring coverage every day.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            periodic_anchor: None,
        }
    }

    /// Creates a periodic duty location anchored to the given date.
    pub fn periodic(name: impl Into<String>, anchor: NaiveDate) -> Self {
        Self {
            name: name.into(),
            periodic_anchor: Some(anchor),
        }
    }

    /// Whether this duty is staffed only every other day.
    pub fn is_periodic(&self) -> bool {
        self.periodic_anchor.is_some()
    }
}

/// An ordered, validated employee roster with an optional relief employee.
///
/// The relief employee is a designated substitute whose duty usage is
/// penalized to discourage over-reliance; its absence is legal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    employees: Vec<String>,
    relief: Option<usize>,
}

impl Roster {
    /// Builds a roster from an ordered name list and an optional relief name.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyRoster`] for an empty list,
    /// [`EngineError::DuplicateEmployee`] for repeated names, and
    /// [`EngineError::UnknownRelief`] if the relief name is not on the list.
    pub fn new(employees: Vec<String>, relief: Option<&str>) -> EngineResult<Self> {
        if employees.is_empty() {
            return Err(EngineError::EmptyRoster);
        }
        for (i, name) in employees.iter().enumerate() {
            if employees[..i].contains(name) {
                return Err(EngineError::DuplicateEmployee { name: name.clone() });
            }
        }
        let relief = match relief {
            Some(name) => Some(
                employees
                    .iter()
                    .position(|e| e == name)
                    .ok_or_else(|| EngineError::UnknownRelief {
                        name: name.to_string(),
                    })?,
            ),
            None => None,
        };
        Ok(Self { employees, relief })
    }

    /// Returns the number of employees.
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Whether the roster is empty. Always false for a constructed roster.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Returns the ordered employee names.
    pub fn names(&self) -> &[String] {
        &self.employees
    }

    /// Returns the name of the employee with the given ordinal id.
    pub fn name(&self, id: usize) -> &str {
        &self.employees[id]
    }

    /// Resolves an employee name to its ordinal id, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.employees.iter().position(|e| e == name)
    }

    /// Returns the ordinal id of the relief employee, if one is designated.
    pub fn relief(&self) -> Option<usize> {
        self.relief
    }
}
