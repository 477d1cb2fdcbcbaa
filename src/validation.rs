//! Input validation for invigilation rosters.
//!
//! Checks structural integrity of a roster before scheduling. Detects:
//! - Empty teacher, room, day, or slot lists
//! - Duplicate teacher IDs
//! - Duplicate room, day, or slot labels
//!
//! Duplicated labels would make two entries share one `(day, slot, room)`
//! key, so they are rejected instead of silently doubling the schedule.

use crate::models::Roster;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two teachers share an ID, or a room/day/slot label repeats.
    DuplicateId,
    /// The roster has no teachers.
    EmptyTeachers,
    /// The roster has no rooms.
    EmptyRooms,
    /// The roster has no exam days.
    EmptyDays,
    /// The roster has no exam slots.
    EmptySlots,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a roster.
///
/// Checks:
/// 1. At least one teacher, room, day, and slot
/// 2. No duplicate teacher IDs
/// 3. No duplicate room, day, or slot labels
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_roster(roster: &Roster) -> ValidationResult {
    let mut errors = Vec::new();

    let required = [
        (roster.teachers.is_empty(), ValidationErrorKind::EmptyTeachers, "teachers"),
        (roster.rooms.is_empty(), ValidationErrorKind::EmptyRooms, "rooms"),
        (roster.days.is_empty(), ValidationErrorKind::EmptyDays, "days"),
        (roster.slots.is_empty(), ValidationErrorKind::EmptySlots, "slots"),
    ];
    for (missing, kind, what) in required {
        if missing {
            errors.push(ValidationError::new(kind, format!("Roster has no {what}")));
        }
    }

    let mut teacher_ids = HashSet::new();
    for t in &roster.teachers {
        if !teacher_ids.insert(t.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate teacher ID: {}", t.id),
            ));
        }
    }

    check_unique_labels("room", &roster.rooms, &mut errors);
    check_unique_labels("day", &roster.days, &mut errors);
    check_unique_labels("slot", &roster.slots, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_unique_labels(what: &str, labels: &[String], errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    for label in labels {
        if !seen.insert(label.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {what}: {label}"),
            ));
        }
    }
}
