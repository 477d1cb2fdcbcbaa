//! Teacher (invigilator) model.
//!
//! Teachers are the only resource the engine assigns. They are identified
//! by an integer id that is carried verbatim into the persisted schedule,
//! so lookups match on numeric equality.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer identity of a teacher.
pub type TeacherId = i64;

/// A teacher who can invigilate exams.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: TeacherId,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

impl Teacher {
    /// Creates a teacher.
    pub fn new(id: TeacherId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for Teacher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{} ({})", self.name, self.id)
        }
    }
}
