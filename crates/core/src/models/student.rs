//! Student model

use std::fmt;

use serde::{Deserialize, Serialize};

use super::number::whole_number;

/// Stable student identifier
pub type StudentId = u32;

/// A student on the class roster
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Student {
    #[serde(deserialize_with = "whole_number")]
    pub id: StudentId,
    pub name: String,
}

impl Student {
    pub fn new(id: StudentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Label used in result listings, e.g. `Ada (#3)`
    pub fn label(&self) -> String {
        format!("{} (#{})", self.name, self.id)
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
