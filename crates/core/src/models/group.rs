//! AI-generated group model

use serde::{Deserialize, Serialize};

use super::number::whole_number;
use super::Student;

/// One group proposed by the generation service.
///
/// Groups are advisory display data. They are never written back into the
/// seating grid and their members are not checked against the seated
/// students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiGroup {
    #[serde(deserialize_with = "whole_number")]
    pub group_number: u32,
    pub students: Vec<Student>,
}

impl AiGroup {
    pub fn title(&self) -> String {
        format!("Group {}", self.group_number)
    }
}
