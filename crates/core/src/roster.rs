//! Class roster
//!
//! The roster is fixed for the lifetime of a session. Seating operations
//! relocate roster entries between seats but never add or remove students.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::models::{Student, StudentId};

/// Default classroom shape
pub const DEFAULT_ROWS: usize = 4;
pub const DEFAULT_COLS: usize = 6;

const DEFAULT_NAMES: [&str; 24] = [
    "Liam Carter",
    "Olivia Brooks",
    "Noah Patel",
    "Emma Nguyen",
    "Elijah Rossi",
    "Ava Kim",
    "James Okafor",
    "Sophia Lindqvist",
    "Lucas Moreau",
    "Mia Tanaka",
    "Mason Reyes",
    "Isabella Novak",
    "Ethan Walsh",
    "Amelia Haddad",
    "Logan Silva",
    "Harper Jensen",
    "Aiden Murphy",
    "Evelyn Costa",
    "Jackson Lee",
    "Abigail Schmidt",
    "Leo Fischer",
    "Emily Dubois",
    "Henry Alvarez",
    "Ella Kowalski",
];

/// Ordered list of all students eligible to be seated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    students: Vec<Student>,
}

impl Roster {
    /// Build a roster, rejecting duplicate ids and blank names
    pub fn new(students: Vec<Student>) -> Result<Self> {
        let mut seen: HashSet<StudentId> = HashSet::with_capacity(students.len());
        for student in &students {
            if !seen.insert(student.id) {
                return Err(Error::InvalidRoster(format!(
                    "duplicate student id {}",
                    student.id
                )));
            }
            if student.name.trim().is_empty() {
                return Err(Error::InvalidRoster(format!(
                    "student {} has an empty name",
                    student.id
                )));
            }
        }
        Ok(Self { students })
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn get(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }
}

impl Default for Roster {
    /// The built-in class of 24 students, ids 1 through 24
    fn default() -> Self {
        let students = DEFAULT_NAMES
            .iter()
            .zip(1..)
            .map(|(name, id)| Student::new(id, *name))
            .collect();
        Self { students }
    }
}
