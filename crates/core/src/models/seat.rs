//! Seat model - one desk position in the grid

use super::Student;

/// Seat identifier, equal to the seat's position in the grid
pub type SeatId = usize;

/// A desk that may hold zero or one student
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub id: SeatId,
    pub student: Option<Student>,
}

impl Seat {
    pub fn is_empty(&self) -> bool {
        self.student.is_none()
    }
}
