//! Seating grid model
//!
//! A fixed-size, row-major sequence of seats. The only mutations are
//! [`SeatingGrid::swap`] and [`SeatingGrid::reshuffle`], both of which move
//! existing student entries between seats. Seat ids and the grid length never
//! change after construction.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};
use crate::invariants::assert_grid_invariants;
use crate::models::{Seat, SeatId, Student};
use crate::roster::Roster;

/// Largest grid a classroom may declare
pub const MAX_SEATS: usize = 1024;

/// Seat count for a grid shape, rejecting empty and oversized grids
pub fn seat_count(rows: usize, cols: usize) -> Result<usize> {
    if rows == 0 || cols == 0 {
        return Err(Error::InvalidConfig(format!(
            "grid must have at least one row and column, got {}x{}",
            rows, cols
        )));
    }
    match rows.checked_mul(cols) {
        Some(count) if count <= MAX_SEATS => Ok(count),
        _ => Err(Error::InvalidConfig(format!(
            "grid of {}x{} exceeds {} seats",
            rows, cols, MAX_SEATS
        ))),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatingGrid {
    rows: usize,
    cols: usize,
    seats: Vec<Seat>,
}

impl SeatingGrid {
    /// Create a grid with the first seats filled in roster order.
    ///
    /// Students beyond the seat count are left unseated; seats beyond the
    /// roster size stay empty.
    pub fn new(rows: usize, cols: usize, roster: &Roster) -> Result<Self> {
        let count = seat_count(rows, cols)?;

        let mut students = roster.students().iter().cloned();
        let seats = (0..count)
            .map(|id| Seat {
                id,
                student: students.next(),
            })
            .collect();

        let grid = Self { rows, cols, seats };
        assert_grid_invariants(&grid);
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Student sitting at `index`, if any
    pub fn student_at(&self, index: SeatId) -> Option<&Student> {
        self.seats.get(index).and_then(|s| s.student.as_ref())
    }

    /// Seat index for a row/column pair
    pub fn index_of(&self, row: usize, col: usize) -> Option<SeatId> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Row/column pair for a seat index
    pub fn position_of(&self, index: SeatId) -> Option<(usize, usize)> {
        (index < self.seats.len()).then(|| (index / self.cols, index % self.cols))
    }

    /// Seated students in seat order
    pub fn occupants(&self) -> Vec<Student> {
        self.seats
            .iter()
            .filter_map(|s| s.student.clone())
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.seats.iter().filter(|s| !s.is_empty()).count()
    }

    /// Exchange the occupants of two seats.
    ///
    /// Swapping a seat with itself is a no-op. Out-of-range indices are
    /// rejected and leave the grid untouched.
    pub fn swap(&mut self, i: SeatId, j: SeatId) -> Result<()> {
        let len = self.seats.len();
        for index in [i, j] {
            if index >= len {
                return Err(Error::SeatOutOfRange { index, len });
            }
        }
        if i == j {
            return Ok(());
        }

        let moved = self.seats[i].student.take();
        self.seats[i].student = std::mem::replace(&mut self.seats[j].student, moved);

        tracing::debug!(from = i, to = j, "Swapped seats");
        assert_grid_invariants(self);
        Ok(())
    }

    /// Reseat the whole roster in a uniformly random order
    pub fn reshuffle(&mut self, roster: &Roster) {
        self.reshuffle_with(roster, &mut rand::thread_rng());
    }

    /// Reseat the whole roster using the given random source.
    ///
    /// Every seat is cleared, the roster is permuted with a Fisher-Yates
    /// shuffle and assigned to seats in order. A roster larger than the grid
    /// is truncated; a smaller one leaves trailing seats empty.
    pub fn reshuffle_with<R: Rng + ?Sized>(&mut self, roster: &Roster, rng: &mut R) {
        let mut students = roster.students().to_vec();
        students.shuffle(rng);

        let mut placed = students.into_iter();
        for seat in &mut self.seats {
            seat.student = placed.next();
        }

        tracing::debug!(
            seated = self.occupied_count(),
            roster = roster.len(),
            "Reshuffled seating"
        );
        assert_grid_invariants(self);
    }

    /// Iterate rows of seats, front row first
    pub fn rows_iter(&self) -> impl Iterator<Item = &[Seat]> {
        self.seats.chunks(self.cols)
    }
}

#[cfg(test)]
impl SeatingGrid {
    /// Build a grid from raw seats, skipping invariant checks
    pub(crate) fn from_seats_unchecked(rows: usize, cols: usize, seats: Vec<Seat>) -> Self {
        Self { rows, cols, seats }
    }
}

/// Plain-text chart, one line per row, empty seats shown as `--`
impl fmt::Display for SeatingGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_index, row) in self.rows_iter().enumerate() {
            if row_index > 0 {
                writeln!(f)?;
            }
            let labels: Vec<&str> = row
                .iter()
                .map(|seat| seat.student.as_ref().map_or("--", |s| s.name.as_str()))
                .collect();
            write!(f, "{}", labels.join(" | "))?;
        }
        Ok(())
    }
}
