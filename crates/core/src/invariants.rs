//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use std::collections::HashSet;

use crate::drag::DragController;
use crate::grid::SeatingGrid;

/// Validate that a grid's seats are internally consistent
pub fn assert_grid_invariants(grid: &SeatingGrid) {
    debug_assert_eq!(
        grid.len(),
        grid.rows() * grid.cols(),
        "Grid length {} does not match {}x{}",
        grid.len(),
        grid.rows(),
        grid.cols()
    );

    // Seat ids equal their position
    for (index, seat) in grid.seats().iter().enumerate() {
        debug_assert_eq!(seat.id, index, "Seat at position {} has id {}", index, seat.id);
    }

    // A student sits in at most one seat
    if cfg!(debug_assertions) {
        let mut seen = HashSet::new();
        for seat in grid.seats() {
            if let Some(student) = &seat.student {
                debug_assert!(
                    seen.insert(student.id),
                    "Student {} appears in more than one seat",
                    student.id
                );
            }
        }
    }
}

/// Validate drag state against the grid it operates on
pub fn assert_drag_invariants(drag: &DragController, grid: &SeatingGrid) {
    if let Some(dragged) = drag.dragged() {
        debug_assert!(
            dragged < grid.len(),
            "Dragged seat {} is outside a grid of {}",
            dragged,
            grid.len()
        );
        debug_assert!(
            drag.drag_over() != Some(dragged),
            "Seat {} is both dragged and hovered",
            dragged
        );
    } else {
        debug_assert!(
            drag.drag_over().is_none(),
            "Hover target {:?} set while idle",
            drag.drag_over()
        );
    }
}
