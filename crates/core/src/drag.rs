//! Drag-and-drop interaction controller
//!
//! Turns a sequence of gesture events into at most one seat swap. The
//! controller is either idle or dragging exactly one seat; while dragging it
//! also tracks the seat currently under the pointer for highlighting.
//!
//! Input layers translate their own pointer callbacks into [`DragEvent`]s,
//! so this module does not depend on any particular toolkit.

use crate::grid::SeatingGrid;
use crate::invariants::assert_drag_invariants;
use crate::models::SeatId;

/// One step of a drag gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    /// Pointer picked up the occupant of a seat
    Start(SeatId),
    /// Pointer moved over a seat
    Enter(SeatId),
    /// Pointer left every seat (gap or outside the grid)
    Leave,
    /// Pointer released over a seat
    Drop(SeatId),
    /// Gesture ended without a drop
    Abort,
}

/// Interaction phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
}

/// What handling an event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Event had no effect
    Ignored,
    /// A gesture began on this seat
    Started(SeatId),
    /// Hover target changed
    HoverChanged(Option<SeatId>),
    /// Gesture committed a swap
    Swapped { from: SeatId, to: SeatId },
    /// Gesture ended without touching the grid
    Cancelled,
}

impl DragOutcome {
    /// True if the grid contents changed
    pub fn mutated_grid(&self) -> bool {
        matches!(self, DragOutcome::Swapped { .. })
    }
}

/// Drag state for a single seating grid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragController {
    dragged: Option<SeatId>,
    drag_over: Option<SeatId>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dragged(&self) -> Option<SeatId> {
        self.dragged
    }

    pub fn drag_over(&self) -> Option<SeatId> {
        self.drag_over
    }

    pub fn phase(&self) -> DragPhase {
        if self.dragged.is_some() {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.phase() == DragPhase::Dragging
    }

    /// Apply one gesture event, committing a swap on a valid drop
    pub fn handle(&mut self, event: DragEvent, grid: &mut SeatingGrid) -> DragOutcome {
        let outcome = match event {
            DragEvent::Start(index) => self.start(index, grid),
            DragEvent::Enter(index) => self.enter(index, grid),
            DragEvent::Leave => self.leave(),
            DragEvent::Drop(index) => self.drop_on(index, grid),
            DragEvent::Abort => self.abort(),
        };

        tracing::debug!(?event, ?outcome, "Drag event handled");
        assert_drag_invariants(self, grid);
        outcome
    }

    fn start(&mut self, index: SeatId, grid: &SeatingGrid) -> DragOutcome {
        if self.is_dragging() {
            return DragOutcome::Ignored;
        }
        // Empty seats cannot be picked up
        if grid.student_at(index).is_none() {
            return DragOutcome::Ignored;
        }
        self.dragged = Some(index);
        self.drag_over = None;
        DragOutcome::Started(index)
    }

    fn enter(&mut self, index: SeatId, grid: &SeatingGrid) -> DragOutcome {
        let Some(dragged) = self.dragged else {
            return DragOutcome::Ignored;
        };
        if index == dragged || index >= grid.len() || self.drag_over == Some(index) {
            return DragOutcome::Ignored;
        }
        self.drag_over = Some(index);
        DragOutcome::HoverChanged(Some(index))
    }

    fn leave(&mut self) -> DragOutcome {
        if self.drag_over.take().is_some() {
            DragOutcome::HoverChanged(None)
        } else {
            DragOutcome::Ignored
        }
    }

    fn drop_on(&mut self, index: SeatId, grid: &mut SeatingGrid) -> DragOutcome {
        let dragged = self.dragged.take();
        self.drag_over = None;

        match dragged {
            Some(from) if from != index => match grid.swap(from, index) {
                Ok(()) => DragOutcome::Swapped { from, to: index },
                Err(e) => {
                    tracing::warn!(error = %e, "Dropped outside the grid, cancelling");
                    DragOutcome::Cancelled
                }
            },
            Some(_) => DragOutcome::Cancelled,
            None => DragOutcome::Ignored,
        }
    }

    fn abort(&mut self) -> DragOutcome {
        let was_dragging = self.dragged.take().is_some();
        self.drag_over = None;
        if was_dragging {
            DragOutcome::Cancelled
        } else {
            DragOutcome::Ignored
        }
    }
}
