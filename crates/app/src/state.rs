//! Application state management

use std::sync::{Mutex, MutexGuard};

use seatplan_core::{
    seat_views, ClassroomConfig, DragController, DragEvent, DragOutcome, GridGeometry,
    GroupingDialog, GroupingService, Result, SeatView, SeatingGrid, Student,
};

/// Lock a mutex, recovering the data if a previous holder panicked
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Main application state
pub struct AppState {
    pub config: ClassroomConfig,
    pub grid: Mutex<SeatingGrid>,
    pub drag: Mutex<DragController>,
    pub dialog: Mutex<GroupingDialog>,
    pub service: GroupingService,
    geometry: GridGeometry,
}

impl AppState {
    pub fn new(config: ClassroomConfig, service: GroupingService) -> Result<Self> {
        let grid = SeatingGrid::new(config.rows, config.cols, &config.roster)?;
        let geometry = GridGeometry::new(config.rows, config.cols);

        tracing::info!(
            rows = config.rows,
            cols = config.cols,
            seated = grid.occupied_count(),
            "Seating grid initialized"
        );

        Ok(Self {
            config,
            grid: Mutex::new(grid),
            drag: Mutex::new(DragController::new()),
            dialog: Mutex::new(GroupingDialog::new()),
            service,
            geometry,
        })
    }

    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    /// Apply a gesture event to the grid
    pub fn handle_drag(&self, event: DragEvent) -> DragOutcome {
        let mut grid = lock(&self.grid);
        let mut drag = lock(&self.drag);
        let outcome = drag.handle(event, &mut grid);
        if outcome.mutated_grid() {
            tracing::debug!(chart = %&*grid, "Seating after swap");
        }
        outcome
    }

    pub fn is_dragging(&self) -> bool {
        lock(&self.drag).is_dragging()
    }

    /// Pointer pressed inside the chart area
    pub fn pointer_pressed(&self, x: f32, y: f32, width: f32, height: f32) -> DragOutcome {
        match self.geometry.hit_test(x, y, width, height) {
            Some(index) => self.handle_drag(DragEvent::Start(index)),
            None => DragOutcome::Ignored,
        }
    }

    /// Pointer moved while pressed
    pub fn pointer_moved(&self, x: f32, y: f32, width: f32, height: f32) -> DragOutcome {
        if !self.is_dragging() {
            return DragOutcome::Ignored;
        }
        match self.geometry.hit_test(x, y, width, height) {
            Some(index) => self.handle_drag(DragEvent::Enter(index)),
            None => self.handle_drag(DragEvent::Leave),
        }
    }

    /// Pointer released; outside every desk the gesture is aborted
    pub fn pointer_released(&self, x: f32, y: f32, width: f32, height: f32) -> DragOutcome {
        if !self.is_dragging() {
            return DragOutcome::Ignored;
        }
        match self.geometry.hit_test(x, y, width, height) {
            Some(index) => self.handle_drag(DragEvent::Drop(index)),
            None => self.handle_drag(DragEvent::Abort),
        }
    }

    pub fn pointer_cancelled(&self) -> DragOutcome {
        self.handle_drag(DragEvent::Abort)
    }

    /// Reseat the whole roster at random
    pub fn randomize(&self) {
        let mut grid = lock(&self.grid);
        // A reshuffle mid-gesture would leave the drag pointing at a new student
        let mut drag = lock(&self.drag);
        drag.handle(DragEvent::Abort, &mut grid);

        grid.reshuffle(&self.config.roster);
        tracing::info!(seated = grid.occupied_count(), "Seats randomized");
        tracing::debug!(chart = %&*grid, "Seating after randomize");
    }

    pub fn occupants(&self) -> Vec<Student> {
        lock(&self.grid).occupants()
    }

    pub fn seat_views(&self) -> Vec<SeatView> {
        let grid = lock(&self.grid);
        let drag = lock(&self.drag);
        seat_views(&grid, &drag)
    }
}
