//! View projections for the seating chart and grouping results
//!
//! These are plain data snapshots. UI layers map them onto their own
//! widgets; nothing here holds a reference back into the grid.

use crate::drag::DragController;
use crate::grid::SeatingGrid;
use crate::models::{AiGroup, SeatId, StudentId};

/// Label shown on a desk with no student
pub const EMPTY_SEAT_LABEL: &str = "Empty";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatView {
    pub index: SeatId,
    pub row: usize,
    pub col: usize,
    pub label: String,
    pub student_id: Option<StudentId>,
    pub is_dragging: bool,
    pub is_drag_over: bool,
}

impl SeatView {
    pub fn is_occupied(&self) -> bool {
        self.student_id.is_some()
    }
}

/// Snapshot every seat together with its drag highlight state
pub fn seat_views(grid: &SeatingGrid, drag: &DragController) -> Vec<SeatView> {
    grid.seats()
        .iter()
        .enumerate()
        .map(|(index, seat)| SeatView {
            index,
            row: index / grid.cols(),
            col: index % grid.cols(),
            label: seat
                .student
                .as_ref()
                .map_or_else(|| EMPTY_SEAT_LABEL.to_string(), |s| s.name.clone()),
            student_id: seat.student.as_ref().map(|s| s.id),
            is_dragging: drag.dragged() == Some(index),
            is_drag_over: drag.drag_over() == Some(index),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupView {
    pub title: String,
    pub members: Vec<String>,
}

/// Result panels in the order the service returned them
pub fn group_views(groups: &[AiGroup]) -> Vec<GroupView> {
    groups
        .iter()
        .map(|group| GroupView {
            title: group.title(),
            members: group.students.iter().map(|s| s.label()).collect(),
        })
        .collect()
}

/// Plain-text listing used for the clipboard
pub fn format_groups(groups: &[AiGroup]) -> String {
    group_views(groups)
        .iter()
        .map(|view| {
            let mut block = view.title.clone();
            for member in &view.members {
                block.push_str("\n  ");
                block.push_str(member);
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
