//! Seating chart view model

use std::sync::Arc;

use seatplan_core::{DragOutcome, SeatView};
use slint::{ComponentHandle, ModelRc, VecModel};

use crate::state::AppState;
use crate::DeskSize;
use crate::MainWindow;
use crate::SeatItem;

fn to_int<T: TryInto<i32>>(value: T) -> i32 {
    value.try_into().unwrap_or(i32::MAX)
}

fn seat_item(view: &SeatView) -> SeatItem {
    SeatItem {
        index: to_int(view.index),
        row: to_int(view.row),
        col: to_int(view.col),
        label: view.label.clone().into(),
        student_id: view.student_id.map(to_int).unwrap_or(0),
        occupied: view.is_occupied(),
        dragging: view.is_dragging,
        drag_over: view.is_drag_over,
    }
}

fn refresh_seats(window: &MainWindow, state: &AppState) {
    let items: Vec<SeatItem> = state.seat_views().iter().map(seat_item).collect();
    let model = std::rc::Rc::new(VecModel::from(items));
    window.set_seats(ModelRc::from(model));
}

fn refresh_on_change(window: &slint::Weak<MainWindow>, state: &AppState, outcome: DragOutcome) {
    if outcome == DragOutcome::Ignored {
        return;
    }
    if let Some(w) = window.upgrade() {
        refresh_seats(&w, state);
    }
}

pub fn setup_seating_bindings(window: &MainWindow, state: Arc<AppState>) {
    let geometry = state.geometry();
    window.set_desk_gap(geometry.gap);
    window.on_desk_size(move |width, height| {
        let (width, height) = geometry.desk_size(width, height);
        DeskSize { width, height }
    });
    refresh_seats(window, &state);

    let state_press = state.clone();
    let window_weak = window.as_weak();
    window.on_pointer_pressed(move |x, y, width, height| {
        let outcome = state_press.pointer_pressed(x, y, width, height);
        refresh_on_change(&window_weak, &state_press, outcome);
    });

    let state_move = state.clone();
    let window_weak = window.as_weak();
    window.on_pointer_moved(move |x, y, width, height| {
        let outcome = state_move.pointer_moved(x, y, width, height);
        refresh_on_change(&window_weak, &state_move, outcome);
    });

    let state_release = state.clone();
    let window_weak = window.as_weak();
    window.on_pointer_released(move |x, y, width, height| {
        let outcome = state_release.pointer_released(x, y, width, height);
        if let DragOutcome::Swapped { from, to } = outcome {
            tracing::info!(from, to, "Seats swapped");
        }
        refresh_on_change(&window_weak, &state_release, outcome);
    });

    let state_cancel = state.clone();
    let window_weak = window.as_weak();
    window.on_pointer_cancelled(move || {
        let outcome = state_cancel.pointer_cancelled();
        refresh_on_change(&window_weak, &state_cancel, outcome);
    });

    let window_weak = window.as_weak();
    window.on_randomize(move || {
        state.randomize();
        if let Some(w) = window_weak.upgrade() {
            refresh_seats(&w, &state);
        }
    });
}
