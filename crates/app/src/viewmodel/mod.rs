//! View model bindings for Slint UI

mod grouping;
mod seating;

use crate::state::AppState;
use crate::MainWindow;
use std::sync::Arc;

pub fn setup_bindings(window: &MainWindow, state: Arc<AppState>) {
    seating::setup_seating_bindings(window, state.clone());
    grouping::setup_grouping_bindings(window, state);
}
