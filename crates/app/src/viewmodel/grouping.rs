//! AI grouping dialog view model

use std::sync::Arc;

use chrono::Local;
use seatplan_core::{format_groups, group_views, GenerationSettlement, GroupingDialog};
use slint::{ComponentHandle, ModelRc, VecModel};
use tokio::sync::mpsc;

use crate::state::{lock, AppState};
use crate::GroupItem;
use crate::MainWindow;

/// Push the dialog state into the window
fn sync_dialog(window: &MainWindow, dialog: &GroupingDialog) {
    window.set_dialog_open(dialog.is_open());
    window.set_num_groups(dialog.num_groups().into());
    window.set_additional_prompt(dialog.additional_prompt().into());
    window.set_generating(dialog.is_generating());
    window.set_error_message(dialog.error().unwrap_or_default().into());

    let (items, header) = match dialog.result() {
        Some(result) => {
            let items: Vec<GroupItem> = group_views(&result.groups)
                .into_iter()
                .map(|g| GroupItem {
                    title: g.title.into(),
                    members: g.members.join("\n").into(),
                })
                .collect();
            let generated = result.generated_at.with_timezone(&Local);
            (items, format!("Generated at {}", generated.format("%H:%M")))
        }
        None => (Vec::new(), String::new()),
    };
    window.set_groups(ModelRc::from(std::rc::Rc::new(VecModel::from(items))));
    window.set_result_header(header.into());
}

fn sync(window: &slint::Weak<MainWindow>, state: &AppState) {
    if let Some(w) = window.upgrade() {
        let dialog = lock(&state.dialog);
        sync_dialog(&w, &dialog);
    }
}

pub fn setup_grouping_bindings(window: &MainWindow, state: Arc<AppState>) {
    let (settled_tx, mut settled_rx) = mpsc::unbounded_channel::<GenerationSettlement>();

    sync_dialog(window, &lock(&state.dialog));

    // Open dialog
    let state_open = state.clone();
    let window_weak = window.as_weak();
    window.on_open_grouping(move || {
        lock(&state_open.dialog).open();
        sync(&window_weak, &state_open);
    });

    // Close dialog; an in-flight request keeps running and settles later
    let state_close = state.clone();
    let window_weak = window.as_weak();
    window.on_close_grouping(move || {
        lock(&state_close.dialog).close();
        sync(&window_weak, &state_close);
    });

    let state_count = state.clone();
    window.on_num_groups_edited(move |text| {
        lock(&state_count.dialog).set_num_groups(text.as_str());
    });

    let state_prompt = state.clone();
    window.on_prompt_edited(move |text| {
        lock(&state_prompt.dialog).set_additional_prompt(text.as_str());
    });

    // Generate groups
    let state_generate = state.clone();
    let window_weak = window.as_weak();
    window.on_generate_groups(move || {
        let students = state_generate.occupants();
        let ticket = match lock(&state_generate.dialog).begin(students) {
            Some(ticket) => ticket,
            None => return,
        };
        tracing::info!(
            token = ticket.token,
            seated = ticket.students.len(),
            "Requesting AI grouping"
        );

        let service = state_generate.service.clone();
        let tx = settled_tx.clone();
        tokio::spawn(async move {
            let settlement = ticket.run(&service).await;
            if tx.send(settlement).is_err() {
                tracing::warn!("Grouping result dropped: UI is gone");
            }
        });

        sync(&window_weak, &state_generate);
    });

    // Copy groups
    let state_copy = state.clone();
    window.on_copy_groups(move || {
        let text = match lock(&state_copy.dialog).result() {
            Some(result) => format_groups(&result.groups),
            None => return,
        };
        match arboard::Clipboard::new().and_then(|mut c| c.set_text(text)) {
            Ok(()) => tracing::info!("Groups copied to clipboard"),
            Err(e) => tracing::error!("Failed to copy groups: {}", e),
        }
    });

    // Poll for finished generations
    let window_weak = window.as_weak();
    let timer = slint::Timer::default();
    timer.start(
        slint::TimerMode::Repeated,
        std::time::Duration::from_millis(50),
        move || {
            let mut changed = false;
            while let Ok(settlement) = settled_rx.try_recv() {
                changed |= lock(&state.dialog).settle(settlement);
            }
            if changed {
                sync(&window_weak, &state);
            }
        },
    );
    // Keep timer alive by forgetting it
    std::mem::forget(timer);
}
