//! Seatplan - classroom seating chart editor
//!
//! Drag students between desks, reshuffle the room, and ask a generative
//! model to split the seated class into groups.

use std::sync::Arc;

use seatplan_core::{ClassroomConfig, GroupingService};
use seatplan_net::{ClientConfig, GeminiClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod state;
mod viewmodel;

slint::include_modules!();

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Seatplan");

    // Initialize tokio runtime for AI requests
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };
    let _guard = runtime.enter();

    let config = match ClassroomConfig::discover() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load classroom config: {}", e);
            std::process::exit(1);
        }
    };

    let client = match GeminiClient::new(ClientConfig::from_env(config.ai.endpoint.clone())) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to create AI client: {}", e);
            std::process::exit(1);
        }
    };
    let service = GroupingService::new(Arc::new(client), config.ai.model.clone());

    // Initialize application state
    let app_state = match state::AppState::new(config, service) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    // Create main window
    let main_window = match MainWindow::new() {
        Ok(window) => window,
        Err(e) => {
            tracing::error!("Failed to create main window: {}", e);
            std::process::exit(1);
        }
    };

    // Set up view model bindings
    viewmodel::setup_bindings(&main_window, app_state);

    // Run the application
    if let Err(e) = main_window.run() {
        tracing::error!("Event loop failed: {}", e);
        std::process::exit(1);
    }
}
