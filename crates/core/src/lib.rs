//! Seatplan Core Library
//!
//! Classroom seating model, drag interaction, and AI grouping logic for the
//! Seatplan editor. Nothing in this crate depends on a UI toolkit or a
//! particular generation backend.

pub mod config;
pub mod dialog;
pub mod drag;
pub mod error;
pub mod grid;
pub mod grouping;
pub mod invariants;
pub mod layout;
pub mod models;
pub mod render;
pub mod roster;

pub use config::{AiSettings, ClassroomConfig};
pub use dialog::{GenerationSettlement, GenerationTicket, GroupingDialog, GroupingResult};
pub use drag::{DragController, DragEvent, DragOutcome, DragPhase};
pub use error::{Error, Result};
pub use grid::SeatingGrid;
pub use grouping::{GenerationRequest, GenerativeModel, GroupingError, GroupingService, ModelError};
pub use layout::GridGeometry;
pub use models::*;
pub use render::{format_groups, group_views, seat_views, GroupView, SeatView};
pub use roster::Roster;
