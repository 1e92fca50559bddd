//! AI grouping
//!
//! Builds a structured generation request from the seated students, sends
//! it through an injected [`GenerativeModel`], and parses the reply into
//! [`AiGroup`](crate::models::AiGroup)s.
//!
//! Every remote or parse failure collapses into
//! [`GroupingError::GenerationFailed`]; the underlying error is only logged.
//! The parsed groups are trusted as returned: members are not checked
//! against the seated students.

mod prompt;
pub(crate) mod service;

pub use prompt::{
    build_prompt, parse_group_count, parse_groups, response_schema, GenerationRequest,
    JSON_MIME_TYPE, SYSTEM_INSTRUCTION,
};
pub use service::{GenerativeModel, GroupingService, ModelError};

use thiserror::Error;

/// Grouping failures, worded for display to the teacher
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupingError {
    #[error("There are no students in the seats.")]
    NoStudentsSeated,

    #[error("Enter a number of groups of at least 1.")]
    InvalidGroupCount,

    #[error("Group generation failed. Please try again later.")]
    GenerationFailed,
}
