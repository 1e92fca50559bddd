//! Grouping service adapter

use std::sync::Arc;

use async_trait::async_trait;

use super::prompt::{parse_group_count, parse_groups, GenerationRequest};
use super::GroupingError;
use crate::models::{AiGroup, Student};

/// Error type returned by generation backends
pub type ModelError = Box<dyn std::error::Error + Send + Sync>;

/// A remote text generation capability.
///
/// Implementations send the request once and return the raw response text.
/// Timeouts and transport retries, if any, belong to the implementation.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ModelError>;
}

/// Turns seated students into AI-proposed groups
#[derive(Clone)]
pub struct GroupingService {
    model: Arc<dyn GenerativeModel>,
    model_id: String,
}

impl GroupingService {
    pub fn new(model: Arc<dyn GenerativeModel>, model_id: impl Into<String>) -> Self {
        Self {
            model,
            model_id: model_id.into(),
        }
    }

    /// Ask the model to split `students` into groups.
    ///
    /// Input guards run before any remote call: an empty student list or an
    /// unparseable group count fail immediately.
    pub async fn generate_groups(
        &self,
        students: &[Student],
        group_count: &str,
        instructions: &str,
    ) -> Result<Vec<AiGroup>, GroupingError> {
        if students.is_empty() {
            return Err(GroupingError::NoStudentsSeated);
        }
        let group_count = parse_group_count(group_count)?;

        let request =
            GenerationRequest::for_groups(&self.model_id, students, group_count, instructions)
                .map_err(|e| {
                    tracing::error!(error = %e, "Failed to build grouping request");
                    GroupingError::GenerationFailed
                })?;

        tracing::info!(
            model = %self.model_id,
            students = students.len(),
            group_count,
            "Requesting AI grouping"
        );

        let text = self.model.generate(&request).await.map_err(|e| {
            tracing::error!(error = %e, "AI group generation failed");
            GroupingError::GenerationFailed
        })?;

        let groups = parse_groups(&text).map_err(|e| {
            tracing::error!(error = %e, response_len = text.len(), "AI group response did not match schema");
            GroupingError::GenerationFailed
        })?;

        tracing::info!(groups = groups.len(), "AI grouping received");
        Ok(groups)
    }
}

impl std::fmt::Debug for GroupingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupingService")
            .field("model_id", &self.model_id)
            .finish_non_exhaustive()
    }
}
