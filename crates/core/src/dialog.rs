//! Grouping dialog controller
//!
//! Holds the transient state behind the "group with AI" dialog: form
//! fields, the in-flight flag, and the last result or error. A generation
//! is split into [`GroupingDialog::begin`], which hands out a
//! [`GenerationTicket`], and [`GroupingDialog::settle`], which applies the
//! outcome. The ticket can be run on another task while the dialog stays on
//! the UI thread.
//!
//! Only one ticket is in flight at a time: `begin` refuses while a
//! generation is pending, so the token only advances after the previous
//! ticket settled. Each ticket still carries its token, and `settle` drops
//! any settlement whose token is not the latest one issued. A settlement
//! delivered twice or replayed from an earlier ticket therefore never
//! overwrites newer state.
//!
//! Closing the dialog keeps the last result; reopening shows it until the
//! next generation starts.

use chrono::{DateTime, Utc};

use crate::grouping::{GroupingError, GroupingService};
use crate::models::{AiGroup, Student};

/// Group count shown when the dialog is first opened
pub const DEFAULT_GROUP_COUNT: &str = "4";

/// Groups returned by a successful generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupingResult {
    pub groups: Vec<AiGroup>,
    pub generated_at: DateTime<Utc>,
}

/// Inputs captured when a generation starts
#[derive(Debug, Clone)]
pub struct GenerationTicket {
    pub token: u64,
    pub students: Vec<Student>,
    pub group_count: String,
    pub instructions: String,
}

impl GenerationTicket {
    /// Run the request this ticket describes
    pub async fn run(self, service: &GroupingService) -> GenerationSettlement {
        let outcome = service
            .generate_groups(&self.students, &self.group_count, &self.instructions)
            .await;
        GenerationSettlement {
            token: self.token,
            outcome,
        }
    }
}

/// Finished generation, ready to be applied to the dialog
#[derive(Debug, Clone)]
pub struct GenerationSettlement {
    pub token: u64,
    pub outcome: Result<Vec<AiGroup>, GroupingError>,
}

#[derive(Debug, Clone)]
pub struct GroupingDialog {
    open: bool,
    num_groups: String,
    additional_prompt: String,
    is_generating: bool,
    result: Option<GroupingResult>,
    error: Option<String>,
    latest_token: u64,
}

impl Default for GroupingDialog {
    fn default() -> Self {
        Self {
            open: false,
            num_groups: DEFAULT_GROUP_COUNT.to_string(),
            additional_prompt: String::new(),
            is_generating: false,
            result: None,
            error: None,
            latest_token: 0,
        }
    }
}

impl GroupingDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn num_groups(&self) -> &str {
        &self.num_groups
    }

    pub fn set_num_groups(&mut self, value: impl Into<String>) {
        self.num_groups = value.into();
    }

    pub fn additional_prompt(&self) -> &str {
        &self.additional_prompt
    }

    pub fn set_additional_prompt(&mut self, value: impl Into<String>) {
        self.additional_prompt = value.into();
    }

    pub fn is_generating(&self) -> bool {
        self.is_generating
    }

    pub fn result(&self) -> Option<&GroupingResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Start a generation for the given seated students.
    ///
    /// Returns `None` while another generation is in flight. Otherwise
    /// clears the previous result and error and issues a new token.
    pub fn begin(&mut self, students: Vec<Student>) -> Option<GenerationTicket> {
        if self.is_generating {
            tracing::debug!("Generation already in flight");
            return None;
        }

        self.is_generating = true;
        self.result = None;
        self.error = None;
        self.latest_token += 1;

        Some(GenerationTicket {
            token: self.latest_token,
            students,
            group_count: self.num_groups.clone(),
            instructions: self.additional_prompt.clone(),
        })
    }

    /// Apply a finished generation. Returns false if it was stale.
    pub fn settle(&mut self, settlement: GenerationSettlement) -> bool {
        if settlement.token != self.latest_token {
            tracing::debug!(
                token = settlement.token,
                latest = self.latest_token,
                "Discarding stale grouping result"
            );
            return false;
        }

        self.is_generating = false;
        match settlement.outcome {
            Ok(groups) => {
                self.result = Some(GroupingResult {
                    groups,
                    generated_at: Utc::now(),
                });
                self.error = None;
            }
            Err(e) => {
                self.result = None;
                self.error = Some(e.to_string());
            }
        }
        true
    }

    /// Begin, run, and settle in one step
    pub async fn generate(&mut self, service: &GroupingService, students: Vec<Student>) -> bool {
        let Some(ticket) = self.begin(students) else {
            return false;
        };
        let settlement = ticket.run(service).await;
        self.settle(settlement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::service::testing::StubModel;

    const ONE_GROUP: &str = r#"[{"groupNumber": 1, "students": [{"id": 1, "name": "A"}]}]"#;

    fn students() -> Vec<Student> {
        vec![Student::new(1, "A"), Student::new(2, "B")]
    }

    #[test]
    fn test_defaults() {
        let dialog = GroupingDialog::new();
        assert!(!dialog.is_open());
        assert_eq!(dialog.num_groups(), "4");
        assert_eq!(dialog.additional_prompt(), "");
        assert!(!dialog.is_generating());
        assert!(dialog.result().is_none());
        assert!(dialog.error().is_none());
    }

    #[test]
    fn test_begin_guards_in_flight() {
        let mut dialog = GroupingDialog::new();
        let ticket = dialog.begin(students()).unwrap();
        assert!(dialog.is_generating());
        assert_eq!(ticket.group_count, "4");
        assert!(dialog.begin(students()).is_none());

        // The refused begin issued no token, so the pending ticket still applies
        assert!(dialog.settle(GenerationSettlement {
            token: ticket.token,
            outcome: Ok(vec![]),
        }));
        assert!(!dialog.is_generating());
    }

    #[test]
    fn test_begin_captures_fields() {
        let mut dialog = GroupingDialog::new();
        dialog.set_num_groups("3");
        dialog.set_additional_prompt("pair 1 with 2");
        let ticket = dialog.begin(students()).unwrap();
        assert_eq!(ticket.group_count, "3");
        assert_eq!(ticket.instructions, "pair 1 with 2");
        assert_eq!(ticket.students.len(), 2);
    }

    #[test]
    fn test_stale_settlement_discarded() {
        let mut dialog = GroupingDialog::new();
        let first = dialog.begin(students()).unwrap();
        assert!(dialog.settle(GenerationSettlement {
            token: first.token,
            outcome: Err(GroupingError::GenerationFailed),
        }));

        let second = dialog.begin(students()).unwrap();
        let applied = dialog.settle(GenerationSettlement {
            token: first.token,
            outcome: Ok(vec![]),
        });
        assert!(!applied);
        assert!(dialog.is_generating());
        assert!(dialog.result().is_none());
        assert!(dialog.error().is_none());

        assert!(dialog.settle(GenerationSettlement {
            token: second.token,
            outcome: Ok(vec![]),
        }));
        assert!(!dialog.is_generating());
        assert!(dialog.result().is_some());
    }

    #[test]
    fn test_close_keeps_result() {
        let mut dialog = GroupingDialog::new();
        dialog.open();
        let ticket = dialog.begin(students()).unwrap();
        dialog.settle(GenerationSettlement {
            token: ticket.token,
            outcome: Ok(vec![]),
        });
        dialog.close();
        assert!(!dialog.is_open());
        dialog.open();
        assert!(dialog.result().is_some());
    }

    #[tokio::test]
    async fn test_generate_success() {
        let stub = StubModel::replying(ONE_GROUP);
        let service = GroupingService::new(stub.clone(), "m");
        let mut dialog = GroupingDialog::new();

        assert!(dialog.generate(&service, students()).await);
        assert!(!dialog.is_generating());
        assert!(dialog.error().is_none());
        let result = dialog.result().unwrap();
        assert_eq!(result.groups.len(), 1);
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_generate_no_students() {
        let stub = StubModel::replying(ONE_GROUP);
        let service = GroupingService::new(stub.clone(), "m");
        let mut dialog = GroupingDialog::new();

        assert!(dialog.generate(&service, vec![]).await);
        assert_eq!(dialog.error(), Some("There are no students in the seats."));
        assert!(dialog.result().is_none());
        assert!(!dialog.is_generating());
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_generate_failure_clears_previous_result() {
        let mut dialog = GroupingDialog::new();
        let ok = GroupingService::new(StubModel::replying(ONE_GROUP), "m");
        dialog.generate(&ok, students()).await;
        assert!(dialog.result().is_some());

        let broken = GroupingService::new(StubModel::replying("{oops"), "m");
        dialog.generate(&broken, students()).await;
        assert!(dialog.result().is_none());
        assert_eq!(
            dialog.error(),
            Some("Group generation failed. Please try again later.")
        );
    }
}
