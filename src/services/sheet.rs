//! Attendance sheet
//!
//! The state behind the attendance screen: location, the entry being typed,
//! the month's ledger and where its submission stands. Everything the UI
//! does to a sheet goes through here so the in-flight rule holds in one
//! place.

use std::time::Duration;
use tracing::{info, warn};

use crate::delivery::{deliver_with_timeout, Delivery, DeliveryReceipt, ReportSender};
use crate::error::{DeliveryError, ReturnsResult, ValidationError, WorkflowError};
use crate::models::{EntryId, LocationContext, ReportingMonth, ServiceEntry};

use super::draft::EntryDraft;
use super::ledger::{LedgerSnapshot, LedgerTotals, MonthlyLedger};
use super::workflow::{SubmissionState, SubmissionWorkflow};

#[derive(Debug, Clone, Default)]
pub struct AttendanceSheet {
    location: LocationContext,
    draft: EntryDraft,
    ledger: MonthlyLedger,
    workflow: SubmissionWorkflow,
    /// Entry count and location of the submission in flight or last sent
    submitted: Option<(usize, LocationContext)>,
}

impl AttendanceSheet {
    pub fn new(location: LocationContext) -> Self {
        Self {
            location,
            ..Self::default()
        }
    }

    /// Start a sheet on a specific month instead of the current one
    pub fn for_month(location: LocationContext, month: ReportingMonth) -> Self {
        Self {
            location,
            draft: EntryDraft::for_month(month),
            ..Self::default()
        }
    }

    pub fn location(&self) -> &LocationContext {
        &self.location
    }

    pub fn set_location(&mut self, location: LocationContext) -> Result<(), WorkflowError> {
        self.workflow.ensure_not_submitting()?;
        self.location = location;
        Ok(())
    }

    pub fn draft(&self) -> &EntryDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut EntryDraft {
        &mut self.draft
    }

    pub fn ledger(&self) -> &MonthlyLedger {
        &self.ledger
    }

    pub fn entries(&self) -> &[ServiceEntry] {
        self.ledger.entries()
    }

    pub fn totals(&self) -> LedgerTotals {
        self.ledger.aggregate()
    }

    pub fn state(&self) -> &SubmissionState {
        self.workflow.state()
    }

    pub fn is_submitting(&self) -> bool {
        self.workflow.is_submitting()
    }

    /// Validate the draft and append it to the ledger
    pub fn add_entry(&mut self) -> ReturnsResult<ServiceEntry> {
        self.workflow.ensure_not_submitting()?;
        let entry = self.ledger.add_entry(&mut self.draft, &self.location)?;
        info!(
            entry = %entry.id.short(),
            sheet = %entry.sheet_number,
            day = entry.day,
            "Entry added"
        );
        Ok(entry)
    }

    pub fn remove_entry(&mut self, id: EntryId) -> ReturnsResult<Option<ServiceEntry>> {
        self.workflow.ensure_not_submitting()?;
        let removed = self.ledger.remove_entry(id);
        if removed.is_some() {
            info!(entry = %id.short(), "Entry removed");
        }
        Ok(removed)
    }

    pub fn clear(&mut self) -> Result<(), WorkflowError> {
        self.workflow.ensure_not_submitting()?;
        self.ledger.clear();
        Ok(())
    }

    /// Submit intent: validate and freeze the ledger for delivery
    ///
    /// On failure the state goes back to where it was and the ledger is
    /// untouched.
    pub fn begin_submission(&mut self) -> ReturnsResult<LedgerSnapshot> {
        self.workflow.begin()?;

        let checked = if self.ledger.is_empty() {
            Err(ValidationError::EmptyLedger)
        } else if !self.location.is_complete() {
            Err(ValidationError::LocationIncomplete)
        } else {
            self.ledger.snapshot(&self.location)
        };

        let snapshot = match checked {
            Ok(snapshot) => snapshot,
            Err(err) => {
                self.workflow.reject();
                return Err(err.into());
            }
        };

        self.workflow.start_submitting()?;
        self.submitted = Some((snapshot.entries.len(), snapshot.location.clone()));
        info!(
            month = %snapshot.month,
            location = %snapshot.location,
            entries = snapshot.totals.entry_count,
            "Submitting monthly sheet"
        );
        Ok(snapshot)
    }

    /// Record the delivery outcome; success clears the ledger
    pub fn finish_submission(
        &mut self,
        outcome: &Result<DeliveryReceipt, DeliveryError>,
    ) -> Result<(), WorkflowError> {
        self.workflow.finish(outcome)?;
        match outcome {
            Ok(receipt) => {
                self.ledger.clear();
                info!(message_id = %receipt.message_id, "Monthly sheet submitted");
            }
            Err(err) => warn!(error = %err, "Monthly sheet submission failed"),
        }
        Ok(())
    }

    pub fn acknowledge(&mut self) {
        self.workflow.acknowledge();
    }

    /// Begin, deliver within `timeout`, and finish
    pub async fn submit(
        &mut self,
        sender: &dyn ReportSender,
        timeout: Duration,
    ) -> ReturnsResult<DeliveryReceipt> {
        let snapshot = self.begin_submission()?;
        let outcome =
            deliver_with_timeout(sender, &Delivery::MonthlySheet(snapshot), timeout).await;
        self.finish_submission(&outcome)?;
        Ok(outcome?)
    }

    /// One-line status for the current submission state
    pub fn status_message(&self) -> Option<String> {
        match (self.workflow.state(), &self.submitted) {
            (SubmissionState::Submitting, _) => Some("Submitting monthly data...".into()),
            (SubmissionState::Succeeded(_), Some((count, location))) => Some(format!(
                "Monthly sheet submitted! {} entries sent for {}",
                count, location
            )),
            (SubmissionState::Failed { message, .. }, _) => {
                Some(format!("Submission failed: {}", message))
            }
            _ => None,
        }
    }
}
