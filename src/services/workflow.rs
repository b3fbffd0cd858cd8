//! Submission state machine
//!
//! ```text
//! Idle ──submit──▶ Validating ──pass──▶ Submitting ──ok──▶ Succeeded
//!  ▲                   │                    │                  │
//!  │                   └─fail (back to      └─err──▶ Failed    │
//!  │                      previous state)             │        │
//!  └──────────────────── acknowledge ◀────────────────┴────────┘
//! ```
//!
//! Submit intent is accepted from `Idle` and `Failed`. A `Succeeded` state
//! that has not been acknowledged yet is acknowledged implicitly. While
//! `Submitting`, every further submit intent is refused, so at most one
//! delivery is ever in flight.

use std::fmt;

use crate::delivery::DeliveryReceipt;
use crate::error::{DeliveryError, WorkflowError};

/// Where a form is in its submission lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded(DeliveryReceipt),
    Failed { message: String, retryable: bool },
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed { .. })
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Ready"),
            Self::Validating => write!(f, "Checking"),
            Self::Submitting => write!(f, "Sending"),
            Self::Succeeded(receipt) => write!(f, "Sent ({})", receipt.message_id.short()),
            Self::Failed { message, .. } => write!(f, "Failed: {}", message),
        }
    }
}

/// Drives a `SubmissionState` through legal transitions only
#[derive(Debug, Clone, Default)]
pub struct SubmissionWorkflow {
    state: SubmissionState,
    /// State to return to when validation fails
    resume: SubmissionState,
}

impl SubmissionWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting()
    }

    /// Refuse an operation that must not run while a delivery is in flight
    pub fn ensure_not_submitting(&self) -> Result<(), WorkflowError> {
        if self.state.is_submitting() {
            Err(WorkflowError::InFlight)
        } else {
            Ok(())
        }
    }

    /// Submit intent: move to `Validating`
    pub fn begin(&mut self) -> Result<(), WorkflowError> {
        match self.state {
            SubmissionState::Submitting | SubmissionState::Validating => {
                Err(WorkflowError::InFlight)
            }
            SubmissionState::Succeeded(_) => {
                self.acknowledge();
                self.resume = SubmissionState::Idle;
                self.state = SubmissionState::Validating;
                Ok(())
            }
            SubmissionState::Idle | SubmissionState::Failed { .. } => {
                self.resume = std::mem::take(&mut self.state);
                self.state = SubmissionState::Validating;
                Ok(())
            }
        }
    }

    /// Validation failed: go back to where submit intent came from
    pub fn reject(&mut self) {
        if self.state == SubmissionState::Validating {
            self.state = std::mem::take(&mut self.resume);
        }
    }

    /// Validation passed: the payload is handed to the collaborator
    pub fn start_submitting(&mut self) -> Result<(), WorkflowError> {
        if self.state != SubmissionState::Validating {
            return Err(WorkflowError::NotSubmitting);
        }
        self.resume = SubmissionState::Idle;
        self.state = SubmissionState::Submitting;
        Ok(())
    }

    /// Record the collaborator's answer
    pub fn finish(
        &mut self,
        outcome: &Result<DeliveryReceipt, DeliveryError>,
    ) -> Result<(), WorkflowError> {
        if !self.state.is_submitting() {
            return Err(WorkflowError::NotSubmitting);
        }
        self.state = match outcome {
            Ok(receipt) => SubmissionState::Succeeded(receipt.clone()),
            Err(err) => SubmissionState::Failed {
                message: err.to_string(),
                retryable: err.is_retryable(),
            },
        };
        Ok(())
    }

    /// Dismiss a terminal state
    pub fn acknowledge(&mut self) {
        if self.state.is_terminal() {
            self.state = SubmissionState::Idle;
        }
    }
}
