//! Return request form
//!
//! Raw field text, the attached files and the submission state of one
//! return request. A successful submission resets the form to a blank
//! request dated today.

use chrono::{Local, Utc};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::delivery::{deliver_with_timeout, Delivery, DeliveryReceipt, ReportSender};
use crate::error::{DeliveryError, ReturnsResult, ValidationError, WorkflowError};
use crate::models::{Attachment, AttachmentSet, ReturnId, ReturnReason, ReturnRequest, Urgency};
use crate::validation;

use super::workflow::{SubmissionState, SubmissionWorkflow};

/// Text fields of the returns form, in screen order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnField {
    CustomerName,
    CustomerEmail,
    CustomerPhone,
    OrderNumber,
    ReturnDate,
    ProductSku,
    ProductName,
    Quantity,
    Notes,
}

impl ReturnField {
    pub const ALL: [ReturnField; 9] = [
        Self::CustomerName,
        Self::CustomerEmail,
        Self::CustomerPhone,
        Self::OrderNumber,
        Self::ReturnDate,
        Self::ProductSku,
        Self::ProductName,
        Self::Quantity,
        Self::Notes,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::CustomerName => "Full Name *",
            Self::CustomerEmail => "Email Address *",
            Self::CustomerPhone => "Phone Number",
            Self::OrderNumber => "Order Number *",
            Self::ReturnDate => "Return Date",
            Self::ProductSku => "Product SKU",
            Self::ProductName => "Product Name",
            Self::Quantity => "Quantity",
            Self::Notes => "Additional Notes",
        }
    }

    /// Keystroke filter
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Self::Quantity => validation::count_partial(value),
            Self::ReturnDate => {
                value.len() <= 10 && value.chars().all(|c| c.is_ascii_digit() || c == '-')
            }
            _ => true,
        }
    }
}

/// Raw inputs of the returns form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnDraft {
    pub return_date: String,
    pub customer_name: String,
    pub order_number: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub product_sku: String,
    pub product_name: String,
    pub quantity: String,
    pub reason: ReturnReason,
    pub urgency: Urgency,
    pub notes: String,
}

impl Default for ReturnDraft {
    fn default() -> Self {
        Self {
            return_date: Local::now().date_naive().format("%Y-%m-%d").to_string(),
            customer_name: String::new(),
            order_number: String::new(),
            customer_email: String::new(),
            customer_phone: String::new(),
            product_sku: String::new(),
            product_name: String::new(),
            quantity: "1".to_string(),
            reason: ReturnReason::default(),
            urgency: Urgency::default(),
            notes: String::new(),
        }
    }
}

impl ReturnDraft {
    pub fn get(&self, field: ReturnField) -> &str {
        match field {
            ReturnField::CustomerName => &self.customer_name,
            ReturnField::CustomerEmail => &self.customer_email,
            ReturnField::CustomerPhone => &self.customer_phone,
            ReturnField::OrderNumber => &self.order_number,
            ReturnField::ReturnDate => &self.return_date,
            ReturnField::ProductSku => &self.product_sku,
            ReturnField::ProductName => &self.product_name,
            ReturnField::Quantity => &self.quantity,
            ReturnField::Notes => &self.notes,
        }
    }

    /// Replace a field's text if it passes the keystroke filter
    pub fn set_field(&mut self, field: ReturnField, value: &str) -> bool {
        if !field.accepts(value) {
            return false;
        }
        let slot = match field {
            ReturnField::CustomerName => &mut self.customer_name,
            ReturnField::CustomerEmail => &mut self.customer_email,
            ReturnField::CustomerPhone => &mut self.customer_phone,
            ReturnField::OrderNumber => &mut self.order_number,
            ReturnField::ReturnDate => &mut self.return_date,
            ReturnField::ProductSku => &mut self.product_sku,
            ReturnField::ProductName => &mut self.product_name,
            ReturnField::Quantity => &mut self.quantity,
            ReturnField::Notes => &mut self.notes,
        };
        *slot = value.to_string();
        true
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReturnsForm {
    draft: ReturnDraft,
    attachments: AttachmentSet,
    workflow: SubmissionWorkflow,
}

impl ReturnsForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &ReturnDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ReturnDraft {
        &mut self.draft
    }

    pub fn attachments(&self) -> &AttachmentSet {
        &self.attachments
    }

    pub fn state(&self) -> &SubmissionState {
        self.workflow.state()
    }

    pub fn is_submitting(&self) -> bool {
        self.workflow.is_submitting()
    }

    /// Read a file from disk and attach it
    pub fn attach(&mut self, path: &Path) -> ReturnsResult<&Attachment> {
        self.workflow.ensure_not_submitting()?;
        let attachment = self.attachments.add_path(path)?;
        info!(
            file = %attachment.file_name,
            bytes = attachment.size_bytes,
            "Attachment added"
        );
        Ok(attachment)
    }

    pub fn attach_bytes(&mut self, file_name: &str, bytes: Vec<u8>) -> ReturnsResult<()> {
        self.workflow.ensure_not_submitting()?;
        let attachment = Attachment::from_bytes(file_name, bytes)?;
        self.attachments.add(attachment)?;
        Ok(())
    }

    pub fn remove_attachment(&mut self, index: usize) -> ReturnsResult<Option<Attachment>> {
        self.workflow.ensure_not_submitting()?;
        Ok(self.attachments.remove(index))
    }

    /// Validate the form into a request
    ///
    /// Required fields are checked before their formats, and attachments
    /// last.
    pub fn build(&self) -> Result<ReturnRequest, ValidationError> {
        let d = &self.draft;
        let customer_name = validation::require_non_empty("Full Name", &d.customer_name)?;
        let order_number = validation::require_non_empty("Order Number", &d.order_number)?;
        validation::require_non_empty("Email Address", &d.customer_email)?;
        let customer_email = validation::parse_email(&d.customer_email)?;
        let return_date = validation::parse_date(&d.return_date)?;
        let quantity = validation::parse_quantity(&d.quantity)?;

        if self.attachments.is_empty() {
            return Err(ValidationError::NoAttachments);
        }

        Ok(ReturnRequest {
            id: ReturnId::new(),
            return_date,
            customer_name,
            order_number,
            customer_email,
            customer_phone: d.customer_phone.trim().to_string(),
            product_sku: d.product_sku.trim().to_string(),
            product_name: d.product_name.trim().to_string(),
            quantity,
            reason: d.reason,
            urgency: d.urgency,
            notes: d.notes.trim().to_string(),
            attachments: self.attachments.files().to_vec(),
            created_at: Utc::now(),
        })
    }

    pub fn begin_submission(&mut self) -> ReturnsResult<ReturnRequest> {
        self.workflow.begin()?;
        let request = match self.build() {
            Ok(request) => request,
            Err(err) => {
                self.workflow.reject();
                return Err(err.into());
            }
        };
        self.workflow.start_submitting()?;
        info!(
            request = %request.id.short(),
            order = %request.order_number,
            attachments = request.attachments.len(),
            "Submitting return request"
        );
        Ok(request)
    }

    /// Record the delivery outcome; success resets the form
    pub fn finish_submission(
        &mut self,
        outcome: &Result<DeliveryReceipt, DeliveryError>,
    ) -> Result<(), WorkflowError> {
        self.workflow.finish(outcome)?;
        match outcome {
            Ok(receipt) => {
                self.draft = ReturnDraft::default();
                self.attachments.clear();
                info!(message_id = %receipt.message_id, "Return request submitted");
            }
            Err(err) => warn!(error = %err, "Return request submission failed"),
        }
        Ok(())
    }

    pub fn acknowledge(&mut self) {
        self.workflow.acknowledge();
    }

    pub async fn submit(
        &mut self,
        sender: &dyn ReportSender,
        timeout: Duration,
    ) -> ReturnsResult<DeliveryReceipt> {
        let request = self.begin_submission()?;
        let outcome =
            deliver_with_timeout(sender, &Delivery::ReturnRequest(request), timeout).await;
        self.finish_submission(&outcome)?;
        Ok(outcome?)
    }

    pub fn status_message(&self) -> Option<String> {
        match self.workflow.state() {
            SubmissionState::Submitting => Some("Submitting return...".into()),
            SubmissionState::Succeeded(_) => Some(
                "Return submitted successfully! Documents will be emailed shortly.".into(),
            ),
            SubmissionState::Failed { message, .. } => {
                Some(format!("Submission failed: {}", message))
            }
            _ => None,
        }
    }
}
