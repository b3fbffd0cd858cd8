//! Outbox delivery
//!
//! Each delivery becomes a directory under the outbox:
//!
//! ```text
//! outbox/msg-<uuid>/
//!   message.json       envelope: subject, recipient, body, payload
//!   report.txt|csv|... monthly sheets, one file per configured format
//!   attachments.json   return requests, files base64 encoded
//! ```
//!
//! The envelope is written last, so a directory without `message.json` is
//! an interrupted delivery and is skipped when listing.

use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{DeliveryError, ReturnsError, ReturnsResult};
use crate::models::{Attachment, MessageId};
use crate::storage::{read_json_required, write_bytes_atomic, write_json_atomic};

use super::{Delivery, DeliveryOptions, DeliveryReceipt, Envelope, ReportSender};

const ENVELOPE_FILE: &str = "message.json";
const ATTACHMENTS_FILE: &str = "attachments.json";

/// Writes deliveries into a local directory
#[derive(Debug, Clone)]
pub struct OutboxSender {
    dir: PathBuf,
    options: DeliveryOptions,
}

impl OutboxSender {
    pub fn new(dir: PathBuf, options: DeliveryOptions) -> Self {
        Self { dir, options }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write_message(
        dir: &Path,
        options: &DeliveryOptions,
        delivery: &Delivery,
    ) -> Result<MessageId, DeliveryError> {
        let message_id = MessageId::new();
        let message_dir = dir.join(message_id.to_string());
        let mut envelope = Envelope::new(message_id, delivery, options);

        match delivery {
            Delivery::MonthlySheet(snapshot) => {
                for format in &options.report_formats {
                    let bytes = format
                        .render(snapshot, &options.currency_symbol)
                        .map_err(|e| DeliveryError::Encode(e.to_string()))?;
                    write_bytes_atomic(message_dir.join(format.file_name()), &bytes)
                        .map_err(|e| DeliveryError::Io(e.to_string()))?;
                }
            }
            Delivery::ReturnRequest(request) => {
                write_json_atomic(message_dir.join(ATTACHMENTS_FILE), &request.attachments)
                    .map_err(|e| DeliveryError::Io(e.to_string()))?;

                envelope.attachment_names = request
                    .attachments
                    .iter()
                    .map(|a| a.file_name.clone())
                    .collect();
                // File contents live in attachments.json only
                if let Delivery::ReturnRequest(stored) = &mut envelope.delivery {
                    stored.attachments.clear();
                }
            }
        }

        write_json_atomic(message_dir.join(ENVELOPE_FILE), &envelope)
            .map_err(|e| DeliveryError::Io(e.to_string()))?;

        debug!(path = %message_dir.display(), "Wrote outbox message");
        Ok(message_id)
    }
}

#[async_trait]
impl ReportSender for OutboxSender {
    async fn deliver(&self, delivery: &Delivery) -> Result<DeliveryReceipt, DeliveryError> {
        let dir = self.dir.clone();
        let options = self.options.clone();
        let delivery = delivery.clone();

        let message_id =
            tokio::task::spawn_blocking(move || Self::write_message(&dir, &options, &delivery))
                .await
                .map_err(|e| DeliveryError::Io(e.to_string()))??;

        Ok(DeliveryReceipt::with_id(message_id, self.name()))
    }

    fn name(&self) -> &str {
        "outbox"
    }
}

/// All complete messages in the outbox, oldest first
pub fn list_messages(dir: &Path) -> ReturnsResult<Vec<Envelope>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut messages = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path().join(ENVELOPE_FILE);
        if path.exists() {
            messages.push(read_json_required::<Envelope, _>(&path)?);
        }
    }
    messages.sort_by_key(|m| m.created_at);
    Ok(messages)
}

/// Find a message by full id or unique prefix (`msg-1a2b3c4d`)
pub fn find_message(dir: &Path, id: &str) -> ReturnsResult<Envelope> {
    let id = id.trim();
    let mut matches: Vec<Envelope> = list_messages(dir)?
        .into_iter()
        .filter(|m| {
            let full = m.message_id.to_string();
            full == id || m.message_id.short() == id || full.starts_with(id)
        })
        .collect();

    match matches.len() {
        1 => Ok(matches.remove(0)),
        0 => Err(ReturnsError::message_not_found(id)),
        n => Err(ReturnsError::Storage(format!(
            "'{}' matches {} messages, use a longer id",
            id, n
        ))),
    }
}

/// Attachments stored alongside a return request message
pub fn load_attachments(dir: &Path, message_id: MessageId) -> ReturnsResult<Vec<Attachment>> {
    let path = dir.join(message_id.to_string()).join(ATTACHMENTS_FILE);
    if !path.exists() {
        return Ok(Vec::new());
    }
    read_json_required(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tests::sample_snapshot;
    use crate::export::ReportFormat;
    use crate::models::{ReturnId, ReturnReason, ReturnRequest, Urgency};
    use chrono::{NaiveDate, Utc};
    use tempfile::TempDir;

    fn options() -> DeliveryOptions {
        DeliveryOptions {
            recipient: "office@example.org".into(),
            currency_symbol: "$".into(),
            report_formats: vec![ReportFormat::Text, ReportFormat::Csv, ReportFormat::Yaml],
        }
    }

    fn return_request() -> ReturnRequest {
        ReturnRequest {
            id: ReturnId::new(),
            return_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            customer_name: "Ada Lovelace".into(),
            order_number: "ORD-1001".into(),
            customer_email: "ada@example.com".into(),
            customer_phone: String::new(),
            product_sku: String::new(),
            product_name: String::new(),
            quantity: 1,
            reason: ReturnReason::Defective,
            urgency: Urgency::Normal,
            notes: String::new(),
            attachments: vec![Attachment::from_bytes("receipt.pdf", b"%PDF-1.4".to_vec()).unwrap()],
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_sheet_delivery_writes_reports() {
        let temp_dir = TempDir::new().unwrap();
        let sender = OutboxSender::new(temp_dir.path().to_path_buf(), options());

        let receipt = sender
            .deliver(&Delivery::MonthlySheet(sample_snapshot()))
            .await
            .unwrap();
        assert_eq!(receipt.sender, "outbox");

        let message_dir = temp_dir.path().join(receipt.message_id.to_string());
        assert!(message_dir.join("message.json").exists());
        assert!(message_dir.join("report.txt").exists());
        assert!(message_dir.join("report.csv").exists());
        assert!(message_dir.join("report.yaml").exists());
        assert!(!message_dir.join("report.json").exists());

        let envelope = find_message(temp_dir.path(), &receipt.message_id.short()).unwrap();
        assert_eq!(envelope.recipient, "office@example.org");
        assert_eq!(envelope.kind(), "monthly-sheet");
    }

    #[tokio::test]
    async fn test_return_delivery_stores_attachments_separately() {
        let temp_dir = TempDir::new().unwrap();
        let sender = OutboxSender::new(temp_dir.path().to_path_buf(), options());

        let receipt = sender
            .deliver(&Delivery::ReturnRequest(return_request()))
            .await
            .unwrap();

        let envelope = find_message(temp_dir.path(), &receipt.message_id.to_string()).unwrap();
        assert_eq!(envelope.attachment_names, vec!["receipt.pdf"]);
        match &envelope.delivery {
            Delivery::ReturnRequest(request) => assert!(request.attachments.is_empty()),
            other => panic!("unexpected delivery {other:?}"),
        }

        let attachments = load_attachments(temp_dir.path(), receipt.message_id).unwrap();
        assert_eq!(attachments.len(), 1);
        assert_eq!(attachments[0].bytes, b"%PDF-1.4");
    }

    #[tokio::test]
    async fn test_list_skips_incomplete_messages() {
        let temp_dir = TempDir::new().unwrap();
        let sender = OutboxSender::new(temp_dir.path().to_path_buf(), options());
        sender
            .deliver(&Delivery::MonthlySheet(sample_snapshot()))
            .await
            .unwrap();
        fs::create_dir_all(temp_dir.path().join("msg-interrupted")).unwrap();

        assert_eq!(list_messages(temp_dir.path()).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_outbox_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        assert!(list_messages(&temp_dir.path().join("none")).unwrap().is_empty());
        assert!(matches!(
            find_message(temp_dir.path(), "msg-0000"),
            Err(ReturnsError::NotFound { .. })
        ));
    }
}
