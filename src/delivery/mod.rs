//! Report delivery
//!
//! A `ReportSender` takes a validated payload (a monthly sheet or a return
//! request) and hands it to whoever receives reports. Two senders ship with
//! the application: the outbox writes messages to disk, the webhook POSTs
//! them to an HTTP endpoint.

pub mod outbox;
pub mod webhook;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::{DeliverySettings, ReturnsPaths, Settings};
use crate::error::DeliveryError;
use crate::export::ReportFormat;
use crate::models::{MessageId, ReturnRequest};
use crate::reports;
use crate::services::LedgerSnapshot;

pub use outbox::OutboxSender;
pub use webhook::WebhookSender;

/// What is being delivered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "kebab-case")]
pub enum Delivery {
    MonthlySheet(LedgerSnapshot),
    ReturnRequest(ReturnRequest),
}

impl Delivery {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MonthlySheet(_) => "monthly-sheet",
            Self::ReturnRequest(_) => "return-request",
        }
    }

    pub fn subject(&self) -> String {
        match self {
            Self::MonthlySheet(snapshot) => reports::monthly::subject(snapshot),
            Self::ReturnRequest(request) => reports::return_summary::subject(request),
        }
    }

    /// Plain-text message body
    pub fn body(&self, currency_symbol: &str) -> String {
        match self {
            Self::MonthlySheet(snapshot) => reports::monthly::render_text(snapshot, currency_symbol),
            Self::ReturnRequest(request) => reports::return_summary::render_text(request),
        }
    }
}

/// Proof that a sender accepted a delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    pub message_id: MessageId,
    pub delivered_at: DateTime<Utc>,
    /// Name of the sender that accepted it
    pub sender: String,
}

impl DeliveryReceipt {
    pub fn new(sender: impl Into<String>) -> Self {
        Self::with_id(MessageId::new(), sender)
    }

    pub fn with_id(message_id: MessageId, sender: impl Into<String>) -> Self {
        Self {
            message_id,
            delivered_at: Utc::now(),
            sender: sender.into(),
        }
    }
}

/// Addressing and rendering options shared by every sender
#[derive(Debug, Clone)]
pub struct DeliveryOptions {
    pub recipient: String,
    pub currency_symbol: String,
    pub report_formats: Vec<ReportFormat>,
}

impl DeliveryOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            recipient: settings.recipient_email.clone(),
            currency_symbol: settings.currency_symbol.clone(),
            report_formats: settings.report_formats.clone(),
        }
    }
}

impl Default for DeliveryOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// A message as stored in the outbox or posted to a webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub message_id: MessageId,
    pub subject: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub recipient: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    /// File names of attachments stored next to the envelope
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachment_names: Vec<String>,
    pub delivery: Delivery,
}

impl Envelope {
    pub fn new(message_id: MessageId, delivery: &Delivery, options: &DeliveryOptions) -> Self {
        Self {
            message_id,
            subject: delivery.subject(),
            recipient: options.recipient.clone(),
            body: delivery.body(&options.currency_symbol),
            created_at: Utc::now(),
            attachment_names: Vec::new(),
            delivery: delivery.clone(),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.delivery.kind()
    }
}

/// Something that accepts reports for delivery
#[async_trait]
pub trait ReportSender: Send + Sync {
    /// Deliver a payload, returning a receipt once it was accepted
    async fn deliver(&self, delivery: &Delivery) -> Result<DeliveryReceipt, DeliveryError>;

    /// Short name used in receipts and logs
    fn name(&self) -> &str;
}

/// Deliver with an upper bound on how long the sender may take
pub async fn deliver_with_timeout(
    sender: &dyn ReportSender,
    delivery: &Delivery,
    timeout: Duration,
) -> Result<DeliveryReceipt, DeliveryError> {
    info!(
        sender = sender.name(),
        kind = delivery.kind(),
        timeout_secs = timeout.as_secs(),
        "Delivering"
    );

    let outcome = match tokio::time::timeout(timeout, sender.deliver(delivery)).await {
        Ok(result) => result,
        Err(_) => Err(DeliveryError::Timeout {
            secs: timeout.as_secs(),
        }),
    };

    match &outcome {
        Ok(receipt) => info!(
            sender = sender.name(),
            message_id = %receipt.message_id,
            "Delivery accepted"
        ),
        Err(err) => warn!(sender = sender.name(), error = %err, "Delivery failed"),
    }
    outcome
}

/// Build the sender configured in settings
pub fn build_sender(settings: &Settings, paths: &ReturnsPaths) -> Arc<dyn ReportSender> {
    let options = DeliveryOptions::from_settings(settings);
    match &settings.delivery {
        DeliverySettings::Outbox => Arc::new(OutboxSender::new(paths.outbox_dir(), options)),
        DeliverySettings::Webhook { url } => {
            Arc::new(WebhookSender::new(url.clone(), options, settings.submit_timeout()))
        }
    }
}
