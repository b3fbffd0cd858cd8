//! Webhook delivery
//!
//! POSTs the JSON envelope, attachments included, to a configured URL. Any
//! 2xx answer counts as accepted.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::error::DeliveryError;
use crate::models::MessageId;

use super::{Delivery, DeliveryOptions, DeliveryReceipt, Envelope, ReportSender};

/// Longest response body kept in a rejection error
const MAX_ERROR_BODY: usize = 512;

pub struct WebhookSender {
    client: reqwest::Client,
    url: String,
    options: DeliveryOptions,
}

impl WebhookSender {
    pub fn new(url: String, options: DeliveryOptions, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            url,
            options,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ReportSender for WebhookSender {
    async fn deliver(&self, delivery: &Delivery) -> Result<DeliveryReceipt, DeliveryError> {
        let message_id = MessageId::new();
        let envelope = Envelope::new(message_id, delivery, &self.options);
        let body = serde_json::to_vec(&envelope).map_err(|e| DeliveryError::Encode(e.to_string()))?;

        debug!(url = %self.url, bytes = body.len(), "Posting report");

        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header("X-Message-Id", message_id.to_string())
            .body(body)
            .send()
            .await
            .map_err(|e| DeliveryError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let mut text = response.text().await.unwrap_or_default();
            if text.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|i| text.is_char_boundary(*i))
                    .unwrap_or(0);
                text.truncate(cut);
            }
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(DeliveryReceipt::with_id(message_id, self.name()))
    }

    fn name(&self) -> &str {
        "webhook"
    }
}
