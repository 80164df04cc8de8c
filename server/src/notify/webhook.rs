//! Webhook delivery provider.
//!
//! Posts each notification as JSON to a configured endpoint; the service
//! behind the endpoint owns the actual transport (email, push, etc.).

use super::{DeliveryError, Notifier};
use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug)]
pub struct WebhookNotifier {
    url: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn deliver(&self, to: &str, subject: &str, body: &str) -> Result<(), DeliveryError> {
        let payload = WebhookPayload { to, subject, body };

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| DeliveryError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Endpoint {
                status: status.as_u16(),
            });
        }

        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "webhook"
    }
}
