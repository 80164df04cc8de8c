//! Log-only delivery provider, used when no transport is configured.

use super::{DeliveryError, Notifier};
use async_trait::async_trait;

#[derive(Debug)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn deliver(&self, to: &str, subject: &str, _body: &str) -> Result<(), DeliveryError> {
        tracing::info!(recipient = %to, subject = %subject, "notification delivered to log");
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "log"
    }
}
