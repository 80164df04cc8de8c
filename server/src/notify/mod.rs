//! Notification delivery for favoriters of a changed recipe.
//!
//! Delivery transport is a pluggable provider behind the [`Notifier`] trait:
//! a webhook provider for real deployments, a log-only provider when nothing
//! is configured, and a recording fake for tests. Delivery is best-effort:
//! failures are logged and never surface to the request that triggered them.

mod fake;
mod log;
mod webhook;

pub use fake::FakeNotifier;
pub use log::LogNotifier;
pub use webhook::WebhookNotifier;

use crate::store::RecipeStore;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("delivery request failed: {0}")]
    RequestFailed(String),

    #[error("delivery endpoint returned status {status}")]
    Endpoint { status: u16 },
}

/// Trait for notification delivery providers.
///
/// Implementations should be stateless and thread-safe; they are shared
/// across all in-flight requests.
#[async_trait]
pub trait Notifier: Send + Sync + fmt::Debug {
    /// Deliver one notification to one address, best-effort.
    async fn deliver(&self, to: &str, subject: &str, body: &str) -> Result<(), DeliveryError>;

    /// Get the provider name (e.g., "webhook", "log", "fake").
    fn provider_name(&self) -> &'static str;
}

/// Select the delivery provider from the environment:
/// - NOTIFY_PROVIDER: "webhook" | "log" (default: log)
/// - NOTIFY_WEBHOOK_URL: endpoint for the webhook provider
pub fn create_notifier_from_env() -> Arc<dyn Notifier> {
    match std::env::var("NOTIFY_PROVIDER").as_deref() {
        Ok("webhook") => match std::env::var("NOTIFY_WEBHOOK_URL") {
            Ok(url) => Arc::new(WebhookNotifier::new(url)),
            Err(_) => {
                tracing::warn!(
                    "NOTIFY_PROVIDER=webhook but NOTIFY_WEBHOOK_URL not set, \
                     falling back to log-only delivery"
                );
                Arc::new(LogNotifier)
            }
        },
        _ => Arc::new(LogNotifier),
    }
}

/// Normalize a list of addresses to a de-duplicated recipient set. Addresses
/// are compared case-insensitively; blank entries are dropped.
pub fn recipients<I>(emails: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = String>,
{
    emails
        .into_iter()
        .map(|e| e.trim().to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

/// Deliver the message to every recipient, logging failures and continuing.
/// Returns the number of successful deliveries.
pub async fn deliver_to_all(
    notifier: &dyn Notifier,
    recipients: &BTreeSet<String>,
    subject: &str,
    body: &str,
) -> usize {
    let mut delivered = 0;
    for to in recipients {
        match notifier.deliver(to, subject, body).await {
            Ok(()) => delivered += 1,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    recipient = %to,
                    provider = notifier.provider_name(),
                    "notification delivery failed"
                );
            }
        }
    }
    delivered
}

/// Notify every user who favorited the recipe. Runs as a detached task after
/// the triggering update has committed; no caller awaits it, and every
/// failure path here is log-and-continue.
pub async fn notify_favoriters(
    store: RecipeStore,
    notifier: Arc<dyn Notifier>,
    recipe_id: Uuid,
    subject: String,
    body: String,
) {
    let emails = match store.favoriter_emails(recipe_id) {
        Ok(emails) => emails,
        Err(e) => {
            tracing::error!(error = %e, recipe_id = %recipe_id, "failed to resolve favoriters");
            return;
        }
    };

    let recipients = recipients(emails);
    if recipients.is_empty() {
        return;
    }

    let delivered = deliver_to_all(notifier.as_ref(), &recipients, &subject, &body).await;
    tracing::debug!(
        recipe_id = %recipe_id,
        delivered,
        recipients = recipients.len(),
        "favoriter notifications dispatched"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipients_deduplicates_case_insensitively() {
        let set = recipients(vec![
            "ada@example.com".to_string(),
            "Ada@Example.com".to_string(),
            "grace@example.com".to_string(),
        ]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("ada@example.com"));
        assert!(set.contains("grace@example.com"));
    }

    #[test]
    fn test_recipients_drops_blank_entries() {
        let set = recipients(vec!["   ".to_string(), String::new()]);
        assert!(set.is_empty());
    }

    #[tokio::test]
    async fn test_deliver_to_all_sends_one_per_address() {
        let fake = FakeNotifier::new();
        let set = recipients(vec![
            "ada@example.com".to_string(),
            "grace@example.com".to_string(),
        ]);

        let delivered = deliver_to_all(&fake, &set, "Recipe updated", "body").await;

        assert_eq!(delivered, 2);
        let sent = fake.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent.iter().all(|m| m.subject == "Recipe updated"));
    }

    #[tokio::test]
    async fn test_deliver_to_all_empty_set_sends_nothing() {
        let fake = FakeNotifier::new();
        let delivered = deliver_to_all(&fake, &BTreeSet::new(), "s", "b").await;
        assert_eq!(delivered, 0);
        assert!(fake.sent().is_empty());
    }

    #[tokio::test]
    async fn test_deliver_to_all_continues_past_failures() {
        let fake = FakeNotifier::failing();
        let set = recipients(vec![
            "ada@example.com".to_string(),
            "grace@example.com".to_string(),
        ]);

        let delivered = deliver_to_all(&fake, &set, "s", "b").await;

        // Both deliveries were attempted even though both failed
        assert_eq!(delivered, 0);
        assert_eq!(fake.attempts(), 2);
    }
}
