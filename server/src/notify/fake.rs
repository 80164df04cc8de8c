//! Fake delivery provider for testing.
//!
//! Records every delivery attempt so tests can assert on fan-out behavior
//! without network access.

use super::{DeliveryError, Notifier};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Default)]
pub struct FakeNotifier {
    sent: Mutex<Vec<SentMessage>>,
    attempts: AtomicUsize,
    fail: bool,
}

impl FakeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fake whose every delivery fails, for exercising error paths.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Messages successfully delivered so far.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// Total delivery attempts, including failed ones.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn deliver(&self, to: &str, subject: &str, body: &str) -> Result<(), DeliveryError> {
        self.attempts.fetch_add(1, Ordering::Relaxed);

        if self.fail {
            return Err(DeliveryError::RequestFailed(
                "FakeNotifier configured to fail".to_string(),
            ));
        }

        self.sent.lock().unwrap().push(SentMessage {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
