use std::sync::Arc;

use async_trait::async_trait;
use gatehouse_core::{EmailClient, EmailClientError, Notification};
use tokio::sync::RwLock;

/// Test double for the notification port: records everything it is asked to
/// send so tests can assert on (and fish plaintext reset tokens out of) the
/// outbound mail.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient {
    sent: Arc<RwLock<Vec<Notification>>>,
}

impl MockEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<Notification> {
        self.sent.read().await.clone()
    }

    pub async fn last_sent(&self) -> Option<Notification> {
        self.sent.read().await.last().cloned()
    }
}

#[async_trait]
impl EmailClient for MockEmailClient {
    async fn send(&self, notification: &Notification) -> Result<(), EmailClientError> {
        self.sent.write().await.push(notification.clone());
        Ok(())
    }
}
