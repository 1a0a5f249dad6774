use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Delivery report from the notification side channel. Only the status
/// field matters to this system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryStatus {
    pub to: String,
    pub status: String,
}

/// Fire-and-forget confirmation messages.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<DeliveryStatus, Box<dyn std::error::Error + Send + Sync>>;
}
