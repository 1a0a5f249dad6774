use async_trait::async_trait;
use tracing::info;

use itinero_core::notify::{DeliveryStatus, Notifier};

/// Mocked notification channel: reports "sent" without delivering anything.
pub struct MockMailer;

#[async_trait]
impl Notifier for MockMailer {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        _body: &str,
    ) -> Result<DeliveryStatus, Box<dyn std::error::Error + Send + Sync>> {
        info!(to, subject, "Mock confirmation message sent");
        Ok(DeliveryStatus {
            to: to.to_string(),
            status: "sent".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_mailer_reports_sent() {
        let mailer = MockMailer;
        let status = mailer
            .send("traveler@example.com", "Booking TRV-000001", "Details")
            .await
            .unwrap();
        assert_eq!(status.status, "sent");
        assert_eq!(status.to, "traveler@example.com");
    }
}
