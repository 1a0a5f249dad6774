use async_trait::async_trait;

use itinero_core::advisor::{ItineraryAdvisor, ItineraryRequest, ITINERARY_NOT_GENERATED};

/// Selected at startup when no advisory credential is configured. Never
/// calls out; always reports that nothing has been generated.
pub struct StubAdvisor;

#[async_trait]
impl ItineraryAdvisor for StubAdvisor {
    async fn draft(
        &self,
        _request: &ItineraryRequest,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(ITINERARY_NOT_GENERATED.to_string())
    }
}
