use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::flight::FlightRecord;
use crate::hotel::HotelRecord;

/// Shown while nothing has been generated for the current search.
pub const ITINERARY_NOT_GENERATED: &str = "No itinerary yet. Search and then generate.";
/// Substituted when generation fails; never retried.
pub const ITINERARY_FAILED: &str = "Itinerary could not be generated (agent error).";

/// Everything the advisory collaborator needs to draft a day-by-day plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryRequest {
    pub destination: String,
    pub nights: u32,
    pub flights: Vec<FlightRecord>,
    pub hotels: Vec<HotelRecord>,
}

/// External text-generation collaborator producing itinerary prose.
/// Output is opaque free text; any failure is the caller's cue to fall
/// back to [`ITINERARY_FAILED`].
#[async_trait]
pub trait ItineraryAdvisor: Send + Sync {
    async fn draft(
        &self,
        request: &ItineraryRequest,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}
