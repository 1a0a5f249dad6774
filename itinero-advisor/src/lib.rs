pub mod gemini;
pub mod stub;

pub use gemini::GeminiAdvisor;
pub use stub::StubAdvisor;

use itinero_core::advisor::ItineraryRequest;

#[derive(Debug, thiserror::Error)]
pub enum AdvisoryError {
    #[error("Advisory request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Advisory service returned status {0}")]
    Api(u16),
    #[error("Advisory service returned no text")]
    EmptyResponse,
}

/// Fixed instruction: a day-by-day plan over the candidate lists.
pub fn build_prompt(request: &ItineraryRequest) -> String {
    let flights = serde_json::to_string(&request.flights).unwrap_or_else(|_| "[]".to_string());
    let hotels = serde_json::to_string(&request.hotels).unwrap_or_else(|_| "[]".to_string());
    format!(
        "Create a {}-day itinerary for {}. Flights: {} Hotels: {} \
         Return a day-by-day plan with 1-2 activities and a dining suggestion.",
        request.nights, request.destination, flights, hotels
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use itinero_core::flight::FlightRecord;

    #[test]
    fn test_prompt_carries_destination_nights_and_candidates() {
        let request = ItineraryRequest {
            destination: "Paris".to_string(),
            nights: 3,
            flights: vec![FlightRecord {
                flight_id: "F1".to_string(),
                airline: "IndiAir".to_string(),
                flight_number: "IA101".to_string(),
                origin: "Delhi".to_string(),
                destination: "Paris".to_string(),
                depart_datetime: "2025-10-05T10:00".to_string(),
                arrive_datetime: "2025-10-05T18:30".to_string(),
                price_usd: 500.0,
                num_stops: 1,
                cabin: "Economy".to_string(),
                refundable: true,
                wifi: false,
                bag_allowance_kg: 23,
            }],
            hotels: vec![],
        };
        let prompt = build_prompt(&request);
        assert!(prompt.starts_with("Create a 3-day itinerary for Paris."));
        assert!(prompt.contains("\"flight_id\":\"F1\""));
        assert!(prompt.contains("dining suggestion"));
    }
}
