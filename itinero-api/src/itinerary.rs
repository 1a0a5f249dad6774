use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;
use tracing::warn;

use itinero_core::advisor::{ItineraryRequest, ITINERARY_FAILED, ITINERARY_NOT_GENERATED};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/itinerary", post(generate_itinerary))
}

#[derive(Debug, Serialize)]
struct ItineraryResponse {
    itinerary: String,
}

/// Return the itinerary for the current search, generating it on first
/// request. Generation failures degrade to placeholder text; the result
/// (placeholder included) is cached until the next search clears it.
async fn generate_itinerary(State(state): State<AppState>) -> Json<ItineraryResponse> {
    let mut session = state.session.write().await;

    if let Some(text) = session.itinerary() {
        return Json(ItineraryResponse {
            itinerary: text.to_string(),
        });
    }

    let text = match session.last_search() {
        Some(criteria) if session.has_results() => {
            let request = ItineraryRequest {
                destination: criteria.destination.clone(),
                nights: criteria.nights,
                flights: session.flights().to_vec(),
                hotels: session.hotels().to_vec(),
            };
            match state.advisor.draft(&request).await {
                Ok(text) => text,
                Err(e) => {
                    // Non-fatal, no retry
                    warn!("Itinerary generation failed: {}", e);
                    ITINERARY_FAILED.to_string()
                }
            }
        }
        _ => ITINERARY_NOT_GENERATED.to_string(),
    };

    session.set_itinerary(text.clone());
    Json(ItineraryResponse { itinerary: text })
}
