use axum::{
    extract::{Json, State},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tracing::info;

use itinero_core::flight::FlightRecord;
use itinero_core::hotel::HotelRecord;
use itinero_core::search::{self, SearchCriteria};
use itinero_core::CoreError;

use crate::error::ApiError;
use crate::selections::{flight_view, hotel_view, FlightSelectionView, HotelSelectionView};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/search", post(run_search))
        .route("/v1/session", get(session_view))
}

#[derive(Debug, Serialize)]
struct SearchResponse {
    flights: Vec<FlightRecord>,
    hotels: Vec<HotelRecord>,
}

#[derive(Debug, Serialize)]
struct SelectionsView {
    flight: FlightSelectionView,
    hotel: HotelSelectionView,
}

#[derive(Debug, Serialize)]
struct SessionResponse {
    last_search: Option<SearchCriteria>,
    flights: Vec<FlightRecord>,
    hotels: Vec<HotelRecord>,
    itinerary: Option<String>,
    selections: SelectionsView,
}

async fn run_search(
    State(state): State<AppState>,
    Json(criteria): Json<SearchCriteria>,
) -> Result<Json<SearchResponse>, ApiError> {
    // 1. Validate endpoints before touching any state
    criteria.validate().map_err(|e| match e {
        CoreError::ValidationError(msg) => ApiError::ValidationError(msg),
        other => ApiError::InternalServerError(other.to_string()),
    })?;

    // 2. Load datasets (cached for the configured window)
    let (flights, hotels) = state
        .catalog
        .tables()
        .map_err(|e| ApiError::InternalServerError(e.to_string()))?;

    // 3. Filter and rank
    let flight_results = search::search_flights(&flights, &criteria);
    let hotel_results = search::search_hotels(&hotels, &criteria);
    info!(
        origin = %criteria.origin,
        destination = %criteria.destination,
        flights = flight_results.len(),
        hotels = hotel_results.len(),
        "Search completed"
    );

    // 4. Replace the session's result sets; selections survive on purpose
    let mut session = state.session.write().await;
    session.apply_search(criteria, flight_results, hotel_results);

    Ok(Json(SearchResponse {
        flights: session.flights().to_vec(),
        hotels: session.hotels().to_vec(),
    }))
}

async fn session_view(State(state): State<AppState>) -> Json<SessionResponse> {
    let session = state.session.read().await;
    Json(SessionResponse {
        last_search: session.last_search().cloned(),
        flights: session.flights().to_vec(),
        hotels: session.hotels().to_vec(),
        itinerary: session.itinerary().map(str::to_string),
        selections: SelectionsView {
            flight: flight_view(&session),
            hotel: hotel_view(&session),
        },
    })
}
