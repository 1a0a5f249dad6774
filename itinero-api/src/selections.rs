use axum::{
    extract::{Json, State},
    routing::put,
    Router,
};
use serde::{Deserialize, Serialize};

use itinero_core::flight::FlightRecord;
use itinero_core::hotel::HotelRecord;
use itinero_core::session::{Resolution, Session};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/selections/flight", put(select_flight))
        .route("/v1/selections/hotel", put(select_hotel))
}

#[derive(Debug, Deserialize)]
struct FlightSelection {
    flight_id: String,
}

#[derive(Debug, Deserialize)]
struct HotelSelection {
    hotel_id: String,
}

/// How the current flight selection resolves against the cached results.
/// A stale id keeps the selection but carries a display note.
#[derive(Debug, Serialize)]
pub struct FlightSelectionView {
    pub selected_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight: Option<FlightRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HotelSelectionView {
    pub selected_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel: Option<HotelRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

pub(crate) fn flight_view(session: &Session) -> FlightSelectionView {
    match session.resolve_flight() {
        Resolution::NotSelected => FlightSelectionView {
            selected_id: None,
            flight: None,
            note: None,
        },
        Resolution::Found(flight) => FlightSelectionView {
            selected_id: Some(flight.flight_id.clone()),
            flight: Some(flight.clone()),
            note: None,
        },
        Resolution::NotInResults(id) => FlightSelectionView {
            selected_id: Some(id.to_string()),
            flight: None,
            note: Some(format!("Flight {} (not in cached list)", id)),
        },
    }
}

pub(crate) fn hotel_view(session: &Session) -> HotelSelectionView {
    match session.resolve_hotel() {
        Resolution::NotSelected => HotelSelectionView {
            selected_id: None,
            hotel: None,
            note: None,
        },
        Resolution::Found(hotel) => HotelSelectionView {
            selected_id: Some(hotel.hotel_id.clone()),
            hotel: Some(hotel.clone()),
            note: None,
        },
        Resolution::NotInResults(id) => HotelSelectionView {
            selected_id: Some(id.to_string()),
            hotel: None,
            note: Some(format!("Hotel {} (not in cached list)", id)),
        },
    }
}

/// Pure state setter: always succeeds, overwrites any prior selection.
async fn select_flight(
    State(state): State<AppState>,
    Json(selection): Json<FlightSelection>,
) -> Json<FlightSelectionView> {
    let mut session = state.session.write().await;
    session.select_flight(selection.flight_id);
    Json(flight_view(&session))
}

async fn select_hotel(
    State(state): State<AppState>,
    Json(selection): Json<HotelSelection>,
) -> Json<HotelSelectionView> {
    let mut session = state.session.write().await;
    session.select_hotel(selection.hotel_id);
    Json(hotel_view(&session))
}
