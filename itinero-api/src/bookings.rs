use axum::{
    extract::{Json, Query, State},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use chrono::NaiveDate;
use itinero_core::notify::DeliveryStatus;
use itinero_core::repository::{BookingSummary, NewBooking};
use itinero_core::session::Resolution;

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/bookings", post(confirm_booking))
        .route("/v1/bookings/recent", get(recent_bookings))
}

#[derive(Debug, Deserialize, Default)]
struct ConfirmRequest {
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Serialize)]
struct ConfirmResponse {
    booking_id: i64,
    confirmation_code: String,
    origin: String,
    destination: String,
    travel_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<DeliveryStatus>,
}

async fn confirm_booking(
    State(state): State<AppState>,
    Json(request): Json<ConfirmRequest>,
) -> Result<Json<ConfirmResponse>, ApiError> {
    let session = state.session.read().await;

    // 1. Both selections must resolve against the current result set
    let (flight, hotel) = match (session.resolve_flight(), session.resolve_hotel()) {
        (Resolution::Found(flight), Resolution::Found(hotel)) => (flight.clone(), hotel.clone()),
        (Resolution::NotSelected, _) | (_, Resolution::NotSelected) => {
            return Err(ApiError::ValidationError(
                "Please select both a flight and a hotel before confirming.".to_string(),
            ));
        }
        _ => {
            return Err(ApiError::ValidationError(
                "Selected items not found in cached results. Re-run search or re-select."
                    .to_string(),
            ));
        }
    };

    let criteria = session
        .last_search()
        .ok_or_else(|| {
            ApiError::ValidationError("Run a search before confirming a booking.".to_string())
        })?
        .clone();
    let itinerary = session.itinerary().unwrap_or_default().to_string();
    drop(session);

    // 2. Persist; save failures are correctness-critical and propagate
    let booking = NewBooking {
        origin: criteria.origin.clone(),
        destination: criteria.destination.clone(),
        travel_date: criteria.travel_date,
        flight,
        hotel,
        itinerary,
    };
    let receipt = state
        .bookings
        .save(&booking)
        .await
        .map_err(|e| ApiError::InternalServerError(e.to_string()))?;
    info!("Booking confirmed: {}", receipt.confirmation_code);

    // 3. Fire-and-forget confirmation message
    let mut email = None;
    if let Some(addr) = request.email.as_deref().filter(|a| !a.trim().is_empty()) {
        let subject = format!("Booking {}", receipt.confirmation_code);
        let body = format!(
            "Your trip from {} to {} on {} is confirmed.",
            booking.origin, booking.destination, booking.travel_date
        );
        match state.mailer.send(addr, &subject, &body).await {
            Ok(status) => email = Some(status),
            Err(e) => warn!("Confirmation message failed: {}", e),
        }
    }

    Ok(Json(ConfirmResponse {
        booking_id: receipt.booking_id,
        confirmation_code: receipt.confirmation_code,
        origin: booking.origin,
        destination: booking.destination,
        travel_date: booking.travel_date,
        email,
    }))
}

#[derive(Debug, Deserialize)]
struct RecentParams {
    limit: Option<u32>,
}

#[derive(Debug, Serialize)]
struct RecentResponse {
    bookings: Vec<BookingSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
}

/// Listing is best-effort: an unreachable store degrades to a warning
/// rather than an error.
async fn recent_bookings(
    State(state): State<AppState>,
    Query(params): Query<RecentParams>,
) -> Json<RecentResponse> {
    let limit = params.limit.unwrap_or(8);
    match state.bookings.list_recent(limit).await {
        Ok(bookings) => Json(RecentResponse {
            bookings,
            warning: None,
        }),
        Err(e) => {
            warn!("Recent bookings unavailable: {}", e);
            Json(RecentResponse {
                bookings: vec![],
                warning: Some("Booking store unavailable.".to_string()),
            })
        }
    }
}
