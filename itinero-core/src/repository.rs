use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::flight::FlightRecord;
use crate::hotel::HotelRecord;

/// A confirmed trip ready to be persisted. The full selected records ride
/// along so the booking stays meaningful even after the datasets change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBooking {
    pub origin: String,
    pub destination: String,
    pub travel_date: NaiveDate,
    pub flight: FlightRecord,
    pub hotel: HotelRecord,
    pub itinerary: String,
}

/// What the caller gets back from a successful save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingReceipt {
    pub booking_id: i64,
    pub confirmation_code: String,
}

/// Listing projection: no flight/hotel payloads, just the headline fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingSummary {
    pub id: i64,
    pub origin: String,
    pub destination: String,
    pub travel_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Repository trait for booking persistence. Saves are append-only; every
/// call creates a new row with a new confirmation code.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn save(
        &self,
        booking: &NewBooking,
    ) -> Result<BookingReceipt, Box<dyn std::error::Error + Send + Sync>>;

    /// Most recently created bookings first, truncated to `limit`.
    async fn list_recent(
        &self,
        limit: u32,
    ) -> Result<Vec<BookingSummary>, Box<dyn std::error::Error + Send + Sync>>;
}
