use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Pool, Sqlite};
use tracing::info;

use itinero_core::repository::{BookingReceipt, BookingStore, BookingSummary, NewBooking};

/// Append-only booking persistence backed by the embedded database.
pub struct SqliteBookingStore {
    pool: Pool<Sqlite>,
}

impl SqliteBookingStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// `TRV-` plus the primary key zero-padded to six digits. Stable
    /// external contract once issued.
    pub fn confirmation_code(booking_id: i64) -> String {
        format!("TRV-{:06}", booking_id)
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct SummaryRow {
    id: i64,
    origin: String,
    destination: String,
    travel_date: NaiveDate,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl BookingStore for SqliteBookingStore {
    async fn save(
        &self,
        booking: &NewBooking,
    ) -> Result<BookingReceipt, Box<dyn std::error::Error + Send + Sync>> {
        let flight_json = serde_json::to_string(&booking.flight)?;
        let hotel_json = serde_json::to_string(&booking.hotel)?;

        let result = sqlx::query(
            r#"
            INSERT INTO bookings (origin, destination, travel_date, flight_json, hotel_json, itinerary, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&booking.origin)
        .bind(&booking.destination)
        .bind(booking.travel_date)
        .bind(flight_json)
        .bind(hotel_json)
        .bind(&booking.itinerary)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        let booking_id = result.last_insert_rowid();
        info!("Booking saved: {}", booking_id);

        Ok(BookingReceipt {
            booking_id,
            confirmation_code: Self::confirmation_code(booking_id),
        })
    }

    async fn list_recent(
        &self,
        limit: u32,
    ) -> Result<Vec<BookingSummary>, Box<dyn std::error::Error + Send + Sync>> {
        let rows: Vec<SummaryRow> = sqlx::query_as(
            r#"
            SELECT id, origin, destination, travel_date, created_at
            FROM bookings
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| BookingSummary {
                id: row.id,
                origin: row.origin,
                destination: row.destination,
                travel_date: row.travel_date,
                created_at: row.created_at,
            })
            .collect())
    }
}
