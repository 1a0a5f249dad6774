use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

use crate::flight::FlightRecord;
use crate::hotel::HotelRecord;
use crate::{CoreError, CoreResult};

/// Widest candidate set retained per search.
pub const ELIGIBLE_LIMIT: usize = 12;
/// How many candidates the selection layer actually shows.
pub const DISPLAY_LIMIT: usize = 8;

fn default_nights() -> u32 {
    3
}

fn default_budget() -> f64 {
    150.0
}

/// One search submission; kept around as the session's last-search context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub origin: String,
    pub destination: String,
    pub travel_date: NaiveDate,
    #[serde(default = "default_nights")]
    pub nights: u32,
    #[serde(default = "default_budget")]
    pub budget: f64,
}

impl SearchCriteria {
    /// Both endpoints are required; everything else has a usable default.
    pub fn validate(&self) -> CoreResult<()> {
        if self.origin.trim().is_empty() || self.destination.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Please enter both an Origin and a Destination before searching.".to_string(),
            ));
        }
        Ok(())
    }
}

/// Filter and rank flights: endpoints match case-insensitively after
/// trimming, the departure day equals the travel date, cheapest first.
pub fn search_flights(flights: &[FlightRecord], criteria: &SearchCriteria) -> Vec<FlightRecord> {
    let origin = criteria.origin.trim().to_lowercase();
    let destination = criteria.destination.trim().to_lowercase();
    let day = criteria.travel_date.to_string();

    let mut matches: Vec<FlightRecord> = flights
        .iter()
        .filter(|f| {
            f.origin.trim().to_lowercase() == origin
                && f.destination.trim().to_lowercase() == destination
                && f.depart_datetime.starts_with(&day)
        })
        .cloned()
        .collect();

    matches.sort_by(|a, b| {
        a.price_usd
            .partial_cmp(&b.price_usd)
            .unwrap_or(Ordering::Equal)
    });
    matches.truncate(ELIGIBLE_LIMIT);
    debug!(
        origin = %criteria.origin,
        destination = %criteria.destination,
        matched = matches.len(),
        "Flight filter applied"
    );
    matches
}

/// Filter and rank hotels: city matches the destination, nightly price is
/// within budget, at least one room available. Sorted by price then rating,
/// both ascending.
pub fn search_hotels(hotels: &[HotelRecord], criteria: &SearchCriteria) -> Vec<HotelRecord> {
    let city = criteria.destination.trim().to_lowercase();

    let mut matches: Vec<HotelRecord> = hotels
        .iter()
        .filter(|h| {
            h.city.trim().to_lowercase() == city
                && h.price_per_night <= criteria.budget
                && h.availability_rooms > 0
        })
        .cloned()
        .collect();

    matches.sort_by(|a, b| {
        a.price_per_night
            .partial_cmp(&b.price_per_night)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.rating.partial_cmp(&b.rating).unwrap_or(Ordering::Equal))
    });
    matches.truncate(ELIGIBLE_LIMIT);
    debug!(
        city = %criteria.destination,
        budget = criteria.budget,
        matched = matches.len(),
        "Hotel filter applied"
    );
    matches
}
