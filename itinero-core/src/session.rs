use crate::flight::FlightRecord;
use crate::hotel::HotelRecord;
use crate::search::{SearchCriteria, DISPLAY_LIMIT};

/// Outcome of resolving a selected identifier against the current results.
///
/// A stale identifier is representable on purpose: selections survive a new
/// search, so an id can point outside the freshly cached list. Callers treat
/// that as display-only until a booking is confirmed.
#[derive(Debug, PartialEq)]
pub enum Resolution<'a, T> {
    NotSelected,
    Found(&'a T),
    NotInResults(&'a str),
}

/// Per-user state carried across interactions: the surfaced result sets,
/// the last-search context, the cached itinerary text, and the current
/// flight/hotel selections.
#[derive(Debug, Default)]
pub struct Session {
    flights: Vec<FlightRecord>,
    hotels: Vec<HotelRecord>,
    itinerary: Option<String>,
    last_search: Option<SearchCriteria>,
    selected_flight_id: Option<String>,
    selected_hotel_id: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the result sets with a fresh search. Clears any cached
    /// itinerary; selections are left untouched and may go stale.
    pub fn apply_search(
        &mut self,
        criteria: SearchCriteria,
        mut flights: Vec<FlightRecord>,
        mut hotels: Vec<HotelRecord>,
    ) {
        flights.truncate(DISPLAY_LIMIT);
        hotels.truncate(DISPLAY_LIMIT);
        self.flights = flights;
        self.hotels = hotels;
        self.itinerary = None;
        self.last_search = Some(criteria);
    }

    pub fn flights(&self) -> &[FlightRecord] {
        &self.flights
    }

    pub fn hotels(&self) -> &[HotelRecord] {
        &self.hotels
    }

    pub fn has_results(&self) -> bool {
        !self.flights.is_empty() || !self.hotels.is_empty()
    }

    pub fn last_search(&self) -> Option<&SearchCriteria> {
        self.last_search.as_ref()
    }

    pub fn itinerary(&self) -> Option<&str> {
        self.itinerary.as_deref()
    }

    pub fn set_itinerary(&mut self, text: String) {
        self.itinerary = Some(text);
    }

    /// Always succeeds; overwrites any prior flight selection.
    pub fn select_flight(&mut self, id: impl Into<String>) {
        self.selected_flight_id = Some(id.into());
    }

    /// Always succeeds; overwrites any prior hotel selection.
    pub fn select_hotel(&mut self, id: impl Into<String>) {
        self.selected_hotel_id = Some(id.into());
    }

    pub fn selection(&self) -> (Option<&str>, Option<&str>) {
        (
            self.selected_flight_id.as_deref(),
            self.selected_hotel_id.as_deref(),
        )
    }

    pub fn resolve_flight(&self) -> Resolution<'_, FlightRecord> {
        match &self.selected_flight_id {
            None => Resolution::NotSelected,
            Some(id) => self
                .flights
                .iter()
                .find(|f| f.flight_id == *id)
                .map(Resolution::Found)
                .unwrap_or(Resolution::NotInResults(id)),
        }
    }

    pub fn resolve_hotel(&self) -> Resolution<'_, HotelRecord> {
        match &self.selected_hotel_id {
            None => Resolution::NotSelected,
            Some(id) => self
                .hotels
                .iter()
                .find(|h| h.hotel_id == *id)
                .map(Resolution::Found)
                .unwrap_or(Resolution::NotInResults(id)),
        }
    }
}
