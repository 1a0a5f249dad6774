use serde::{Deserialize, Serialize};

/// A hotel row from the hotels dataset. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelRecord {
    pub hotel_id: String,
    pub name: String,
    pub city: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub amenities: String,
    pub price_per_night: f64,
    pub rating: f64,
    #[serde(default)]
    pub stars: u32,
    pub availability_rooms: u32,
}
