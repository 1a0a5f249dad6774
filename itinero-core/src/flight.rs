use serde::{Deserialize, Deserializer, Serialize};

/// A flight row from the flights dataset. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    pub flight_id: String,
    pub airline: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    /// Departure timestamp; the leading `YYYY-MM-DD` is the travel day.
    pub depart_datetime: String,
    pub arrive_datetime: String,
    pub price_usd: f64,
    #[serde(default)]
    pub num_stops: u32,
    #[serde(default = "default_cabin")]
    pub cabin: String,
    #[serde(default, deserialize_with = "truthy")]
    pub refundable: bool,
    #[serde(default, deserialize_with = "truthy")]
    pub wifi: bool,
    #[serde(default = "default_bag_allowance")]
    pub bag_allowance_kg: u32,
}

fn default_cabin() -> String {
    "Economy".to_string()
}

fn default_bag_allowance() -> u32 {
    20
}

/// Accepts "true"/"1"/"yes" (any case) as true; dataset rows carry
/// free-form flag text, JSON payloads carry real booleans.
pub(crate) fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct TruthyVisitor;

    impl serde::de::Visitor<'_> for TruthyVisitor {
        type Value = bool;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a boolean or truthy string")
        }

        fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<bool, E> {
            Ok(matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "true" | "1" | "yes"
            ))
        }
    }

    deserializer.deserialize_any(TruthyVisitor)
}
