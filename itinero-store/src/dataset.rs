use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tracing::info;

use itinero_core::flight::FlightRecord;
use itinero_core::hotel::HotelRecord;

use crate::StoreError;

/// Read a delimited dataset fully into memory. The path is checked before
/// any read attempt; rows are deserialized as-is with no further schema
/// validation.
pub fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    if !path.exists() {
        return Err(StoreError::DataUnavailable(path.to_path_buf()));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

struct CachedTables {
    flights: Arc<Vec<FlightRecord>>,
    hotels: Arc<Vec<HotelRecord>>,
    loaded_at: Instant,
}

/// In-memory flight/hotel tables, re-read from storage only once the cached
/// copy is older than the TTL. Tables are read-only after load.
pub struct DatasetCatalog {
    flights_path: PathBuf,
    hotels_path: PathBuf,
    ttl: Duration,
    cache: RwLock<Option<CachedTables>>,
}

impl DatasetCatalog {
    pub fn new(
        flights_path: impl Into<PathBuf>,
        hotels_path: impl Into<PathBuf>,
        ttl: Duration,
    ) -> Self {
        Self {
            flights_path: flights_path.into(),
            hotels_path: hotels_path.into(),
            ttl,
            cache: RwLock::new(None),
        }
    }

    /// Startup check: both dataset files must exist before anything is
    /// served. A missing file here is a blocking condition for the caller.
    pub fn preflight(&self) -> Result<(), StoreError> {
        for path in [&self.flights_path, &self.hotels_path] {
            if !path.exists() {
                return Err(StoreError::DataUnavailable(path.clone()));
            }
        }
        Ok(())
    }

    /// Current flight and hotel tables, loading or refreshing as needed.
    pub fn tables(
        &self,
    ) -> Result<(Arc<Vec<FlightRecord>>, Arc<Vec<HotelRecord>>), StoreError> {
        {
            let cache = self.cache.read().expect("dataset cache poisoned");
            if let Some(cached) = cache.as_ref() {
                if cached.loaded_at.elapsed() < self.ttl {
                    return Ok((cached.flights.clone(), cached.hotels.clone()));
                }
            }
        }

        let flights: Arc<Vec<FlightRecord>> = Arc::new(load_records(&self.flights_path)?);
        let hotels: Arc<Vec<HotelRecord>> = Arc::new(load_records(&self.hotels_path)?);
        info!(
            flights = flights.len(),
            hotels = hotels.len(),
            "Loaded datasets"
        );

        let mut cache = self.cache.write().expect("dataset cache poisoned");
        *cache = Some(CachedTables {
            flights: flights.clone(),
            hotels: hotels.clone(),
            loaded_at: Instant::now(),
        });
        Ok((flights, hotels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const FLIGHTS_CSV: &str = "\
flight_id,airline,flight_number,origin,destination,depart_datetime,arrive_datetime,price_usd,num_stops,cabin,refundable,wifi,bag_allowance_kg
F1,IndiAir,IA101,Delhi,Paris,2025-10-05T10:00,2025-10-05T18:30,500,1,Economy,True,Yes,23
F2,GaulJet,GJ220,Delhi,Paris,2025-10-05T14:00,2025-10-05T22:10,430,0,Economy,False,no,20
";

    const HOTELS_CSV: &str = "\
hotel_id,name,city,address,amenities,price_per_night,rating,stars,availability_rooms
H1,Hotel Lumiere,Paris,12 Rue de Rivoli,\"wifi,breakfast\",95,4.3,4,6
H2,Gare Nord Inn,Paris,3 Rue de Dunkerque,wifi,70,3.9,3,0
";

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("itinero-{}-{}", std::process::id(), name));
        fs::write(&path, contents).expect("failed to write temp dataset");
        path
    }

    #[test]
    fn test_load_parses_rows_and_flags() {
        let path = write_temp("load-flights.csv", FLIGHTS_CSV);
        let flights: Vec<FlightRecord> = load_records(&path).unwrap();
        assert_eq!(flights.len(), 2);
        assert!(flights[0].refundable);
        assert!(flights[0].wifi);
        assert!(!flights[1].refundable);
        assert_eq!(flights[1].price_usd, 430.0);
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file_is_data_unavailable() {
        let path = std::env::temp_dir().join("itinero-does-not-exist.csv");
        let result: Result<Vec<FlightRecord>, _> = load_records(&path);
        assert!(matches!(result, Err(StoreError::DataUnavailable(_))));
    }

    #[test]
    fn test_catalog_serves_cached_tables_within_ttl() {
        let flights = write_temp("cat-flights.csv", FLIGHTS_CSV);
        let hotels = write_temp("cat-hotels.csv", HOTELS_CSV);
        let catalog = DatasetCatalog::new(&flights, &hotels, Duration::from_secs(3600));

        let (first, _) = catalog.tables().unwrap();
        let (second, _) = catalog.tables().unwrap();
        // Same in-memory table, storage not re-read.
        assert!(Arc::ptr_eq(&first, &second));

        fs::remove_file(flights).ok();
        fs::remove_file(hotels).ok();
    }

    #[test]
    fn test_catalog_reloads_once_stale() {
        let flights = write_temp("stale-flights.csv", FLIGHTS_CSV);
        let hotels = write_temp("stale-hotels.csv", HOTELS_CSV);
        let catalog = DatasetCatalog::new(&flights, &hotels, Duration::ZERO);

        let (first, _) = catalog.tables().unwrap();
        let (second, _) = catalog.tables().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));

        fs::remove_file(flights).ok();
        fs::remove_file(hotels).ok();
    }

    #[test]
    fn test_preflight_flags_missing_dataset() {
        let flights = write_temp("pre-flights.csv", FLIGHTS_CSV);
        let missing = std::env::temp_dir().join("itinero-missing-hotels.csv");
        let catalog = DatasetCatalog::new(&flights, &missing, Duration::from_secs(3600));
        assert!(matches!(
            catalog.preflight(),
            Err(StoreError::DataUnavailable(_))
        ));
        fs::remove_file(flights).ok();
    }
}
