use std::sync::Arc;
use tokio::sync::RwLock;

use itinero_core::advisor::ItineraryAdvisor;
use itinero_core::notify::Notifier;
use itinero_core::repository::BookingStore;
use itinero_core::session::Session;
use itinero_store::DatasetCatalog;

/// Long-lived resources constructed once at startup, plus the single
/// user session this process serves.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<DatasetCatalog>,
    pub bookings: Arc<dyn BookingStore>,
    pub advisor: Arc<dyn ItineraryAdvisor>,
    pub mailer: Arc<dyn Notifier>,
    pub session: Arc<RwLock<Session>>,
}
