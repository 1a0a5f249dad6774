use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tower::ServiceExt;

use itinero_advisor::StubAdvisor;
use itinero_api::{app, notify::MockMailer, AppState};
use itinero_core::advisor::ITINERARY_NOT_GENERATED;
use itinero_core::session::Session;
use itinero_store::{DatasetCatalog, DbClient, SqliteBookingStore};

const FLIGHTS_CSV: &str = "\
flight_id,airline,flight_number,origin,destination,depart_datetime,arrive_datetime,price_usd,num_stops,cabin,refundable,wifi,bag_allowance_kg
F1,IndiAir,IA101,Delhi,Paris,2025-10-05T10:00,2025-10-05T18:30,500,1,Economy,True,Yes,23
F2,GaulJet,GJ220,Delhi,Paris,2025-10-05T14:15,2025-10-05T22:40,430,0,Economy,False,Yes,20
F3,SkyBridge,SB318,Delhi,Paris,2025-10-06T06:45,2025-10-06T16:05,615,1,Economy,True,Yes,30
";

const HOTELS_CSV: &str = "\
hotel_id,name,city,address,amenities,price_per_night,rating,stars,availability_rooms
H1,Hotel Lumiere,Paris,12 Rue de Rivoli,\"wifi,breakfast\",95,4.3,4,6
H2,Gare Nord Inn,Paris,3 Rue de Dunkerque,wifi,70,3.9,3,4
H3,Le Marais Suites,Paris,28 Rue des Archives,\"wifi,spa\",180,4.7,5,2
H4,Canal Lodge,Paris,9 Quai de Valmy,wifi,88,4.1,3,0
";

fn write_temp(tag: &str, name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "itinero-api-{}-{}-{}",
        std::process::id(),
        tag,
        name
    ));
    std::fs::write(&path, contents).expect("failed to write temp dataset");
    path
}

async fn test_app(tag: &str) -> Router {
    let flights = write_temp(tag, "flights.csv", FLIGHTS_CSV);
    let hotels = write_temp(tag, "hotels.csv", HOTELS_CSV);
    let catalog = DatasetCatalog::new(&flights, &hotels, Duration::from_secs(3600));

    let db = DbClient::new("sqlite::memory:").await.unwrap();
    db.migrate().await.unwrap();

    let state = AppState {
        catalog: Arc::new(catalog),
        bookings: Arc::new(SqliteBookingStore::new(db.pool.clone())),
        advisor: Arc::new(StubAdvisor),
        mailer: Arc::new(MockMailer),
        session: Arc::new(RwLock::new(Session::new())),
    };
    app(state)
}

async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn paris_search() -> Value {
    json!({
        "origin": "Delhi",
        "destination": "Paris",
        "travel_date": "2025-10-05",
        "nights": 3,
        "budget": 150.0
    })
}

#[tokio::test]
async fn test_search_select_book_flow() {
    let app = test_app("flow").await;

    // Search: two flights match the date, cheapest first
    let (status, body) = request(&app, Method::POST, "/v1/search", Some(paris_search())).await;
    assert_eq!(status, StatusCode::OK);
    let flights = body["flights"].as_array().unwrap();
    assert_eq!(flights.len(), 2);
    assert_eq!(flights[0]["flight_id"], "F2");
    assert_eq!(flights[1]["flight_id"], "F1");
    // H3 is over budget, H4 has no rooms
    let hotels = body["hotels"].as_array().unwrap();
    assert_eq!(hotels.len(), 2);
    assert_eq!(hotels[0]["hotel_id"], "H2");

    // Select a flight and a hotel
    let (status, body) = request(
        &app,
        Method::PUT,
        "/v1/selections/flight",
        Some(json!({"flight_id": "F2"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["flight"]["flight_number"], "GJ220");

    let (status, _) = request(
        &app,
        Method::PUT,
        "/v1/selections/hotel",
        Some(json!({"hotel_id": "H1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Stubbed advisor: placeholder text, cached afterwards
    let (status, body) = request(&app, Method::POST, "/v1/itinerary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["itinerary"], ITINERARY_NOT_GENERATED);

    // Confirm the booking with a mock email notification
    let (status, body) = request(
        &app,
        Method::POST,
        "/v1/bookings",
        Some(json!({"email": "traveler@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["confirmation_code"], "TRV-000001");
    assert_eq!(body["origin"], "Delhi");
    assert_eq!(body["email"]["status"], "sent");

    // The booking shows up in the recent list
    let (status, body) = request(&app, Method::GET, "/v1/bookings/recent?limit=5", None).await;
    assert_eq!(status, StatusCode::OK);
    let bookings = body["bookings"].as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["destination"], "Paris");
}

#[tokio::test]
async fn test_search_requires_both_endpoints() {
    let app = test_app("validate").await;
    let (status, body) = request(
        &app,
        Method::POST,
        "/v1/search",
        Some(json!({
            "origin": "  ",
            "destination": "Paris",
            "travel_date": "2025-10-05"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Origin"));
}

#[tokio::test]
async fn test_booking_rejected_without_selections() {
    let app = test_app("noselect").await;
    let (status, _) = request(&app, Method::POST, "/v1/search", Some(paris_search())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = request(&app, Method::POST, "/v1/bookings", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("select both a flight and a hotel"));
}

#[tokio::test]
async fn test_stale_selection_survives_new_search_but_blocks_booking() {
    let app = test_app("stale").await;

    let (status, _) = request(&app, Method::POST, "/v1/search", Some(paris_search())).await;
    assert_eq!(status, StatusCode::OK);

    for (uri, body) in [
        ("/v1/selections/flight", json!({"flight_id": "F2"})),
        ("/v1/selections/hotel", json!({"hotel_id": "H1"})),
    ] {
        let (status, _) = request(&app, Method::PUT, uri, Some(body)).await;
        assert_eq!(status, StatusCode::OK);
    }

    // New search for a route with no matches replaces the result sets
    let (status, body) = request(
        &app,
        Method::POST,
        "/v1/search",
        Some(json!({
            "origin": "Delhi",
            "destination": "Rome",
            "travel_date": "2025-10-05"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["flights"].as_array().unwrap().is_empty());

    // Selections survive, but resolve as stale
    let (status, body) = request(&app, Method::GET, "/v1/session", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["selections"]["flight"]["selected_id"], "F2");
    assert!(body["selections"]["flight"]["note"]
        .as_str()
        .unwrap()
        .contains("not in cached list"));

    // Confirming against stale selections is rejected
    let (status, body) = request(&app, Method::POST, "/v1/bookings", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("not found in cached results"));
}

#[tokio::test]
async fn test_new_search_clears_cached_itinerary() {
    let app = test_app("itinerary").await;

    let (status, _) = request(&app, Method::POST, "/v1/search", Some(paris_search())).await;
    assert_eq!(status, StatusCode::OK);

    let (_, first) = request(&app, Method::POST, "/v1/itinerary", None).await;
    let (_, session) = request(&app, Method::GET, "/v1/session", None).await;
    assert_eq!(session["itinerary"], first["itinerary"]);

    // A fresh search drops the cached text
    let (status, _) = request(&app, Method::POST, "/v1/search", Some(paris_search())).await;
    assert_eq!(status, StatusCode::OK);
    let (_, session) = request(&app, Method::GET, "/v1/session", None).await;
    assert!(session["itinerary"].is_null());
}

#[tokio::test]
async fn test_duplicate_confirms_issue_distinct_codes() {
    let app = test_app("dup").await;

    let (status, _) = request(&app, Method::POST, "/v1/search", Some(paris_search())).await;
    assert_eq!(status, StatusCode::OK);
    for (uri, body) in [
        ("/v1/selections/flight", json!({"flight_id": "F1"})),
        ("/v1/selections/hotel", json!({"hotel_id": "H2"})),
    ] {
        let (status, _) = request(&app, Method::PUT, uri, Some(body)).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, first) = request(&app, Method::POST, "/v1/bookings", Some(json!({}))).await;
    let (_, second) = request(&app, Method::POST, "/v1/bookings", Some(json!({}))).await;
    assert_eq!(first["confirmation_code"], "TRV-000001");
    assert_eq!(second["confirmation_code"], "TRV-000002");
}
