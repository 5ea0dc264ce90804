use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use gasoil_manager::config::{EnvironmentConfig, StorageBackend};
use gasoil_manager::create_app;
use gasoil_manager::models::trip::Trip;
use gasoil_manager::models::vehicle::Vehicle;
use gasoil_manager::repositories::InMemoryFleetStore;
use gasoil_manager::state::AppState;

fn test_config() -> EnvironmentConfig {
    EnvironmentConfig {
        storage: StorageBackend::Memory,
        ..EnvironmentConfig::default()
    }
}

fn create_test_app() -> Router {
    create_app(AppState::new(Arc::new(InMemoryFleetStore::new()), test_config()))
}

fn create_seeded_app(vehicles: Vec<Vehicle>, trips: Vec<Trip>) -> Router {
    let store = InMemoryFleetStore::with_rows(vehicles, trips);
    create_app(AppState::new(Arc::new(store), test_config()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
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
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn register(app: &Router, plate: &str, vehicle_type: &str, max_conso: f64) -> i64 {
    let (status, body) = send_json(
        app,
        Method::POST,
        "/api/vehicles",
        Some(json!({
            "plate": plate,
            "company": "Transports Durand",
            "driver": "Karim",
            "type": vehicle_type,
            "maxConso": max_conso
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_i64().unwrap()
}

fn assert_close(value: &Value, expected: f64) {
    let actual = value.as_f64().unwrap();
    assert!((actual - expected).abs() < 1e-9, "{} != {}", actual, expected);
}

fn vehicle(id: i32, plate: &str, vehicle_type: &str, max_conso: f64) -> Vehicle {
    Vehicle {
        id,
        plate: plate.to_string(),
        company: "Transports Durand".to_string(),
        driver: "Karim".to_string(),
        vehicle_type: vehicle_type.to_string(),
        max_conso,
    }
}

fn legacy_trip(id: i32, vehicle_id: i32, day: u32, fuel: Option<f64>, status: Option<&str>) -> Trip {
    Trip {
        id,
        vehicle_id,
        date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
        distance: Some(100.0),
        hours: None,
        fuel,
        consumption: fuel,
        status: status.map(str::to_string),
    }
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let (status, body) = send_json(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_register_and_list_vehicles() {
    let app = create_test_app();
    register(&app, "AB-123-CD", "Voiture", 8.0).await;
    register(&app, "XY-999-ZZ", "Camion", 35.0).await;

    let (status, body) = send_json(&app, Method::GET, "/api/vehicles", None).await;
    assert_eq!(status, StatusCode::OK);

    let plates: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["plate"].as_str().unwrap())
        .collect();
    // Más reciente primero
    assert_eq!(plates, vec!["XY-999-ZZ", "AB-123-CD"]);
    assert_eq!(body[0]["type"], "Camion");
    assert_eq!(body[0]["maxConso"], 35.0);
}

#[tokio::test]
async fn test_english_type_alias_is_stored_with_french_label() {
    let app = create_test_app();
    let id = register(&app, "FR-001-GO", "Refrigerated", 4.0).await;

    let (status, body) = send_json(&app, Method::GET, &format!("/api/vehicles/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "Frigo");
}

#[tokio::test]
async fn test_search_filters_fleet() {
    let app = create_test_app();
    register(&app, "AB-123-CD", "Voiture", 8.0).await;
    register(&app, "XY-999-ZZ", "Camion", 35.0).await;

    let (status, body) = send_json(&app, Method::GET, "/api/vehicles?search=xy", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["plate"], "XY-999-ZZ");
}

#[tokio::test]
async fn test_duplicate_plate_is_conflict() {
    let app = create_test_app();
    register(&app, "AB-123-CD", "Voiture", 8.0).await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/vehicles",
        Some(json!({
            "plate": "AB-123-CD",
            "company": "Autre",
            "driver": "Paul",
            "type": "Voiture",
            "maxConso": 7.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_invalid_vehicle_is_rejected() {
    let app = create_test_app();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/vehicles",
        Some(json!({
            "plate": "  ",
            "company": "ACME",
            "driver": "Paul",
            "type": "Bateau",
            "maxConso": 7.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/vehicles",
        Some(json!({
            "plate": "AB-123-CD",
            "company": "ACME",
            "driver": "Paul",
            "type": "Voiture",
            "maxConso": 0.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_plate_lookup() {
    let app = create_test_app();
    register(&app, "AB-123-CD", "Voiture", 8.0).await;

    let (status, body) = send_json(&app, Method::GET, "/api/vehicles/lookup?plate=ab-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["plate"], "AB-123-CD");

    let (status, _) = send(&app, Method::GET, "/api/vehicles/lookup?plate=", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send_json(&app, Method::GET, "/api/vehicles/lookup?plate=ZZ", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_delete_vehicle() {
    let app = create_test_app();
    let id = register(&app, "AB-123-CD", "Voiture", 8.0).await;

    let (status, body) = send_json(&app, Method::DELETE, &format!("/api/vehicles/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = send_json(&app, Method::DELETE, &format!("/api/vehicles/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_json(&app, Method::GET, &format!("/api/vehicles/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_calculate_does_not_persist() {
    let app = create_test_app();
    let id = register(&app, "AB-123-CD", "Voiture", 8.0).await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/trips/calculate",
        Some(json!({ "vehicleId": id, "distance": 100.0, "fuel": 12.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_close(&body["rate"], 12.0);
    assert_eq!(body["unit"], "L/100km");
    assert_eq!(body["verdict"], "Dépassement");
    assert_eq!(body["measure"]["kind"], "distance");

    let (_, trips) = send_json(&app, Method::GET, "/api/trips", None).await;
    assert!(trips.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_save_trip_from_odometer_readings() {
    let app = create_test_app();
    let id = register(&app, "AB-123-CD", "Voiture", 8.0).await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/trips",
        Some(json!({
            "vehicleId": id,
            "date": "2024-03-05",
            "kmStart": 1000.0,
            "kmEnd": 1200.0,
            "fuel": 14.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["trip"]["distance"], 200.0);
    assert_close(&body["data"]["trip"]["consumption"], 7.0);
    assert_eq!(body["data"]["trip"]["status"], "Normal");
    assert_eq!(body["data"]["trip"]["date"], "2024-03-05");

    let (_, trips) = send_json(&app, Method::GET, "/api/trips", None).await;
    assert_eq!(trips.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_hour_based_vehicle_uses_counter() {
    let app = create_test_app();
    let id = register(&app, "FR-001-GO", "Frigo", 3.0).await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/trips/calculate",
        Some(json!({ "vehicleId": id, "hoursStart": 10.0, "hoursEnd": 14.0, "fuel": 16.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_close(&body["rate"], 4.0);
    assert_eq!(body["unit"], "L/H");
    assert_eq!(body["verdict"], "Dépassement");
}

#[tokio::test]
async fn test_missing_measure_is_rejected_and_nothing_saved() {
    let app = create_test_app();
    let id = register(&app, "AB-123-CD", "Voiture", 8.0).await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/trips",
        Some(json!({ "vehicleId": id, "kmStart": 500.0, "kmEnd": 500.0, "fuel": 10.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_INPUT");

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/trips",
        Some(json!({ "vehicleId": id, "distance": 100.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");

    let (_, trips) = send_json(&app, Method::GET, "/api/trips", None).await;
    assert!(trips.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_non_numeric_fuel_is_invalid_input() {
    let app = create_test_app();
    let id = register(&app, "AB-123-CD", "Voiture", 8.0).await;

    for uri in ["/api/trips/calculate", "/api/trips"] {
        let (status, body) = send_json(
            &app,
            Method::POST,
            uri,
            Some(json!({ "vehicleId": id, "distance": 50, "fuel": "abc" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");
    }

    let (_, trips) = send_json(&app, Method::GET, "/api/trips", None).await;
    assert!(trips.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_typed_text_readings_are_accepted() {
    let app = create_test_app();
    let id = register(&app, "AB-123-CD", "Voiture", 8.0).await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/trips/calculate",
        Some(json!({ "vehicleId": id, "kmStart": "1000", "kmEnd": "1100", "fuel": "6,5" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_close(&body["rate"], 6.5);
    assert_eq!(body["verdict"], "Normal");
}

#[tokio::test]
async fn test_unreadable_body_uses_error_envelope() {
    let app = create_test_app();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/trips/calculate",
        Some(json!({ "vehicleId": "one", "distance": 50, "fuel": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/vehicles",
        Some(json!({ "plate": "AB-1", "company": "ACME", "driver": "Paul", "type": "Voiture", "maxConso": "lots" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_trip_for_unknown_vehicle_is_not_found() {
    let app = create_test_app();

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/trips/calculate",
        Some(json!({ "vehicleId": 42, "distance": 100.0, "fuel": 5.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dashboard_alerts_and_notifications() {
    let app = create_seeded_app(
        vec![vehicle(1, "AB-123-CD", "Voiture", 8.0), vehicle(2, "XY-999-ZZ", "Camion", 35.0)],
        vec![
            legacy_trip(1, 1, 1, Some(10.0), Some("Dépassement")),
            legacy_trip(2, 2, 2, Some(30.0), Some("Normal")),
            legacy_trip(3, 7, 3, None, Some("dépassement")),
        ],
    );

    let (status, stats) = send_json(&app, Method::GET, "/api/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["vehicleCount"], 2);
    assert_eq!(stats["totalFuel"], 40.0);
    assert_eq!(stats["totalTripCount"], 3);
    assert_eq!(stats["alertCount"], 2);
    assert_eq!(stats["typeDistribution"]["Voiture"], 1);
    assert_eq!(stats["typeDistribution"]["Camion"], 1);
    assert_eq!(stats["recentSeries"].as_array().unwrap().len(), 3);
    assert_eq!(stats["recentSeries"][0]["label"], "1 mars");

    let (status, alerts) = send_json(&app, Method::GET, "/api/alerts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(alerts["count"], 2);
    let plates: Vec<&str> = alerts["alerts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["plate"].as_str().unwrap())
        .collect();
    assert!(plates.contains(&"AB-123-CD"));
    assert!(plates.contains(&"Unknown vehicle"));
    assert!(alerts["report"]
        .as_str()
        .unwrap()
        .starts_with("⚠️ DÉTAILS DES ALERTES (2)"));

    let (status, notifications) = send_json(&app, Method::GET, "/api/notifications", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(notifications["count"], 2);
    assert!(notifications["message"].as_str().unwrap().contains("AB-123-CD"));
}

#[tokio::test]
async fn test_empty_fleet_notifications() {
    let app = create_test_app();

    let (status, body) = send_json(&app, Method::GET, "/api/notifications", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert!(body["message"].as_str().unwrap().contains("Aucune nouvelle notification"));

    let (status, body) = send_json(&app, Method::GET, "/api/alerts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["report"], "✅ Aucune alerte de surconsommation pour le moment.");

    let (_, stats) = send_json(&app, Method::GET, "/api/dashboard", None).await;
    assert_eq!(stats["vehicleCount"], 0);
}

#[tokio::test]
async fn test_csv_exports() {
    let app = create_seeded_app(
        vec![vehicle(1, "AB-123-CD", "Voiture", 8.0)],
        vec![legacy_trip(1, 1, 4, Some(9.0), Some("Dépassement"))],
    );

    let request = Request::builder()
        .uri("/api/export/vehicles.csv")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/csv"));
    assert!(response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("flotte_gasoil.csv"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Matricule,Societe,Chauffeur,Type,MaxConso"));
    assert_eq!(lines.next(), Some("AB-123-CD,Transports Durand,Karim,Voiture,8"));

    let (status, bytes) = send(&app, Method::GET, "/api/export/trips.csv", None).await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.starts_with("Date,Matricule,Conso,Carburant,Statut"));
    assert!(text.contains("AB-123-CD"));
}
