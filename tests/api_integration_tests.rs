//! Integration Tests for API Endpoints
//!
//! Exercises the full request/response cycle against a fixture data
//! directory: filtering, pagination, caching, auth and admin CRUD.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt;

use casa_listings::api::create_router;
use casa_listings::store::ApiKeyRecord;
use casa_listings::{AppState, Config};

// == Helper Functions ==

fn fixture_records() -> Value {
    json!([
        {
            "id": 1,
            "development_name": "Vista Azul",
            "reference_id": "REF-1",
            "market": "off-plan",
            "town": "Marbella",
            "province": "Málaga",
            "type": "Apartment",
            "price": 150000,
            "built_area": 70,
            "beds": 1,
            "baths": 1
        },
        {
            "id": 2,
            "development_name": "Sol Naciente",
            "reference_id": "REF-2",
            "market": "off-plan",
            "town": "Estepona",
            "province": "Málaga",
            "type": "Apartment",
            "price": 250000,
            "built_area": 90,
            "beds": 2,
            "baths": 2,
            "amenities": ["Pool", "Gym"]
        },
        {
            "id": 3,
            "development_name": "Alba Marina",
            "reference_id": "REF-3",
            "market": "off-plan",
            "town": "Marbella",
            "province": "Málaga",
            "type": "Penthouse",
            "price": 450000,
            "built_area": 140,
            "beds": 3,
            "baths": 2
        },
        {
            "id": 4,
            "development_name": "Casa Vieja",
            "reference_id": "REF-4",
            "property_type": "secondary",
            "town": "Mijas",
            "province": "Málaga",
            "type": "Villa",
            "price": 300000,
            "built_area": 200,
            "beds": 4,
            "baths": 3
        },
        {
            "id": 5,
            "development_name": "Loft Centro",
            "reference_id": "REF-5",
            "status": "rent",
            "town": "Málaga",
            "province": "Málaga",
            "type": "Apartment",
            "price": 2000,
            "built_area": 60,
            "beds": 1,
            "baths": 1
        }
    ])
}

fn create_test_app(dir: &TempDir) -> (Router, AppState) {
    std::fs::write(
        dir.path().join("properties.json"),
        fixture_records().to_string(),
    )
    .unwrap();

    let config = Config {
        data_dir: dir.path().to_path_buf(),
        ..Config::default()
    };
    let state = AppState::from_config(&config);
    (create_router(state.clone()), state)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn ids_of(body: &Value) -> Vec<i64> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}

// == Listing Filters ==

#[tokio::test]
async fn test_off_plan_price_window_sorted() {
    let dir = TempDir::new().unwrap();
    let (app, _) = create_test_app(&dir);

    let (status, body) = get_json(
        &app,
        "/api/properties?type=Off-Plan&priceMin=200000&priceMax=500000&sort=price_asc&page=1&limit=2",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalItems"], 2);
    assert_eq!(body["totalPages"], 1);
    assert_eq!(body["currentPage"], 1);
    assert_eq!(body["itemsPerPage"], 2);
    assert_eq!(ids_of(&body), vec![2, 3]);
}

#[tokio::test]
async fn test_new_building_alias_matches_off_plan() {
    let dir = TempDir::new().unwrap();
    let (app, _) = create_test_app(&dir);

    let (_, off_plan) = get_json(&app, "/api/properties?type=Off-Plan").await;
    let (_, alias) = get_json(&app, "/api/properties?type=New%20Building").await;

    assert_eq!(off_plan["totalItems"], alias["totalItems"]);
    assert_eq!(off_plan["totalItems"], 3);
}

#[tokio::test]
async fn test_legacy_fields_classify_tabs() {
    let dir = TempDir::new().unwrap();
    let (app, _) = create_test_app(&dir);

    // record 4 has only property_type=secondary, record 5 only status=rent
    let (_, resale) = get_json(&app, "/api/properties?type=Resale").await;
    assert_eq!(ids_of(&resale), vec![4]);

    let (_, rent) = get_json(&app, "/api/properties?type=Rent").await;
    assert_eq!(ids_of(&rent), vec![5]);
}

#[tokio::test]
async fn test_beds_exact_and_minimum_modes() {
    let dir = TempDir::new().unwrap();
    let (app, _) = create_test_app(&dir);

    let (_, exact) = get_json(&app, "/api/properties?beds=2&beds=3&beds_exact=true").await;
    assert_eq!(ids_of(&exact), vec![2, 3]);

    let (_, minimum) = get_json(&app, "/api/properties?beds=2&beds=3").await;
    assert_eq!(ids_of(&minimum), vec![2, 3, 4]);
}

#[tokio::test]
async fn test_amenities_require_every_one() {
    let dir = TempDir::new().unwrap();
    let (app, _) = create_test_app(&dir);

    let (_, both) = get_json(&app, "/api/properties?amenities=pool,gym").await;
    assert_eq!(ids_of(&both), vec![2]);

    let (_, none) = get_json(&app, "/api/properties?amenities=pool,helipad").await;
    assert_eq!(none["totalItems"], 0);
    assert_eq!(none["totalPages"], 0);
}

#[tokio::test]
async fn test_search_and_town_filters() {
    let dir = TempDir::new().unwrap();
    let (app, _) = create_test_app(&dir);

    let (_, search) = get_json(&app, "/api/properties?search=marina").await;
    assert_eq!(ids_of(&search), vec![3]);

    let (_, towns) = get_json(&app, "/api/properties?town=Marbella&town=Mijas").await;
    assert_eq!(towns["totalItems"], 3);

    let (_, bracket) = get_json(&app, "/api/properties?town%5B%5D=Estepona").await;
    assert_eq!(ids_of(&bracket), vec![2]);
}

#[tokio::test]
async fn test_pagination_walk_reconstructs_list() {
    let dir = TempDir::new().unwrap();
    let (app, _) = create_test_app(&dir);

    let (_, first) = get_json(&app, "/api/properties?limit=2&page=1&sort=price_asc").await;
    assert_eq!(first["totalItems"], 5);
    assert_eq!(first["totalPages"], 3);

    let mut collected = ids_of(&first);
    for page in 2..=3 {
        let (_, body) = get_json(
            &app,
            &format!("/api/properties?limit=2&page={page}&sort=price_asc"),
        )
        .await;
        collected.extend(ids_of(&body));
    }

    // ascending price: 5 (2k), 1 (150k), 2 (250k), 4 (300k), 3 (450k)
    assert_eq!(collected, vec![5, 1, 2, 4, 3]);
}

#[tokio::test]
async fn test_listing_ids_narrow_map_ids_bypass() {
    let dir = TempDir::new().unwrap();
    let (app, _) = create_test_app(&dir);

    // listing: ids are an additional narrowing filter
    let (_, listing) = get_json(&app, "/api/properties?type=Off-Plan&ids=1,4").await;
    assert_eq!(ids_of(&listing), vec![1]);

    // map: ids bypass every other filter
    let (_, map) = get_json(&app, "/api/properties/map?type=Off-Plan&ids=1,4").await;
    let map_ids: Vec<i64> = map["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|pin| pin["id"].as_i64().unwrap())
        .collect();
    assert_eq!(map_ids, vec![1, 4]);
}

// == Map Projection ==

#[tokio::test]
async fn test_map_pins_are_geocoded_and_lightweight() {
    let dir = TempDir::new().unwrap();
    let (app, _) = create_test_app(&dir);

    let (status, body) = get_json(&app, "/api/properties/map").await;
    assert_eq!(status, StatusCode::OK);
    // every fixture record resolves via its town name
    assert_eq!(body["total"], 5);

    let pin = &body["data"][0];
    assert!(pin["lat"].as_f64().unwrap() != 0.0);
    assert!(pin["lng"].as_f64().unwrap() != 0.0);
    assert_eq!(pin["market"], "off-plan");
    assert_eq!(pin["type"], "Apartment");
    // full records are not leaked into the map payload
    assert!(pin.get("description").is_none());
    assert!(pin.get("amenities").is_none());
}

#[tokio::test]
async fn test_co_located_markers_are_spread() {
    let dir = TempDir::new().unwrap();
    let (app, _) = create_test_app(&dir);

    // records 1 and 3 share the Marbella centre before jittering
    let (_, body) = get_json(&app, "/api/properties/map?ids=1,3").await;
    let pins = body["data"].as_array().unwrap();
    assert_eq!(pins.len(), 2);
    let same = pins[0]["lat"] == pins[1]["lat"] && pins[0]["lng"] == pins[1]["lng"];
    assert!(!same, "co-located markers must be de-clustered");
}

// == Caching ==

#[tokio::test]
async fn test_identical_queries_hit_cache_without_reload() {
    let dir = TempDir::new().unwrap();
    let (app, _) = create_test_app(&dir);

    let (_, first) = get_json(&app, "/api/properties?type=Rent").await;
    let (_, stats) = get_json(&app, "/api/cache/stats").await;
    assert_eq!(stats["dataset_loads"], 1);

    // rewrite the file; a cached response must not notice
    std::fs::write(dir.path().join("properties.json"), "[]").unwrap();

    let (_, second) = get_json(&app, "/api/properties?type=Rent").await;
    assert_eq!(first, second);

    let (_, stats) = get_json(&app, "/api/cache/stats").await;
    assert_eq!(stats["dataset_loads"], 1);
    assert_eq!(stats["listing"]["hits"], 1);
}

#[tokio::test]
async fn test_different_queries_are_cached_separately() {
    let dir = TempDir::new().unwrap();
    let (app, _) = create_test_app(&dir);

    let (_, rent) = get_json(&app, "/api/properties?type=Rent").await;
    let (_, resale) = get_json(&app, "/api/properties?type=Resale").await;
    assert_eq!(ids_of(&rent), vec![5]);
    assert_eq!(ids_of(&resale), vec![4]);

    // the dataset was still only read once
    let (_, stats) = get_json(&app, "/api/cache/stats").await;
    assert_eq!(stats["dataset_loads"], 1);
}

// == Authentication ==

#[tokio::test]
async fn test_request_without_key_is_open() {
    let dir = TempDir::new().unwrap();
    let (app, _) = create_test_app(&dir);

    let (status, _) = get_json(&app, "/api/properties").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_invalid_api_key_is_unauthorized() {
    let dir = TempDir::new().unwrap();
    let (app, state) = create_test_app(&dir);
    state
        .api_keys
        .save(&[ApiKeyRecord::generate("Website".into())])
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/properties")
                .header("x-api-key", "pp_wrong")
                .header("x-api-secret", "nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_api_key_pair_is_accepted() {
    let dir = TempDir::new().unwrap();
    let (app, state) = create_test_app(&dir);
    let record = ApiKeyRecord::generate("Website".into());
    state.api_keys.save(&[record.clone()]).unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/properties")
                .header("x-api-key", record.key.as_str())
                .header("x-api-secret", record.secret.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    // a successful check stamps last_used
    let reloaded: Vec<ApiKeyRecord> = state.api_keys.load().unwrap();
    assert!(reloaded[0].last_used.is_some());
}

// == Admin CRUD ==

#[tokio::test]
async fn test_property_crud_roundtrip() {
    let dir = TempDir::new().unwrap();
    let (app, _) = create_test_app(&dir);

    let (status, created) = send_json(
        &app,
        "POST",
        "/api/properties",
        json!({"development_name": "Nueva Promoción", "town": "Casares", "price": 400000}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = get_json(&app, &format!("/api/properties/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["development_name"], "Nueva Promoción");
    // the detail endpoint geocodes on the fly
    assert!(fetched["latitude"].as_f64().unwrap() != 0.0);

    let (status, updated) = send_json(
        &app,
        "PATCH",
        &format!("/api/properties/{id}"),
        json!({"price": 380000}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], 380000.0);
    assert_eq!(updated["town"], "Casares");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/properties/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (status, _) = get_json(&app, &format!("/api/properties/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_unknown_property_is_404() {
    let dir = TempDir::new().unwrap();
    let (app, _) = create_test_app(&dir);

    let (status, body) = get_json(&app, "/api/properties/999999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Property not found");
}

#[tokio::test]
async fn test_news_crud_roundtrip() {
    let dir = TempDir::new().unwrap();
    let (app, _) = create_test_app(&dir);

    let (status, created) = send_json(
        &app,
        "POST",
        "/api/news",
        json!({"title": "Grand Opening", "content": "Doors open in May."}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["published"], false);
    let id = created["id"].as_str().unwrap().to_string();

    let (_, listed) = get_json(&app, "/api/news").await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, updated) = send_json(
        &app,
        "PATCH",
        &format!("/api/news/{id}"),
        json!({"published": true}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["published"], true);
    assert_eq!(updated["title"], "Grand Opening");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/news/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (_, listed) = get_json(&app, "/api/news").await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_api_key_list_redacts_secret() {
    let dir = TempDir::new().unwrap();
    let (app, _) = create_test_app(&dir);

    let (status, created) = send_json(
        &app,
        "POST",
        "/api/api-keys",
        json!({"name": "External Site"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // the secret is visible exactly once, at creation
    assert_eq!(created["secret"].as_str().unwrap().len(), 64);

    let (_, listed) = get_json(&app, "/api/api-keys").await;
    let entry = &listed.as_array().unwrap()[0];
    assert_eq!(entry["name"], "External Site");
    assert!(entry.get("secret").is_none());
}

// == Dashboard ==

#[tokio::test]
async fn test_dashboard_stats_shape() {
    let dir = TempDir::new().unwrap();
    let (app, _) = create_test_app(&dir);

    let (status, body) = get_json(&app, "/api/dashboard/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalProperties"], 5);
    assert_eq!(body["offPlanProperties"], 3);
    assert_eq!(body["marketDistribution"]["series"], json!([3, 1, 1]));
    assert_eq!(body["minPrice"], 2000.0);
    assert_eq!(body["maxPrice"], 450000.0);
}
