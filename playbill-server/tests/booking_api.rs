//! Router-level tests for venues, artists and shows against the in-memory store

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use playbill_core::random::FixedIndex;
use playbill_server::{build_router, AppState, MemoryStore, ServerConfig};

fn app() -> Router {
    build_router(
        AppState::in_memory(MemoryStore::new(), FixedIndex(0)),
        &ServerConfig::default(),
    )
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn venue_form(name: &str, city: &str, state: &str) -> Value {
    json!({
        "name": name,
        "city": city,
        "state": state,
        "address": "1015 Folsom Street",
        "phone": "4155550100",
        "genres": ["Jazz", "Reggae"],
        "website": "https://www.themusicalhop.com",
        "seeking_talent": true,
        "seeking_description": "We are on the lookout for a local artist"
    })
}

fn artist_form(name: &str) -> Value {
    json!({
        "name": name,
        "city": "San Francisco",
        "state": "CA",
        "phone": "3265550100",
        "genres": ["Rock n Roll"],
        "image_link": "https://images.example.com/artist.jpg",
        "seeking_venue": false
    })
}

async fn create(app: &Router, uri: &str, body: Value) -> i64 {
    let (status, created) = send(app, Method::POST, uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {created}");
    created["created"].as_i64().unwrap()
}

#[tokio::test]
async fn venue_detail_splits_shows_around_now() {
    let app = app();
    let venue = create(&app, "/venues", venue_form("The Musical Hop", "San Francisco", "CA")).await;
    let artist = create(&app, "/artists", artist_form("Guns N Petals")).await;

    for start_time in ["2001-05-21 21:30:00", "2099-04-01 20:00:00", "2098-04-01 20:00:00"] {
        let show = json!({ "artist_id": artist, "venue_id": venue, "start_time": start_time });
        create(&app, "/shows", show).await;
    }

    let (status, detail) = send(&app, Method::GET, &format!("/venues/{venue}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["name"], "The Musical Hop");
    assert_eq!(detail["genres"], json!(["Jazz", "Reggae"]));
    assert_eq!(detail["past_shows_count"], 1);
    assert_eq!(detail["upcoming_shows_count"], 2);
    assert_eq!(detail["upcoming_shows"][0]["start_time"], "2098-04-01 20:00:00");
    assert_eq!(detail["upcoming_shows"][0]["artist_name"], "Guns N Petals");

    let (_, detail) = send(&app, Method::GET, &format!("/artists/{artist}"), None).await;
    assert_eq!(detail["past_shows"][0]["venue_name"], "The Musical Hop");
    assert_eq!(detail["upcoming_shows_count"], 2);
}

#[tokio::test]
async fn venues_group_by_area() {
    let app = app();
    create(&app, "/venues", venue_form("The Musical Hop", "San Francisco", "CA")).await;
    create(&app, "/venues", venue_form("Park Square Live Music & Coffee", "San Francisco", "CA")).await;
    create(&app, "/venues", venue_form("The Dueling Pianos Bar", "New York", "NY")).await;

    let (status, body) = send(&app, Method::GET, "/venues", None).await;
    assert_eq!(status, StatusCode::OK);

    let areas = body["areas"].as_array().unwrap();
    assert_eq!(areas.len(), 2);
    let sf = areas.iter().find(|a| a["city"] == "San Francisco").unwrap();
    assert_eq!(sf["state"], "CA");
    assert_eq!(sf["venues"].as_array().unwrap().len(), 2);
    assert_eq!(sf["venues"][0]["num_upcoming_shows"], 0);
}

#[tokio::test]
async fn venue_search_counts_matches() {
    let app = app();
    create(&app, "/venues", venue_form("The Musical Hop", "San Francisco", "CA")).await;
    create(&app, "/venues", venue_form("Park Square Live Music & Coffee", "San Francisco", "CA")).await;

    let (status, body) = send(&app, Method::POST, "/venues/search", Some(json!({ "search_term": "music" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);

    let (_, body) = send(&app, Method::POST, "/venues/search", Some(json!({ "search_term": "hop" }))).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "The Musical Hop");

    let (_, body) = send(&app, Method::POST, "/venues/search", Some(json!({ "search_term": "" }))).await;
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn invalid_venue_reports_every_field() {
    let app = app();
    let mut form = venue_form("", "San Francisco", "ZZ");
    form["phone"] = json!("555-CALL");
    form["genres"] = json!(["Polka"]);

    let (status, body) = send(&app, Method::POST, "/venues", Some(form)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    for field in ["name", "state", "phone", "genres"] {
        assert!(body["errors"][field].is_array(), "missing error for {field}");
    }
}

#[tokio::test]
async fn venue_edit_replaces_fields() {
    let app = app();
    let id = create(&app, "/venues", venue_form("The Musical Hop", "San Francisco", "CA")).await;

    let mut form = venue_form("The Musical Hop", "Oakland", "CA");
    form["seeking_talent"] = json!(false);
    let (status, _) = send(&app, Method::PATCH, &format!("/venues/{id}"), Some(form)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, detail) = send(&app, Method::GET, &format!("/venues/{id}"), None).await;
    assert_eq!(detail["city"], "Oakland");
    assert_eq!(detail["seeking_talent"], false);

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/venues/9999",
        Some(venue_form("Nowhere", "Oakland", "CA")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_venue_removes_its_shows() {
    let app = app();
    let venue = create(&app, "/venues", venue_form("The Musical Hop", "San Francisco", "CA")).await;
    let artist = create(&app, "/artists", artist_form("Guns N Petals")).await;
    create(
        &app,
        "/shows",
        json!({ "artist_id": artist, "venue_id": venue, "start_time": "2099-04-01 20:00:00" }),
    )
    .await;

    let (status, body) = send(&app, Method::DELETE, &format!("/venues/{venue}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], venue);

    let (status, _) = send(&app, Method::GET, &format!("/venues/{venue}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, shows) = send(&app, Method::GET, "/shows", None).await;
    assert!(shows["shows"].as_array().unwrap().is_empty());

    let (status, _) = send(&app, Method::DELETE, &format!("/venues/{venue}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn artists_list_and_search() {
    let app = app();
    let id = create(&app, "/artists", artist_form("Guns N Petals")).await;
    create(&app, "/artists", artist_form("Matt Quevedo")).await;

    let (_, body) = send(&app, Method::GET, "/artists", None).await;
    assert_eq!(body["artists"].as_array().unwrap().len(), 2);
    assert_eq!(body["artists"][0], json!({ "id": id, "name": "Guns N Petals" }));

    let (_, body) = send(&app, Method::POST, "/artists/search", Some(json!({ "search_term": "A" }))).await;
    assert_eq!(body["count"], 2);

    let (_, body) = send(&app, Method::POST, "/artists/search", Some(json!({ "search_term": "petals" }))).await;
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn missing_artist_is_404() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/artists/77", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn show_listing_joins_names() {
    let app = app();
    let venue = create(&app, "/venues", venue_form("The Musical Hop", "San Francisco", "CA")).await;
    let artist = create(&app, "/artists", artist_form("Guns N Petals")).await;
    create(
        &app,
        "/shows",
        json!({ "artist_id": artist.to_string(), "venue_id": venue, "start_time": "2035-06-15T21:00:00" }),
    )
    .await;

    let (_, body) = send(&app, Method::GET, "/shows", None).await;
    let show = &body["shows"][0];
    assert_eq!(show["venue_name"], "The Musical Hop");
    assert_eq!(show["artist_name"], "Guns N Petals");
    assert_eq!(show["artist_image_link"], "https://images.example.com/artist.jpg");
    assert_eq!(show["start_time"], "2035-06-15 21:00:00");
}

#[tokio::test]
async fn show_with_unknown_artist_is_422() {
    let app = app();
    let venue = create(&app, "/venues", venue_form("The Musical Hop", "San Francisco", "CA")).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/shows",
        Some(json!({ "artist_id": 4242, "venue_id": venue, "start_time": "2035-06-15 21:00:00" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "unprocessable");
}

#[tokio::test]
async fn show_without_start_time_reports_field() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/shows", Some(json!({ "artist_id": 1, "venue_id": 2 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["start_time"].is_array());
}
