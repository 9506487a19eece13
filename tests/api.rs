//! Router-level tests driving the HTTP boundary with `tower::oneshot`.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use cinema_system::config::{AppConfig, Config, StorageConfig};
use cinema_system::{controllers, AppState};

async fn app() -> Router {
    let data_dir = std::env::temp_dir()
        .join(format!("cinema-api-{}", uuid::Uuid::new_v4()))
        .to_string_lossy()
        .into_owned();
    let config = Config {
        app: AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            environment: "test".into(),
            rust_log: "info".into(),
        },
        storage: StorageConfig {
            data_dir,
            autosave_interval_secs: 300,
        },
    };
    let state = AppState::new(config).await;
    Router::new()
        .nest("/api", controllers::routes())
        .with_state(state)
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Seeds one movie, one cinema and showtime "s1" through the API.
async fn seeded(app: &Router) {
    let movie = post(
        "/api/movies",
        json!({ "title": "Alien", "description": "In space" }),
    );
    assert_eq!(
        app.clone().oneshot(movie).await.unwrap().status(),
        StatusCode::CREATED
    );

    let cinema = post(
        "/api/cinemas",
        json!({ "name": "Grand", "location": "Main St", "screens": 4, "totalSeats": 300 }),
    );
    assert_eq!(
        app.clone().oneshot(cinema).await.unwrap().status(),
        StatusCode::CREATED
    );

    let showtime = post(
        "/api/showtimes",
        json!({
            "id": "s1",
            "movieId": 1,
            "cinemaId": 1,
            "date": "2026-09-01",
            "time": "19:30",
            "screenType": "IMAX",
            "price": 14.5
        }),
    );
    assert_eq!(
        app.clone().oneshot(showtime).await.unwrap().status(),
        StatusCode::CREATED
    );
}

#[tokio::test]
async fn movie_without_description_is_a_400() {
    let app = app().await;
    let response = app
        .oneshot(post("/api/movies", json!({ "title": "No description" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("description"));
}

#[tokio::test]
async fn unknown_movie_is_a_404() {
    let app = app().await;
    let response = app.oneshot(get("/api/movies/99")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn showtime_filters_by_movie_and_date() {
    let app = app().await;
    seeded(&app).await;

    let response = app
        .clone()
        .oneshot(get("/api/showtimes?movieId=1&date=2026-09-01"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let empty = app
        .oneshot(get("/api/showtimes?movieId=1&date=1999-01-01"))
        .await
        .unwrap();
    assert_eq!(body_json(empty).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn booking_lifecycle_over_http() {
    let app = app().await;
    seeded(&app).await;

    let create = post(
        "/api/bookings",
        json!({
            "userId": "u1",
            "movieId": 1,
            "showtimeId": "s1",
            "seats": ["A1", "A2"],
            "totalPrice": 29.0
        }),
    );
    let response = app.clone().oneshot(create).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let booking = body_json(response).await;
    let booking_id = booking["id"].as_str().unwrap().to_string();
    assert_eq!(booking["cinemaName"], "Grand");
    assert_eq!(booking["cancelled"], json!(false));

    let seats = app.clone().oneshot(get("/api/showtimes/s1/seats")).await.unwrap();
    assert_eq!(body_json(seats).await, json!(["A1", "A2"]));

    let cancel = app
        .clone()
        .oneshot(post(&format!("/api/bookings/{booking_id}/cancel"), json!({})))
        .await
        .unwrap();
    assert!(cancelled_flag(body_json(cancel).await));

    let seats = app.clone().oneshot(get("/api/showtimes/s1/seats")).await.unwrap();
    assert_eq!(body_json(seats).await, json!([]));

    let restore = app
        .clone()
        .oneshot(post(&format!("/api/bookings/{booking_id}/restore"), json!({})))
        .await
        .unwrap();
    assert!(!cancelled_flag(body_json(restore).await));

    let listed = app
        .oneshot(get("/api/users/u1/bookings"))
        .await
        .unwrap();
    assert_eq!(body_json(listed).await.as_array().unwrap().len(), 1);
}

fn cancelled_flag(body: Value) -> bool {
    body["cancelled"].as_bool().unwrap()
}

#[tokio::test]
async fn conflicting_booking_is_a_409() {
    let app = app().await;
    seeded(&app).await;

    let first = post(
        "/api/bookings",
        json!({
            "userId": "u1",
            "movieId": 1,
            "showtimeId": "s1",
            "seats": ["A1"],
            "totalPrice": 14.5
        }),
    );
    assert_eq!(
        app.clone().oneshot(first).await.unwrap().status(),
        StatusCode::CREATED
    );

    let second = post(
        "/api/bookings",
        json!({
            "userId": "u2",
            "movieId": 1,
            "showtimeId": "s1",
            "seats": ["A1", "A2"],
            "totalPrice": 29.0
        }),
    );
    let response = app.clone().oneshot(second).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("A1"));

    // The losing request claimed nothing.
    let seats = app.oneshot(get("/api/showtimes/s1/seats")).await.unwrap();
    assert_eq!(body_json(seats).await, json!(["A1"]));
}

#[tokio::test]
async fn cancel_of_unknown_booking_is_a_404() {
    let app = app().await;
    let response = app
        .oneshot(post("/api/bookings/ghost/cancel", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_cinema_drops_its_showtimes() {
    let app = app().await;
    seeded(&app).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/cinemas/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let missing = app.oneshot(get("/api/showtimes/s1")).await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn analytics_reflects_active_bookings() {
    let app = app().await;
    seeded(&app).await;

    let create = post(
        "/api/bookings",
        json!({
            "userId": "u1",
            "movieId": 1,
            "showtimeId": "s1",
            "seats": ["C1"],
            "totalPrice": 14.5
        }),
    );
    app.clone().oneshot(create).await.unwrap();

    let response = app.oneshot(get("/api/admin/analytics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["totalBookings"], json!(1));
    assert_eq!(body["uniqueUsers"], json!(1));
    assert_eq!(body["totalRevenue"], json!(14.5));
    assert_eq!(body["screenTypePopularity"]["IMAX"], json!(1));
}
