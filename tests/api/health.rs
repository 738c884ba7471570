use crate::utils::spawn_app;
use axum::http::StatusCode;

#[tokio::test]
async fn health_check_works() {
    // Arrange
    let app = spawn_app().await.expect("Failed to spawn our app.");

    // Act
    let response = app.get("/health").await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(Some(0), response.content_length());
}

#[tokio::test]
async fn build_info_reports_the_crate_version() {
    // Arrange
    let app = spawn_app().await.expect("Failed to spawn our app.");

    // Act
    let response = app.get("/health/info").await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("body was not json");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn metrics_are_served_in_the_prometheus_text_format() {
    // Arrange
    let app = spawn_app().await.expect("Failed to spawn our app.");

    // Act
    let response = app.get("/metrics").await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("failed to read body");
    assert!(body.contains("signups_relayed_total"));
    assert!(body.contains("signup_honeypot_trips_total"));
}
