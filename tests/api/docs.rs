use crate::utils::spawn_app;
use axum::http::StatusCode;

#[tokio::test]
async fn openapi_docs_are_served_as_json() {
    // Arrange
    let app = spawn_app().await.expect("Failed to spawn our app.");

    // Act
    let response = app.get("/docs/openapi.json").await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let docs: serde_json::Value = response.json().await.expect("docs were not valid json");
    assert!(docs["paths"]["/api/subscribe"].is_object());
}

#[tokio::test]
async fn openapi_docs_are_served_as_yaml() {
    // Arrange
    let app = spawn_app().await.expect("Failed to spawn our app.");

    // Act
    let response = app.get("/docs/openapi.yaml").await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("failed to read body");
    assert!(body.contains("/api/subscribe"));
}
