//! API adapter tests against a mock letsmeet service.

mod common;

use common::mock_backend::{MockBackend, MockResponse, RawServer};
use common::{free_port, test_client};
use letsmeet::api::{ApiClient, ApiError, Coordinates, FailureKind, MapPoint};
use letsmeet::config::ApiConfig;
use serde_json::json;

#[tokio::test]
async fn test_login_posts_exact_credentials() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::json(r#"{"user": "ada"}"#)).await;

    let client = test_client(&mock.base_url());
    let response = client.login("ada", "s3cret").await.unwrap();
    assert_eq!(response, json!({"user": "ada"}));

    let requests = mock.captured_requests().await;
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(req.method, "POST");
    assert_eq!(req.path, "/api/login");
    assert_eq!(req.header("content-type"), Some("application/json"));
    assert_eq!(req.header("cache-control"), Some("no-cache"));
    assert_eq!(req.json_body(), json!({"username": "ada", "password": "s3cret"}));
}

#[tokio::test]
async fn test_retrieve_point_passes_json_through() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::json(r#"{"id":7,"name":"Park"}"#)).await;

    let client = test_client(&mock.base_url());
    let point = client.retrieve_point("7").await.unwrap();
    assert_eq!(point, json!({"id": 7, "name": "Park"}));

    let requests = mock.captured_requests().await;
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/api/map/point/7");
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_map_points_decodes_delimited_text() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::text(
        "1,food,Cafe,12.5,-3.25\n2,park,Commons,43.13,-70.92\n",
    ))
    .await;

    let client = test_client(&mock.base_url());
    let points = client.map_points().await.unwrap();
    let mut iter = points.iter();

    assert_eq!(
        iter.next().unwrap().unwrap(),
        MapPoint {
            id: 1,
            category: "food".to_string(),
            label: "Cafe".to_string(),
            latitude: 12.5,
            longitude: -3.25,
        }
    );
    assert_eq!(iter.next().unwrap().unwrap().label, "Commons");
    assert!(iter.next().is_none());

    let requests = mock.captured_requests().await;
    assert_eq!(requests[0].path, "/api/map/points");
    assert_eq!(requests[0].query, None);
}

#[tokio::test]
async fn test_map_points_filter_query() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::text("")).await;

    let client = test_client(&mock.base_url());
    let points = client.map_points_filtered(0.5).await.unwrap();
    assert!(points.collect_all().unwrap().is_empty());

    let requests = mock.captured_requests().await;
    assert_eq!(requests[0].query.as_deref(), Some("filter=0.5"));
}

#[tokio::test]
async fn test_negative_filter_sends_nothing() {
    let mock = MockBackend::start().await;
    let client = test_client(&mock.base_url());

    let err = client.map_points_filtered(-1.0).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Usage);
    assert!(mock.captured_requests().await.is_empty());
}

#[tokio::test]
async fn test_malformed_points_line_is_decode_failure() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::text("1,food,Cafe,12.5,-3.25\nbroken line\n")).await;

    let client = test_client(&mock.base_url());
    let points = client.map_points().await.unwrap();
    let err = points.collect_all().unwrap_err();
    assert_eq!(err.kind(), FailureKind::Decode);
    assert!(matches!(err, ApiError::MalformedPoint { line: 2, .. }));
}

#[tokio::test]
async fn test_invalid_json_is_decode_failure() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::text("<html>oops</html>")).await;

    let client = test_client(&mock.base_url());
    let err = client.retrieve_point("7").await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Decode);
    assert_eq!(err.error_type(), "json_decode_error");
}

#[tokio::test]
async fn test_error_status_is_surfaced() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::error(401, "unauthorized")).await;

    let client = test_client(&mock.base_url());
    let err = client.login("ada", "wrong").await.unwrap_err();
    match err {
        ApiError::Status { status, body, .. } => {
            assert_eq!(status, 401);
            assert!(body.contains("unauthorized"));
        }
        other => panic!("Expected Status, got {:?}", other),
    }
    assert_eq!(mock.captured_requests().await.len(), 1);
}

#[tokio::test]
async fn test_unreachable_service_is_network_failure() {
    let client = test_client(&format!("http://127.0.0.1:{}", free_port()));
    let err = client.map_points().await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Network);
    assert_eq!(err.error_type(), "network_error");
}

#[tokio::test]
async fn test_stalled_request_times_out() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::json("{}").with_delay(1500)).await;

    let config = ApiConfig {
        base_url: mock.base_url(),
        request_timeout_seconds: 1,
        ..ApiConfig::default()
    };
    let client = ApiClient::new(&config).unwrap();
    let err = client.retrieve_point("1").await.unwrap_err();
    assert!(matches!(err, ApiError::Timeout { duration: 1, .. }));
    assert_eq!(err.kind(), FailureKind::Network);
}

#[tokio::test]
async fn test_body_stalled_after_headers_times_out() {
    let server = RawServer::start(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n",
        "{\"id\":",
        10_000,
    )
    .await;

    let config = ApiConfig {
        base_url: server.base_url(),
        request_timeout_seconds: 1,
        ..ApiConfig::default()
    };
    let client = ApiClient::new(&config).unwrap();

    let result = tokio::time::timeout(
        std::time::Duration::from_secs(5),
        client.retrieve_point("7"),
    )
    .await
    .expect("request outlived its configured timeout");

    let err = result.unwrap_err();
    assert!(matches!(err, ApiError::Timeout { duration: 1, .. }), "got {:?}", err);
    assert_eq!(err.kind(), FailureKind::Network);
}

#[tokio::test]
async fn test_truncated_error_body_keeps_status() {
    let server = RawServer::start(
        "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 100\r\n\r\n",
        "partial",
        0,
    )
    .await;

    let client = test_client(&server.base_url());
    match client.retrieve_point("7").await.unwrap_err() {
        ApiError::Status { status, body, .. } => {
            assert_eq!(status, 500);
            assert!(body.starts_with("<unreadable body"), "body was {:?}", body);
        }
        other => panic!("Expected Status, got {:?}", other),
    }
}

#[tokio::test]
async fn test_redirects_are_followed_without_referer() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::redirect("/api/map/point/8")).await;
    mock.enqueue_response(MockResponse::json(r#"{"id": 8}"#)).await;

    let client = test_client(&mock.base_url());
    let point = client.retrieve_point("7").await.unwrap();
    assert_eq!(point, json!({"id": 8}));

    let requests = mock.captured_requests().await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].path, "/api/map/point/8");
    assert!(requests.iter().all(|r| r.header("referer").is_none()));
}

#[tokio::test]
async fn test_session_cookie_is_sent_back_to_same_origin() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(
        MockResponse::json(r#"{"ok": true}"#).with_header("set-cookie", "session=abc123; Path=/"),
    )
    .await;
    mock.enqueue_response(MockResponse::json(r#"{"id": 1}"#)).await;

    let client = test_client(&mock.base_url());
    client.login("ada", "s3cret").await.unwrap();
    client.retrieve_point("1").await.unwrap();

    let requests = mock.captured_requests().await;
    assert_eq!(requests[0].header("cookie"), None);
    assert_eq!(requests[1].header("cookie"), Some("session=abc123"));
}

#[tokio::test]
async fn test_source_lookups_send_coordinates() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::json(r#"{"restaurants": []}"#)).await;
    mock.enqueue_response(MockResponse::json(r#"{"events": []}"#)).await;

    let client = test_client(&mock.base_url());
    let at = Coordinates::new(43.13, -70.92);
    client.restaurants(at).await.unwrap();
    client.events(at).await.unwrap();

    let requests = mock.captured_requests().await;
    assert_eq!(requests[0].path, "/api/source/restaurants/location");
    assert_eq!(requests[0].query.as_deref(), Some("lat=43.13&lng=-70.92"));
    assert_eq!(requests[1].path, "/api/source/events/location");
}

#[tokio::test]
async fn test_aggregate_uses_location_id() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::json(r#"{"weather": {}}"#)).await;

    let client = test_client(&mock.base_url());
    client.aggregate("42").await.unwrap();

    let requests = mock.captured_requests().await;
    assert_eq!(requests[0].path, "/api/aggregate/all/42");
}
