//! HTTP behavior of the region and alert clients against a local mock
//! server: status mapping, snapshot persistence, and what happens to the
//! previous snapshot when an upstream call fails.

use pretty_assertions::assert_eq;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vartabot::core::error::AppError;
use vartabot::services::alerts::AlertsClient;
use vartabot::services::regions::RegionsClient;

fn tree_json() -> serde_json::Value {
    serde_json::json!({
        "states": [
            {
                "regionId": "14",
                "regionName": "Київська область",
                "regionChildIds": [
                    {"regionId": "31", "regionName": "м. Київ", "regionChildIds": []}
                ]
            }
        ]
    })
}

#[tokio::test]
async fn region_refresh_returns_tree_and_writes_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/regions"))
        .and(header("Authorization", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tree_json()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("data.json");
    let client = RegionsClient::new(server.uri(), "secret", &snapshot).unwrap();

    let tree = client.refresh().await.unwrap();
    assert_eq!(tree.states.len(), 1);
    assert_eq!(tree.states[0].region_name, "Київська область");

    // The wizard matches against the snapshot, so it must hold what the
    // refresh just returned.
    assert_eq!(client.load().unwrap(), tree);
}

#[tokio::test]
async fn region_refresh_error_status_keeps_previous_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("data.json");

    let good = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/regions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tree_json()))
        .mount(&good)
        .await;
    let tree = RegionsClient::new(good.uri(), "secret", &snapshot)
        .unwrap()
        .refresh()
        .await
        .unwrap();

    let bad = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/regions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&bad)
        .await;
    let failing = RegionsClient::new(bad.uri(), "secret", &snapshot).unwrap();

    let err = failing.refresh().await.unwrap_err();
    assert!(matches!(err, AppError::HttpStatus(status) if status.as_u16() == 500));
    // A failed refresh must not clobber what the wizard still matches on.
    assert_eq!(failing.load().unwrap(), tree);
}

#[tokio::test]
async fn region_refresh_transport_error_is_http() {
    // Take a port, then free it so the connect fails. A pooled server
    // (`MockServer::start`) keeps listening after drop, so build a
    // dedicated one that actually releases its port.
    let server = MockServer::builder().start().await;
    let uri = server.uri();
    drop(server);

    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("data.json");
    let client = RegionsClient::new(uri, "secret", &snapshot).unwrap();

    assert!(matches!(client.refresh().await.unwrap_err(), AppError::Http(_)));
    assert!(!snapshot.exists());
}

#[tokio::test]
async fn alert_fetch_parses_feed_and_writes_raw_snapshot() {
    let server = MockServer::start().await;
    let body = r#"[{"regionId":"31","activeAlerts":[{"type":"AIR"}]}]"#;
    Mock::given(method("GET"))
        .and(path("/alerts"))
        .and(header("Authorization", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("data_alert.json");
    let client = AlertsClient::new(server.uri(), "secret", &snapshot).unwrap();

    let feed = client.fetch().await.unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].region_id, "31");
    assert_eq!(feed[0].active_alerts[0].kind, "AIR");

    // The raw body is kept byte-for-byte for audit/replay.
    assert_eq!(std::fs::read_to_string(&snapshot).unwrap(), body);
}

#[tokio::test]
async fn alert_fetch_error_status_writes_no_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/alerts"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("data_alert.json");
    let client = AlertsClient::new(server.uri(), "secret", &snapshot).unwrap();

    let err = client.fetch().await.unwrap_err();
    assert!(matches!(err, AppError::HttpStatus(status) if status.as_u16() == 503));
    assert!(!snapshot.exists());
}
