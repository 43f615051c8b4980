mod common;

use serde_json::Value;

#[tokio::test]
async fn test_health_check() {
    let (state, _repo) = common::create_test_state();
    let server = common::test_server(state);

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 200);

    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert!(json["version"].is_string());
}
