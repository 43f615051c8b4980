mod common;

use shortener::domain::repositories::ShortUrlRepository;

#[tokio::test]
async fn test_info_shows_entry() {
    let (state, repo) = common::create_test_state();
    common::create_test_link(&repo, "http://waitbutwhy.com/").await;
    common::click(&repo, "1", 2).await;
    let server = common::test_server(state);

    let response = server.get("/info/1").add_header("Host", common::HOST).await;

    assert_eq!(response.status_code(), 200);
    let body = response.text();
    assert!(body.contains("http://waitbutwhy.com/"));
    assert!(body.contains("http://sho.rt:8000/1/"));
    assert!(body.contains("<td>2</td>"));
}

#[tokio::test]
async fn test_info_does_not_count_clicks() {
    let (state, repo) = common::create_test_state();
    common::create_test_link(&repo, "http://waitbutwhy.com/").await;
    let server = common::test_server(state);

    server.get("/info/1").await;
    server.get("/info/1").await;

    let entry = repo.find_by_short_code("1").await.unwrap().unwrap();
    assert_eq!(entry.clicks, 0);
}

#[tokio::test]
async fn test_info_unknown_code() {
    let (state, _repo) = common::create_test_state();
    let server = common::test_server(state);

    let response = server.get("/info/abc").await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_info_malformed_code() {
    let (state, _repo) = common::create_test_state();
    let server = common::test_server(state);

    let response = server.get("/info/a_b").await;

    assert_eq!(response.status_code(), 400);
}
