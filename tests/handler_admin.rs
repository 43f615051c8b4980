mod common;

#[tokio::test]
async fn test_admin_not_mounted_without_credentials() {
    let (state, _repo) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .get("/admin/")
        .add_header("Authorization", common::ADMIN_AUTHORIZATION)
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_admin_requires_auth() {
    let (state, _repo) = common::create_admin_state();
    let server = common::test_server(state);

    let response = server.get("/admin/").await;

    assert_eq!(response.status_code(), 401);
    assert!(
        response
            .header("www-authenticate")
            .to_str()
            .unwrap()
            .starts_with("Basic")
    );
}

#[tokio::test]
async fn test_admin_rejects_wrong_password() {
    let (state, _repo) = common::create_admin_state();
    let server = common::test_server(state);

    let response = server
        .get("/admin/")
        .add_header("Authorization", "Basic YWRtaW46d3Jvbmc=")
        .await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_admin_lists_entries() {
    let (state, repo) = common::create_admin_state();
    common::create_test_link(&repo, "https://one.example.com/").await;
    common::create_test_link(&repo, "https://two.example.com/").await;
    let server = common::test_server(state);

    let response = server
        .get("/admin/")
        .add_header("Authorization", common::ADMIN_AUTHORIZATION)
        .await;

    assert_eq!(response.status_code(), 200);
    let body = response.text();
    let one = body.find("https://one.example.com/").unwrap();
    let two = body.find("https://two.example.com/").unwrap();
    assert!(one < two);
}

#[tokio::test]
async fn test_admin_filters_by_clicked() {
    let (state, repo) = common::create_admin_state();
    common::create_test_link(&repo, "https://clicked.example.com/").await;
    common::create_test_link(&repo, "https://idle.example.com/").await;
    common::click(&repo, "1", 1).await;
    let server = common::test_server(state);

    let body = server
        .get("/admin/")
        .add_query_param("clicked", "never")
        .add_header("Authorization", common::ADMIN_AUTHORIZATION)
        .await
        .text();

    assert!(body.contains("https://idle.example.com/"));
    assert!(!body.contains("https://clicked.example.com/"));
}

#[tokio::test]
async fn test_admin_search() {
    let (state, repo) = common::create_admin_state();
    common::create_test_link(&repo, "https://www.duolingo.com/").await;
    common::create_test_link(&repo, "https://en.wikipedia.org/").await;
    let server = common::test_server(state);

    let body = server
        .get("/admin/")
        .add_query_param("q", "WIKI")
        .add_header("Authorization", common::ADMIN_AUTHORIZATION)
        .await
        .text();

    assert!(body.contains("https://en.wikipedia.org/"));
    assert!(!body.contains("https://www.duolingo.com/"));
}

#[tokio::test]
async fn test_admin_rejects_bad_filters() {
    let (state, _repo) = common::create_admin_state();
    let server = common::test_server(state);

    let response = server
        .get("/admin/")
        .add_query_param("clicked", "twice")
        .add_header("Authorization", common::ADMIN_AUTHORIZATION)
        .await;
    assert_eq!(response.status_code(), 400);

    let response = server
        .get("/admin/")
        .add_query_param("page_size", 5)
        .add_header("Authorization", common::ADMIN_AUTHORIZATION)
        .await;
    assert_eq!(response.status_code(), 400);
}
