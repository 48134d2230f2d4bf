use jira_cli::{probe_connection, JiraError, ServerConfig};
use wiremock::matchers::{basic_auth, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_probe_with_password() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/api/2/application-properties"))
        .and(basic_auth("admin", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let config = ServerConfig::new(server.uri())
        .with_username("admin")
        .with_password("secret");

    assert_eq!(probe_connection(&config).await.unwrap(), 200);
}

#[tokio::test]
async fn test_probe_forbidden_is_reachable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/api/latest/application-properties"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let config = ServerConfig::new(server.uri())
        .with_username("me@example.com")
        .with_api_token("tok");

    assert_eq!(probe_connection(&config).await.unwrap(), 403);
}

#[tokio::test]
async fn test_probe_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/application-properties"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = probe_connection(&ServerConfig::new(server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, JiraError::Connectivity { status: 401, .. }));
    assert_eq!(err.to_string(), "HTTP response code 401, reason Unauthorized");
}

#[tokio::test]
async fn test_probe_unreachable_host() {
    // port 9 (discard) is not expected to accept HTTP connections
    let config = ServerConfig::new("http://127.0.0.1:9");

    let err = probe_connection(&config).await.unwrap_err();
    assert!(matches!(err, JiraError::RequestError(_)));
}
