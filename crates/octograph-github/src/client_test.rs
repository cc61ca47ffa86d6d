use chrono::NaiveDate;

use super::*;

fn range_2024() -> TimeRange {
    TimeRange::for_year(2024).unwrap()
}

#[test]
fn window_spans_whole_days_in_utc() {
    let window = FetchWindow::for_range(&range_2024());
    assert_eq!(
        window.from.to_rfc3339_opts(SecondsFormat::Secs, true),
        "2024-01-01T00:00:00Z"
    );
    assert_eq!(
        window.to.to_rfc3339_opts(SecondsFormat::Secs, true),
        "2024-12-31T23:59:59Z"
    );
}

#[test]
fn query_body_carries_variables() {
    let range = TimeRange::new(
        NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
        NaiveDate::from_ymd_opt(2023, 6, 30).unwrap(),
    )
    .unwrap();
    let body = build_query_body("octocat", &FetchWindow::for_range(&range));

    assert_eq!(body["variables"]["login"], "octocat");
    assert_eq!(body["variables"]["from"], "2023-06-01T00:00:00Z");
    assert_eq!(body["variables"]["to"], "2023-06-30T23:59:59Z");
    let query = body["query"].as_str().unwrap();
    assert!(query.contains("contributionCalendar"));
    assert!(!query.contains("octocat"), "username goes in variables only");
}

#[test]
fn blank_token_is_a_missing_credential() {
    let err = GitHubClient::with_endpoint("  ", 30, "test", "http://localhost").unwrap_err();
    assert!(matches!(err, FetchError::MissingCredential));
}

#[test]
fn config_without_token_fails_before_network() {
    let config = AppConfig {
        github_token: None,
        api_url: DEFAULT_API_URL.to_owned(),
        log_level: "info".to_owned(),
        user_agent: "octograph/0.1".to_owned(),
        request_timeout_secs: 30,
        max_retries: 2,
        retry_backoff_base_ms: 1_000,
        cache_duration: std::time::Duration::from_secs(600),
    };
    let err = GitHubClient::from_config(&config).unwrap_err();
    assert!(matches!(err, FetchError::MissingCredential));
}

#[test]
fn default_endpoint_is_public_graphql_api() {
    let client = GitHubClient::new("t", 30, "test").unwrap();
    assert_eq!(client.endpoint().as_str(), DEFAULT_API_URL);
}

#[test]
fn rejects_unparseable_endpoint() {
    let err = GitHubClient::with_endpoint("t", 30, "test", "not a url").unwrap_err();
    assert!(matches!(err, FetchError::InvalidUrl { .. }));
}

#[test]
fn debug_hides_token() {
    let client = GitHubClient::with_endpoint("ghp_secret", 30, "test", "http://localhost").unwrap();
    let rendered = format!("{client:?}");
    assert!(!rendered.contains("ghp_secret"));
}

#[test]
fn graphql_errors_are_joined() {
    let body = json!({
        "data": { "user": null },
        "errors": [
            { "type": "NOT_FOUND", "message": "Could not resolve to a User with the login of 'nobody'." },
            { "message": "second" }
        ]
    });
    let Err(FetchError::GraphQl(msg)) = check_graphql_errors(&body) else {
        panic!("expected GraphQl error");
    };
    assert_eq!(
        msg,
        "Could not resolve to a User with the login of 'nobody'.; second"
    );
}

#[test]
fn empty_errors_array_is_ignored() {
    assert!(check_graphql_errors(&json!({ "data": {}, "errors": [] })).is_ok());
    assert!(check_graphql_errors(&json!({ "data": {} })).is_ok());
}
