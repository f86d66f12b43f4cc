use super::*;

fn test_client(base_url: &str) -> PagespeedClient {
    PagespeedClient::with_base_url("test-key", 5, "mapsift-test/0.1", 3, 0, base_url)
        .expect("client construction should not fail")
}

#[test]
fn build_url_encodes_target_and_key() {
    let client = test_client("https://www.googleapis.com");
    let url = client.build_url("https://www.example.com");
    assert_eq!(
        url.as_str(),
        "https://www.googleapis.com/pagespeedonline/v5/runPagespeed\
         ?url=https%3A%2F%2Fwww.example.com&key=test-key&strategy=mobile"
    );
}

#[test]
fn build_url_works_against_a_local_base() {
    let client = test_client("http://127.0.0.1:9999");
    let url = client.build_url("https://www.example.com");
    assert!(url
        .as_str()
        .starts_with("http://127.0.0.1:9999/pagespeedonline/v5/runPagespeed?"));
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = PagespeedClient::with_base_url("k", 5, "ua", 3, 0, "not a url");
    assert!(
        matches!(result, Err(PagespeedError::InvalidBaseUrl { .. })),
        "expected InvalidBaseUrl"
    );
}
