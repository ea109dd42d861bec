use super::*;

fn test_client(base_url: &str) -> GeocodeClient {
    GeocodeClient::new(base_url, "test-id", "test-secret", 5, "campusmap-test/0.1", 0, 0)
        .expect("client construction should not fail")
}

#[test]
fn build_url_encodes_address() {
    let client = test_client("https://api.example.com/map-geocode/v2/geocode");
    let url = client.build_url("춘천시 한림대");
    assert!(url
        .as_str()
        .starts_with("https://api.example.com/map-geocode/v2/geocode?query="));
    assert!(!url.as_str().contains(' '), "spaces must be encoded: {url}");
}

#[test]
fn new_rejects_invalid_base_url() {
    let result = GeocodeClient::new("::::", "id", "secret", 5, "ua", 0, 0);
    assert!(matches!(result, Err(ProviderError::InvalidBaseUrl { .. })));
}
