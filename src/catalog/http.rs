//! Blocking HTTP helpers shared by the catalog clients.
use std::time::Duration;

use crate::error::CatalogError;

/// Seconds allowed for establishing a connection. Transfers are unbounded.
const CONNECT_TIMEOUT: u64 = 10;

/// Upper bound on a downloaded archive.
const MAX_DOWNLOAD_BYTES: u64 = 512 * 1024 * 1024;

/// `User-Agent` sent with every request.
pub(super) const USER_AGENT: &str = concat!("modder/", env!("CARGO_PKG_VERSION"));

/// Build an agent with the connect timeout applied.
pub(super) fn agent() -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_connect(Some(Duration::from_secs(CONNECT_TIMEOUT)))
        .build();
    ureq::Agent::new_with_config(config)
}

/// Outcome of a GET that tolerates 404.
pub(super) enum Fetched<T> {
    Found(T),
    NotFound,
}

fn network(url: &str, err: &ureq::Error) -> CatalogError {
    CatalogError::Network {
        url: url.to_string(),
        message: err.to_string(),
    }
}

fn send(
    agent: &ureq::Agent,
    url: &str,
    query: &[(&str, String)],
) -> Result<Fetched<ureq::http::Response<ureq::Body>>, CatalogError> {
    let mut request = agent.get(url).header("User-Agent", USER_AGENT);
    for (key, value) in query {
        request = request.query(*key, value);
    }
    match request.call() {
        Ok(response) => Ok(Fetched::Found(response)),
        Err(ureq::Error::StatusCode(404)) => Ok(Fetched::NotFound),
        Err(e) => Err(network(url, &e)),
    }
}

/// GET `url` and return the body as text.
pub(super) fn get_text(
    agent: &ureq::Agent,
    url: &str,
    query: &[(&str, String)],
) -> Result<Fetched<String>, CatalogError> {
    match send(agent, url, query)? {
        Fetched::Found(mut response) => response
            .body_mut()
            .read_to_string()
            .map(Fetched::Found)
            .map_err(|e| network(url, &e)),
        Fetched::NotFound => Ok(Fetched::NotFound),
    }
}

/// GET `url` and decode the JSON body.
pub(super) fn get_json<T: serde::de::DeserializeOwned>(
    agent: &ureq::Agent,
    url: &str,
    query: &[(&str, String)],
) -> Result<Fetched<T>, CatalogError> {
    match get_text(agent, url, query)? {
        Fetched::Found(body) => decode(url, &body).map(Fetched::Found),
        Fetched::NotFound => Ok(Fetched::NotFound),
    }
}

/// Decode a JSON body, attributing failures to `url`.
pub(super) fn decode<T: serde::de::DeserializeOwned>(url: &str, body: &str) -> Result<T, CatalogError> {
    serde_json::from_str(body).map_err(|e| CatalogError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// GET `url` and return the raw body. A 404 is a network error here.
pub(super) fn get_bytes(agent: &ureq::Agent, url: &str) -> Result<Vec<u8>, CatalogError> {
    match send(agent, url, &[])? {
        Fetched::Found(mut response) => response
            .body_mut()
            .with_config()
            .limit(MAX_DOWNLOAD_BYTES)
            .read_to_vec()
            .map_err(|e| network(url, &e)),
        Fetched::NotFound => Err(CatalogError::Network {
            url: url.to_string(),
            message: "http status: 404".to_string(),
        }),
    }
}

/// Render a single-element JSON array query value: `["fabric"]`.
pub(super) fn json_array(value: &str) -> String {
    serde_json::json!([value]).to_string()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn json_array_quotes_value() {
        assert_eq!(json_array("fabric"), r#"["fabric"]"#);
        assert_eq!(json_array("1.20.1"), r#"["1.20.1"]"#);
    }

    #[test]
    fn decode_error_names_url() {
        let err = decode::<Vec<u32>>("https://api.example/x", "{not json").unwrap_err();
        assert!(matches!(err, CatalogError::Decode { ref url, .. } if url == "https://api.example/x"));
    }

    #[test]
    fn user_agent_carries_version() {
        assert!(USER_AGENT.starts_with("modder/"));
    }
}
