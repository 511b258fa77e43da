//! Shared wire plumbing for the beevs HTTP API.
//!
//! The API wraps every response in one envelope: `{success, message, data}`
//! on success, `{success, message, errors}` on failure. The helpers here
//! build endpoint URLs from the configured base and pull the envelope fields
//! apart without assuming more shape than the contract guarantees.

use crate::errors::Error;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

pub(crate) static APP_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

pub(crate) fn client() -> Result<Client, Error> {
    Client::builder()
        .user_agent(APP_USER_AGENT)
        .build()
        .map_err(|err| Error::Config(format!("Failed to build HTTP client: {err}")))
}

/// Build a full endpoint URL from the configured API base and a path.
/// # Errors
/// Returns `Error::Config` if the base cannot be parsed, has no host, or
/// uses an unsupported scheme.
pub fn endpoint_url(base: &str, path: &str) -> Result<String, Error> {
    let url =
        Url::parse(base).map_err(|err| Error::Config(format!("Error parsing URL: {err}")))?;

    let scheme = url.scheme();

    let host = url
        .host()
        .ok_or_else(|| Error::Config("Error parsing URL: no host specified".to_string()))?
        .to_owned();

    let port = match url.port() {
        Some(p) => p,
        None => match scheme {
            "http" => 80,
            "https" => 443,
            _ => {
                return Err(Error::Config(format!(
                    "Error parsing URL: unsupported scheme {scheme}"
                )))
            }
        },
    };

    let endpoint_url = format!("{scheme}://{host}:{port}{path}");

    debug!("endpoint URL: {}", endpoint_url);

    Ok(endpoint_url)
}

/// Human-readable message from an API envelope, when the server sent one.
pub(crate) fn envelope_message(json_response: &Value) -> Option<&str> {
    json_response.get("message").and_then(Value::as_str)
}

/// The `data` payload of a success envelope.
pub(crate) fn envelope_data(json_response: &Value) -> Option<&Value> {
    json_response.get("data")
}
