//! Administrator session management.
//!
//! `login` performs exactly one exchange with the authentication endpoint,
//! normalizes the response, and commits the session to the credential store;
//! the caller never observes a partially-written session. `logout` clears
//! only the admin keys; scoped voter/auditor tokens are untouched.

use crate::api;
use crate::errors::Error;
use crate::store::{
    CredentialStore, ADMIN_ACCESS_TOKEN_KEY, ADMIN_PROFILE_KEY, ADMIN_REFRESH_TOKEN_KEY,
};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::debug;

/// The administrator's persistent authenticated identity.
#[derive(Clone, Debug, Serialize)]
pub struct AdminSession {
    /// Short-lived bearer credential for administrator API calls.
    pub access_token: String,
    /// Long-lived credential for minting a new access token. Stored and
    /// returned only; no client-side refresh flow exists, recovery from an
    /// expired access token is a fresh login.
    pub refresh_token: String,
    /// Opaque administrator identity object, stored verbatim and never
    /// inspected for trust decisions.
    pub profile: Map<String, Value>,
}

pub struct SessionManager {
    api_url: String,
    client: Client,
    store: Arc<dyn CredentialStore>,
}

impl SessionManager {
    /// # Errors
    /// Returns `Error::Config` if the API base URL is unusable or the HTTP
    /// client cannot be built.
    pub fn new(api_url: &str, store: Arc<dyn CredentialStore>) -> Result<Self, Error> {
        api::endpoint_url(api_url, "/")?;

        Ok(Self {
            api_url: api_url.to_string(),
            client: api::client()?,
            store,
        })
    }

    /// Authenticate the administrator against the login endpoint.
    ///
    /// On success the session is committed to the store and returned; on any
    /// failure the store is left exactly as it was.
    /// # Errors
    /// Returns `Error::Authentication` when the server rejects the
    /// credentials and `Error::Protocol` on transport failure or an
    /// unexpected response shape.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<AdminSession, Error> {
        let login_url = api::endpoint_url(&self.api_url, "/api/v1/auth/login")?;

        let payload = json!({
            "email": email,
            "password": password.expose_secret(),
        });

        debug!("login URL: {}, email: {}", login_url, email);

        let response = self
            .client
            .post(&login_url)
            .json(&payload)
            .send()
            .await
            .map_err(|err| Error::Protocol(format!("Login request failed: {err}")))?;

        if !response.status().is_success() {
            let json_response: Value = response.json().await.unwrap_or_default();

            let message = api::envelope_message(&json_response).unwrap_or("Login failed");

            return Err(Error::Authentication(message.to_string()));
        }

        let json_response: Value = response
            .json()
            .await
            .map_err(|err| Error::Protocol(format!("Error parsing JSON response: {err}")))?;

        let session = decode_session(&json_response)?;

        commit(self.store.as_ref(), &session);

        Ok(session)
    }

    /// Clear the admin session. Scoped tokens are not affected.
    pub fn logout(&self) {
        clear(self.store.as_ref());
    }

    /// Pure read of the stored session.
    #[must_use]
    pub fn current_session(&self) -> Option<AdminSession> {
        current(self.store.as_ref())
    }
}

/// The stored admin session, if all of its parts are present and well
/// formed. A partial or corrupt record reads as absent.
#[must_use]
pub fn current(store: &dyn CredentialStore) -> Option<AdminSession> {
    let access_token = store.get(ADMIN_ACCESS_TOKEN_KEY)?;
    let refresh_token = store.get(ADMIN_REFRESH_TOKEN_KEY)?;
    let raw_profile = store.get(ADMIN_PROFILE_KEY)?;

    let profile = serde_json::from_str::<Map<String, Value>>(&raw_profile).ok()?;

    Some(AdminSession {
        access_token,
        refresh_token,
        profile,
    })
}

pub(crate) fn clear(store: &dyn CredentialStore) {
    store.clear(ADMIN_ACCESS_TOKEN_KEY);
    store.clear(ADMIN_REFRESH_TOKEN_KEY);
    store.clear(ADMIN_PROFILE_KEY);
}

fn decode_session(json_response: &Value) -> Result<AdminSession, Error> {
    let data = api::envelope_data(json_response)
        .filter(|data| !data.is_null())
        .ok_or_else(|| Error::Protocol("Error parsing JSON response: no data found".to_string()))?;

    let access_token = data
        .get("access_token")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            Error::Protocol("Error parsing JSON response: no access_token found".to_string())
        })?;

    let refresh_token = data
        .get("refresh_token")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            Error::Protocol("Error parsing JSON response: no refresh_token found".to_string())
        })?;

    let profile = data.get("admin").and_then(Value::as_object).ok_or_else(|| {
        Error::Protocol("Error parsing JSON response: no admin found".to_string())
    })?;

    Ok(AdminSession {
        access_token: access_token.to_string(),
        refresh_token: refresh_token.to_string(),
        profile: profile.clone(),
    })
}

// The three keys are written back-to-back with no await point between them,
// so under the store's lock the triple is observed as one update.
fn commit(store: &dyn CredentialStore, session: &AdminSession) {
    store.set(ADMIN_ACCESS_TOKEN_KEY, &session.access_token);
    store.set(ADMIN_REFRESH_TOKEN_KEY, &session.refresh_token);
    store.set(
        ADMIN_PROFILE_KEY,
        &Value::Object(session.profile.clone()).to_string(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn session_fixture() -> AdminSession {
        let profile = json!({ "email": "a@x.com", "name": "Returning Officer" });
        AdminSession {
            access_token: "access-1".to_string(),
            refresh_token: "refresh-1".to_string(),
            profile: profile.as_object().unwrap().clone(),
        }
    }

    #[test]
    fn test_commit_and_current_round_trip() {
        let store = MemoryStore::new();
        commit(&store, &session_fixture());

        let session = current(&store).unwrap();
        assert_eq!(session.access_token, "access-1");
        assert_eq!(session.refresh_token, "refresh-1");
        assert_eq!(
            session.profile.get("email").and_then(Value::as_str),
            Some("a@x.com")
        );
    }

    #[test]
    fn test_partial_session_reads_as_absent() {
        let store = MemoryStore::new();
        store.set(ADMIN_ACCESS_TOKEN_KEY, "access-1");
        store.set(ADMIN_REFRESH_TOKEN_KEY, "refresh-1");
        assert!(current(&store).is_none());
    }

    #[test]
    fn test_corrupt_profile_reads_as_absent() {
        let store = MemoryStore::new();
        commit(&store, &session_fixture());
        store.set(ADMIN_PROFILE_KEY, "{not json");
        assert!(current(&store).is_none());
    }

    #[test]
    fn test_clear_leaves_scoped_tokens() {
        let store = MemoryStore::new();
        commit(&store, &session_fixture());
        store.set("scoped-token:voter:E1", "voter-token");

        clear(&store);

        assert!(current(&store).is_none());
        assert_eq!(
            store.get("scoped-token:voter:E1").as_deref(),
            Some("voter-token")
        );
    }

    #[test]
    fn test_decode_session_shapes() {
        let body = json!({
            "success": true,
            "message": "Login successful",
            "data": {
                "access_token": "access-1",
                "refresh_token": "refresh-1",
                "admin": { "email": "a@x.com" }
            }
        });
        let session = decode_session(&body).unwrap();
        assert_eq!(session.access_token, "access-1");

        let missing_admin = json!({
            "success": true,
            "message": "Login successful",
            "data": { "access_token": "a", "refresh_token": "r" }
        });
        assert!(matches!(
            decode_session(&missing_admin),
            Err(Error::Protocol(_))
        ));

        let null_data = json!({ "success": true, "message": "WIP", "data": null });
        assert!(matches!(decode_session(&null_data), Err(Error::Protocol(_))));
    }
}
