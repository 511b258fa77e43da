//! Per-election scoped access for voters and auditors.
//!
//! A scoped token authorizes exactly one `(role, election)` pair; tokens for
//! different pairs never satisfy each other's checks even when the
//! underlying string format is identical. The credential material presented
//! at authentication (a voter code, an auditor passphrase) is opaque to this
//! layer and forwarded verbatim to the per-role endpoint.

use crate::api;
use crate::errors::Error;
use crate::store::{scoped_token_key, CredentialStore};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Actor kinds that authenticate against a single election.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Voter,
    Auditor,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Voter => "voter",
            Role::Auditor => "auditor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(role: &str) -> Result<Self, Self::Err> {
        match role.to_lowercase().as_str() {
            "voter" => Ok(Role::Voter),
            "auditor" => Ok(Role::Auditor),
            _ => Err(format!("invalid role: {role}")),
        }
    }
}

/// Bearer credential valid only for one role and one election.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScopedAccessToken {
    pub role: Role,
    pub election_id: String,
    pub token: String,
}

pub struct ScopedAccessManager {
    api_url: String,
    client: Client,
    store: Arc<dyn CredentialStore>,
}

impl ScopedAccessManager {
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

    /// Authenticate against the per-role, per-election endpoint.
    ///
    /// On success the token is stored under its `(role, election)` key,
    /// replacing any prior token for that exact pair and nothing else.
    /// # Errors
    /// Returns `Error::Authentication` when the server rejects the
    /// credential material and `Error::Protocol` on transport failure or an
    /// unexpected response shape.
    pub async fn authenticate(
        &self,
        role: Role,
        election_id: &str,
        credential: &SecretString,
    ) -> Result<ScopedAccessToken, Error> {
        let auth_url = api::endpoint_url(
            &self.api_url,
            &format!("/api/v1/elections/{election_id}/{role}/auth"),
        )?;

        let payload = json!({
            "credential": credential.expose_secret(),
        });

        debug!("auth URL: {}, role: {}", auth_url, role);

        let response = self
            .client
            .post(&auth_url)
            .json(&payload)
            .send()
            .await
            .map_err(|err| Error::Protocol(format!("Authentication request failed: {err}")))?;

        if !response.status().is_success() {
            let json_response: Value = response.json().await.unwrap_or_default();

            let message = api::envelope_message(&json_response).unwrap_or("Authentication failed");

            return Err(Error::Authentication(message.to_string()));
        }

        let json_response: Value = response
            .json()
            .await
            .map_err(|err| Error::Protocol(format!("Error parsing JSON response: {err}")))?;

        let token = api::envelope_data(&json_response)
            .and_then(|data| data.get("token"))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::Protocol("Error parsing JSON response: no token found".to_string())
            })?;

        let scoped = ScopedAccessToken {
            role,
            election_id: election_id.to_string(),
            token: token.to_string(),
        };

        self.store
            .set(&scoped_token_key(role, election_id), &scoped.token);

        Ok(scoped)
    }

    /// Pure read of the stored token for one `(role, election)` pair.
    #[must_use]
    pub fn token_for(&self, role: Role, election_id: &str) -> Option<ScopedAccessToken> {
        token_for(self.store.as_ref(), role, election_id)
    }

    /// Drop the stored token for one `(role, election)` pair only.
    pub fn revoke(&self, role: Role, election_id: &str) {
        revoke(self.store.as_ref(), role, election_id);
    }
}

/// The stored token for one `(role, election)` pair, if any.
#[must_use]
pub fn token_for(
    store: &dyn CredentialStore,
    role: Role,
    election_id: &str,
) -> Option<ScopedAccessToken> {
    let token = store.get(&scoped_token_key(role, election_id))?;

    Some(ScopedAccessToken {
        role,
        election_id: election_id.to_string(),
        token,
    })
}

pub(crate) fn revoke(store: &dyn CredentialStore, role: Role, election_id: &str) {
    store.clear(&scoped_token_key(role, election_id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_role_parse() {
        assert_eq!("voter".parse::<Role>().unwrap(), Role::Voter);
        assert_eq!("Auditor".parse::<Role>().unwrap(), Role::Auditor);
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_tokens_coexist_per_election() {
        let store = MemoryStore::new();
        store.set(&scoped_token_key(Role::Voter, "E1"), "tok-e1");
        store.set(&scoped_token_key(Role::Voter, "E2"), "tok-e2");

        assert_eq!(token_for(&store, Role::Voter, "E1").unwrap().token, "tok-e1");
        assert_eq!(token_for(&store, Role::Voter, "E2").unwrap().token, "tok-e2");
    }

    #[test]
    fn test_roles_do_not_satisfy_each_other() {
        let store = MemoryStore::new();
        store.set(&scoped_token_key(Role::Voter, "E7"), "tok-voter");

        assert!(token_for(&store, Role::Voter, "E7").is_some());
        assert!(token_for(&store, Role::Auditor, "E7").is_none());
    }

    #[test]
    fn test_revoke_clears_only_that_pair() {
        let store = MemoryStore::new();
        store.set(&scoped_token_key(Role::Voter, "E1"), "tok-e1");
        store.set(&scoped_token_key(Role::Voter, "E2"), "tok-e2");
        store.set(&scoped_token_key(Role::Auditor, "E1"), "tok-audit");

        revoke(&store, Role::Voter, "E1");

        assert!(token_for(&store, Role::Voter, "E1").is_none());
        assert!(token_for(&store, Role::Voter, "E2").is_some());
        assert!(token_for(&store, Role::Auditor, "E1").is_some());
    }
}
