//! Authenticated request dispatch.
//!
//! Every outbound call names the credential it rides on through an explicit
//! [`CredentialScope`] rather than an ambient lookup, so the token attached
//! to a request is always a function of a testable parameter. The
//! dispatcher never mutates the store: a rejected scoped token must not
//! invalidate the admin session or other elections' tokens, so cleanup
//! stays with the caller.

use crate::api;
use crate::errors::Error;
use crate::scoped::{self, Role};
use crate::session;
use crate::store::CredentialStore;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use std::fmt;
use std::sync::Arc;

/// Which credential an outbound request rides on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CredentialScope {
    Admin,
    Scoped { role: Role, election_id: String },
}

impl fmt::Display for CredentialScope {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialScope::Admin => formatter.write_str("admin session"),
            CredentialScope::Scoped { role, election_id } => {
                write!(formatter, "{role} token for election {election_id}")
            }
        }
    }
}

pub struct Dispatcher {
    api_url: String,
    client: Client,
    store: Arc<dyn CredentialStore>,
}

impl Dispatcher {
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

    /// Build a request against the configured API base.
    /// # Errors
    /// Returns `Error::Config` if the base and path cannot form a URL.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, Error> {
        let url = api::endpoint_url(&self.api_url, path)?;

        Ok(self.client.request(method, url))
    }

    /// Attach the credential for `scope` and issue exactly one request.
    ///
    /// The credential is resolved from the store before anything goes on the
    /// wire; with no credential stored, no network call is made at all. A
    /// single bearer header is attached, never both an admin and a scoped
    /// token.
    /// # Errors
    /// Returns `Error::Unauthenticated` when no credential is stored for
    /// `scope`, `Error::Protocol` on transport failure, and `Error::Expired`
    /// when the server rejects the credential (401/403). No retry is
    /// attempted with a stale credential.
    pub async fn send(
        &self,
        request: RequestBuilder,
        scope: &CredentialScope,
    ) -> Result<Response, Error> {
        let token = self
            .resolve(scope)
            .ok_or_else(|| Error::Unauthenticated(scope.clone()))?;

        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|err| Error::Protocol(format!("Request failed: {err}")))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Expired(scope.clone()));
        }

        Ok(response)
    }

    fn resolve(&self, scope: &CredentialScope) -> Option<String> {
        match scope {
            CredentialScope::Admin => {
                session::current(self.store.as_ref()).map(|session| session.access_token)
            }
            CredentialScope::Scoped { role, election_id } => {
                scoped::token_for(self.store.as_ref(), *role, election_id)
                    .map(|scoped| scoped.token)
            }
        }
    }
}
