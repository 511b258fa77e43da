//! Navigation gating.
//!
//! The gate maps a requested route and the current store contents to a
//! decision: allow, redirect to the matching auth step, or deny. It is a
//! pure function: evaluated once per navigation attempt, it writes nothing
//! and holds no state of its own. The route table consuming these decisions
//! is an external collaborator.

use crate::scoped::{self, Role};
use crate::session;
use crate::store::CredentialStore;

/// Routes the client navigates between.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Dashboard,
    CreateElection,
    ElectionDetail(String),
    Vote(String),
    VoteAuth(String),
    Audit(String),
    AuditAuth(String),
    Results(String),
}

impl Route {
    /// Parse a client path. Paths outside the route table are `None`.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim_start_matches('/').trim_end_matches('/');

        let segments: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };

        match segments.as_slice() {
            [] => Some(Route::Home),
            ["login"] => Some(Route::Login),
            ["dashboard"] => Some(Route::Dashboard),
            ["elections", "new"] => Some(Route::CreateElection),
            ["elections", id] if !id.is_empty() => Some(Route::ElectionDetail((*id).to_string())),
            ["vote", id] if !id.is_empty() => Some(Route::Vote((*id).to_string())),
            ["vote", id, "auth"] if !id.is_empty() => Some(Route::VoteAuth((*id).to_string())),
            ["audit", id] if !id.is_empty() => Some(Route::Audit((*id).to_string())),
            ["audit", id, "auth"] if !id.is_empty() => Some(Route::AuditAuth((*id).to_string())),
            ["results", id] if !id.is_empty() => Some(Route::Results((*id).to_string())),
            _ => None,
        }
    }
}

/// Gate decision for one navigation attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Access {
    Allow,
    RedirectToAuth(String),
    Deny,
}

/// Path of the auth step for one role and election.
#[must_use]
pub fn auth_path(role: Role, election_id: &str) -> String {
    match role {
        Role::Voter => format!("/vote/{election_id}/auth"),
        Role::Auditor => format!("/audit/{election_id}/auth"),
    }
}

/// Decide access for `route` given the current store contents.
#[must_use]
pub fn evaluate(route: &Route, store: &dyn CredentialStore) -> Access {
    match route {
        Route::Home | Route::Login | Route::Results(_) => Access::Allow,
        Route::Dashboard | Route::CreateElection | Route::ElectionDetail(_) => {
            if session::current(store).is_some() {
                Access::Allow
            } else {
                Access::RedirectToAuth("/login".to_string())
            }
        }
        Route::Vote(election_id) => scoped_access(store, Role::Voter, election_id),
        Route::Audit(election_id) => scoped_access(store, Role::Auditor, election_id),
        // The auth step itself must stay reachable without a token, or the
        // redirect would loop.
        Route::VoteAuth(_) | Route::AuditAuth(_) => Access::Allow,
    }
}

/// Parse and decide in one step; an unknown path is denied.
#[must_use]
pub fn evaluate_path(path: &str, store: &dyn CredentialStore) -> Access {
    Route::parse(path).map_or(Access::Deny, |route| evaluate(&route, store))
}

fn scoped_access(store: &dyn CredentialStore, role: Role, election_id: &str) -> Access {
    if scoped::token_for(store, role, election_id).is_some() {
        Access::Allow
    } else {
        Access::RedirectToAuth(auth_path(role, election_id))
    }
}
