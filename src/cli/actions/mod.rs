pub mod admin;
pub mod route;
pub mod scoped;

use crate::scoped::Role;
use secrecy::SecretString;

/// Actions the CLI can dispatch.
#[derive(Debug)]
pub enum Action {
    Login {
        email: String,
        password: SecretString,
    },
    Logout,
    Session,
    Elections,
    Auth {
        role: Role,
        election_id: String,
        credential: SecretString,
    },
    Revoke {
        role: Role,
        election_id: String,
    },
    Route {
        path: String,
    },
}
