use crate::dispatch::CredentialScope;
use std::fmt;

/// Error taxonomy for the access-control layer.
///
/// Every failure here is recoverable by re-authenticating; nothing is fatal
/// to the process.
#[derive(Clone, Debug)]
pub enum Error {
    /// The server rejected the presented credentials. The message is
    /// user-facing: the server's own message when it sent one, a generic
    /// fallback otherwise.
    Authentication(String),
    /// Transport failure or an unexpected response shape from a reachable
    /// server. Surfaced generically, logged with detail.
    Protocol(String),
    /// No credential is stored for the requested scope. Raised before any
    /// network call is issued.
    Unauthenticated(CredentialScope),
    /// A previously-valid credential was rejected by the server. Cleanup is
    /// the caller's decision and applies to this scope only.
    Expired(CredentialScope),
    /// Invalid client configuration, such as an unusable API base URL.
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Authentication(message) => write!(formatter, "{message}"),
            Error::Protocol(message) => write!(formatter, "Protocol error: {message}"),
            Error::Unauthenticated(scope) => {
                write!(formatter, "No credential available for {scope}")
            }
            Error::Expired(scope) => {
                write!(formatter, "Credential for {scope} was rejected by the server")
            }
            Error::Config(message) => write!(formatter, "Config error: {message}"),
        }
    }
}

impl std::error::Error for Error {}
