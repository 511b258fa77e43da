//! Client-side access control for the beevs election platform.
//!
//! Three actor kinds talk to the beevs API under independently-scoped
//! credentials: an administrator manages elections, voters cast ballots,
//! and auditors inspect results. This crate owns how those credentials are
//! acquired, persisted, attached to outbound requests, and invalidated:
//!
//! - [`store`]: the durable credential store, sole owner of all tokens
//! - [`session`]: administrator login, logout, and session reads
//! - [`scoped`]: per-election voter/auditor authentication
//! - [`dispatch`]: bearer-credential request dispatch by explicit scope
//! - [`gate`]: allow / redirect-to-auth / deny decisions per route
//!
//! The managers and the gate only ever communicate through the store, so an
//! in-memory store swaps in for tests and a file-backed one for real use.

pub mod api;
pub mod cli;
pub mod dispatch;
pub mod errors;
pub mod gate;
pub mod scoped;
pub mod session;
pub mod store;

pub use dispatch::{CredentialScope, Dispatcher};
pub use errors::Error;
pub use gate::{Access, Route};
pub use scoped::{Role, ScopedAccessManager, ScopedAccessToken};
pub use session::{AdminSession, SessionManager};
pub use store::{CredentialStore, FileStore, MemoryStore};
