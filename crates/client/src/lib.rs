//! Causeway HTTP client
//!
//! Typed client for a single-endpoint, action-dispatched content backend.
//! Three cooperating pieces: the transport layer normalizes the backend's
//! heterogeneous replies into one envelope, the auth manager owns the
//! token lifecycle (proactive refresh plus a one-shot refresh-and-retry
//! on 401), and the domain surfaces expose one method per backend action
//! across public and admin trust namespaces.

pub mod admin;
pub mod auth;
pub mod config;
pub mod public;
pub mod transport;
pub mod upload;

mod client;

pub use admin::AdminApi;
pub use auth::{AuthManager, MemoryStore, SessionEvent, StateStore};
pub use causeway_core::{Action, ActionKind, ApiError, ApiResult, Envelope, types};
pub use client::Client;
pub use config::{ClientBuilder, StorageKeys};
pub use public::PublicApi;
pub use upload::{MediaFile, MediaKind, ObjectStore, UploadReport};
