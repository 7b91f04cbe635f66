//! Playground Forms
//!
//! The stateful half of the form pipeline: form sessions (the state
//! machine behind every page's form), the asynchronous submission gateway
//! and its simulated implementations, the demo credential verifier, and
//! the in-memory record store with its live filter view.
//!
//! The crate exposes no network or file surface of its own (apart from the
//! optional simulation config file); it is an in-memory library driven by
//! a rendering layer that sends `set_field` / `submit` / `set_filter_term`
//! / `reset` intents and reads the resulting state back.

pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use auth::{CredentialVerifier, User};
pub use config::SimulationConfig;
pub use error::SubmitError;
pub use gateway::{Ack, CredentialGateway, Latency, SimulatedGateway, SubmissionGateway};
pub use session::{FieldState, FormSession, SessionStatus, SubmitOutcome, SubmitStart};
pub use store::RecordStore;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
