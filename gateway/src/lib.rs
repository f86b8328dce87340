//! # gateway
//!
//! The single path from the fitness client to the remote service:
//! - Session store holding the bearer token and signed-in identity, with pluggable persistence
//! - Gateway client wrapping one base endpoint and default headers
//! - Request interceptor attaching the current token at dispatch time
//! - Response interceptor evicting the session and publishing an event on 401
//! - Status classification into the error taxonomy callers render
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gateway::{http::GatewayClient, session::{FileStorage, SessionStore}};
//!
//! let store = SessionStore::load(Arc::new(FileStorage::new(path))).await?;
//! let client = GatewayClient::builder("http://localhost:5000/api", store)
//!     .with_events(publisher)
//!     .build()?;
//! let profile: Profile = client.get("/auth/profile").await?;
//! ```

pub mod error;
pub mod http;
pub mod session;

// Re-export commonly used types
pub use error::{Error, ErrorKind};

/// Result of one dispatched request: the decoded payload or the failure kind.
pub type Outcome<T> = Result<T, Error>;
