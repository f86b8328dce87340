//! Session state: the bearer token and signed-in identity.
//!
//! The store is created once at startup (`SessionStore::load`), shared by cheap clones
//! with the gateway client and the auth operations, and emptied on logout or on any
//! 401 response.

mod storage;
mod store;

pub use storage::{FileStorage, MemoryStorage, Storage, StoredSession};
pub use store::{Session, SessionStore};
