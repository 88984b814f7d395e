//! Session persistence between CLI invocations.

pub mod storage;

pub use storage::StoredSession;
