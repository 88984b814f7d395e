//! Authentication types.
//!
//! This module provides the application credentials that sign every request
//! and the [`Session`] obtained from a login call.

mod credentials;
mod session;

pub use credentials::{Credentials, hash_password};
pub use session::{Session, SessionToken};
