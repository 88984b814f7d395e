//! HTTP layer: request signing, execution and endpoint definitions.

mod client;
mod endpoints;
mod signing;

pub(crate) use client::{ApiClient, ApiRequest};
pub(crate) use endpoints::*;
pub(crate) use signing::sign;
