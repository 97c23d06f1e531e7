//! Roundtable API client.
//!
//! [`ApiClient`] wraps every backend operation as a typed async method. The
//! transport contract is uniform: one HTTP attempt, one
//! `{success, data, error}` envelope, one of two error kinds on failure.

mod client;
mod types;

pub use client::*;
pub use types::*;
