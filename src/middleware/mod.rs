//! Middleware layer.
//!
//! Middleware wraps endpoints and is the right place for cross-cutting
//! concerns. toku ships exactly one: [`Logging`], which times every call,
//! routes the outcome to a success or failure sink, and carries whatever
//! fields the request and response types contribute.
//!
//! Middleware observes. It does not retry, transform, or reject calls — an
//! endpoint behaves identically with and without it.

mod logging;

pub use logging::{Logged, Logging, TOOK_KEY, TRANSPORT_ERROR_KEY};
