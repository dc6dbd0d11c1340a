//! # toku
//!
//! Outcome logging for RPC-style endpoints. Nothing more. Nothing less.
//!
//! ## The contract
//!
//! Your transport stack owns serialization, deadlines, retries, and where log
//! records ultimately land. toku does not — by design. The transport does
//! transport things. The middleware observes.
//!
//! What your stack already owns — toku intentionally ignores:
//!
//! - **Retries and rejection** — toku never alters a call, it only watches one
//! - **Log persistence** — a [`Sink`] is handed a finished sequence; what it
//!   does with it is its own business
//! - **Severity plumbing** — toku knows success and failure; levels beyond
//!   that belong to the sink
//! - **Call context** — forwarded untouched, never interpreted
//!
//! What's left for toku — the only part that changes between applications:
//!
//! - Timing every call and routing the outcome to a success or failure sink
//! - A capability contract ([`AppendKeyvals`]) so request and response types
//!   contribute their own structured fields without the middleware knowing
//!   their concrete types
//! - Containing sink failures — an observability problem must never become a
//!   call-path problem
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use toku::{Endpoint, EndpointExt, Logging, Tracing};
//!
//! #[tokio::main]
//! async fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     let double = |_cx: (), n: u32| async move { (n * 2, None::<toku::BoxError>) };
//!     let double = double.with(Logging::new(Tracing::info()).failure(Tracing::error()));
//!
//!     let (answer, err) = double.call((), 21).await;
//!     assert_eq!(answer, 42);
//!     assert!(err.is_none());
//! }
//! ```
//!
//! Every call through `double` now emits one sequence, always starting with
//! the same two pairs: [`TRANSPORT_ERROR_KEY`] with the error (null on
//! success) and [`TOOK_KEY`] with the elapsed duration. Types implementing
//! [`AppendKeyvals`] append their own pairs after those — request fields
//! first, then response fields. The two names are reserved; contributors
//! reusing them collide with the outcome fields.

mod endpoint;
mod error;
mod keyvals;
mod sink;

pub mod middleware;

pub use endpoint::{BoxFuture, Endpoint, EndpointExt, Middleware, Outcome};
pub use error::BoxError;
pub use keyvals::{AppendKeyvals, Keyvals, Value};
pub use middleware::{Logged, Logging, TOOK_KEY, TRANSPORT_ERROR_KEY};
#[cfg(feature = "serde")]
pub use sink::Json;
pub use sink::{Logfmt, Nop, Sink, SinkFn, Tracing};
