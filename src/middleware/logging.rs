//! Outcome logging for endpoints.
//!
//! [`Logging`] wraps any [`Endpoint`] so that every invocation is timed and
//! emitted as one key/value sequence: the error slot first (null included),
//! the elapsed duration second, then any fields the request and response
//! types contribute through [`AppendKeyvals`]. Outcomes with an error go to
//! the failure sink, everything else to the success sink, and the inner
//! endpoint's result reaches the caller untouched either way.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::endpoint::{BoxFuture, Endpoint, Middleware, Outcome};
use crate::keyvals::{AppendKeyvals, Keyvals, Value};
use crate::sink::Sink;

/// Field name for the error slot. Emitted on every call, null or not.
///
/// Reserved: contributors reusing it will collide with the outcome fields.
pub const TRANSPORT_ERROR_KEY: &str = "transport_error";

/// Field name for the elapsed duration. Emitted on every call.
///
/// Reserved: contributors reusing it will collide with the outcome fields.
pub const TOOK_KEY: &str = "took";

// ── Logging (the middleware) ──────────────────────────────────────────────────

/// Outcome logging middleware.
///
/// Holds the success sink and the failure sink; wrapping an endpoint costs
/// two reference-count bumps. Without an explicit failure sink, the success
/// sink takes both roles — decided here, at construction, not per call.
///
/// ```rust
/// use toku::{BoxError, Endpoint, EndpointExt, Logging, Tracing};
///
/// let lookup = |_cx: (), id: u64| async move {
///     (format!("user-{id}"), None::<BoxError>)
/// };
/// let lookup = lookup.with(Logging::new(Tracing::info()).failure(Tracing::error()));
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let (user, err) = lookup.call((), 7).await;
/// assert_eq!(user, "user-7");
/// assert!(err.is_none());
/// # });
/// ```
pub struct Logging {
    success: Arc<dyn Sink>,
    failure: Arc<dyn Sink>,
}

impl Logging {
    /// Middleware sending every outcome to `sink`, until
    /// [`failure`](Self::failure) routes errors elsewhere.
    pub fn new(sink: impl Sink + 'static) -> Self {
        let sink: Arc<dyn Sink> = Arc::new(sink);
        Self { success: Arc::clone(&sink), failure: sink }
    }

    /// Routes outcomes whose error slot is non-null to `sink` instead.
    pub fn failure(mut self, sink: impl Sink + 'static) -> Self {
        self.failure = Arc::new(sink);
        self
    }
}

impl<E> Middleware<E> for Logging {
    type Output = Logged<E>;

    fn transform(&self, endpoint: E) -> Logged<E> {
        Logged {
            inner: endpoint,
            success: Arc::clone(&self.success),
            failure: Arc::clone(&self.failure),
        }
    }
}

// ── Logged (the wrapped endpoint) ─────────────────────────────────────────────

/// An endpoint wrapped by [`Logging`].
///
/// Externally indistinguishable from the inner endpoint: same signature, same
/// response, same error, bit for bit. The only addition is one emitted
/// sequence per completed call.
pub struct Logged<E> {
    inner: E,
    success: Arc<dyn Sink>,
    failure: Arc<dyn Sink>,
}

impl<Cx, Req, E> Endpoint<Cx, Req> for Logged<E>
where
    E: Endpoint<Cx, Req>,
    Req: AppendKeyvals,
    E::Response: AppendKeyvals,
{
    type Response = E::Response;

    fn call(&self, cx: Cx, req: Req) -> BoxFuture<Outcome<Self::Response>> {
        // The request's contribution comes off the original value here,
        // before ownership moves into the inner call.
        let request_fields = req.append_keyvals(Keyvals::new());
        let inner = self.inner.call(cx, req);
        let success = Arc::clone(&self.success);
        let failure = Arc::clone(&self.failure);

        Box::pin(async move {
            let start = Instant::now();
            let (response, error) = inner.await;
            let took = start.elapsed();

            let response_fields = response.append_keyvals(Keyvals::new());
            let keyvals = make_keyvals(error.as_deref(), took, request_fields, response_fields);

            // Error present means exactly: the slot is non-null. An empty or
            // zero-valued error still counts.
            let sink = if error.is_some() { &failure } else { &success };
            // A sink that fails — or panics — must not take the call down
            // with it.
            let _ = catch_unwind(AssertUnwindSafe(|| sink.emit(keyvals)));

            (response, error)
        })
    }
}

/// Assembles the sequence for one call, in fixed order: error slot, elapsed
/// duration, request contribution, response contribution.
fn make_keyvals(
    error: Option<&(dyn std::error::Error + Send + Sync)>,
    took: Duration,
    request_fields: Keyvals,
    response_fields: Keyvals,
) -> Keyvals {
    let mut keyvals = Keyvals::with_capacity(2 + (request_fields.len() + response_fields.len()) / 2);
    keyvals.push(
        TRANSPORT_ERROR_KEY,
        error.map_or(Value::Null, |e| Value::Str(e.to_string().into())),
    );
    keyvals.push(TOOK_KEY, took);
    keyvals.extend(request_fields);
    keyvals.extend(response_fields);
    keyvals
}
