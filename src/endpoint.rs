//! Endpoint trait and middleware composition.
//!
//! # How async endpoints are stored and wrapped
//!
//! Middleware needs to wrap endpoints of *different* concrete types behind a
//! common interface, so endpoint futures are **type-erased** into boxed
//! futures. The chain from user code to vtable call is:
//!
//! ```text
//! async fn greet(cx: Cx, req: GreetRequest) -> Outcome<GreetResponse> { … }
//!        ↓ blanket impl (any suitable Fn is an Endpoint)
//! greet.with(middleware)                     ← EndpointExt
//!        ↓
//! middleware.transform(greet)                ← Middleware, wraps the endpoint
//!        ↓
//! wrapped.call(cx, req)  at request time
//!        ↓
//! Box::pin(async move { … inner future … })  ← BoxFuture
//! ```
//!
//! The runtime cost per call is one heap allocation for the boxed future and
//! one virtual dispatch — negligible next to whatever I/O the endpoint does.

use std::future::Future;
use std::pin::Pin;

use crate::error::BoxError;

/// A heap-allocated, type-erased future.
///
/// `Pin<Box<…>>` because the async runtime must be able to poll the future
/// in-place — it cannot move it in memory after the first poll. `Send +
/// 'static` let tokio move the future across threads safely.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// What one endpoint invocation produces: the response value and the error
/// slot, side by side.
///
/// The two travel together rather than as a `Result` — a failed call can
/// still carry a response the transport layer (or a logging sink) wants to
/// see. "The call failed" means exactly "the error slot is `Some`"; no value
/// of the response, and no content of the error, changes that reading.
pub type Outcome<Resp> = (Resp, Option<BoxError>);

/// A unit of request-handling logic: call context and request in, response
/// and optional error out.
///
/// You rarely implement this by hand. Any async function or closure with the
/// right shape already is one, via the blanket implementation:
///
/// ```rust
/// use toku::{BoxError, Endpoint};
///
/// let double = |_cx: (), n: u32| async move { (n * 2, None::<BoxError>) };
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let (resp, err) = double.call((), 21).await;
/// assert_eq!(resp, 42);
/// assert!(err.is_none());
/// # });
/// ```
///
/// The context type `Cx` is the caller's own — deadlines, auth material,
/// request IDs, whatever the transport propagates. Endpoints receive it;
/// middleware forwards it without looking inside.
pub trait Endpoint<Cx, Req>: Send + Sync {
    /// The response value this endpoint produces.
    type Response: Send + 'static;

    /// Handles one request.
    fn call(&self, cx: Cx, req: Req) -> BoxFuture<Outcome<Self::Response>>;
}

/// Any suitable `Fn` is an endpoint: named `async fn` items, `async`
/// closures, and any struct implementing `Fn`.
impl<F, Fut, Cx, Req, Resp> Endpoint<Cx, Req> for F
where
    F: Fn(Cx, Req) -> Fut + Send + Sync,
    Fut: Future<Output = Outcome<Resp>> + Send + 'static,
    Resp: Send + 'static,
{
    type Response = Resp;

    fn call(&self, cx: Cx, req: Req) -> BoxFuture<Outcome<Resp>> {
        // Calling the function returns the concrete `Fut`; boxing it erases
        // the type so the signature matches the trait.
        Box::pin(self(cx, req))
    }
}

// ── Middleware ────────────────────────────────────────────────────────────────

/// A decorator: consumes an endpoint, returns an endpoint with the same
/// external signature and extra behaviour around it.
pub trait Middleware<E> {
    /// The wrapped endpoint type this middleware produces.
    type Output;

    /// Wraps `endpoint`.
    fn transform(&self, endpoint: E) -> Self::Output;
}

/// Chaining sugar so middleware reads in application order.
///
/// `endpoint.with(a).with(b)` runs `b` outermost: a call passes through `b`,
/// then `a`, then the endpoint itself.
pub trait EndpointExt: Sized {
    /// Wraps `self` in `middleware`.
    fn with<M>(self, middleware: M) -> M::Output
    where
        M: Middleware<Self>,
    {
        middleware.transform(self)
    }
}

impl<E> EndpointExt for E {}
