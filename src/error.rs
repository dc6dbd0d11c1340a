//! Error vocabulary.
//!
//! toku distinguishes exactly two kinds of failure, and owns neither:
//!
//! - **Endpoint errors** — whatever the wrapped endpoint returns in the error
//!   slot of its [`Outcome`](crate::Outcome). The middleware observes them for
//!   sink routing and field building, then hands them back to the caller
//!   untouched.
//! - **Sink emission errors** — returned by [`Sink::emit`](crate::Sink).
//!   Swallowed. Observability must not be able to destabilise the call path,
//!   so an emission failure is never propagated, never retried, and never
//!   logged elsewhere.
//!
//! Both travel as the same type-erased alias. There is no crate-specific
//! error enum because the middleware has no failure modes of its own.

/// A type-erased error, shared by the endpoint error slot and sink emission.
///
/// Anything implementing [`std::error::Error`] converts into it with `?` or
/// [`From`], including plain strings:
///
/// ```rust
/// use toku::BoxError;
///
/// let err = BoxError::from("upstream unavailable");
/// assert_eq!(err.to_string(), "upstream unavailable");
/// ```
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
