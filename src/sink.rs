//! Log sinks — destinations for finished key/value sequences.
//!
//! A sink does one thing: accept a [`Keyvals`] and make it durable, for
//! whatever definition of durable it likes. The middleware calls
//! [`Sink::emit`] from whatever task invoked the endpoint and discards the
//! result — a sink that cannot write must not be able to fail the call it
//! was observing.
//!
//! Shipped sinks:
//!
//! - [`SinkFn`] — adapt any closure; what test suites want
//! - [`Nop`] — discard everything; what benchmarks want
//! - [`Logfmt`] — `name=value` lines into any [`Write`] target
//! - [`Tracing`] — forward into the `tracing` ecosystem at a fixed level
//! - `Json` — JSON lines into any [`Write`] target (feature `serde`)

use std::io::Write;
use std::sync::Mutex;

use tracing::Level;

use crate::error::BoxError;
use crate::keyvals::Keyvals;

/// Destination for finished sequences.
///
/// Implementations are shared across concurrent calls, so they synchronise
/// internally if they need to — thread safety is the sink's own affair, not
/// provided by the middleware.
pub trait Sink: Send + Sync {
    /// Records one sequence. Callers decide what to do with the error; the
    /// logging middleware discards it.
    fn emit(&self, keyvals: Keyvals) -> Result<(), BoxError>;
}

// ── SinkFn ────────────────────────────────────────────────────────────────────

/// Adapts a closure into a [`Sink`].
///
/// ```rust
/// use toku::{Sink, SinkFn};
///
/// let sink = SinkFn::new(|keyvals| {
///     println!("{keyvals}");
///     Ok(())
/// });
/// sink.emit(toku::Keyvals::new().append("ready", true)).unwrap();
/// ```
pub struct SinkFn<F>(F);

impl<F> SinkFn<F>
where
    F: Fn(Keyvals) -> Result<(), BoxError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Sink for SinkFn<F>
where
    F: Fn(Keyvals) -> Result<(), BoxError> + Send + Sync,
{
    fn emit(&self, keyvals: Keyvals) -> Result<(), BoxError> {
        (self.0)(keyvals)
    }
}

// ── Nop ───────────────────────────────────────────────────────────────────────

/// Discards every sequence. Useful as a stand-in sink in benchmarks and as
/// the success sink when only failures are worth keeping.
pub struct Nop;

impl Sink for Nop {
    fn emit(&self, _keyvals: Keyvals) -> Result<(), BoxError> {
        Ok(())
    }
}

// ── Logfmt ────────────────────────────────────────────────────────────────────

/// Renders each sequence as one logfmt line (`name=value`, space-separated)
/// into any [`Write`] target.
pub struct Logfmt<W> {
    writer: Mutex<W>,
}

impl<W: Write> Logfmt<W> {
    pub fn new(writer: W) -> Self {
        Self { writer: Mutex::new(writer) }
    }

    /// Hands the writer back, e.g. to inspect a buffer after a test run.
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Logfmt<std::io::Stdout> {
    /// Logfmt lines on standard output.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> Sink for Logfmt<W> {
    fn emit(&self, keyvals: Keyvals) -> Result<(), BoxError> {
        // A panic while holding the lock leaves the writer intact for
        // appending, so recover instead of propagating the poison.
        let mut writer = self.writer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        writeln!(writer, "{keyvals}")?;
        Ok(())
    }
}

// ── Tracing ───────────────────────────────────────────────────────────────────

/// Forwards each sequence into the `tracing` ecosystem as one event, rendered
/// logfmt-style as the event message.
///
/// Field names inside a [`Keyvals`] are dynamic, and `tracing` events want
/// their field sets fixed at compile time — so the whole sequence travels as
/// the message and the configured [`Level`] carries the outcome severity.
pub struct Tracing {
    level: Level,
}

impl Tracing {
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// The usual success sink: `INFO`.
    pub fn info() -> Self {
        Self::new(Level::INFO)
    }

    /// The usual failure sink: `ERROR`.
    pub fn error() -> Self {
        Self::new(Level::ERROR)
    }
}

impl Sink for Tracing {
    fn emit(&self, keyvals: Keyvals) -> Result<(), BoxError> {
        if self.level == Level::ERROR {
            tracing::error!(target: "toku", "{keyvals}");
        } else if self.level == Level::WARN {
            tracing::warn!(target: "toku", "{keyvals}");
        } else if self.level == Level::INFO {
            tracing::info!(target: "toku", "{keyvals}");
        } else if self.level == Level::DEBUG {
            tracing::debug!(target: "toku", "{keyvals}");
        } else {
            tracing::trace!(target: "toku", "{keyvals}");
        }
        Ok(())
    }
}

// ── Json ──────────────────────────────────────────────────────────────────────

/// Renders each sequence as one JSON array line — the alternating
/// name/value entries, in order — into any [`Write`] target.
#[cfg(feature = "serde")]
pub struct Json<W> {
    writer: Mutex<W>,
}

#[cfg(feature = "serde")]
impl<W: Write> Json<W> {
    pub fn new(writer: W) -> Self {
        Self { writer: Mutex::new(writer) }
    }

    /// Hands the writer back, e.g. to inspect a buffer after a test run.
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(feature = "serde")]
impl<W: Write + Send> Sink for Json<W> {
    fn emit(&self, keyvals: Keyvals) -> Result<(), BoxError> {
        let mut writer = self.writer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        serde_json::to_writer(&mut *writer, &keyvals)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
