//! Key/value sequences and the field-contribution capability.
//!
//! Every logged call becomes one [`Keyvals`]: an ordered sequence of
//! alternating field names and field values, built once, then handed to a
//! [`Sink`](crate::Sink). Request and response types that want their own
//! fields in that sequence opt in through [`AppendKeyvals`]; everything else
//! contributes nothing and costs nothing.

use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

// ── Value ─────────────────────────────────────────────────────────────────────

/// A single field value inside a [`Keyvals`] sequence.
///
/// The variants cover what outcome logging actually needs: scalars, strings,
/// durations, and an explicit [`Null`](Value::Null) for fields whose name is
/// logged even when there is nothing to report — a call that produced no
/// error still gets its error field.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(Cow<'static, str>),
    Duration(Duration),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
            Self::Duration(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Uint(v.into())
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Self::Uint(v as u64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&'static str> for Value {
    fn from(v: &'static str) -> Self {
        Self::Str(Cow::Borrowed(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(Cow::Owned(v))
    }
}

impl From<Cow<'static, str>> for Value {
    fn from(v: Cow<'static, str>) -> Self {
        Self::Str(v)
    }
}

impl From<Duration> for Value {
    fn from(v: Duration) -> Self {
        Self::Duration(v)
    }
}

/// `None` becomes [`Value::Null`] — the field still gets logged.
impl<V: Into<Value>> From<Option<V>> for Value {
    fn from(v: Option<V>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

// ── Keyvals ───────────────────────────────────────────────────────────────────

/// An ordered sequence of alternating field names and field values.
///
/// Names sit at even indices, their values at the following odd index, so the
/// length is always even — the only mutation API appends one complete pair at
/// a time. Pairs are never removed or reordered once appended. Duplicate
/// names are allowed; resolving them is the sink's business, not this type's.
///
/// Rendering with [`Display`](fmt::Display) produces one logfmt line:
/// `name=value` pairs separated by spaces, string values quoted when they
/// contain spaces, quotes, or `=`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct Keyvals {
    entries: Vec<Value>,
}

impl Keyvals {
    /// An empty sequence.
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// An empty sequence with room for `pairs` name/value pairs.
    pub fn with_capacity(pairs: usize) -> Self {
        Self { entries: Vec::with_capacity(pairs * 2) }
    }

    /// Appends one `name, value` pair.
    pub fn push(&mut self, name: impl Into<Cow<'static, str>>, value: impl Into<Value>) {
        self.entries.push(Value::Str(name.into()));
        self.entries.push(value.into());
    }

    /// [`push`](Self::push), chaining-style. This is the shape contributors
    /// use: take the sequence by value, extend it, hand it back.
    pub fn append(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        self.push(name, value);
        self
    }

    /// Number of entries. Names and values both count, so always even.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index` — names at even indices, values at odd ones.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.entries.get(index)
    }

    /// Iterates every entry in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.entries.iter()
    }

    /// Iterates `(name, value)` pairs in insertion order.
    pub fn pairs(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.chunks_exact(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// Moves every entry of `other` onto the end of `self`, in order.
    pub(crate) fn extend(&mut self, other: Keyvals) {
        self.entries.extend(other.entries);
    }
}

impl fmt::Display for Keyvals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.pairs().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}=")?;
            match value {
                Value::Str(s) if needs_quoting(s) => write!(f, "{s:?}")?,
                other => write!(f, "{other}")?,
            }
        }
        Ok(())
    }
}

fn needs_quoting(s: &str) -> bool {
    s.is_empty() || s.contains(&[' ', '"', '='][..])
}

// ── Capability contract ───────────────────────────────────────────────────────

/// Opt-in capability: a type whose values carry fields worth logging.
///
/// The contract is one method: append zero or more `name, value` pairs to
/// `keyvals` and return it. Never remove or reorder what is already there —
/// the pair-append API on [`Keyvals`] makes that the path of least
/// resistance. Contributors are treated as read-only data: no side effects,
/// safe to call any number of times, from any thread.
///
/// The default implementation appends nothing, which is what most types want.
/// A request or response type that has something to say overrides it:
///
/// ```rust
/// use toku::{AppendKeyvals, Keyvals};
///
/// struct CreateUser {
///     name: String,
///     team: String,
/// }
///
/// impl AppendKeyvals for CreateUser {
///     fn append_keyvals(&self, keyvals: Keyvals) -> Keyvals {
///         keyvals
///             .append("user.name", self.name.clone())
///             .append("user.team", self.team.clone())
///     }
/// }
/// ```
pub trait AppendKeyvals {
    /// Appends this value's pairs to `keyvals` and returns the extended
    /// sequence.
    fn append_keyvals(&self, keyvals: Keyvals) -> Keyvals {
        keyvals
    }
}

// Plain types flow through endpoints all the time; they log nothing.
impl AppendKeyvals for () {}
impl AppendKeyvals for bool {}
impl AppendKeyvals for i32 {}
impl AppendKeyvals for i64 {}
impl AppendKeyvals for u32 {}
impl AppendKeyvals for u64 {}
impl AppendKeyvals for usize {}
impl AppendKeyvals for f64 {}
impl AppendKeyvals for str {}
impl AppendKeyvals for String {}

impl<T: AppendKeyvals + ?Sized> AppendKeyvals for &T {
    fn append_keyvals(&self, keyvals: Keyvals) -> Keyvals {
        (**self).append_keyvals(keyvals)
    }
}

/// `Some` forwards to the inner value; `None` contributes nothing.
impl<T: AppendKeyvals> AppendKeyvals for Option<T> {
    fn append_keyvals(&self, keyvals: Keyvals) -> Keyvals {
        match self {
            Some(value) => value.append_keyvals(keyvals),
            None => keyvals,
        }
    }
}
