//! Event records and payload variants.

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

/// A scalar payload, written with its default string representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Text, data-escaped before it hits the wire.
    Text(String),
    /// Signed integer.
    Integer(i64),
    /// Unsigned integer.
    Unsigned(u64),
    /// Floating point number.
    Float(f64),
    /// Boolean.
    Bool(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Unsigned(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl Default for Scalar {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

macro_rules! scalar_from {
    ($($ty:ty => |$v:ident| $conv:expr),+ $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from($v: $ty) -> Self {
                    $conv
                }
            }

            impl<T> From<$ty> for Payload<T> {
                fn from(value: $ty) -> Self {
                    Self::Scalar(Scalar::from(value))
                }
            }
        )+
    };
}

macro_rules! scalar_from_copy {
    ($variant:ident as $target:ty: $($ty:ty),+) => {
        $(
            scalar_from!(
                $ty => |value| Scalar::$variant(value as $target),
                &$ty => |value| Scalar::$variant(*value as $target),
            );
        )+
    };
}

scalar_from!(
    String => |value| Scalar::Text(value),
    &str => |value| Scalar::Text(value.to_owned()),
    &String => |value| Scalar::Text(value.clone()),
    Cow<'_, str> => |value| Scalar::Text(value.into_owned()),
);

scalar_from_copy!(Integer as i64: i8, i16, i32, i64, isize);
scalar_from_copy!(Unsigned as u64: u8, u16, u32, u64, usize);
scalar_from_copy!(Float as f64: f32, f64);
scalar_from_copy!(Bool as bool: bool);

/// Event payload: either a scalar or a value serialized as JSON.
///
/// Structured payloads are terminated by a single newline on the wire,
/// scalars by a blank line.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<T = serde_json::Value> {
    /// Written as text with data escaping.
    Scalar(Scalar),
    /// Streamed into the sink as JSON.
    Structured(T),
}

impl<T> Payload<T> {
    /// Build a structured payload.
    pub fn structured(value: T) -> Self {
        Self::Structured(value)
    }

    /// Build a scalar payload.
    pub fn scalar(value: impl Into<Scalar>) -> Self {
        Self::Scalar(value.into())
    }

    /// Whether the payload is serialized as JSON.
    #[must_use]
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Structured(_))
    }
}

impl Payload<serde_json::Value> {
    /// Classify a JSON value.
    ///
    /// Objects and arrays stay structured. Everything else becomes a scalar,
    /// with `null` written as the text `null`.
    pub fn from_json(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::String(s) => Self::Scalar(Scalar::Text(s)),
            Value::Bool(b) => Self::Scalar(Scalar::Bool(b)),
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Self::Scalar(Scalar::Unsigned(u))
                } else if let Some(i) = n.as_i64() {
                    Self::Scalar(Scalar::Integer(i))
                } else if let Some(f) = n.as_f64() {
                    Self::Scalar(Scalar::Float(f))
                } else {
                    Self::Structured(Value::Number(n))
                }
            }
            Value::Null => Self::Scalar(Scalar::Text("null".to_string())),
            other @ (Value::Object(_) | Value::Array(_)) => Self::Structured(other),
        }
    }
}

impl<T> Default for Payload<T> {
    fn default() -> Self {
        Self::Scalar(Scalar::default())
    }
}

impl<T> From<Scalar> for Payload<T> {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

/// A single Server-Sent Event.
///
/// Empty `id`/`event` strings and a zero `retry` count as absent and produce
/// no output.
///
/// # Example
///
/// ```rust
/// use sse_render::{encode, Event};
///
/// let event: Event = Event::new("hi").id("1").event("msg");
/// let mut out = Vec::new();
/// encode(&mut out, &event).unwrap();
/// assert_eq!(out, b"id:1\nevent:msg\ndata:hi\n\n");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Event<T = serde_json::Value> {
    /// Event ID for reconnection (optional).
    pub id: Option<String>,
    /// Event type name (optional).
    pub event: Option<String>,
    /// Reconnection delay hint in milliseconds (optional).
    pub retry: Option<u64>,
    /// Event payload.
    pub data: Payload<T>,
}

impl<T> Event<T> {
    /// Create an event carrying a scalar or structured payload.
    #[must_use]
    pub fn new(data: impl Into<Payload<T>>) -> Self {
        Self {
            id: None,
            event: None,
            retry: None,
            data: data.into(),
        }
    }

    /// Create an event whose payload is serialized as JSON.
    #[must_use]
    pub fn json(data: T) -> Self
    where
        T: Serialize,
    {
        Self::new(Payload::Structured(data))
    }

    /// Set the event ID.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the event type name.
    #[must_use]
    pub fn event(mut self, name: impl Into<String>) -> Self {
        self.event = Some(name.into());
        self
    }

    /// Set the retry hint in milliseconds.
    #[must_use]
    pub fn retry(mut self, millis: u64) -> Self {
        self.retry = Some(millis);
        self
    }

    /// Set the retry hint from a duration, truncated to whole milliseconds.
    #[must_use]
    pub fn retry_after(self, retry: Duration) -> Self {
        let millis = u64::try_from(retry.as_millis()).unwrap_or(u64::MAX);
        self.retry(millis)
    }

    /// The ID if present and non-empty.
    pub(crate) fn present_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|s| !s.is_empty())
    }

    /// The event name if present and non-empty.
    pub(crate) fn present_event(&self) -> Option<&str> {
        self.event.as_deref().filter(|s| !s.is_empty())
    }

    /// The retry hint if present and nonzero.
    pub(crate) fn present_retry(&self) -> Option<u64> {
        self.retry.filter(|&ms| ms > 0)
    }
}

impl<T> Default for Event<T> {
    fn default() -> Self {
        Self::new(Payload::default())
    }
}
