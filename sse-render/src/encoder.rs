//! Server-Sent Events wire encoding.
//!
//! Fields are written in a fixed order: `id`, `event`, `retry`, then `data`.
//! Every write goes straight to the sink and the first failure aborts the
//! event, leaving whatever was already written in place.

use serde::Serialize;
use std::io;

use crate::error::Result;
use crate::escape;
use crate::event::{Event, Payload, Scalar};
use crate::sink::{ByteSink, StringWrite};

/// Media type of an event stream.
pub const CONTENT_TYPE: &str = "text/event-stream";

/// Default `Cache-Control` value for event stream responses.
pub const NO_CACHE: &str = "no-cache";

/// Encode one event into `sink`.
///
/// Scalar payloads end with a blank line. Structured payloads are streamed as
/// JSON and end with a single newline.
///
/// # Errors
///
/// Returns [`Error::Io`](crate::Error::Io) if the sink fails a write and
/// [`Error::Serialization`](crate::Error::Serialization) if a structured
/// payload cannot be represented as JSON.
pub fn encode<W, T>(sink: &mut W, event: &Event<T>) -> Result<()>
where
    W: StringWrite + ?Sized,
    T: Serialize,
{
    tracing::trace!(
        id = ?event.present_id(),
        event = ?event.present_event(),
        structured = event.data.is_structured(),
        "encoding SSE event"
    );

    if let Some(id) = event.present_id() {
        write_field(sink, "id:", id)?;
    }
    if let Some(name) = event.present_event() {
        write_field(sink, "event:", name)?;
    }
    if let Some(retry) = event.present_retry() {
        sink.write_string("retry:")?;
        sink.write_string(&retry.to_string())?;
        sink.write_string("\n")?;
    }
    write_payload(sink, &event.data)
}

/// Encode one event into a plain byte writer.
///
/// The writer is wrapped in a [`ByteSink`]; use [`encode`] directly when the
/// sink already implements [`StringWrite`].
///
/// # Errors
///
/// Same as [`encode`].
pub fn encode_bytes<W, T>(writer: W, event: &Event<T>) -> Result<()>
where
    W: io::Write,
    T: Serialize,
{
    encode(&mut ByteSink::new(writer), event)
}

/// Encode one event into a freshly allocated buffer.
///
/// # Errors
///
/// Returns [`Error::Serialization`](crate::Error::Serialization) if a
/// structured payload cannot be represented as JSON.
pub fn encode_to_vec<T: Serialize>(event: &Event<T>) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode(&mut buf, event)?;
    Ok(buf)
}

fn write_field<W: StringWrite + ?Sized>(sink: &mut W, name: &str, value: &str) -> io::Result<()> {
    sink.write_string(name)?;
    escape::write_field(sink, value)?;
    sink.write_string("\n")
}

fn write_payload<W, T>(sink: &mut W, payload: &Payload<T>) -> Result<()>
where
    W: StringWrite + ?Sized,
    T: Serialize,
{
    sink.write_string("data:")?;
    match payload {
        Payload::Structured(value) => {
            serde_json::to_writer(&mut *sink, value)?;
            sink.write_string("\n")?;
        }
        Payload::Scalar(Scalar::Text(text)) => {
            escape::write_data(sink, text)?;
            sink.write_string("\n\n")?;
        }
        // Numbers and booleans never contain line breaks
        Payload::Scalar(scalar) => {
            sink.write_string(&scalar.to_string())?;
            sink.write_string("\n\n")?;
        }
    }
    Ok(())
}
