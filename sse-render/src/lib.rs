//! # sse-render
//!
//! Server-Sent Events encoding for long-lived HTTP response streams.
//!
//! ## Features
//!
//! - **Wire encoding**: `id`, `event`, `retry` and `data` fields with line-break escaping
//! - **Typed payloads**: scalars written as text, structured values streamed as JSON
//! - **Any sink**: in-memory buffers directly, any `io::Write` through [`ByteSink`]
//! - **axum integration**: single-event responses and streaming [`EventStream`] bodies
//! - **Header contract**: `Content-Type: text/event-stream`, `Cache-Control` only if absent
//!
//! ## Wire format
//!
//! ```text
//! id:<escaped-id>\n          (if id present)
//! event:<escaped-name>\n     (if event name present)
//! retry:<decimal>\n          (if retry > 0)
//! data:<json>\n              (structured payload)
//! data:<escaped-scalar>\n\n  (scalar payload)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use sse_render::prelude::*;
//! use serde_json::json;
//!
//! let mut out = Vec::new();
//! let greeting: Event = Event::new("hello\nworld").event("greeting");
//! encode(&mut out, &greeting)?;
//! encode(&mut out, &Event::json(json!({"x": 1})).id("2"))?;
//!
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "event:greeting\ndata:hello\ndata:world\n\nid:2\ndata:{\"x\":1}\n"
//! );
//! # Ok::<(), sse_render::Error>(())
//! ```

pub mod config;
pub mod encoder;
pub mod error;
pub mod escape;
pub mod event;
pub mod headers;
pub mod observability;
pub mod response;
pub mod sink;

pub use config::{Config, SseConfig};
pub use encoder::{encode, encode_bytes, encode_to_vec, CONTENT_TYPE, NO_CACHE};
pub use error::{Error, Result};
pub use event::{Event, Payload, Scalar};
pub use response::EventStream;
pub use sink::{ByteSink, StringWrite};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Config, ServiceConfig, SseConfig};
    pub use crate::encoder::{encode, encode_bytes, encode_to_vec, CONTENT_TYPE, NO_CACHE};
    pub use crate::error::{Error, ErrorResponse, Result};
    pub use crate::escape::{escape_data, escape_field};
    pub use crate::event::{Event, Payload, Scalar};
    pub use crate::headers::{apply_event_stream_headers, prepare_headers, prepare_headers_with};
    pub use crate::observability::init_tracing;
    pub use crate::response::EventStream;
    pub use crate::sink::{ByteSink, StringWrite};
}
