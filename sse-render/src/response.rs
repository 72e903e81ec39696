//! axum responses built on the encoder.
//!
//! A single [`Event`] can be returned from a handler as a complete response.
//! [`EventStream`] renders a stream of events as a long-lived response body.
//!
//! # Example
//!
//! ```rust,ignore
//! use sse_render::{Event, EventStream};
//! use futures::stream::{self, StreamExt};
//! use std::convert::Infallible;
//!
//! async fn ticks() -> EventStream<impl Stream<Item = Result<Event, Infallible>>> {
//!     let events = stream::iter(0..3).map(|n| Ok(Event::new(n).event("tick")));
//!     EventStream::new(events)
//! }
//! ```

use axum::{
    body::Body,
    response::{IntoResponse, Response},
    BoxError,
};
use futures::{Stream, StreamExt};
use serde::Serialize;

use crate::config::SseConfig;
use crate::encoder::{encode, encode_to_vec};
use crate::event::Event;
use crate::headers::{cache_control_value, prepare_headers, set_headers};

impl<T: Serialize> IntoResponse for Event<T> {
    fn into_response(self) -> Response {
        match encode_to_vec(&self) {
            Ok(body) => {
                let mut response = Response::new(Body::from(body));
                prepare_headers(response.headers_mut());
                response
            }
            Err(e) => e.into_response(),
        }
    }
}

/// A streaming event response.
///
/// Each item is encoded independently as it arrives. A stream error or an
/// encode failure ends the response body with an error.
#[derive(Debug)]
pub struct EventStream<S> {
    stream: S,
    config: SseConfig,
}

impl<S> EventStream<S> {
    /// Wrap a stream of events with the default configuration.
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            config: SseConfig::default(),
        }
    }

    /// Use the given configuration for headers and the default retry hint.
    #[must_use]
    pub fn with_config(mut self, config: SseConfig) -> Self {
        self.config = config;
        self
    }
}

impl<S, T, E> IntoResponse for EventStream<S>
where
    S: Stream<Item = Result<Event<T>, E>> + Send + 'static,
    T: Serialize + Send + 'static,
    E: Into<BoxError> + 'static,
{
    fn into_response(self) -> Response {
        let Self { stream, config } = self;

        // Validate before any byte of the body is produced
        let cache_control = match cache_control_value(&config) {
            Ok(value) => value,
            Err(e) => return e.into_response(),
        };

        let capacity = config.initial_buffer_capacity;
        let mut pending_retry = config.default_retry_ms;

        let body = stream.map(move |item| -> Result<Vec<u8>, BoxError> {
            let mut event = item.map_err(Into::into)?;
            if pending_retry > 0 {
                if event.present_retry().is_none() {
                    event.retry = Some(pending_retry);
                }
                pending_retry = 0;
            }

            let mut buf = Vec::with_capacity(capacity);
            match encode(&mut buf, &event) {
                Ok(()) => Ok(buf),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        id = ?event.id,
                        "SSE event encoding failed; closing stream"
                    );
                    Err(e.into())
                }
            }
        });

        let mut response = Response::new(Body::from_stream(body));
        set_headers(response.headers_mut(), cache_control);
        response
    }
}
