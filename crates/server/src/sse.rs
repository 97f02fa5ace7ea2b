// SSE transport: one long-lived event stream per MCP session

use crate::config::AppState;
use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::Stream;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Open a session. The first event is `endpoint`, carrying the URL the
/// client must POST its messages to; every later event is a `message`
/// holding one JSON-RPC response.
pub async fn sse_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (guard, mut responses) = state.sessions.open();
    let endpoint = endpoint_url(
        &headers,
        &state.fallback_host,
        &state.transport.message_path,
        guard.id(),
    );
    info!(session_id = %guard.id(), endpoint = %endpoint, "SSE session opened");

    let shutdown = state.shutdown.clone();
    let stream = async_stream::stream! {
        let guard = guard;
        yield Ok::<_, Infallible>(Event::default().event("endpoint").data(endpoint));

        loop {
            let next = tokio::select! {
                _ = shutdown.cancelled() => {
                    debug!(session_id = %guard.id(), "Closing SSE session for shutdown");
                    None
                }
                response = responses.recv() => response,
            };
            let Some(response) = next else { break };

            match Event::default().event("message").json_data(&response) {
                Ok(event) => yield Ok::<_, Infallible>(event),
                Err(e) => warn!(session_id = %guard.id(), error = %e, "Failed to encode response event"),
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::new().interval(state.transport.keep_alive()))
}

/// Absolute message URL for a session, honouring reverse-proxy headers.
pub(crate) fn endpoint_url(
    headers: &HeaderMap,
    fallback_host: &str,
    path: &str,
    session_id: &str,
) -> String {
    let scheme = match first_value(headers, "x-forwarded-proto") {
        Some(proto) if proto.eq_ignore_ascii_case("https") => "https",
        _ => "http",
    };
    let host = first_value(headers, "x-forwarded-host")
        .or_else(|| first_value(headers, header::HOST.as_str()))
        .unwrap_or(fallback_host);

    format!("{}://{}{}?sessionId={}", scheme, host, path, session_id)
}

// Proxies may append to forwarded headers; the first entry is the client-facing one.
fn first_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)?
        .to_str()
        .ok()?
        .split(',')
        .next()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_endpoint_falls_back_to_localhost() {
        let url = endpoint_url(&HeaderMap::new(), "localhost:3000", "/message", "abc");
        assert_eq!(url, "http://localhost:3000/message?sessionId=abc");
    }

    #[test]
    fn test_endpoint_uses_host_header() {
        let url = endpoint_url(
            &headers(&[("host", "mcp.internal:8080")]),
            "localhost:3000",
            "/messages",
            "abc",
        );
        assert_eq!(url, "http://mcp.internal:8080/messages?sessionId=abc");
    }

    #[test]
    fn test_endpoint_prefers_forwarded_headers() {
        let url = endpoint_url(
            &headers(&[
                ("host", "10.0.0.7:3000"),
                ("x-forwarded-host", "mcp.example.com, proxy.internal"),
                ("x-forwarded-proto", "https"),
            ]),
            "localhost:3000",
            "/message",
            "abc",
        );
        assert_eq!(url, "https://mcp.example.com/message?sessionId=abc");
    }

    #[test]
    fn test_unknown_proto_defaults_to_http() {
        let url = endpoint_url(
            &headers(&[("x-forwarded-proto", "gopher")]),
            "localhost:3000",
            "/message",
            "abc",
        );
        assert!(url.starts_with("http://"));
    }
}
