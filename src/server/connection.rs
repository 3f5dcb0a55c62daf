// Connection handling module
// Accepts and serves a single TCP connection

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;

use super::ServerState;
use crate::handler::RemoteAddr;
use crate::http::response::{build_400_response, build_413_response};
use crate::logger;

/// Accept and process a connection, checking limits and logging.
pub(crate) fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: &Arc<ServerState>,
    conn_counter: &Arc<AtomicUsize>,
) {
    // Increment counter first, then check limit (prevents race condition)
    let prev_count = conn_counter.fetch_add(1, Ordering::SeqCst);

    if let Some(max_conn) = state.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            // Exceeded limit: rollback counter and reject
            conn_counter.fetch_sub(1, Ordering::SeqCst);
            logger::log_warning(&format!(
                "Max connections reached: {prev_count}/{max_conn}. Connection rejected."
            ));
            drop(stream);
            return;
        }
    }

    if state.config.logging.access_log {
        logger::log_connection_accepted(&peer_addr);
    }

    handle_connection(stream, peer_addr, Arc::clone(state), Arc::clone(conn_counter));
}

/// Serve a single connection in a spawned task.
///
/// Wraps the stream in `TokioIo`, configures HTTP/1.1 keep-alive, applies
/// the read/write timeout from configuration, and decrements the connection
/// counter when the connection closes.
fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: Arc<ServerState>,
    conn_counter: Arc<AtomicUsize>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let keep_alive_timeout = state.config.performance.keep_alive_timeout;
        let timeout_duration = std::time::Duration::from_secs(std::cmp::max(
            state.config.performance.read_timeout,
            state.config.performance.write_timeout,
        ));

        let mut builder = http1::Builder::new();
        if keep_alive_timeout > 0 {
            builder.keep_alive(true);
        }

        let svc_state = Arc::clone(&state);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                let state = Arc::clone(&svc_state);
                async move {
                    Ok::<_, Infallible>(process_request(req, peer_addr, &state).await)
                }
            }),
        );

        match tokio::time::timeout(timeout_duration, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => {
                logger::log_warning(&format!(
                    "Connection timeout after {} seconds",
                    timeout_duration.as_secs()
                ));
            }
        }

        conn_counter.fetch_sub(1, Ordering::SeqCst);
    });
}

/// Buffer the request body and dispatch through the router service.
///
/// Handlers receive `Request<Full<Bytes>>`: the streaming body is collected
/// here, gated by `max_body_size`, before dispatch. The peer address rides
/// along in request extensions for middleware that wants it.
async fn process_request(
    req: Request<Incoming>,
    peer_addr: SocketAddr,
    state: &Arc<ServerState>,
) -> Response<Full<Bytes>> {
    let max_body_size = state.config.http.max_body_size;

    // Reject oversized bodies up front when Content-Length is declared
    if let Some(resp) = check_body_size(&req, max_body_size) {
        return resp;
    }

    let (parts, body) = req.into_parts();
    let bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_warning(&format!("Failed to read request body: {e}"));
            return build_400_response("invalid request body");
        }
    };

    // Chunked bodies carry no Content-Length; enforce the limit on what
    // actually arrived
    if u64::try_from(bytes.len()).unwrap_or(u64::MAX) > max_body_size {
        logger::log_error(&format!(
            "Request body too large: {} bytes (max: {max_body_size})",
            bytes.len()
        ));
        return build_413_response();
    }

    let mut req = Request::from_parts(parts, Full::new(bytes));
    req.extensions_mut().insert(RemoteAddr(peer_addr));

    state.service.dispatch(req).await
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(
    req: &Request<Incoming>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}
