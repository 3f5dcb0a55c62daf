// Server module entry point
// Serving glue: accept loop, per-connection tasks, graceful shutdown.
// The routing layer itself is transport-agnostic; everything here is the
// thin hyper/tokio wrapper around a frozen RouterService.

pub mod connection;
pub mod listener;

pub use listener::create_reusable_listener;

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use crate::config::Config;
use crate::logger;
use crate::routing::RouterService;

/// Shared state for connection tasks
pub(crate) struct ServerState {
    pub service: RouterService,
    pub config: Config,
}

/// Accept connections and dispatch requests through the router service
/// until a shutdown signal (SIGTERM / Ctrl+C) arrives.
///
/// Takes the already-frozen `RouterService`: route registration is over by
/// the time the accept loop starts, so connection tasks share the table
/// read-only.
pub async fn serve(
    config: &Config,
    service: RouterService,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.get_socket_addr()?;
    let listener = create_reusable_listener(addr)?;

    logger::log_server_start(&addr, config, service.route_count());

    let state = Arc::new(ServerState {
        service,
        config: config.clone(),
    });
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        connection::accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown_signal() => {
                logger::log_shutdown();
                break;
            }
        }
    }

    Ok(())
}

/// Resolve when SIGTERM or Ctrl+C is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to register Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to register SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        _ = terminate => {},
    }
}
