//! HTTP and gRPC servers
//!
//! Builds the store, binds both listeners and serves until SIGINT or SIGTERM
//! arrives. In-flight requests get `shutdown_timeout` to finish after the
//! signal; whatever is still running then is dropped.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio_stream::wrappers::TcpListenerStream;
use tracing::{info, warn};

use crate::api::{create_router, AppState, GrpcEventService};
use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::event_store::EventStore;

/// Run the servers with the given configuration
pub async fn run(config: ServerConfig) -> ServerResult<()> {
    let http_listener = bind(config.listen_addr()).await?;
    let grpc_listener = bind(config.grpc_listen_addr()).await?;

    serve(http_listener, grpc_listener, &config, shutdown_signal()).await
}

async fn bind(addr: String) -> ServerResult<TcpListener> {
    TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })
}

/// Serve on already bound listeners until `shutdown` resolves
pub async fn serve<F>(
    http_listener: TcpListener,
    grpc_listener: TcpListener,
    config: &ServerConfig,
    shutdown: F,
) -> ServerResult<()>
where
    F: Future<Output = ()>,
{
    let store = Arc::new(EventStore::with_config(config.store_config()));
    let state = Arc::new(
        AppState::new(Arc::clone(&store)).with_request_timeout(config.request_timeout()),
    );
    let app = create_router(state);
    let grpc_service = GrpcEventService::new(store).into_server();

    info!(
        addr = %http_listener.local_addr()?,
        max_retained = config.max_retained,
        "HTTP server listening"
    );
    info!(addr = %grpc_listener.local_addr()?, "gRPC server listening");

    let (stop_tx, stop_rx) = watch::channel(false);

    let http = async {
        axum::serve(http_listener, app)
            .with_graceful_shutdown(stopped(stop_rx.clone()))
            .await
            .map_err(ServerError::from)
    };
    let grpc = async {
        tonic::transport::Server::builder()
            .add_service(grpc_service)
            .serve_with_incoming_shutdown(
                TcpListenerStream::new(grpc_listener),
                stopped(stop_rx.clone()),
            )
            .await
            .map_err(ServerError::from)
    };
    let servers = async { tokio::try_join!(http, grpc).map(|_| ()) };
    tokio::pin!(servers);
    tokio::pin!(shutdown);

    tokio::select! {
        result = &mut servers => return result,
        _ = &mut shutdown => {}
    }

    info!("shutting down...");
    let _ = stop_tx.send(true);
    drain(servers, config.shutdown_timeout()).await?;

    info!("stopped");
    Ok(())
}

/// Wait at most `grace` for the servers to finish in-flight work
async fn drain<F>(servers: F, grace: Duration) -> ServerResult<()>
where
    F: Future<Output = ServerResult<()>>,
{
    match tokio::time::timeout(grace, servers).await {
        Ok(result) => result,
        Err(_) => {
            warn!(grace_secs = grace.as_secs(), "shutdown timed out, dropping in-flight requests");
            Ok(())
        }
    }
}

async fn stopped(mut rx: watch::Receiver<bool>) {
    let _ = rx.wait_for(|&stop| stop).await;
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
