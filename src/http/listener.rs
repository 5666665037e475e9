use std::convert::Infallible;
use std::future::Future;
use std::net::{SocketAddr, TcpListener as StdListener};
use std::sync::Arc;

use anyhow::{Context, Result};
use hyper::Server;
use hyper::service::{make_service_fn, service_fn};
use log::{error, info};

use super::handle_request;
use crate::gateway::ArchiveGateway;

/// Bind the listening socket.
///
/// This happens synchronously so that a taken port is reported before
/// anything else starts.
pub fn bind(addr: SocketAddr) -> Result<StdListener> {
    let listener =
        StdListener::bind(addr).with_context(|| format!("Error listening on {}", addr))?;
    listener
        .set_nonblocking(true)
        .with_context(|| format!("Error switching {} to nonblocking", addr))?;
    Ok(listener)
}

/// Serve `gateway` on `listener` until `shutdown` resolves.
///
/// # Arguments
///
/// * `listener` - A nonblocking socket from [`bind()`]
/// * `gateway` - Shared by all connections
/// * `shutdown` - Resolves when the server should stop accepting
///
/// # Errors
///
/// Must be called from within a Tokio runtime; fails if the socket cannot
/// be registered with it or the server stops with an error.
pub async fn http_listener(
    listener: StdListener,
    gateway: Arc<ArchiveGateway>,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    let make_service = make_service_fn(|_conn| {
        let gateway = gateway.clone();
        async move {
            Ok::<_, Infallible>(service_fn(move |req| {
                let gateway = gateway.clone();
                async move { Ok::<_, Infallible>(handle_request(req, &gateway).await) }
            }))
        }
    });

    let server = Server::from_tcp(listener)
        .context("Failed on HTTP listener")?
        .serve(make_service);
    info!("Serving archives on http://{}", server.local_addr());
    if let Err(err) = server.with_graceful_shutdown(shutdown).await {
        error!("HTTP server error: {}", err);
        return Err(err.into());
    }
    Ok(())
}
