use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::http::connection::Connection;
use crate::server::handler::Handler;

/// Pause after a failed accept before trying again.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// A running HTTP server: one accept task plus one task per connection.
pub struct Server {
    local_addr: SocketAddr,
    closed: Arc<AtomicBool>,
    shutdown: watch::Sender<bool>,
    accept_task: JoinHandle<()>,
}

impl Server {
    /// Binds `0.0.0.0:port` and starts accepting connections in the
    /// background. Port `0` picks a free port; see [`Server::local_addr`].
    pub async fn serve<H: Handler>(port: u16, handler: H) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(("0.0.0.0", port))
            .await
            .with_context(|| format!("binding port {}", port))?;
        let local_addr = listener.local_addr()?;
        info!("Listening on {}", local_addr);

        let closed = Arc::new(AtomicBool::new(false));
        let (shutdown, shutdown_rx) = watch::channel(false);
        let accept_task = tokio::spawn(accept_loop(
            listener,
            Arc::new(handler),
            Arc::clone(&closed),
            shutdown_rx,
        ));

        Ok(Self {
            local_addr,
            closed,
            shutdown,
            accept_task,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Stops accepting and releases the listening socket. Connections
    /// already accepted run to completion.
    pub async fn close(self) -> anyhow::Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        // Fails only if the accept loop already exited.
        let _ = self.shutdown.send(true);
        self.accept_task.await.context("accept loop panicked")?;
        info!("Server on {} closed", self.local_addr);
        Ok(())
    }
}

async fn accept_loop<H: Handler>(
    listener: TcpListener,
    handler: Arc<H>,
    closed: Arc<AtomicBool>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        let accepted = tokio::select! {
            res = listener.accept() => res,
            _ = shutdown.changed() => return,
        };

        match accepted {
            Ok((socket, peer)) => {
                info!("Accepted connection from {}", peer);

                let handler = Arc::clone(&handler);
                tokio::spawn(async move {
                    let conn = Connection::new(socket, handler);
                    if let Err(e) = conn.run().await {
                        error!("Connection error from {}: {:#}", peer, e);
                    }
                });
            }
            Err(e) => {
                if closed.load(Ordering::SeqCst) {
                    return;
                }
                error!("Error accepting connection: {}", e);
                if backoff(&mut shutdown).await {
                    return;
                }
            }
        }
    }
}

/// Waits out [`ACCEPT_ERROR_BACKOFF`], returning `true` early if shutdown is
/// signalled meanwhile.
async fn backoff(shutdown: &mut watch::Receiver<bool>) -> bool {
    tokio::select! {
        _ = tokio::time::sleep(ACCEPT_ERROR_BACKOFF) => false,
        _ = shutdown.changed() => true,
    }
}
