use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::{TcpListener, TcpSocket};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::server::registry::Registry;
use crate::store::ContentStore;

/// Delay before retrying listener setup. A failed bind is recoverable: the
/// port may be briefly held by a prior daemon instance.
const BIND_RETRY: Duration = Duration::from_secs(1);

pub struct Server {
    cfg: Config,
    store: Arc<dyn ContentStore>,
    registry: Registry,
}

impl Server {
    pub fn new(cfg: Config, store: Arc<dyn ContentStore>) -> Self {
        let registry = Registry::new(cfg.server.max_connections);
        Self {
            cfg,
            store,
            registry,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Creates the listening socket: address reuse, the configured address,
    /// the configured fixed backlog.
    pub fn bind(&self) -> anyhow::Result<TcpListener> {
        let addr: SocketAddr = self.cfg.server.listen_addr.parse()?;

        let socket = match addr {
            SocketAddr::V4(_) => TcpSocket::new_v4()?,
            SocketAddr::V6(_) => TcpSocket::new_v6()?,
        };
        socket.set_reuseaddr(true)?;
        socket.bind(addr)?;

        Ok(socket.listen(self.cfg.server.accept_backlog)?)
    }

    /// Runs forever: retries listener setup until it succeeds, then accepts
    /// and serves connections.
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = loop {
            match self.bind() {
                Ok(listener) => break listener,
                Err(e) => {
                    warn!("listener setup failed, will retry: {}", e);
                    tokio::time::sleep(BIND_RETRY).await;
                }
            }
        };

        info!("Listening on {}", listener.local_addr()?);
        self.serve(listener).await
    }

    /// Accepts connections while the registry has free capacity. When it is
    /// full, accepting pauses and excess connections stay queued at the OS
    /// level until a slot frees.
    pub async fn serve(self, listener: TcpListener) -> anyhow::Result<()> {
        loop {
            let slot = self.registry.acquire().await;

            let (stream, peer) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!("accept failed: {}", e);
                    continue;
                }
            };
            slot.set_peer(peer);
            debug!("accepted connection from {}", peer);

            let store = Arc::clone(&self.store);
            tokio::spawn(async move {
                let mut conn = Connection::new(stream, store);
                if let Err(e) = conn.run().await {
                    debug!("connection from {} closed: {}", peer, e);
                }
                drop(slot);
            });
        }
    }
}
