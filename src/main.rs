use std::sync::Arc;

use anyhow::Context;

use rhizome_httpd::config::Config;
use rhizome_httpd::server::listener::Server;
use rhizome_httpd::store::FsStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load();

    std::fs::create_dir_all(&cfg.store.root)
        .with_context(|| format!("creating store root {}", cfg.store.root.display()))?;
    let store = Arc::new(FsStore::new(&cfg.store.root));

    let server = Server::new(cfg, store);

    tokio::select! {
        res = server.run() => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
