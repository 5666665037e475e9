//! Main entry point for the zipbrowser gateway.
//!
//! Binds the listening socket, prints the URL for the archive given on the
//! command line and serves requests until interrupted.

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use std::path::Path;
use std::sync::Arc;

use zipbrowser::{ArchiveGateway, Cli, gateway_url, http};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let listener = http::bind(cli.listen_addr())?;
    let addr = listener.local_addr()?;

    if let Some(archive) = &cli.archive {
        // The archive path becomes the URL path, so it must be absolute.
        let path = std::path::absolute(Path::new(archive))
            .with_context(|| format!("Cannot resolve {}", archive))?;
        let path = path
            .to_str()
            .with_context(|| format!("{} is not valid UTF-8", path.display()))?;
        println!("{}", gateway_url(addr, path));
    }

    let gateway = Arc::new(ArchiveGateway::new());
    http::http_listener(listener, gateway, async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Interrupted, shutting down"),
            Err(err) => {
                error!("Cannot watch for Ctrl-C, serving until killed: {}", err);
                std::future::pending::<()>().await
            }
        }
    })
    .await
}
