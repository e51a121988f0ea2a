// License: MIT

use std::io;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use crate::cli::Args;
use crate::daemon::Daemon;

type AnyError = Box<dyn std::error::Error + Send + Sync>;

pub async fn run(args: Args) -> Result<(), AnyError> {
    // single-instance
    let _instance_lock = crate::app::platform::acquire_single_instance_lock().map_err(|e| {
        eprintln!("{e}");
        io::Error::new(io::ErrorKind::AlreadyExists, e)
    })?;

    init_logging(args.verbose);

    tracing::info!("stint starting");

    // resolve config path; bootstrap a default only without --config
    let config_path: PathBuf = match args.config.as_deref() {
        Some(p) => p.to_path_buf(),
        None => {
            match crate::config::ensure_user_config_exists() {
                Ok(true) => tracing::info!("wrote default config"),
                Ok(false) => {}
                Err(e) => tracing::warn!("failed to bootstrap default config: {e}"),
            }

            crate::config::resolve_config_path()
        }
    };

    tracing::info!("using config {}", config_path.display());

    // config errors are fatal before any tracking starts
    let cfg = crate::config::load_from_path(&config_path).map_err(|e| {
        tracing::error!("{e:#}");
        io::Error::new(io::ErrorKind::InvalidData, format!("{e:#}"))
    })?;

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    let mut daemon = Daemon::new(cfg);

    let mut daemon_task = tokio::spawn({
        let shutdown_tx = shutdown_tx.clone();
        async move { daemon.run(shutdown_rx, shutdown_tx).await }
    });

    tokio::select! {
        res = &mut daemon_task => {
            match res {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e),
                Err(join_err) => Err(Box::new(join_err) as AnyError),
            }?;
            Ok(())
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("received Ctrl+C, shutting down");
            let _ = shutdown_tx.send(true);

            match daemon_task.await {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e),
                Err(join_err) => Err(Box::new(join_err)),
            }
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
