// License: MIT

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{UnixListener, UnixStream},
    sync::mpsc,
    time::{timeout, Duration},
};

use crate::core::daemon_msg::DaemonMsg;

use super::router::route_command;

/// Bind the control socket and spawn the accept loop.
///
/// The caller already holds the single-instance lock, so a leftover socket
/// file can only be stale; remove it before binding.
pub async fn spawn_ipc_server(tx: mpsc::Sender<DaemonMsg>) -> std::io::Result<()> {
    let path = crate::ipc::socket_path()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    if path.exists() {
        let _ = std::fs::remove_file(&path);
    }

    let listener = UnixListener::bind(&path)?;
    tracing::info!("control socket listening on {}", path.display());

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut stream, _addr)) => {
                    let tx = tx.clone();

                    tokio::spawn(async move {
                        let result = timeout(Duration::from_secs(10), async {
                            if let Err(e) = handle_connection(&mut stream, &tx).await {
                                tracing::error!("ipc connection failed: {e}");
                            }
                        })
                        .await;

                        if result.is_err() {
                            tracing::error!("ipc connection timed out after 10 seconds");
                        }

                        let _ = stream.shutdown().await;
                    });
                }
                Err(e) => tracing::error!("ipc accept failed: {e}"),
            }
        }
    });

    Ok(())
}

/// Handles a single connection: one command in, one reply out.
async fn handle_connection(
    stream: &mut UnixStream,
    tx: &mpsc::Sender<DaemonMsg>,
) -> std::io::Result<()> {
    let mut buf = vec![0u8; 256];
    let n = stream.read(&mut buf).await?;

    if n == 0 {
        return Ok(());
    }

    let cmd = String::from_utf8_lossy(&buf[..n]).trim().to_string();
    let response = route_command(&cmd, tx).await;

    stream.write_all(response.as_bytes()).await?;
    stream.flush().await?;

    Ok(())
}
