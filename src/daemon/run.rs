// License: MIT

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::core::daemon_msg::DaemonMsg;
use crate::core::event::Event;
use crate::core::utils::now_ms;
use crate::services::session::EventSink;

use super::{AnyError, Daemon, MpscEventSink};

impl Daemon {
    pub async fn run(
        &mut self,
        mut shutdown: watch::Receiver<bool>,
        shutdown_tx: watch::Sender<bool>,
    ) -> Result<(), AnyError> {
        tracing::info!("daemon starting");

        let (tx, mut rx) = mpsc::channel::<DaemonMsg>(256);

        // No control socket means no way to reach the daemon; bail out.
        crate::ipc::server::spawn_ipc_server(tx.clone()).await?;

        {
            let sink: Arc<dyn EventSink> = Arc::new(MpscEventSink { tx: tx.clone() });

            match crate::services::session::spawn_session_listener(sink, shutdown.clone()) {
                Ok(_handle) => tracing::info!("session listener started"),
                Err(e) => tracing::warn!("failed to start session listener thread: {e}"),
            }
        }

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        tracing::info!("daemon stopping (shutdown requested)");
                        break;
                    }
                }

                maybe = rx.recv() => {
                    let Some(msg) = maybe else {
                        tracing::info!("daemon stopping (event channel closed)");
                        break;
                    };

                    match msg {
                        DaemonMsg::Event(event) => {
                            let actions = self.handle_one_event(event);

                            for action in actions {
                                if let Err(e) = self.exec_action(action, tx.clone()).await {
                                    tracing::error!("action failed: {e}");
                                }
                            }
                        }

                        DaemonMsg::GetStatus { reply } => {
                            let snap = self.machine.snapshot(&self.state, now_ms());
                            let _ = reply.send(snap);
                        }

                        DaemonMsg::StopDaemon { reply } => {
                            tracing::info!("daemon stopping (quit requested via IPC)");
                            let _ = reply.send(Ok("Stopping stint daemon".to_string()));
                            let _ = shutdown_tx.send(true);
                            break;
                        }
                    }
                }
            }
        }

        // Record any open session before the process goes away.
        let actions = self.handle_one_event(Event::Shutdown { now_ms: now_ms() });
        for action in actions {
            if let Err(e) = self.exec_action(action, tx.clone()).await {
                tracing::error!("action failed: {e}");
            }
        }
        self.cancel_monitor();

        Ok(())
    }
}
