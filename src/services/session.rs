// License: MIT

use std::sync::Arc;

use futures::StreamExt;
use tokio::runtime::Runtime;
use tokio::sync::watch;
use zbus::{Connection, Proxy};

use crate::core::event::{Event, SessionSwitchReason};
use crate::core::utils::now_ms;

/// Sink for pushing events into the daemon loop.
/// Implement this for whatever channel/queue you're using.
pub trait EventSink: Send + Sync + 'static {
    fn push(&self, ev: Event);
}

/// Spawn the login1 session listener.
///
/// Watches for:
/// - Lock/Unlock on our own session (org.freedesktop.login1.Session)
/// - PrepareForShutdown (org.freedesktop.login1.Manager)
/// - SessionRemoved naming our session, which is a logoff
///
/// IMPORTANT: This runs in a dedicated OS thread. That thread MUST terminate
/// on shutdown, otherwise the stint process will never exit (even if the main
/// async loop stops).
pub fn spawn_session_listener(
    sink: Arc<dyn EventSink>,
    shutdown: watch::Receiver<bool>,
) -> std::io::Result<std::thread::JoinHandle<()>> {
    Ok(std::thread::spawn(move || {
        let rt = Runtime::new().expect("tokio runtime");
        rt.block_on(async move {
            if let Err(e) = run_session_listener(sink, shutdown).await {
                tracing::error!("session listener failed: {e:?}");
            }
        });
    }))
}

async fn run_session_listener(
    sink: Arc<dyn EventSink>,
    mut shutdown: watch::Receiver<bool>,
) -> zbus::Result<()> {
    let sys = match Connection::system().await {
        Ok(c) => c,
        Err(e) => {
            // Headless or bus-less environments still get the hotkey and
            // inactivity paths; only session events are lost.
            tracing::warn!("could not connect to system bus, session events disabled: {e:?}");
            return Ok(());
        }
    };

    let manager = Proxy::new(
        &sys,
        "org.freedesktop.login1",
        "/org/freedesktop/login1",
        "org.freedesktop.login1.Manager",
    )
    .await?;

    // 1) PrepareForShutdown: treat an impending shutdown like a logoff so
    //    the open session is recorded before the process dies.
    if let Ok(mut stream) = manager.receive_signal("PrepareForShutdown").await {
        let sink = sink.clone();
        tokio::spawn(async move {
            while let Some(sig) = stream.next().await {
                let going_down: bool = match sig.body().deserialize() {
                    Ok(v) => v,
                    Err(_) => continue,
                };
                if going_down {
                    sink.push(Event::SessionSwitch {
                        reason: SessionSwitchReason::Logoff,
                        now_ms: now_ms(),
                    });
                }
            }
        });
    }

    // 2) Lock/Unlock on our session
    let our_session = match resolve_session_path(&sys).await {
        Ok(session_path) => {
            tracing::info!("monitoring session {}", session_path.as_str());

            let session = Proxy::new(
                &sys,
                "org.freedesktop.login1",
                session_path.clone(),
                "org.freedesktop.login1.Session",
            )
            .await?;

            let mut lock_stream = session.receive_signal("Lock").await?;
            let mut unlock_stream = session.receive_signal("Unlock").await?;

            let sink_lock = sink.clone();
            tokio::spawn(async move {
                while lock_stream.next().await.is_some() {
                    sink_lock.push(Event::SessionSwitch {
                        reason: SessionSwitchReason::Lock,
                        now_ms: now_ms(),
                    });
                }
            });

            let sink_unlock = sink.clone();
            tokio::spawn(async move {
                while unlock_stream.next().await.is_some() {
                    sink_unlock.push(Event::SessionSwitch {
                        reason: SessionSwitchReason::Unlock,
                        now_ms: now_ms(),
                    });
                }
            });

            Some(session_path)
        }
        Err(e) => {
            tracing::warn!("could not resolve session path for lock/unlock: {e:?}");
            None
        }
    };

    // 3) SessionRemoved for our session path is a logoff
    if let Some(our_path) = our_session {
        if let Ok(mut stream) = manager.receive_signal("SessionRemoved").await {
            let sink = sink.clone();
            tokio::spawn(async move {
                while let Some(sig) = stream.next().await {
                    let (_id, path): (String, zbus::zvariant::OwnedObjectPath) =
                        match sig.body().deserialize() {
                            Ok(v) => v,
                            Err(_) => continue,
                        };
                    if path == our_path {
                        sink.push(Event::SessionSwitch {
                            reason: SessionSwitchReason::Logoff,
                            now_ms: now_ms(),
                        });
                        break;
                    }
                }
            });
        }
    }

    // Do NOT block forever; exit this thread on shutdown.
    loop {
        if *shutdown.borrow() {
            break;
        }

        let _ = shutdown.changed().await;
        if *shutdown.borrow() {
            break;
        }
    }

    Ok(())
}

// ---- Session path resolution ----

async fn resolve_session_path(
    connection: &Connection,
) -> zbus::Result<zbus::zvariant::OwnedObjectPath> {
    let proxy = Proxy::new(
        connection,
        "org.freedesktop.login1",
        "/org/freedesktop/login1",
        "org.freedesktop.login1.Manager",
    )
    .await?;

    // 1) XDG_SESSION_ID if present
    if let Ok(session_id) = std::env::var("XDG_SESSION_ID") {
        let result: zbus::Result<zbus::zvariant::OwnedObjectPath> =
            proxy.call("GetSession", &(session_id.as_str(),)).await;

        if let Ok(path) = result {
            tracing::debug!("using session from XDG_SESSION_ID");
            return Ok(path);
        }
    }

    // 2) Search ListSessions for our UID, prefer a graphical seat0 session
    let uid = unsafe { libc::getuid() };

    let sessions: Vec<(String, u32, String, String, zbus::zvariant::OwnedObjectPath)> =
        proxy.call("ListSessions", &()).await?;

    for (session_id, session_uid, _username, seat, path) in &sessions {
        if *session_uid != uid {
            continue;
        }

        let Ok(sproxy) = Proxy::new(
            connection,
            "org.freedesktop.login1",
            path.clone(),
            "org.freedesktop.login1.Session",
        )
        .await
        else {
            continue;
        };

        if let Ok(session_type) = sproxy.get_property::<String>("Type").await {
            if (session_type == "wayland" || session_type == "x11") && seat == "seat0" {
                tracing::info!(
                    "selected graphical session '{session_id}' (type: {session_type}, seat: {seat})"
                );
                return Ok(path.clone());
            }
        }
    }

    // 3) Fallback: first session for our UID
    for (_session_id, session_uid, _username, _seat, path) in &sessions {
        if *session_uid == uid {
            tracing::warn!("using first session for UID {uid}");
            return Ok(path.clone());
        }
    }

    // 4) Fallback PID method
    let pid = std::process::id();
    let path: zbus::zvariant::OwnedObjectPath = proxy.call("GetSessionByPID", &(pid,)).await?;
    Ok(path)
}
