// License: MIT

use crate::cli::{Args, Command};

type AnyError = Box<dyn std::error::Error + Send + Sync>;

pub async fn run(args: Args) -> Result<(), AnyError> {
    // command mode: args.command is Some
    let cmd = args.command.as_ref().expect("command mode");

    match cmd {
        Command::Toggle => relay("toggle", "Toggled timer").await,
        Command::Start => relay("start", "Timer started.").await,
        Command::Stop => relay("stop", "Timer stopped.").await,
        Command::Quit => relay("quit", "Stopping stint daemon").await,
        Command::Activity => relay("activity", "ok").await,
        Command::Key { combo } => relay(&format!("key {combo}"), "ok").await,

        Command::Status { json } => {
            let msg = if *json { "status --json" } else { "status" };

            match crate::ipc::client::send_raw(msg).await {
                Ok(resp) => {
                    if !resp.is_empty() {
                        println!("{resp}");
                    }
                    Ok(())
                }
                Err(e) => {
                    if *json {
                        // Pollers need valid JSON on stdout even without a daemon.
                        println!("{}", crate::ipc::handlers::status::not_running(true));
                        Ok(())
                    } else {
                        eprintln!("stint: {e}");
                        std::process::exit(1);
                    }
                }
            }
        }
    }
}

async fn relay(msg: &str, fallback: &str) -> Result<(), AnyError> {
    match crate::ipc::client::send_raw(msg).await {
        Ok(resp) => {
            let out = resp.trim_end();
            if out.is_empty() {
                println!("{fallback}");
            } else {
                println!("{out}");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("stint: {e}");
            std::process::exit(1);
        }
    }
}
