// License: MIT

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "stint",
    version = env!("CARGO_PKG_VERSION"),
    about = "Hotkey-driven work timer daemon"
)]
pub struct Args {
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long, action)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(about = "Toggle the work timer")]
    Toggle,

    #[command(about = "Start the work timer (no-op if already running)")]
    Start,

    #[command(about = "Stop the work timer and record the interval")]
    Stop,

    #[command(about = "Display the current timer state")]
    Status {
        #[arg(long)]
        json: bool,
    },

    #[command(about = "Inject a key press, e.g. from a compositor keybinding")]
    Key {
        combo: String,
    },

    #[command(about = "Report user activity to reset the inactivity countdown")]
    Activity,

    #[command(about = "Stop the running stint daemon")]
    Quit,
}
