// License: MIT

pub mod action;
pub mod clock;
pub mod daemon_msg;
pub mod error;
pub mod event;
pub mod hotkey;
pub mod info;
pub mod machine;
pub mod monitor;
pub mod session;
pub mod state;
pub mod utils;

#[cfg(test)]
mod machine_tests;
