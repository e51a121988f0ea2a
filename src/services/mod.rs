// License: MIT

pub mod monitor;
pub mod session;
