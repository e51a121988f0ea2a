// License: MIT

pub mod inject;
pub mod quit;
pub mod status;
pub mod timer;
