//! CLI commands

mod common;
mod dis;
mod main;
mod trace;

pub use dis::dis;
pub use main::main;
pub use trace::trace;
