//! Terminal output helpers and logging setup

pub mod logging;
mod progress;
mod styling;

pub use progress::*;
pub use styling::*;
