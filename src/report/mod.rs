//! Report module - terminal tables, run summary and JSON export

pub mod export;
pub mod summary;
pub mod tables;
pub mod terminal;

pub use export::*;
pub use summary::*;
pub use tables::*;
pub use terminal::*;
