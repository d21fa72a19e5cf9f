//! Cardiolens: examination data analysis library
//!
//! Derives risk-factor columns from a cardiovascular examination table,
//! counts categorical frequencies per outcome, removes implausible rows and
//! computes a masked Pearson correlation matrix. Also hosts the 3x3 matrix
//! statistics used by the `stats` subcommand.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
