pub mod cli;
pub mod error;
pub mod generator;
pub mod sweep;
pub mod writer;

pub use crate::cli::Cli;
