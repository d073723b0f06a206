use std::{io, path::PathBuf};

use config::error::ConfigurationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Failed to create output directory `{}`", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write `{}`", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration for {multiplier}x load is rejected")]
    Rejected {
        multiplier: i64,
        #[source]
        source: ConfigurationError,
    },
}
