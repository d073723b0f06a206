use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use config::ActConfig;
use log::debug;

use crate::error::SweepError;

/// Writes generated configurations as `actconfig_<m>x.txt` files into one
/// directory.
#[derive(Debug)]
pub struct ConfigWriter {
    directory: PathBuf,
    annotate: bool,
}

impl ConfigWriter {
    /// Create the writer, making `directory` and its parents if missing.
    pub fn new(directory: &Path) -> Result<Self, SweepError> {
        util::mkdirs_if_missing(directory).map_err(|source| SweepError::CreateDirectory {
            path: directory.to_path_buf(),
            source,
        })?;
        Ok(Self {
            directory: directory.to_path_buf(),
            annotate: false,
        })
    }

    pub fn with_annotation(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }

    pub fn file_name(multiplier: i64) -> String {
        format!("actconfig_{multiplier}x.txt")
    }

    pub fn path(&self, multiplier: i64) -> PathBuf {
        self.directory.join(Self::file_name(multiplier))
    }

    /// Text of the file for `multiplier`, exactly as it is written to disk.
    pub fn render(&self, multiplier: i64, config: &ActConfig) -> String {
        if self.annotate {
            let devices = config.device_names.split(',').count();
            format!(
                "# ACT config for {devices} device(s) at {multiplier}x load\n\
                 # {} reads/sec, {} writes/sec\n\n{config}",
                config.read_reqs_per_sec, config.write_reqs_per_sec
            )
        } else {
            config.to_string()
        }
    }

    /// Write `contents` to the file for `multiplier`, replacing any previous
    /// file. The handle is closed before returning.
    pub fn write(&self, multiplier: i64, contents: &str) -> Result<PathBuf, SweepError> {
        let path = self.path(multiplier);
        let result = File::create(&path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            writer.write_all(contents.as_bytes())?;
            writer.flush()
        });

        match result {
            Ok(()) => {
                debug!("Wrote {} bytes to {}", contents.len(), path.display());
                Ok(path)
            }
            Err(source) => Err(SweepError::Write { path, source }),
        }
    }
}
