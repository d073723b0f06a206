use std::{io, path::PathBuf};

use config::Options;
use log::{debug, info};

use crate::{
    error::SweepError,
    sweep::{Sweep, MIN_MULTIPLIER},
    writer::ConfigWriter,
};

/// The most recent file of a sweep, kept for echoing.
#[derive(Debug)]
pub struct LastWritten {
    pub multiplier: i64,
    pub path: PathBuf,
    pub contents: String,
}

/// Outcome of a completed sweep.
#[derive(Debug)]
pub struct Report {
    /// Number of files written.
    pub written: usize,

    pub last: Option<LastWritten>,
}

impl Report {
    /// Print the last file written. Prints nothing for an empty sweep.
    pub fn echo_last<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        if let Some(last) = &self.last {
            writeln!(out, "Printing last config written ({}X):", last.multiplier)?;
            out.write_all(last.contents.as_bytes())?;
            out.flush()?;
        }
        Ok(())
    }
}

/// Write one ACT configuration file per multiplier of the sweep.
///
/// Only the last file is retained in memory. Stops at the first failure;
/// files written before it are left in place.
pub fn generate(options: &Options) -> Result<Report, SweepError> {
    debug!("Generating with {:?}", options);
    let writer = ConfigWriter::new(&options.directory)?.with_annotation(options.annotate);
    info!(
        "Generating ACT configurations {}x..={}x for {} under {}",
        MIN_MULTIPLIER,
        options.max_multiplier,
        options.device_names(),
        options.directory.display()
    );

    let mut report = Report {
        written: 0,
        last: None,
    };
    for (multiplier, config) in Sweep::new(options) {
        if options.check {
            config
                .check()
                .map_err(|source| SweepError::Rejected { multiplier, source })?;
        }
        let contents = writer.render(multiplier, &config);
        let path = writer.write(multiplier, &contents)?;
        report.written += 1;
        report.last = Some(LastWritten {
            multiplier,
            path,
            contents,
        });
    }

    info!("Wrote {} file(s)", report.written);
    Ok(report)
}
