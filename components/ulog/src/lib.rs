#[cfg(feature = "env")]
use std::io::Write;

#[cfg(feature = "env")]
use env_logger::{Builder, Env};

#[cfg(feature = "env")]
fn builder(default_level: log::LevelFilter) -> Builder {
    let env = Env::default().default_filter_or(default_level.to_string());
    let mut builder = Builder::from_env(env);
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{}:{} {} [{}] - {}",
            record.file().unwrap_or("unknown"),
            record.line().unwrap_or(0),
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
            record.level(),
            record.args()
        )
    });
    builder
}

/// Install the process-wide logger, writing to stderr.
///
/// `RUST_LOG` takes precedence over the level chosen here.
#[cfg(feature = "env")]
pub fn init_log(verbose: bool) -> Result<(), log::SetLoggerError> {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    builder(level).try_init()
}

/// Logger for unit tests. Safe to call repeatedly.
#[cfg(feature = "env")]
pub fn try_init_log() {
    let _ = builder(log::LevelFilter::Trace).is_test(true).try_init();
}

#[cfg(test)]
mod tests {
    #[cfg(feature = "env")]
    #[test]
    fn test_init_log() {
        super::try_init_log();
        log::trace!("Record at trace");
        log::debug!("Record at debug");
        log::info!("Record at info");
        log::warn!("Record at warn");
        log::error!("Record at error");

        // A logger is already installed; a second install must be refused.
        assert!(super::init_log(true).is_err());
    }
}
