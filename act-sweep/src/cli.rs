use clap::Parser;
use config::{error::ConfigurationError, Options, Tuning};
use log::info;
use std::path::PathBuf;

// Copies every flag that was given on the command line into the tuning.
macro_rules! override_tuning {
    ($tuning:ident, $args:ident, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = &$args.$field {
                $tuning.$field = value.clone();
            }
        )+
    };
}

/// Generate a sweep of ACT storage benchmark configurations.
///
/// One file, `actconfig_<X>x.txt`, is written per load multiplier X from 10
/// up to `--x`. A 1x load is 2000 reads and 1000 writes per second.
#[derive(Debug, Parser, Clone)]
#[command(author, about, version, long_about = None)]
pub struct Cli {
    /// Devices to test, comma separated. Ex: /dev/nvme3n1p1,/dev/nvme1n1p4
    #[arg(long, env = "ACT_DEVICES", required = true, value_delimiter = ',')]
    devices: Vec<String>,

    /// Directory receiving the generated files. Created if missing.
    #[arg(long, env = "ACT_CONFIG_DIR", default_value = "/opt")]
    directory: PathBuf,

    /// Highest load multiplier; at the default of 120 configs for 10x to 120x are generated.
    #[arg(long, default_value_t = 120, allow_negative_numbers = true)]
    x: i64,

    /// How long to run the ACT test for, in hours.
    #[arg(long, default_value_t = 24, allow_negative_numbers = true)]
    duration: i64,

    /// Threads per queue [default: 4]
    #[arg(long, alias = "qthreads", allow_negative_numbers = true)]
    threads_per_queue: Option<i64>,

    /// Total queue count. Omitted from the output unless given or derived.
    #[arg(long, allow_negative_numbers = true)]
    num_queues: Option<i64>,

    /// Without --num-queues, emit two queues per device.
    #[arg(long)]
    derive_num_queues: bool,

    /// Print the last config written.
    #[arg(long = "printlast")]
    print_last: bool,

    /// Prefix each file with a comment describing device count and load.
    #[arg(long)]
    annotate: bool,

    /// Reject configurations ACT would refuse to start with.
    #[arg(long)]
    check: bool,

    /// YAML tuning profile. Command line flags take precedence over it.
    #[arg(long, env = "ACT_TUNING")]
    config: Option<PathBuf>,

    /// Debug logging instead of info; RUST_LOG overrides both.
    #[arg(long, short = 'v')]
    verbose: bool,

    /// yes|no [default: no]
    #[arg(long)]
    microsecond_histograms: Option<String>,

    /// [default: 1536]
    #[arg(long, allow_negative_numbers = true)]
    record_bytes: Option<i64>,

    /// [default: 0]
    #[arg(long, allow_negative_numbers = true)]
    record_bytes_range_max: Option<i64>,

    /// [default: 128]
    #[arg(long, allow_negative_numbers = true)]
    large_block_op_kbytes: Option<i64>,

    /// [default: 1]
    #[arg(long, allow_negative_numbers = true)]
    replication_factor: Option<i64>,

    /// [default: 0]
    #[arg(long, allow_negative_numbers = true)]
    update_pct: Option<i64>,

    /// [default: 50]
    #[arg(long, allow_negative_numbers = true)]
    defrag_lwm_pct: Option<i64>,

    /// yes|no [default: no]
    #[arg(long)]
    commit_to_device: Option<String>,

    /// Omitted from the output unless given.
    #[arg(long, allow_negative_numbers = true)]
    commit_min_bytes: Option<i64>,

    /// yes|no [default: no]
    #[arg(long)]
    tomb_raider: Option<String>,

    /// [default: 0]
    #[arg(long, allow_negative_numbers = true)]
    tomb_raider_sleep_usec: Option<i64>,

    /// [default: 100000]
    #[arg(long, allow_negative_numbers = true)]
    max_reqs_queued: Option<i64>,

    /// [default: 10]
    #[arg(long, allow_negative_numbers = true)]
    max_lag_sec: Option<i64>,

    /// noop|cfq [default: noop]
    #[arg(long)]
    scheduler_mode: Option<String>,

    /// [default: 1]
    #[arg(long, allow_negative_numbers = true)]
    report_interval_sec: Option<i64>,
}

impl Cli {
    pub fn init_log(&self) -> Result<(), log::SetLoggerError> {
        ulog::init_log(self.verbose)?;
        info!("Log initialized");
        Ok(())
    }

    /// Resolve options: command line first, then the tuning profile, then
    /// built-in defaults.
    pub fn create_options(&self) -> Result<Options, ConfigurationError> {
        let mut tuning = match &self.config {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };

        let args = self;
        override_tuning!(
            tuning,
            args,
            threads_per_queue,
            report_interval_sec,
            microsecond_histograms,
            record_bytes,
            record_bytes_range_max,
            large_block_op_kbytes,
            replication_factor,
            update_pct,
            defrag_lwm_pct,
            commit_to_device,
            tomb_raider,
            tomb_raider_sleep_usec,
            max_reqs_queued,
            max_lag_sec,
            scheduler_mode,
        );

        if self.num_queues.is_some() {
            tuning.num_queues = self.num_queues;
        }

        if self.commit_min_bytes.is_some() {
            tuning.commit_min_bytes = self.commit_min_bytes;
        }

        Ok(Options {
            devices: self.devices.clone(),
            directory: self.directory.clone(),
            max_multiplier: self.x,
            duration_hours: self.duration,
            tuning,
            derive_num_queues: self.derive_num_queues,
            print_last: self.print_last,
            annotate: self.annotate,
            check: self.check,
        })
    }
}
