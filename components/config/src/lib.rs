use std::path::PathBuf;

pub mod act;
pub mod error;
mod tuning;

pub use crate::act::ActConfig;
pub use crate::tuning::Tuning;

/// ACT recommends two queues per device.
pub const QUEUES_PER_DEVICE: i64 = 2;

const SECONDS_PER_HOUR: i64 = 3600;

/// Everything a sweep needs, resolved once from the command line and an
/// optional tuning profile.
#[derive(Debug, Clone)]
pub struct Options {
    /// Device paths, in the order supplied.
    pub devices: Vec<String>,

    /// Directory receiving the generated files.
    pub directory: PathBuf,

    /// Upper, inclusive bound of the multiplier sweep.
    pub max_multiplier: i64,

    pub duration_hours: i64,

    pub tuning: Tuning,

    /// Fall back to `QUEUES_PER_DEVICE` × device count when no explicit
    /// queue count is given.
    pub derive_num_queues: bool,

    pub print_last: bool,

    /// Prefix every file with a comment header.
    pub annotate: bool,

    /// Apply ACT's own configuration rules before writing.
    pub check: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            devices: vec![],
            directory: PathBuf::from("/opt"),
            max_multiplier: 120,
            duration_hours: 24,
            tuning: Tuning::default(),
            derive_num_queues: false,
            print_last: false,
            annotate: false,
            check: false,
        }
    }
}

impl Options {
    pub fn device_names(&self) -> String {
        self.devices.join(",")
    }

    pub fn test_duration_sec(&self) -> i64 {
        self.duration_hours.saturating_mul(SECONDS_PER_HOUR)
    }

    /// Queue count to emit, if any.
    pub fn num_queues(&self) -> Option<i64> {
        self.tuning.num_queues.or_else(|| {
            self.derive_num_queues
                .then(|| QUEUES_PER_DEVICE.saturating_mul(self.devices.len() as i64))
        })
    }

    /// Build the ACT configuration for the given request rates.
    pub fn act_config(&self, read_reqs_per_sec: i64, write_reqs_per_sec: i64) -> ActConfig {
        ActConfig {
            device_names: self.device_names(),
            test_duration_sec: self.test_duration_sec(),
            read_reqs_per_sec,
            write_reqs_per_sec,
            num_queues: self.num_queues(),
            tuning: self.tuning.clone(),
        }
    }
}
