use std::fmt;

use crate::{error::ConfigurationError, Tuning};

/// Configuration keys understood by ACT.
pub mod keys {
    pub const DEVICE_NAMES: &str = "device-names";
    pub const NUM_QUEUES: &str = "num-queues";
    pub const THREADS_PER_QUEUE: &str = "threads-per-queue";
    pub const TEST_DURATION_SEC: &str = "test-duration-sec";
    pub const REPORT_INTERVAL_SEC: &str = "report-interval-sec";
    pub const MICROSECOND_HISTOGRAMS: &str = "microsecond-histograms";
    pub const READ_REQS_PER_SEC: &str = "read-reqs-per-sec";
    pub const WRITE_REQS_PER_SEC: &str = "write-reqs-per-sec";
    pub const RECORD_BYTES: &str = "record-bytes";
    pub const RECORD_BYTES_RANGE_MAX: &str = "record-bytes-range-max";
    pub const LARGE_BLOCK_OP_KBYTES: &str = "large-block-op-kbytes";
    pub const REPLICATION_FACTOR: &str = "replication-factor";
    pub const UPDATE_PCT: &str = "update-pct";
    pub const DEFRAG_LWM_PCT: &str = "defrag-lwm-pct";
    pub const COMMIT_TO_DEVICE: &str = "commit-to-device";
    pub const COMMIT_MIN_BYTES: &str = "commit-min-bytes";
    pub const TOMB_RAIDER: &str = "tomb-raider";
    pub const TOMB_RAIDER_SLEEP_USEC: &str = "tomb-raider-sleep-usec";
    pub const MAX_REQS_QUEUED: &str = "max-reqs-queued";
    pub const MAX_LAG_SEC: &str = "max-lag-sec";
    pub const SCHEDULER_MODE: &str = "scheduler-mode";
}

/// One generated ACT configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActConfig {
    /// Comma separated, exactly as supplied.
    pub device_names: String,
    pub test_duration_sec: i64,
    pub read_reqs_per_sec: i64,
    pub write_reqs_per_sec: i64,
    /// Resolved queue count; `None` leaves the key out and lets ACT pick.
    pub num_queues: Option<i64>,
    pub tuning: Tuning,
}

impl ActConfig {
    /// Key-value pairs in the order they are written out.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let t = &self.tuning;
        let mut entries = vec![
            (keys::DEVICE_NAMES, self.device_names.clone()),
            (keys::TEST_DURATION_SEC, self.test_duration_sec.to_string()),
            (keys::READ_REQS_PER_SEC, self.read_reqs_per_sec.to_string()),
            (keys::WRITE_REQS_PER_SEC, self.write_reqs_per_sec.to_string()),
            (keys::THREADS_PER_QUEUE, t.threads_per_queue.to_string()),
            (keys::REPORT_INTERVAL_SEC, t.report_interval_sec.to_string()),
            (keys::MICROSECOND_HISTOGRAMS, t.microsecond_histograms.clone()),
            (keys::RECORD_BYTES, t.record_bytes.to_string()),
            (keys::RECORD_BYTES_RANGE_MAX, t.record_bytes_range_max.to_string()),
            (keys::LARGE_BLOCK_OP_KBYTES, t.large_block_op_kbytes.to_string()),
            (keys::REPLICATION_FACTOR, t.replication_factor.to_string()),
            (keys::UPDATE_PCT, t.update_pct.to_string()),
            (keys::DEFRAG_LWM_PCT, t.defrag_lwm_pct.to_string()),
            (keys::COMMIT_TO_DEVICE, t.commit_to_device.clone()),
            (keys::TOMB_RAIDER, t.tomb_raider.clone()),
            (keys::TOMB_RAIDER_SLEEP_USEC, t.tomb_raider_sleep_usec.to_string()),
            (keys::MAX_REQS_QUEUED, t.max_reqs_queued.to_string()),
            (keys::MAX_LAG_SEC, t.max_lag_sec.to_string()),
            (keys::SCHEDULER_MODE, t.scheduler_mode.clone()),
        ];

        if let Some(num_queues) = self.num_queues {
            entries.push((keys::NUM_QUEUES, num_queues.to_string()));
        }

        if let Some(commit_min_bytes) = t.commit_min_bytes {
            entries.push((keys::COMMIT_MIN_BYTES, commit_min_bytes.to_string()));
        }

        entries
    }

    /// Apply the rules ACT enforces when it loads a configuration file.
    pub fn check(&self) -> Result<(), ConfigurationError> {
        let t = &self.tuning;

        if self.device_names.split(',').all(|name| name.trim().is_empty()) {
            return Err(ConfigurationError::invalid(
                keys::DEVICE_NAMES,
                "at least one device is required",
            ));
        }

        if matches!(self.num_queues, Some(n) if n <= 0) {
            return Err(ConfigurationError::invalid(keys::NUM_QUEUES, "must be positive"));
        }

        for (key, value) in [
            (keys::THREADS_PER_QUEUE, t.threads_per_queue),
            (keys::TEST_DURATION_SEC, self.test_duration_sec),
            (keys::REPORT_INTERVAL_SEC, t.report_interval_sec),
            (keys::READ_REQS_PER_SEC, self.read_reqs_per_sec),
            (keys::RECORD_BYTES, t.record_bytes),
            (keys::REPLICATION_FACTOR, t.replication_factor),
        ] {
            if value <= 0 {
                return Err(ConfigurationError::invalid(key, "must be positive"));
            }
        }

        for (key, value) in [
            (keys::WRITE_REQS_PER_SEC, self.write_reqs_per_sec),
            (keys::RECORD_BYTES_RANGE_MAX, t.record_bytes_range_max),
            (keys::TOMB_RAIDER_SLEEP_USEC, t.tomb_raider_sleep_usec),
            (keys::MAX_REQS_QUEUED, t.max_reqs_queued),
            (keys::MAX_LAG_SEC, t.max_lag_sec),
        ] {
            if value < 0 {
                return Err(ConfigurationError::invalid(key, "must not be negative"));
            }
        }

        if t.record_bytes_range_max != 0 && t.record_bytes_range_max <= t.record_bytes {
            return Err(ConfigurationError::invalid(
                keys::RECORD_BYTES_RANGE_MAX,
                format!("must exceed {} ({})", keys::RECORD_BYTES, t.record_bytes),
            ));
        }

        let large_block_bytes = t.large_block_op_kbytes.saturating_mul(1024);
        if large_block_bytes < t.record_bytes
            || large_block_bytes < t.record_bytes_range_max
            || !is_power_of_two(large_block_bytes)
        {
            return Err(ConfigurationError::invalid(
                keys::LARGE_BLOCK_OP_KBYTES,
                "must be a power of 2 and hold the largest record",
            ));
        }

        if !(0..=100).contains(&t.update_pct) {
            return Err(ConfigurationError::invalid(
                keys::UPDATE_PCT,
                "must be within 0..=100",
            ));
        }

        if !(0..100).contains(&t.defrag_lwm_pct) {
            return Err(ConfigurationError::invalid(
                keys::DEFRAG_LWM_PCT,
                "must be within 0..100",
            ));
        }

        if let Some(bytes) = t.commit_min_bytes {
            if bytes > large_block_bytes || !is_power_of_two(bytes) {
                return Err(ConfigurationError::invalid(
                    keys::COMMIT_MIN_BYTES,
                    "must be a power of 2 no larger than the large block",
                ));
            }
        }

        for (key, value) in [
            (keys::MICROSECOND_HISTOGRAMS, &t.microsecond_histograms),
            (keys::COMMIT_TO_DEVICE, &t.commit_to_device),
            (keys::TOMB_RAIDER, &t.tomb_raider),
        ] {
            if value != "yes" && value != "no" {
                return Err(ConfigurationError::invalid(
                    key,
                    format!("expected `yes` or `no`, got `{value}`"),
                ));
            }
        }

        if t.scheduler_mode != "noop" && t.scheduler_mode != "cfq" {
            return Err(ConfigurationError::invalid(
                keys::SCHEDULER_MODE,
                format!("expected `noop` or `cfq`, got `{}`", t.scheduler_mode),
            ));
        }

        Ok(())
    }
}

fn is_power_of_two(value: i64) -> bool {
    value > 0 && value.count_ones() == 1
}

impl fmt::Display for ActConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.entries() {
            writeln!(f, "{key}: {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{keys, ActConfig};
    use crate::{error::ConfigurationError, Tuning};

    fn sample() -> ActConfig {
        ActConfig {
            device_names: "/dev/nvme0n1,/dev/nvme1n1".to_owned(),
            test_duration_sec: 3600,
            read_reqs_per_sec: 20000,
            write_reqs_per_sec: 10000,
            num_queues: None,
            tuning: Tuning::default(),
        }
    }

    fn assert_invalid(config: &ActConfig, expected: &str) {
        match config.check() {
            Err(ConfigurationError::Invalid { key, .. }) => assert_eq!(expected, key),
            other => panic!("Expected `{}` to be rejected, got {:?}", expected, other),
        }
    }

    #[test]
    fn test_render_defaults() {
        let rendered = sample().to_string();
        let expected = "device-names: /dev/nvme0n1,/dev/nvme1n1\n\
                        test-duration-sec: 3600\n\
                        read-reqs-per-sec: 20000\n\
                        write-reqs-per-sec: 10000\n\
                        threads-per-queue: 4\n\
                        report-interval-sec: 1\n\
                        microsecond-histograms: no\n\
                        record-bytes: 1536\n\
                        record-bytes-range-max: 0\n\
                        large-block-op-kbytes: 128\n\
                        replication-factor: 1\n\
                        update-pct: 0\n\
                        defrag-lwm-pct: 50\n\
                        commit-to-device: no\n\
                        tomb-raider: no\n\
                        tomb-raider-sleep-usec: 0\n\
                        max-reqs-queued: 100000\n\
                        max-lag-sec: 10\n\
                        scheduler-mode: noop\n";
        assert_eq!(expected, rendered);
    }

    #[test]
    fn test_optional_keys_trail() {
        let mut config = sample();
        config.num_queues = Some(8);
        config.tuning.commit_min_bytes = Some(4096);

        let entries = config.entries();
        let tail: Vec<_> = entries.iter().rev().take(2).map(|(k, _)| *k).collect();
        assert_eq!(vec![keys::COMMIT_MIN_BYTES, keys::NUM_QUEUES], tail);
        assert!(config.to_string().ends_with("num-queues: 8\ncommit-min-bytes: 4096\n"));
    }

    #[test]
    fn test_render_negative_values_verbatim() {
        let mut config = sample();
        config.test_duration_sec = -7200;
        config.tuning.max_lag_sec = -1;
        let rendered = config.to_string();
        assert!(rendered.contains("test-duration-sec: -7200\n"));
        assert!(rendered.contains("max-lag-sec: -1\n"));
    }

    #[test]
    fn test_check_defaults() -> Result<(), ConfigurationError> {
        sample().check()
    }

    #[test]
    fn test_check_rejects() {
        let mut config = sample();
        config.device_names = String::new();
        assert_invalid(&config, keys::DEVICE_NAMES);

        let mut config = sample();
        config.num_queues = Some(0);
        assert_invalid(&config, keys::NUM_QUEUES);

        let mut config = sample();
        config.num_queues = Some(-2);
        assert_invalid(&config, keys::NUM_QUEUES);

        let mut config = sample();
        config.tuning.threads_per_queue = 0;
        assert_invalid(&config, keys::THREADS_PER_QUEUE);

        let mut config = sample();
        config.test_duration_sec = -7200;
        assert_invalid(&config, keys::TEST_DURATION_SEC);

        let mut config = sample();
        config.tuning.max_lag_sec = -1;
        assert_invalid(&config, keys::MAX_LAG_SEC);

        let mut config = sample();
        config.tuning.update_pct = -1;
        assert_invalid(&config, keys::UPDATE_PCT);

        let mut config = sample();
        config.tuning.commit_min_bytes = Some(-4096);
        assert_invalid(&config, keys::COMMIT_MIN_BYTES);

        let mut config = sample();
        config.tuning.record_bytes_range_max = 1536;
        assert_invalid(&config, keys::RECORD_BYTES_RANGE_MAX);

        let mut config = sample();
        config.tuning.large_block_op_kbytes = 96;
        assert_invalid(&config, keys::LARGE_BLOCK_OP_KBYTES);

        let mut config = sample();
        config.tuning.record_bytes_range_max = 256 * 1024;
        assert_invalid(&config, keys::LARGE_BLOCK_OP_KBYTES);

        let mut config = sample();
        config.tuning.update_pct = 101;
        assert_invalid(&config, keys::UPDATE_PCT);

        let mut config = sample();
        config.tuning.defrag_lwm_pct = 100;
        assert_invalid(&config, keys::DEFRAG_LWM_PCT);

        let mut config = sample();
        config.tuning.commit_min_bytes = Some(1000);
        assert_invalid(&config, keys::COMMIT_MIN_BYTES);

        let mut config = sample();
        config.tuning.commit_to_device = "true".to_owned();
        assert_invalid(&config, keys::COMMIT_TO_DEVICE);

        let mut config = sample();
        config.tuning.scheduler_mode = "deadline".to_owned();
        assert_invalid(&config, keys::SCHEDULER_MODE);
    }

    #[test]
    fn test_check_accepts_valid_overrides() -> Result<(), ConfigurationError> {
        let mut config = sample();
        config.num_queues = Some(4);
        config.tuning.record_bytes_range_max = 4096;
        config.tuning.commit_min_bytes = Some(4096);
        config.tuning.commit_to_device = "yes".to_owned();
        config.tuning.scheduler_mode = "cfq".to_owned();
        config.check()
    }
}
