use std::{fs::File, path::Path};

use log::debug;
use serde::Deserialize;

use crate::error::ConfigurationError;

/// Pass-through ACT knobs, copied verbatim into every generated file.
///
/// Field names mirror the ACT configuration keys so the same document can be
/// loaded from a YAML tuning profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    #[serde(rename = "threads-per-queue")]
    pub threads_per_queue: i64,

    #[serde(rename = "report-interval-sec")]
    pub report_interval_sec: i64,

    /// `yes` or `no`.
    #[serde(rename = "microsecond-histograms")]
    pub microsecond_histograms: String,

    #[serde(rename = "record-bytes")]
    pub record_bytes: i64,

    /// Zero means fixed-size records.
    #[serde(rename = "record-bytes-range-max")]
    pub record_bytes_range_max: i64,

    #[serde(rename = "large-block-op-kbytes")]
    pub large_block_op_kbytes: i64,

    #[serde(rename = "replication-factor")]
    pub replication_factor: i64,

    #[serde(rename = "update-pct")]
    pub update_pct: i64,

    #[serde(rename = "defrag-lwm-pct")]
    pub defrag_lwm_pct: i64,

    /// `yes` or `no`.
    #[serde(rename = "commit-to-device")]
    pub commit_to_device: String,

    /// Only emitted when set.
    #[serde(rename = "commit-min-bytes")]
    pub commit_min_bytes: Option<i64>,

    /// `yes` or `no`.
    #[serde(rename = "tomb-raider")]
    pub tomb_raider: String,

    #[serde(rename = "tomb-raider-sleep-usec")]
    pub tomb_raider_sleep_usec: i64,

    #[serde(rename = "max-reqs-queued")]
    pub max_reqs_queued: i64,

    #[serde(rename = "max-lag-sec")]
    pub max_lag_sec: i64,

    /// `noop` or `cfq`.
    #[serde(rename = "scheduler-mode")]
    pub scheduler_mode: String,

    /// Only emitted when set.
    #[serde(rename = "num-queues")]
    pub num_queues: Option<i64>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            threads_per_queue: 4,
            report_interval_sec: 1,
            microsecond_histograms: "no".to_owned(),
            record_bytes: 1536,
            record_bytes_range_max: 0,
            large_block_op_kbytes: 128,
            replication_factor: 1,
            update_pct: 0,
            defrag_lwm_pct: 50,
            commit_to_device: "no".to_owned(),
            commit_min_bytes: None,
            tomb_raider: "no".to_owned(),
            tomb_raider_sleep_usec: 0,
            max_reqs_queued: 100000,
            max_lag_sec: 10,
            scheduler_mode: "noop".to_owned(),
            num_queues: None,
        }
    }
}

impl Tuning {
    /// Load a YAML tuning profile. Keys absent from the document keep their
    /// defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let file = File::open(path).map_err(|source| ConfigurationError::Profile {
            path: path.display().to_string(),
            source,
        })?;
        let tuning: Tuning = serde_yaml::from_reader(file)?;
        debug!("Loaded tuning profile {}: {:?}", path.display(), tuning);
        Ok(tuning)
    }
}
