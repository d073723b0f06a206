use std::ops::RangeInclusive;

use config::{ActConfig, Options};

/// Every sweep starts at this multiplier.
pub const MIN_MULTIPLIER: i64 = 10;

/// Reads per second at 1x load.
pub const READ_REQS_PER_X: i64 = 2000;

/// Writes per second at 1x load.
pub const WRITE_REQS_PER_X: i64 = 1000;

/// Lazily yields one ACT configuration per multiplier in
/// `MIN_MULTIPLIER..=options.max_multiplier`, ascending.
///
/// A bound below `MIN_MULTIPLIER` yields nothing.
pub struct Sweep<'a> {
    options: &'a Options,
    multipliers: RangeInclusive<i64>,
}

impl<'a> Sweep<'a> {
    pub fn new(options: &'a Options) -> Self {
        Self {
            options,
            multipliers: MIN_MULTIPLIER..=options.max_multiplier,
        }
    }
}

impl Iterator for Sweep<'_> {
    type Item = (i64, ActConfig);

    fn next(&mut self) -> Option<Self::Item> {
        let multiplier = self.multipliers.next()?;
        let config = self.options.act_config(
            READ_REQS_PER_X.saturating_mul(multiplier),
            WRITE_REQS_PER_X.saturating_mul(multiplier),
        );
        Some((multiplier, config))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.multipliers.size_hint()
    }
}

impl ExactSizeIterator for Sweep<'_> {}
