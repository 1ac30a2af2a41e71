// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Engine tuning knobs.

use crate::error::ChamError;

/// Partition sizes, worker count and the optional expansion guard.
///
/// Partitioning only affects throughput; the final unpartitioned pass after
/// every strategy makes results independent of these values up to the
/// inherent nondeterminism of the rewriting relation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// `0` uses the shared rayon pool, `1` runs partitions serially, any
    /// other value builds a dedicated pool with that many threads.
    pub workers: usize,
    /// First partition size of the reducing strategy.
    pub reducing_initial_partition: usize,
    /// Amount the reducing partition size grows by after each round.
    pub reducing_partition_growth: usize,
    /// Partition size of the single constant-strategy round.
    pub constant_partition: usize,
    /// Partition size used at every level of the expanding strategy.
    pub expanding_partition: usize,
    /// Maximum number of levels the expanding strategy descends. `None` is
    /// unbounded; exceeding a set limit is an error.
    pub expansion_depth_limit: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            reducing_initial_partition: 8,
            reducing_partition_growth: 8,
            constant_partition: 32,
            expanding_partition: 1,
            expansion_depth_limit: None,
        }
    }
}

impl EngineConfig {
    /// Returns a copy with `workers` replaced.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Returns a copy with the expansion depth limit replaced.
    pub fn with_expansion_depth_limit(mut self, limit: Option<usize>) -> Self {
        self.expansion_depth_limit = limit;
        self
    }

    /// Checks that every partition size is positive.
    ///
    /// # Errors
    ///
    /// Returns [`ChamError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ChamError> {
        let sizes = [
            (self.reducing_initial_partition, "reducing_initial_partition must be > 0"),
            (self.reducing_partition_growth, "reducing_partition_growth must be > 0"),
            (self.constant_partition, "constant_partition must be > 0"),
            (self.expanding_partition, "expanding_partition must be > 0"),
        ];
        for (value, message) in sizes {
            if value == 0 {
                return Err(ChamError::InvalidConfig(message));
            }
        }
        Ok(())
    }
}
