// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fan-out/fan-in over partitions.

use core::fmt;

use rayon::prelude::*;

use crate::error::{ChamError, ReactionError};
use crate::multiset::Multiset;

/// Where partition workers run.
pub enum Executor {
    /// On the calling thread, one partition after another.
    Serial,
    /// On rayon's global pool.
    Shared,
    /// On a pool owned by the engine.
    Dedicated(rayon::ThreadPool),
}

impl Executor {
    /// Builds the executor for a worker count (see
    /// [`EngineConfig::workers`](crate::EngineConfig::workers)).
    ///
    /// # Errors
    ///
    /// Returns [`ChamError::WorkerPool`] if a dedicated pool cannot be built.
    pub fn new(workers: usize) -> Result<Self, ChamError> {
        match workers {
            0 => Ok(Self::Shared),
            1 => Ok(Self::Serial),
            n => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("cham-worker-{i}"))
                    .build()?;
                Ok(Self::Dedicated(pool))
            }
        }
    }

    /// Number of threads partitions can run on.
    pub fn parallelism(&self) -> usize {
        match self {
            Self::Serial => 1,
            Self::Shared => rayon::current_num_threads(),
            Self::Dedicated(pool) => pool.current_num_threads(),
        }
    }

    /// Runs one round: partition `solution` by `size`, run `worker` on every
    /// partition, then clear `solution` and merge every partition back.
    ///
    /// Every worker runs to completion even when another one fails, and the
    /// merge happens regardless.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing partition (in partition order).
    ///
    /// # Panics
    ///
    /// Panics if `size == 0`, or re-raises a worker panic once all workers
    /// have finished.
    pub fn execute_partitioned<F>(
        &self,
        solution: &mut Multiset,
        size: usize,
        worker: F,
    ) -> Result<(), ReactionError>
    where
        F: Fn(&mut Multiset) -> Result<(), ReactionError> + Sync,
    {
        let mut partitions = solution.partition(size);
        let results = self.map_partitions(&mut partitions, worker);

        solution.clear();
        for partition in partitions {
            solution.merge(partition);
        }

        results.into_iter().collect()
    }

    /// Runs `worker` on every partition and returns the per-partition
    /// results in partition order. Partitions are left in place for the
    /// caller to merge or keep working on.
    pub fn map_partitions<T, F>(&self, partitions: &mut [Multiset], worker: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&mut Multiset) -> T + Sync,
    {
        match self {
            Self::Serial => partitions.iter_mut().map(&worker).collect(),
            Self::Shared => partitions.par_iter_mut().map(&worker).collect(),
            Self::Dedicated(pool) => {
                pool.install(|| partitions.par_iter_mut().map(&worker).collect())
            }
        }
    }
}

impl fmt::Debug for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serial => f.write_str("Executor::Serial"),
            Self::Shared => f.write_str("Executor::Shared"),
            Self::Dedicated(pool) => {
                write!(f, "Executor::Dedicated({} threads)", pool.current_num_threads())
            }
        }
    }
}
