// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-reaction-type partitioning strategies.

use tracing::{debug, trace};

use super::exec::Executor;
use crate::classify::ReactionType;
use crate::config::EngineConfig;
use crate::driver::{run_reactions, StepLimit};
use crate::error::ReactionError;
use crate::multiset::Multiset;
use crate::reaction::Reaction;

/// One reaction bound to the executor and sizes it runs with.
pub(crate) struct Strategy<'a> {
    reaction: &'a Reaction,
    executor: &'a Executor,
    config: &'a EngineConfig,
}

impl<'a> Strategy<'a> {
    pub(crate) fn new(
        reaction: &'a Reaction,
        executor: &'a Executor,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            reaction,
            executor,
            config,
        }
    }

    /// Runs the strategy matching `ty` over `solution`.
    pub(crate) fn run(
        &self,
        ty: ReactionType,
        solution: &mut Multiset,
    ) -> Result<(), ReactionError> {
        match ty {
            ReactionType::Reducing => self.reducing(solution),
            ReactionType::Constant => self.constant(solution),
            ReactionType::Expanding => self.expanding(solution),
        }
    }

    fn exhaust(&self, partition: &mut Multiset) -> Result<(), ReactionError> {
        run_reactions(self.reaction, partition, StepLimit::Unbounded).map(drop)
    }

    /// Grows the partition size until partitions are at least half the
    /// solution, or a round makes no progress.
    fn reducing(&self, solution: &mut Multiset) -> Result<(), ReactionError> {
        let mut size = self.config.reducing_initial_partition;
        let mut round = 0usize;
        while size.saturating_mul(2) < solution.cardinality() {
            let before = solution.cardinality();
            self.executor
                .execute_partitioned(solution, size, |part| self.exhaust(part))?;
            round += 1;
            debug!(
                round,
                size,
                before,
                after = solution.cardinality(),
                "reducing round"
            );
            if solution.cardinality() == before {
                break;
            }
            size = size.saturating_add(self.config.reducing_partition_growth);
        }
        Ok(())
    }

    fn constant(&self, solution: &mut Multiset) -> Result<(), ReactionError> {
        let size = self.config.constant_partition;
        self.executor
            .execute_partitioned(solution, size, |part| self.exhaust(part))?;
        debug!(size, cardinality = solution.cardinality(), "constant round");
        Ok(())
    }

    /// Applies one step per partition, level by level. Partitions that grew
    /// form the next level's work list; the rest are settled.
    fn expanding(&self, solution: &mut Multiset) -> Result<(), ReactionError> {
        let size = self.config.expanding_partition;
        let mut settled = Multiset::new();
        let mut frontier = vec![std::mem::take(solution)];
        let mut failure = None;
        let mut depth = 0usize;

        while !frontier.is_empty() {
            if let Some(limit) = self.config.expansion_depth_limit {
                if depth > limit {
                    failure = Some(ReactionError::ExpansionDepthExceeded { limit });
                    break;
                }
            }
            let mut partitions: Vec<Multiset> =
                frontier.iter().flat_map(|set| set.partition(size)).collect();
            frontier.clear();
            trace!(depth, partitions = partitions.len(), "expanding level");

            let grew = self.executor.map_partitions(&mut partitions, |part| {
                let before = part.cardinality();
                run_reactions(self.reaction, part, StepLimit::Steps(1))
                    .map(|_| part.cardinality() > before)
            });
            for (part, result) in partitions.into_iter().zip(grew) {
                match result {
                    Ok(true) => frontier.push(part),
                    Ok(false) => settled.merge(part),
                    Err(err) => {
                        settled.merge(part);
                        if failure.is_none() {
                            failure = Some(err);
                        }
                    }
                }
            }
            if failure.is_some() {
                break;
            }
            depth += 1;
        }

        for part in frontier {
            settled.merge(part);
        }
        *solution = settled;
        failure.map_or(Ok(()), Err)
    }
}
