// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Top-level evaluator.

use tracing::{debug, instrument};

use crate::config::EngineConfig;
use crate::driver::{run_reactions, StepLimit};
use crate::error::{ChamError, Stage};
use crate::multiset::Multiset;
use crate::parallel::{Executor, Strategy};
use crate::reaction::{Program, Reaction};

/// Evaluates programs with a fixed configuration and worker pool.
///
/// For every reaction, in program order:
/// 1. classify it;
/// 2. run the partitioned strategy for its type;
/// 3. run one unpartitioned pass to stability.
///
/// The last pass catches reactions whose reactants ended up in different
/// partitions, so the result is always stable with respect to the reaction.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    executor: Executor,
}

impl Engine {
    /// Builds an engine.
    ///
    /// # Errors
    ///
    /// Returns [`ChamError::InvalidConfig`] when `config` fails validation or
    /// [`ChamError::WorkerPool`] when a dedicated pool cannot be started.
    pub fn new(config: EngineConfig) -> Result<Self, ChamError> {
        config.validate()?;
        let executor = Executor::new(config.workers)?;
        debug!(?executor, "engine ready");
        Ok(Self { config, executor })
    }

    /// The configuration this engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The executor running partition workers.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Evaluates `program` from its initial solution.
    ///
    /// # Errors
    ///
    /// Returns [`ChamError::EmptyInput`] before doing any work if a reaction
    /// has no input patterns, and [`ChamError::Reaction`] for the first
    /// reaction that fails; later reactions are not run.
    #[instrument(
        skip_all,
        fields(input = program.input.len(), reactions = program.reactions.len())
    )]
    pub fn evaluate(&self, program: &Program) -> Result<Multiset, ChamError> {
        let mut solution: Multiset = program.input.iter().copied().collect();
        self.apply_all(&program.reactions, &mut solution)?;
        Ok(solution)
    }

    /// Applies `reactions` in order to an existing solution.
    ///
    /// # Errors
    ///
    /// As [`Engine::evaluate`]. On error `solution` holds whatever state the
    /// failing reaction left behind; no element is lost.
    pub fn apply_all(
        &self,
        reactions: &[Reaction],
        solution: &mut Multiset,
    ) -> Result<(), ChamError> {
        if let Some(index) = reactions.iter().position(|r| r.input_arity() == 0) {
            return Err(ChamError::EmptyInput { index });
        }
        for (index, reaction) in reactions.iter().enumerate() {
            self.apply(index, reaction, solution)?;
        }
        Ok(())
    }

    #[instrument(skip(self, reaction, solution), fields(ty = tracing::field::Empty))]
    fn apply(
        &self,
        index: usize,
        reaction: &Reaction,
        solution: &mut Multiset,
    ) -> Result<(), ChamError> {
        let ty = reaction.reaction_type();
        tracing::Span::current().record("ty", tracing::field::display(ty));
        debug!(%reaction, cardinality = solution.cardinality(), "reaction start");

        Strategy::new(reaction, &self.executor, &self.config)
            .run(ty, solution)
            .map_err(|source| ChamError::Reaction {
                index,
                stage: Stage::Partitioned(ty),
                source,
            })?;

        let performed = run_reactions(reaction, solution, StepLimit::Unbounded).map_err(
            |source| ChamError::Reaction {
                index,
                stage: Stage::FinalPass,
                source,
            },
        )?;

        debug!(
            final_pass = performed,
            cardinality = solution.cardinality(),
            "reaction end"
        );
        Ok(())
    }
}

/// Evaluates `program` with [`EngineConfig::default`].
///
/// # Errors
///
/// See [`Engine::evaluate`].
pub fn evaluate(program: &Program) -> Result<Multiset, ChamError> {
    Engine::new(EngineConfig::default())?.evaluate(program)
}
