// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Line-at-a-time evaluation shared by the REPL and file mode.

use cham_core::{ChamError, Engine, Multiset};
use cham_lang::{parse_statement, ReactionStore, Statement};
use thiserror::Error;
use tracing::debug;

use crate::output::Format;

/// Failure of a single input line.
#[derive(Debug, Error)]
pub enum LineError {
    /// Parse error already rendered against its source line.
    #[error("{0}")]
    Parse(String),
    /// Evaluation failed.
    #[error(transparent)]
    Eval(#[from] ChamError),
}

/// Failure while running a multi-line source.
#[derive(Debug, Error)]
#[error("line {line}: {source}")]
pub struct SourceError {
    /// 1-based line number in the source.
    pub line: usize,
    /// What went wrong on that line.
    pub source: LineError,
}

/// Successful outcome of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A program ran to this final solution.
    Solution(Multiset),
    /// A definition was stored under this name.
    Defined(String),
}

/// Engine plus the named reactions defined so far.
#[derive(Debug)]
pub struct Session {
    engine: Engine,
    store: ReactionStore,
    format: Format,
}

impl Session {
    /// Creates a session with an empty reaction store.
    pub fn new(engine: Engine, format: Format) -> Self {
        Self {
            engine,
            store: ReactionStore::new(),
            format,
        }
    }

    /// Reactions defined so far.
    pub fn store(&self) -> &ReactionStore {
        &self.store
    }

    /// The engine evaluating programs.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Parses `line` as a program or definition and runs or stores it.
    pub fn eval_line(&mut self, line: &str) -> Result<Reply, LineError> {
        let statement =
            parse_statement(line, &self.store).map_err(|e| LineError::Parse(e.render(line)))?;
        match statement {
            Statement::Program(program) => Ok(Reply::Solution(self.engine.evaluate(&program)?)),
            Statement::Definition(def) => {
                debug!(name = %def.name, reactions = def.reactions.len(), "definition stored");
                if self.store.put(def.name.clone(), def.reactions).is_some() {
                    debug!(name = %def.name, "definition replaced");
                }
                Ok(Reply::Defined(def.name))
            }
        }
    }

    /// Text printed for a reply: the solution, or `OK` for a definition.
    pub fn render(&self, reply: &Reply) -> String {
        match reply {
            Reply::Solution(solution) => self.format.multiset(solution),
            Reply::Defined(_) => "OK".to_owned(),
        }
    }

    /// Runs every non-blank, non-comment line of `source` in order, passing
    /// each rendered reply to `emit`. Stops at the first failing line.
    pub fn eval_source(
        &mut self,
        source: &str,
        mut emit: impl FnMut(String),
    ) -> Result<usize, SourceError> {
        let mut ran = 0;
        for (index, raw) in source.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with("//") {
                continue;
            }
            let reply = self.eval_line(line).map_err(|source| SourceError {
                line: index + 1,
                source,
            })?;
            emit(self.render(&reply));
            ran += 1;
        }
        Ok(ran)
    }
}
