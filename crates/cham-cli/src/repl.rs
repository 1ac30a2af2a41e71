// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Interactive read-eval-print loop.

use std::fs;
use std::io::{self, BufRead, Write};

use crate::session::Session;

/// Text printed by `:help`.
pub const HELP: &str = "\
Enter a program to evaluate it, or a definition to store it:
  {1, 1, 1, 1} | x, y => x + y if x == y
  double : x => x * 2 if x < 100
  {1, 2, 3} | :double
Commands:
  :help, :h          show this message
  :load, :l <file>   run every line of <file>
  :store, :s         list stored definitions
  :quit, :q          leave";

/// What the loop should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplAction {
    /// Nothing to print.
    Continue,
    /// Print this and keep going.
    Print(String),
    /// Leave the loop.
    Quit,
}

/// REPL state: the evaluation session and the prompt.
pub struct Repl {
    session: Session,
    prompt: String,
}

impl Repl {
    /// Creates a REPL around `session`.
    pub fn new(session: Session) -> Self {
        Self {
            session,
            prompt: "cham> ".to_owned(),
        }
    }

    /// Replaces the prompt.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// The underlying session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Runs until `:quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> io::Result<()> {
        writeln!(output, "cham interpreter (type :help for commands)")?;
        loop {
            write!(output, "{}", self.prompt)?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                break;
            }
            match self.process_line(&line) {
                ReplAction::Continue => {}
                ReplAction::Print(text) => writeln!(output, "{text}")?,
                ReplAction::Quit => break,
            }
        }
        writeln!(output, "Goodbye!")
    }

    /// Handles one line of input. Errors are turned into printable text.
    pub fn process_line(&mut self, line: &str) -> ReplAction {
        let line = line.trim();
        if line.is_empty() {
            return ReplAction::Continue;
        }
        // Programs open with an input and definitions with a name, so a
        // leading `:` is always a command.
        let Some(command) = line.strip_prefix(':') else {
            return match self.session.eval_line(line) {
                Ok(reply) => ReplAction::Print(self.session.render(&reply)),
                Err(err) => ReplAction::Print(err.to_string()),
            };
        };

        let mut words = command.split_whitespace();
        let name = words.next().unwrap_or_default();
        match name {
            "q" | "quit" => ReplAction::Quit,
            "h" | "help" => ReplAction::Print(HELP.to_owned()),
            "s" | "store" => ReplAction::Print(self.list_store()),
            "l" | "load" => match words.next() {
                Some(path) => ReplAction::Print(self.load(path)),
                None => ReplAction::Print("usage: :load <file>".to_owned()),
            },
            other => ReplAction::Print(format!("unknown command: :{other}")),
        }
    }

    fn list_store(&self) -> String {
        let names = self.session.store().names();
        let mut out = format!("stored reactions ({}):", names.len());
        for name in names {
            out.push_str("\n  :");
            out.push_str(name);
        }
        out
    }

    fn load(&mut self, path: &str) -> String {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) => return format!("error reading {path}: {err}"),
        };
        let mut lines = Vec::new();
        let outcome = self.session.eval_source(&source, |text| lines.push(text));
        match outcome {
            Ok(_) => lines.push("OK".to_owned()),
            Err(err) => lines.push(err.to_string()),
        }
        lines.join("\n")
    }
}
