// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command-line surface of the `cham` binary.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use cham_app_core::config::{ConfigError, ConfigService};
use cham_app_core::prefs::ChamPrefs;
use cham_config_fs::FsConfigStore;
use cham_core::Engine;
use cham_lang::{parse_program, parse_statement, tokenize, ReactionStore, Statement, TokenKind};
use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use crate::logging;
use crate::output::Format;
use crate::repl::Repl;
use crate::session::Session;

/// Top-level arguments.
#[derive(Parser, Debug)]
#[command(name = "cham", version)]
#[command(about = "Chemical-reaction multiset rewriting interpreter")]
pub struct Cli {
    /// Worker threads: 0 uses the shared pool, 1 runs serially, n builds a dedicated pool.
    #[arg(long, global = true, value_name = "N")]
    pub workers: Option<usize>,
    /// `tracing` filter; overrides RUST_LOG and the saved preference.
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,
    /// Directory holding `cham.json` (defaults to the platform config directory).
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
    /// Print solutions as JSON.
    #[arg(long, global = true)]
    pub json: bool,
    /// What to do; defaults to the REPL.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive read-eval-print loop
    Repl,
    /// Evaluate a program given as arguments
    Run {
        /// Program text; multiple arguments are joined with spaces
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        program: Vec<String>,
    },
    /// Run every line of a file (programs and definitions)
    File {
        /// Source file
        path: PathBuf,
    },
    /// Print the tokens of a program, one per line
    Lex {
        /// Program text
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        program: Vec<String>,
    },
    /// Print a parsed program or definition in source syntax
    Parse {
        /// Program text
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        program: Vec<String>,
    },
    /// Print the effective preferences as JSON
    Config {
        /// Also write them to the config directory
        #[arg(long)]
        save: bool,
    },
}

/// Parses arguments, runs, and maps failures to exit code 1.
pub fn entrypoint() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Runs an already-parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let service = open_config(cli.config_dir.as_deref());
    // Best effort: a broken or missing config never stops the interpreter.
    let loaded = match &service {
        Ok(service) => ChamPrefs::load(service).map_err(|e| e.to_string()),
        Err(err) => Err(err.to_string()),
    };
    let (prefs, load_error) = match loaded {
        Ok(prefs) => (prefs, None),
        Err(err) => (ChamPrefs::default(), Some(err)),
    };

    let env_filter = std::env::var("RUST_LOG").ok();
    logging::init(&logging::resolve_filter(
        cli.log_level.as_deref(),
        env_filter.as_deref(),
        prefs.log_filter.as_deref(),
    ))?;
    if let Some(err) = load_error {
        warn!(%err, "saved preferences unavailable; using defaults");
    }

    let mut config = prefs.engine.clone();
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }
    let format = if cli.json { Format::Json } else { Format::Text };
    debug!(?config, ?format, "starting");

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => {
            let mut repl = Repl::new(Session::new(Engine::new(config)?, format));
            repl.run(&mut io::stdin().lock(), &mut io::stdout().lock())?;
        }
        Commands::Run { program } => {
            let source = program.join(" ");
            let program = parse_program(&source, &ReactionStore::new())
                .map_err(|e| anyhow!(e.render(&source)))?;
            let solution = Engine::new(config)?.evaluate(&program)?;
            println!("{}", format.multiset(&solution));
        }
        Commands::File { path } => {
            let source = fs::read_to_string(&path)
                .map_err(|e| anyhow!("failed to read {}: {e}", path.display()))?;
            let mut session = Session::new(Engine::new(config)?, format);
            session.eval_source(&source, |text| println!("{text}"))?;
        }
        Commands::Lex { program } => {
            let source = program.join(" ");
            let tokens = tokenize(&source).map_err(|e| anyhow!(e.render(&source)))?;
            for token in tokens.iter().filter(|t| t.kind != TokenKind::Eof) {
                println!("{token}");
            }
        }
        Commands::Parse { program } => {
            let source = program.join(" ");
            match parse_statement(&source, &ReactionStore::new())
                .map_err(|e| anyhow!(e.render(&source)))?
            {
                Statement::Program(program) => println!("{program}"),
                Statement::Definition(def) => println!("{def}"),
            }
        }
        Commands::Config { save } => {
            let effective = ChamPrefs {
                engine: config,
                log_filter: prefs.log_filter,
            };
            println!("{}", serde_json::to_string_pretty(&effective)?);
            if save {
                let service = service.map_err(|e| anyhow!("no config directory: {e}"))?;
                effective.save(&service)?;
                eprintln!("saved to {}", service.store().base().join("cham.json").display());
            }
        }
    }
    Ok(())
}

fn open_config(dir: Option<&Path>) -> Result<ConfigService<FsConfigStore>, ConfigError> {
    let store = match dir {
        Some(dir) => FsConfigStore::with_base(dir)?,
        None => FsConfigStore::new()?,
    };
    Ok(ConfigService::new(store))
}
