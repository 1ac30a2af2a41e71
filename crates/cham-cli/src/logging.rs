// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `tracing` subscriber setup.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Filter used when nothing else is configured.
pub const DEFAULT_FILTER: &str = "warn";

/// Picks the first non-empty filter: command line, then `RUST_LOG`, then
/// the saved preference, then [`DEFAULT_FILTER`].
pub fn resolve_filter(
    cli: Option<&str>,
    env: Option<&str>,
    prefs: Option<&str>,
) -> String {
    [cli, env, prefs]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_owned()
}

/// Installs a global `fmt` subscriber writing to stderr.
///
/// Results go to stdout, so logs never interleave with program output.
pub fn init(directive: &str) -> Result<()> {
    let filter = EnvFilter::try_new(directive)
        .map_err(|e| anyhow!("invalid log filter `{directive}`: {e}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_wins() {
        assert_eq!(
            resolve_filter(Some("debug"), Some("info"), Some("trace")),
            "debug"
        );
    }

    #[test]
    fn falls_through_blank_sources() {
        assert_eq!(resolve_filter(Some("  "), None, Some("cham_core=trace")), "cham_core=trace");
        assert_eq!(resolve_filter(None, Some(""), None), DEFAULT_FILTER);
    }

    #[test]
    fn environment_beats_prefs() {
        assert_eq!(resolve_filter(None, Some("info"), Some("trace")), "info");
    }
}
