// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `cham` binary entry point.

fn main() -> std::process::ExitCode {
    cham_cli::cli::entrypoint()
}
