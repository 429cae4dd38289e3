// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Launcher for the ustress kernels.
//!
//! The `ustress` binary runs a single workload once and exits. It is meant
//! to be driven by an external harness that picks run counts, fans out across
//! cores, and measures; none of that lives here.
//!
//! Two invocation styles:
//! - by subcommand: `ustress run fpmac --runs 1000000`;
//! - multicall: install or symlink the binary under a workload name
//!   (`fpmac_workload`) and run it with no arguments.

pub mod calibration;
mod cli;

pub use cli::{entrypoint, run_from, Cli, Command, RunOpts};
