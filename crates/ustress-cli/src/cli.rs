// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Argument parsing and dispatch for the `ustress` binary.

use std::ffi::{OsStr, OsString};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use ustress_kernels::Workload;

use crate::calibration::{Calibration, FsConfigStore, USER_CALIBRATION_KEY};

/// Command line of the `ustress` binary.
#[derive(Parser, Debug)]
#[command(
    name = "ustress",
    author,
    version,
    about = "Run a single CPU micro-stress workload",
    long_about = None,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Action to perform
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one workload to completion.
    Run {
        /// Workload name, e.g. `fpmac` or `fpmac_workload`
        workload: Workload,
        /// Run count and calibration source
        #[command(flatten)]
        opts: RunOpts,
    },
    /// Print each workload with its effective run count.
    List {
        /// Calibration file (JSON) overriding default run counts
        #[arg(long, value_name = "FILE")]
        calibration: Option<PathBuf>,
    },
}

/// Options shared by `run` and multicall invocations.
#[derive(Args, Debug, Default, Clone)]
pub struct RunOpts {
    /// Outer-loop iterations; overrides any calibration
    #[arg(long)]
    pub runs: Option<u64>,
    /// Calibration file (JSON) overriding default run counts
    #[arg(long, value_name = "FILE")]
    pub calibration: Option<PathBuf>,
}

/// Arguments when the binary is invoked under a workload's name.
#[derive(Parser, Debug)]
#[command(about = "Run the workload named by this executable")]
struct MulticallArgs {
    #[command(flatten)]
    opts: RunOpts,
}

/// Binary entrypoint: install logging, then dispatch on the process arguments.
pub fn entrypoint() -> Result<()> {
    init_tracing()?;
    run_from(std::env::args_os())
}

/// Dispatch on an explicit argument vector (`args[0]` is the program name).
///
/// If the file name of `args[0]` names a workload, that workload runs
/// directly. Otherwise the arguments are parsed as [`Cli`]. Parse errors and
/// `--help` exit the process the usual clap way.
pub fn run_from<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if let Some(workload) = args.first().and_then(|arg0| multicall_workload(arg0)) {
        let multicall = MulticallArgs::parse_from(args);
        return run_workload(workload, &multicall.opts);
    }
    let cli = Cli::parse_from(args);
    execute(cli, &mut io::stdout().lock())
}

fn execute(cli: Cli, out: &mut impl Write) -> Result<()> {
    match cli.command {
        Command::Run { workload, opts } => run_workload(workload, &opts),
        Command::List { calibration } => {
            let calibration = load_calibration(calibration.as_deref())?;
            list(out, &calibration).context("failed to write workload list")
        }
    }
}

fn multicall_workload(arg0: &OsStr) -> Option<Workload> {
    let name = Path::new(arg0).file_name()?.to_str()?;
    Workload::from_exec(name).ok()
}

fn run_workload(workload: Workload, opts: &RunOpts) -> Result<()> {
    let runs = match opts.runs {
        Some(runs) => runs,
        None => load_calibration(opts.calibration.as_deref())?.runs_for(workload),
    };
    info!(%workload, runs, "running workload");
    workload.run(runs);
    info!(%workload, "workload finished");
    Ok(())
}

fn load_calibration(path: Option<&Path>) -> Result<Calibration> {
    if let Some(path) = path {
        debug!(path = %path.display(), "loading calibration");
        let (store, key) = FsConfigStore::for_file(path);
        return Calibration::load(store, &key)
            .with_context(|| format!("failed to load calibration {}", path.display()));
    }
    match FsConfigStore::user() {
        Ok(store) => {
            debug!(dir = %store.base().display(), "checking user calibration");
            Calibration::load_or_default(store, USER_CALIBRATION_KEY)
                .context("failed to load user calibration")
        }
        Err(err) => {
            debug!(error = %err, "no user calibration; using defaults");
            Ok(Calibration::default())
        }
    }
}

fn list(out: &mut impl Write, calibration: &Calibration) -> io::Result<()> {
    for workload in Workload::ALL {
        writeln!(out, "{}\t{}", workload.name(), calibration.runs_for(workload))?;
    }
    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}
