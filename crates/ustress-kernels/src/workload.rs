// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Workload registry: kernel names and calibrated run counts.

use std::fmt;
use std::str::FromStr;

use crate::{fpmac, int2double};

const NAME_SUFFIX: &str = "_workload";

/// A stress kernel selectable by name.
///
/// Canonical names carry a `_workload` suffix because each kernel was
/// historically its own executable. Default run counts are calibrated so a
/// single run takes roughly one second on a contemporary core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Workload {
    /// Dependent FP multiply-add chain ([`fpmac`]).
    FpMac,
    /// Integer to double conversions ([`int2double`]).
    Int2Double,
}

/// Errors resolving a workload by name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkloadError {
    /// No registered workload matches.
    #[error("unknown workload: {0}")]
    Unknown(String),
}

impl Workload {
    /// Every workload, in lookup order.
    pub const ALL: [Workload; 2] = [Workload::FpMac, Workload::Int2Double];

    /// Canonical executable name, e.g. `fpmac_workload`.
    pub fn name(self) -> &'static str {
        match self {
            Workload::FpMac => "fpmac_workload",
            Workload::Int2Double => "int2double_workload",
        }
    }

    /// Calibrated run count used when the caller does not pick one.
    pub fn default_runs(self) -> u64 {
        match self {
            Workload::FpMac => 200_000_000,
            Workload::Int2Double => 1_500_000_000,
        }
    }

    /// Resolve a workload from an executable path or name.
    ///
    /// Returns the first workload, in [`Workload::ALL`] order, whose canonical
    /// name occurs anywhere in `exec`. Matching is on the raw string, so
    /// `/usr/libexec/ustress/fpmac_workload` and `fpmac_workload.exe` both
    /// resolve.
    pub fn from_exec(exec: &str) -> Result<Workload, WorkloadError> {
        Workload::ALL
            .into_iter()
            .find(|w| exec.contains(w.name()))
            .ok_or_else(|| WorkloadError::Unknown(exec.to_owned()))
    }

    /// Run the workload's kernel for `runs` iterations.
    pub fn run(self, runs: u64) {
        match self {
            Workload::FpMac => fpmac::stress(runs),
            Workload::Int2Double => int2double::stress(runs),
        }
    }
}

impl fmt::Display for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Workload {
    type Err = WorkloadError;

    /// Accepts the canonical name (`fpmac_workload`) or its short form (`fpmac`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Workload::ALL
            .into_iter()
            .find(|w| {
                let name = w.name();
                s == name || name.strip_suffix(NAME_SUFFIX) == Some(s)
            })
            .ok_or_else(|| WorkloadError::Unknown(s.to_owned()))
    }
}
