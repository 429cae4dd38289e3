// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Micro-stress CPU kernels.
//!
//! Each kernel is a tight loop that keeps one execution unit busy and nothing
//! else: no allocation, no I/O, no logging, no failure modes. The final value
//! of every loop is routed through [`sink::observe`] so the optimizer cannot
//! drop the work as dead code.
//!
//! - [`fpmac`]: back-to-back dependent double multiply-adds.
//! - [`int2double`]: repeated integer to double conversions.
//!
//! The [`Workload`] registry maps the canonical executable names
//! (`fpmac_workload`, …) to kernels and their calibrated default run counts.
//!
//! # Concurrency
//!
//! Kernels are single-threaded and share nothing. To load several cores, run
//! one independent call per thread or process.
#![forbid(unsafe_code)]

pub mod fpmac;
pub mod int2double;
pub mod sink;

mod workload;
pub use workload::{Workload, WorkloadError};
