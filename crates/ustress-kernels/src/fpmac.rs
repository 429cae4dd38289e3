// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Floating-point multiply-add stress.
//!
//! Performs back-to-back double multiply-adds where each update consumes the
//! result of the previous one. The chain cannot be reordered or vectorized, so
//! the FP pipeline stays occupied at its dependent-latency limit.
//!
//! The accumulator grows by a factor of `1 + MUL` per update and saturates to
//! `+inf` after a few hundred updates. That is expected: the value is thrown
//! away, only the executed instructions matter.

use crate::sink;

/// Accumulator seed.
pub const SEED: f64 = 1e20;

/// Multiplier applied on every update.
pub const MUL: f64 = 2.1;

/// Dependent updates per outer iteration.
pub const UPDATES_PER_RUN: u64 = 4;

/// One multiply-add update: `acc + acc * mul`.
///
/// Written as a separate multiply and add. `f64::mul_add` would round once
/// instead of twice and change the result bits.
#[inline]
pub fn mad(acc: f64, mul: f64) -> f64 {
    acc + (acc * mul)
}

/// Run `runs` iterations of four dependent updates and return the accumulator.
#[inline]
pub fn kernel(runs: u64, seed: f64, mul: f64) -> f64 {
    kernel_with(runs, seed, mul, mad)
}

/// [`kernel`] with the update supplied by the caller.
///
/// `step` is called exactly [`UPDATES_PER_RUN`] times per iteration, always
/// with the previous step's output.
#[inline]
pub fn kernel_with<F>(runs: u64, seed: f64, mul: f64, mut step: F) -> f64
where
    F: FnMut(f64, f64) -> f64,
{
    let mut result = seed;
    for _ in 0..runs {
        result = step(result, mul);
        result = step(result, mul);
        result = step(result, mul);
        result = step(result, mul);
    }
    result
}

/// Stress the FP multiply-add pipeline for `runs` iterations.
///
/// `runs == 0` returns immediately. Never fails, never allocates.
pub fn stress(runs: u64) {
    sink::observe(kernel(runs, SEED, MUL));
}
