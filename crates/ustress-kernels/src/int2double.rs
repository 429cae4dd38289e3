// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Repeated integer to double conversions.

use crate::sink;

/// Sum `runs, runs - 1, …, 1`, converting each counter value to `f64`.
#[inline]
pub fn kernel(runs: u64) -> f64 {
    let mut result = 0.0_f64;
    for n in (1..=runs).rev() {
        result += n as f64;
    }
    result
}

/// Stress the int to double conversion path for `runs` iterations.
pub fn stress(runs: u64) {
    sink::observe(kernel(runs));
}
