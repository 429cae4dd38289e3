// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Optimization barrier for kernel results.

use std::hint::black_box;

/// Mark `value` as observed so the computation producing it is kept.
///
/// Acts like a volatile store of the value: the compiler must materialize it,
/// but nothing is written anywhere a caller could see.
#[inline]
pub fn observe<T>(value: T) {
    let _ = black_box(value);
}
