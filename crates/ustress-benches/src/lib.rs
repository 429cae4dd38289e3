// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Criterion benchmarks for `ustress-kernels`; see `benches/`.
