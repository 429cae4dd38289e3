// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `ustress`: run one CPU micro-stress workload and exit.

fn main() -> anyhow::Result<()> {
    ustress_cli::entrypoint()
}
