//! Pair map construction and loop classification.
//!
//! Purpose
//! - Validate base-pair input into a total pairing map, then partition a
//!   non-crossing pair set into closed loops (hairpin / internal / multi)
//!   with their closing pairs, boundary residues, and skip lists.

mod classify;
mod pair_map;

pub use classify::{build_loops, collect_multi_loop_pairs, skip_residues, LoopBuildOptions};
pub use pair_map::PairMap;
