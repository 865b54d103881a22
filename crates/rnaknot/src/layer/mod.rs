//! Maximum pseudoknot-free layer extraction.
//!
//! Purpose
//! - From an arbitrary (possibly crossing) base-pair set, select a
//!   maximum-cardinality subset in which no two pairs cross, via a
//!   Nussinov-style interval dynamic program with reconstruction.
//!
//! Complexity
//! - Endpoints are compressed to `0..L-1` first, so the table is O(L^2) and
//!   the fill O(L^3) in the number of *unique endpoints*, not in the largest
//!   residue index.

use std::collections::{HashMap, HashSet};

use crate::error::{PairingError, Result};
use crate::types::{BasePair, PairKind};

/// Return the largest subset of `pairs` in which no two pairs cross.
///
/// Two pairs `(a, b)` and `(c, d)` with `a < b`, `c < d` cross iff
/// `a < c < b < d` or `c < a < d < b`. Duplicate pairs are tolerated (the
/// first occurrence's classification tag wins); a self-paired input is an
/// invariant violation. Output pairs are `(min, max)`-ordered and keep the
/// tag of the same unordered endpoints in the input.
pub fn extract_main_layer(pairs: &[BasePair]) -> Result<Vec<BasePair>> {
    if pairs.is_empty() {
        return Ok(Vec::new());
    }
    let mut sorted: Vec<(usize, usize)> = Vec::with_capacity(pairs.len());
    let mut tags: HashMap<(usize, usize), PairKind> = HashMap::with_capacity(pairs.len());
    for bp in pairs {
        if bp.i == bp.j {
            return Err(PairingError::SelfPaired { res: bp.i });
        }
        let key = bp.sorted();
        sorted.push(key);
        tags.entry(key).or_insert(bp.kind);
    }

    let (compressed, inv) = compress(&sorted);
    let selected = solve(&compressed, inv.len());

    Ok(selected
        .into_iter()
        .map(|(ci, cj)| {
            let key = (inv[ci], inv[cj]);
            BasePair::with_kind(key.0, key.1, tags.get(&key).copied().unwrap_or_default())
        })
        .collect())
}

/// Map endpoints onto `0..L-1` by rank in the sorted unique endpoint set.
/// Returns the compressed pairs and the rank-to-residue table.
fn compress(pairs: &[(usize, usize)]) -> (Vec<(usize, usize)>, Vec<usize>) {
    let mut inv: Vec<usize> = pairs.iter().flat_map(|&(i, j)| [i, j]).collect();
    inv.sort_unstable();
    inv.dedup();
    let rank: HashMap<usize, usize> = inv.iter().enumerate().map(|(r, &res)| (res, r)).collect();
    let compressed = pairs.iter().map(|&(i, j)| (rank[&i], rank[&j])).collect();
    (compressed, inv)
}

/// Nussinov gamma table plus backtrace over compressed indices.
fn solve(pairs: &[(usize, usize)], len: usize) -> Vec<(usize, usize)> {
    if len < 2 {
        return Vec::new();
    }
    let pair_set: HashSet<(usize, usize)> = pairs.iter().copied().collect();
    let mut gamma = vec![vec![0usize; len]; len];
    // Out-of-range and empty intervals score zero.
    let g = |gamma: &Vec<Vec<usize>>, i: usize, j: usize| -> usize {
        if i >= len || j >= len || i > j {
            0
        } else {
            gamma[i][j]
        }
    };

    for d in 1..len {
        for i in 0..len - d {
            let j = i + d;
            let mut best = g(&gamma, i + 1, j).max(g(&gamma, i, j - 1));
            let diag = g(&gamma, i + 1, j - 1);
            if pair_set.contains(&(i, j)) {
                best = best.max(diag + 1);
            } else {
                best = best.max(diag);
            }
            for k in i..j {
                best = best.max(g(&gamma, i, k) + g(&gamma, k + 1, j));
            }
            gamma[i][j] = best;
        }
    }

    // Reconstruction: worklist of intervals; first matching case wins, and a
    // residue already emitted for one pair never re-pairs.
    let mut layer = Vec::new();
    let mut emitted = vec![false; len];
    let mut stack = vec![(0usize, len - 1)];
    while let Some((i, j)) = stack.pop() {
        if i >= j {
            continue;
        }
        if g(&gamma, i + 1, j) == gamma[i][j] {
            stack.push((i + 1, j));
            continue;
        }
        if g(&gamma, i, j - 1) == gamma[i][j] {
            stack.push((i, j - 1));
            continue;
        }
        if pair_set.contains(&(i, j))
            && g(&gamma, i + 1, j - 1) + 1 == gamma[i][j]
            && !emitted[i]
            && !emitted[j]
        {
            emitted[i] = true;
            emitted[j] = true;
            layer.push((i, j));
            stack.push((i + 1, j - 1));
            continue;
        }
        for k in i..j {
            if g(&gamma, i, k) + g(&gamma, k + 1, j) == gamma[i][j] {
                stack.push((k + 1, j));
                stack.push((i, k));
                break;
            }
        }
    }
    layer
}
