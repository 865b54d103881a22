use std::collections::HashMap;

use super::pair_map::PairMap;
use crate::error::{PairingError, Result};
use crate::types::{BasePair, Loop, LoopKind, PairKind};

/// Options for [`build_loops`].
#[derive(Clone, Copy, Debug)]
pub struct LoopBuildOptions {
    /// Run the main-layer extractor first. When unset, the input is assumed
    /// non-crossing and a crossing is an invariant violation.
    pub main_layer_only: bool,
    /// Emit multi-branch loops. Suppressed loops do not consume ids.
    pub include_multi: bool,
}

impl Default for LoopBuildOptions {
    fn default() -> Self {
        Self {
            main_layer_only: false,
            include_multi: true,
        }
    }
}

fn collect_unpaired(map: &PairMap, start: usize, end: usize) -> Vec<usize> {
    if start > end {
        return Vec::new();
    }
    (start..=end).filter(|&k| !map.is_paired(k)).collect()
}

/// Immediate child pairs inside `(i, j)`, in encounter order.
///
/// A residue opens a child when its partner lies to its right and the
/// nesting depth is zero; depth tracks opens and closes so pairs nested
/// inside a child stem are not reported.
fn immediate_child_pairs(map: &PairMap, i: usize, j: usize) -> Vec<BasePair> {
    let mut children = Vec::new();
    let mut depth = 0usize;
    for idx in (i + 1)..j {
        let Some(partner) = map.partner(idx) else {
            continue;
        };
        if idx < partner {
            if depth == 0 {
                children.push(BasePair::new(idx, partner));
            }
            depth += 1;
        } else {
            depth = depth.saturating_sub(1);
        }
    }
    children
}

/// Classify the loop closed by `(i, j)`.
///
/// Returns the kind, the unpaired boundary residues, and the closing pairs
/// (outer first, then immediate children in encounter order).
fn classify(map: &PairMap, i: usize, j: usize) -> (LoopKind, Vec<usize>, Vec<BasePair>) {
    let mut closing = vec![BasePair::new(i, j)];
    let children = immediate_child_pairs(map, i, j);
    closing.extend(children.iter().copied());

    match children.len() {
        0 => (LoopKind::Hairpin, collect_unpaired(map, i + 1, j - 1), closing),
        1 => {
            let (k, l) = children[0].sorted();
            let mut boundary = collect_unpaired(map, i + 1, k - 1);
            boundary.extend(collect_unpaired(map, l + 1, j - 1));
            (LoopKind::Internal, boundary, closing)
        }
        _ => {
            let boundary = collect_unpaired(map, i + 1, j - 1);
            (LoopKind::Multi, boundary, closing)
        }
    }
}

/// Residues whose incident backbone segments must not be tested against the
/// loop's own surface. Sorted and deduplicated.
pub fn skip_residues(lp: &Loop) -> Vec<usize> {
    let mut skip: Vec<usize> = Vec::new();
    if lp.closing_pairs.is_empty() {
        return skip;
    }
    match lp.kind {
        LoopKind::Hairpin | LoopKind::Unknown => {
            let (i, j) = lp.outer();
            skip.extend(i..=j);
        }
        LoopKind::Internal => {
            let (i, j) = lp.outer();
            if lp.closing_pairs.len() < 2 {
                skip.extend(i..=j);
            } else {
                let (k, l) = lp.closing_pairs[1].sorted();
                skip.extend(i..=k);
                skip.extend(l..=j);
            }
        }
        LoopKind::Multi => {
            let mut min_res = usize::MAX;
            let mut max_res = 0usize;
            for pair in &lp.closing_pairs {
                let (i, j) = pair.sorted();
                min_res = min_res.min(i);
                max_res = max_res.max(j);
                skip.push(i);
                skip.push(j);
            }
            if min_res <= max_res {
                skip.extend(min_res..=max_res);
            }
        }
    }
    skip.sort_unstable();
    skip.dedup();
    skip
}

/// Build the loop list for a chain of `n_res` residues.
///
/// Loops are emitted in increasing order of their outer pair's left
/// endpoint and numbered from 1 over emitted loops. Closing pairs keep the
/// classification tag of the same unordered endpoints in `pairs`; derived
/// child pairs not present in the input stay unclassified.
pub fn build_loops(
    pairs: &[BasePair],
    n_res: usize,
    options: &LoopBuildOptions,
) -> Result<Vec<Loop>> {
    if n_res == 0 {
        return Err(PairingError::EmptyChain);
    }
    let layered: Vec<BasePair>;
    let active: &[BasePair] = if options.main_layer_only {
        layered = crate::layer::extract_main_layer(pairs)?;
        &layered
    } else {
        pairs
    };

    let map = PairMap::build(active, n_res)?;
    if !options.main_layer_only {
        if let Some((a, b)) = map.find_crossing() {
            return Err(PairingError::Crossing { a, b });
        }
    }

    let tags: HashMap<(usize, usize), PairKind> =
        active.iter().map(|bp| (bp.sorted(), bp.kind)).collect();
    let tag_of = |bp: &BasePair| tags.get(&bp.sorted()).copied().unwrap_or_default();

    let mut loops = Vec::new();
    let mut loop_id = 1usize;
    for (i, j) in map.pairs() {
        let (kind, boundary, mut closing) = classify(&map, i, j);
        if kind == LoopKind::Multi && !options.include_multi {
            continue;
        }
        for bp in &mut closing {
            bp.kind = tag_of(bp);
        }
        loops.push(Loop {
            id: loop_id,
            kind,
            closing_pairs: closing,
            boundary_residues: boundary,
        });
        loop_id += 1;
    }
    tracing::debug!(
        n_res,
        pairs = active.len(),
        loops = loops.len(),
        "built loop partition"
    );
    Ok(loops)
}

/// Closing pairs that participate in a multi-branch loop, in loop order.
///
/// Convenience for front-ends that highlight multiloop stems; the same
/// pair can close one loop and branch into another, so duplicates are
/// removed (first occurrence wins).
pub fn collect_multi_loop_pairs(
    pairs: &[BasePair],
    n_res: usize,
    options: &LoopBuildOptions,
) -> Result<Vec<BasePair>> {
    let loops = build_loops(pairs, n_res, options)?;
    let mut seen = std::collections::HashSet::new();
    Ok(loops
        .iter()
        .filter(|lp| lp.kind == LoopKind::Multi)
        .flat_map(|lp| lp.closing_pairs.iter().copied())
        .filter(|bp| seen.insert(bp.sorted()))
        .collect())
}
