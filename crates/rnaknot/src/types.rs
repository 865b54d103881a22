//! Core domain types shared across the pipeline.
//!
//! Residues are numbered by positive integers, dense and 1-based within a
//! single chain. All entities here are plain data: they are built once by the
//! pipeline stages and never mutated afterwards.

use nalgebra::Vector3;

/// Classification of a base pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PairKind {
    #[default]
    Unclassified,
    Canonical,
    NonCanonical,
}

/// Unordered pair of residue indices `{i, j}`, 1-based, `i != j`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BasePair {
    pub i: usize,
    pub j: usize,
    pub kind: PairKind,
}

impl BasePair {
    #[inline]
    pub fn new(i: usize, j: usize) -> Self {
        Self {
            i,
            j,
            kind: PairKind::Unclassified,
        }
    }

    #[inline]
    pub fn with_kind(i: usize, j: usize, kind: PairKind) -> Self {
        Self { i, j, kind }
    }

    /// Endpoints as `(min, max)`.
    #[inline]
    pub fn sorted(&self) -> (usize, usize) {
        (self.i.min(self.j), self.i.max(self.j))
    }
}

/// Structural loop kind derived from the immediate-child count of the outer
/// closing pair: 0 children is a hairpin, 1 an internal loop (covers bulges
/// and stacks), 2 or more a multi-branch loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopKind {
    Hairpin,
    Internal,
    Multi,
    Unknown,
}

/// Closed structural element bounded by an outer base pair.
///
/// Invariants:
/// - `closing_pairs[0]` is the outer pair; the rest are its immediate
///   children in encounter order.
/// - `boundary_residues` are the unpaired residues on the loop boundary,
///   ascending.
/// - `id` is monotone in the outer pair's left endpoint across a chain.
#[derive(Clone, Debug)]
pub struct Loop {
    pub id: usize,
    pub kind: LoopKind,
    pub closing_pairs: Vec<BasePair>,
    pub boundary_residues: Vec<usize>,
}

impl Loop {
    /// Outer closing pair endpoints as `(min, max)`.
    #[inline]
    pub fn outer(&self) -> (usize, usize) {
        self.closing_pairs[0].sorted()
    }
}

/// Which backbone atom a polyline endpoint came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AtomKind {
    #[default]
    Single,
    P,
    C4,
}

/// Per-residue backbone coordinates.
///
/// `atoms` is an ordered list of 3-D points addressed by atom index; a
/// non-finite component marks the atom as absent. Records may arrive in any
/// residue order.
#[derive(Clone, Debug)]
pub struct ResidueCoord {
    /// 1-based residue index.
    pub res_index: usize,
    pub atoms: Vec<Vector3<f64>>,
}

impl ResidueCoord {
    #[inline]
    pub fn new(res_index: usize, atoms: Vec<Vector3<f64>>) -> Self {
        Self { res_index, atoms }
    }
}
