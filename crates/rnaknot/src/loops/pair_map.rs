use crate::error::{PairingError, Result};
use crate::types::BasePair;

/// Total pairing map over residues `1..=n_res`.
///
/// Invariants: `partner(i) = Some(j)` iff `partner(j) = Some(i)`, and each
/// residue is paired at most once. Construction rejects anything else.
#[derive(Clone, Debug)]
pub struct PairMap {
    // slot 0 unused; 0 means unpaired.
    slots: Vec<usize>,
}

impl PairMap {
    pub fn build(pairs: &[BasePair], n_res: usize) -> Result<Self> {
        if n_res == 0 {
            return Err(PairingError::EmptyChain);
        }
        let mut slots = vec![0usize; n_res + 1];
        for bp in pairs {
            if bp.i == 0 || bp.j == 0 || bp.i > n_res || bp.j > n_res {
                return Err(PairingError::OutOfRange {
                    i: bp.i,
                    j: bp.j,
                    n_res,
                });
            }
            if bp.i == bp.j {
                return Err(PairingError::SelfPaired { res: bp.i });
            }
            let (i, j) = bp.sorted();
            if slots[i] != 0 {
                return Err(PairingError::MultiplyPaired { res: i });
            }
            if slots[j] != 0 {
                return Err(PairingError::MultiplyPaired { res: j });
            }
            slots[i] = j;
            slots[j] = i;
        }
        Ok(Self { slots })
    }

    #[inline]
    pub fn n_res(&self) -> usize {
        self.slots.len() - 1
    }

    #[inline]
    pub fn partner(&self, res: usize) -> Option<usize> {
        match self.slots[res] {
            0 => None,
            j => Some(j),
        }
    }

    #[inline]
    pub fn is_paired(&self, res: usize) -> bool {
        self.slots[res] != 0
    }

    /// All pairs as `(i, j)` with `i < j`, ascending in `i`.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (1..=self.n_res()).filter_map(|i| match self.slots[i] {
            j if j > i => Some((i, j)),
            _ => None,
        })
    }

    /// Locate a crossing, if any, by a single stack scan.
    ///
    /// Walking residues left to right, openers are pushed; a closer whose
    /// opener is not on top of the stack crosses the pair that is.
    pub fn find_crossing(&self) -> Option<((usize, usize), (usize, usize))> {
        let mut open: Vec<usize> = Vec::new();
        for i in 1..=self.n_res() {
            let Some(p) = self.partner(i) else {
                continue;
            };
            if p > i {
                open.push(i);
            } else {
                match open.last() {
                    Some(&top) if top == p => {
                        open.pop();
                    }
                    Some(&top) => {
                        return Some(((p, i), (top, self.slots[top])));
                    }
                    None => unreachable!("closer without matching opener"),
                }
            }
        }
        None
    }
}
