//! Invariant-violation errors for base-pair input.
//!
//! Only malformed pairing input aborts a call. Geometric degeneracies
//! (collinear boundaries, zero-area triangles, missing coordinates) are
//! handled by silent omission and never reach this type.

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PairingError {
    #[error("chain must contain at least one residue")]
    EmptyChain,

    #[error("base pair ({i}, {j}) has an endpoint outside 1..={n_res}")]
    OutOfRange { i: usize, j: usize, n_res: usize },

    #[error("residue {res} cannot pair with itself")]
    SelfPaired { res: usize },

    #[error("residue {res} appears in more than one base pair")]
    MultiplyPaired { res: usize },

    #[error("base pairs {a:?} and {b:?} cross; extract the main layer first")]
    Crossing {
        a: (usize, usize),
        b: (usize, usize),
    },
}

pub type Result<T> = std::result::Result<T, PairingError>;
