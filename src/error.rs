use thiserror::Error;

/// Result alias used by the connectivity entry points.
pub type ConnectivityResult<T> = Result<T, ConnectivityError>;

/// Errors raised while building or verifying a connectivity table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectivityError {
    /// A block does not satisfy the minimum 2x2x2 node requirement.
    #[error("block {index} has dimensions {imax}x{jmax}x{kmax}: every axis needs at least two nodes")]
    MalformedBlock {
        index: usize,
        imax: usize,
        jmax: usize,
        kmax: usize,
    },

    /// A reported match failed the geometric re-check of its two index ranges.
    #[error("match {match_index} between block {block1} and block {block2} failed geometric verification")]
    Verification {
        match_index: usize,
        block1: usize,
        block2: usize,
    },
}

impl ConnectivityError {
    pub fn malformed_block(index: usize, imax: usize, jmax: usize, kmax: usize) -> Self {
        ConnectivityError::MalformedBlock {
            index,
            imax,
            jmax,
            kmax,
        }
    }

    pub fn verification(match_index: usize, block1: usize, block2: usize) -> Self {
        ConnectivityError::Verification {
            match_index,
            block1,
            block2,
        }
    }
}
