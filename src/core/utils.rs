//! Utility functions for assembling multi-qubit objects.
//!
//! This module contains helper functions for:
//! - Tensor products over per-qubit operator lists.
//! - Classical basis kets and initial statevectors.
//! - Bit manipulation for ket labels.
//!
//! Every routine here uses the same qubit ordering: the operator for the
//! highest-numbered qubit is outermost (leftmost) in the Kronecker product
//! and qubit 0 is innermost. For an n-qubit system qubit `q` therefore sits
//! at bit `q` of a basis index, and the printed ket reads qubit `n-1` first.

use crate::core::complex::{ONE, ZERO};
use crate::core::errors::{CircuitError, MatrixError};
use crate::core::matrix::Matrix;

/// Largest system any operator or statevector is built for. A full
/// operator takes `16 * 4^n` bytes, 4 GiB at this size.
pub const MAX_QUBITS: usize = 14;

/// Tensors a per-qubit list together, `ops[n-1] ⊗ ... ⊗ ops[1] ⊗ ops[0]`.
///
/// The accumulator starts at `ops[0]` and each following entry is
/// left-tensored onto it.
pub fn tensor_chain(ops: &[Matrix]) -> Result<Matrix, MatrixError> {
    let (first, rest) = ops.split_first().ok_or(MatrixError::EmptyTensorChain)?;
    Ok(rest
        .iter()
        .fold(first.clone(), |acc, op| op.tensor_product(&acc)))
}

/// Same as [`tensor_chain`] but over borrowed matrices.
pub fn tensor_chain_refs<'a, I>(ops: I) -> Result<Matrix, MatrixError>
where
    I: IntoIterator<Item = &'a Matrix>,
{
    let mut iter = ops.into_iter();
    let first = iter.next().ok_or(MatrixError::EmptyTensorChain)?;
    Ok(iter.fold(first.clone(), |acc, op| op.tensor_product(&acc)))
}

/// Column vector for a single classical qubit, `|0>` or `|1>`.
pub fn basis_ket(one: bool) -> Matrix {
    if one {
        Matrix::column_vector(vec![ZERO, ONE])
    } else {
        Matrix::column_vector(vec![ONE, ZERO])
    }
}

/// Builds the `2^n x 1` input statevector from per-qubit digits.
///
/// Character `i` of `digits` is the classical state of qubit `i`, so
/// `"01"` (qubit 0 in `|0>`, qubit 1 in `|1>`) yields the ket `|10>`.
pub fn build_initial_state(digits: &str) -> Result<Matrix, CircuitError> {
    let requested = digits.chars().count();
    if requested > MAX_QUBITS {
        return Err(CircuitError::QubitLimitExceeded {
            requested,
            max: MAX_QUBITS,
        });
    }

    let kets = digits
        .chars()
        .map(|d| match d {
            '0' => Ok(basis_ket(false)),
            '1' => Ok(basis_ket(true)),
            other => Err(CircuitError::InvalidBasisDigit(other)),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if kets.is_empty() {
        return Err(CircuitError::NoQubits);
    }

    Ok(tensor_chain(&kets)?)
}

/// Renders `index` as an `n`-character bit string, qubit `n-1` first.
pub fn ket_label(index: usize, num_qubits: usize) -> String {
    (0..num_qubits)
        .rev()
        .map(|bit| if (index >> bit) & 1 == 1 { '1' } else { '0' })
        .collect()
}

/// Classical value of `qubit` within basis `index`.
pub fn qubit_bit(index: usize, qubit: usize) -> bool {
    (index >> qubit) & 1 == 1
}
