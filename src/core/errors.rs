use crate::core::gates::GateKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    #[error("Dimension mismatch in {op}: {left:?} vs {right:?}")]
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("Index ({row}, {col}) out of bounds for a {rows}x{cols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("Tensor product of an empty operator list")]
    EmptyTensorChain,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GateError {
    #[error("Qubit {0} cannot be both control and target")]
    ControlTargetOverlap(usize),

    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit system")]
    QubitOutOfRange { qubit: usize, num_qubits: usize },

    #[error("Gate {0:?} has no controlled variant")]
    NotControllable(GateKind),

    #[error("Gate spans {requested} qubits, limit is {max}")]
    TooManyQubits { requested: usize, max: usize },

    #[error("Unknown gate name: {0}")]
    UnknownGate(String),

    #[error("Gate {name} takes {expected} qubit indices, got {got}")]
    QubitCountMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CircuitError {
    #[error("The circuit has no components")]
    EmptyCircuit,

    #[error("A circuit needs at least one qubit")]
    NoQubits,

    #[error("Requested {requested} qubits, limit is {max}")]
    QubitLimitExceeded { requested: usize, max: usize },

    #[error("Invalid initial state: expected {expected}x1, got {got_rows}x{got_cols}")]
    InvalidInitialState {
        expected: usize,
        got_rows: usize,
        got_cols: usize,
    },

    #[error("Invalid basis digit {0:?}: expected '0' or '1'")]
    InvalidBasisDigit(char),

    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit circuit")]
    QubitOutOfRange { qubit: usize, num_qubits: usize },

    #[error("{0:?} is not a placeable gate")]
    NotPlaceable(GateKind),

    #[error("Gate built for {got} qubits, circuit has {expected}")]
    GateSizeMismatch { expected: usize, got: usize },

    #[error("Invalid statevector size: expected {expected}x1, got {got_rows}x{got_cols}")]
    InvalidStatevector {
        expected: usize,
        got_rows: usize,
        got_cols: usize,
    },

    #[error("Gate error: {0}")]
    GateError(#[from] GateError),

    #[error("Matrix error: {0}")]
    MatrixError(#[from] MatrixError),
}
