use crate::core::utils::MAX_QUBITS;

/// Limits and tolerances applied by a [`Circuit`](crate::Circuit).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircuitConfig {
    /// Above this many qubits a warning is logged on construction.
    pub warn_qubits: usize,
    /// Circuits larger than this are refused. Every column allocates a
    /// `2^n x 2^n` matrix, so memory grows as `4^n`. Values above
    /// [`MAX_QUBITS`] are capped to it.
    pub max_qubits: usize,
    /// Amplitudes with a smaller modulus are treated as zero by
    /// [`Circuit::format_output`](crate::Circuit::format_output) and when
    /// labelling the input state in diagrams.
    pub tolerance: f64,
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self {
            warn_qubits: 8,
            max_qubits: MAX_QUBITS,
            tolerance: 1e-10,
        }
    }
}

impl CircuitConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_warn_qubits(mut self, warn_qubits: usize) -> Self {
        self.warn_qubits = warn_qubits;
        self
    }

    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}
