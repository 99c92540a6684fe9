use crate::core::complex::{ONE, ZERO, c64};
use crate::core::errors::GateError;
use crate::core::matrix::Matrix;
use crate::core::utils;
use ndarray::arr2;
use std::f64::consts::FRAC_1_SQRT_2;

/// Computational basis state selected by a projector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Basis {
    Zero,
    One,
}

/// The fixed single-qubit operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GateKind {
    Identity,
    PauliX,
    PauliY,
    PauliZ,
    Hadamard,
    /// `|0><0|` or `|1><1|`. Not unitary, only used to build controlled gates.
    Projector(Basis),
}

impl GateKind {
    /// Display symbol used by the diagram renderer.
    pub fn symbol(self) -> &'static str {
        match self {
            GateKind::Identity => "I",
            GateKind::PauliX => "X",
            GateKind::PauliY => "Y",
            GateKind::PauliZ => "Z",
            GateKind::Hadamard => "H",
            GateKind::Projector(_) => "P",
        }
    }

    /// The 2x2 matrix of this operator.
    pub fn matrix(self) -> Matrix {
        match self {
            GateKind::Identity => identity(2),
            GateKind::PauliX => Matrix::from(arr2(&[[ZERO, ONE], [ONE, ZERO]])),
            GateKind::PauliY => Matrix::from(arr2(&[
                [ZERO, c64(0.0, -1.0)],
                [c64(0.0, 1.0), ZERO],
            ])),
            GateKind::PauliZ => Matrix::from(arr2(&[[ONE, ZERO], [ZERO, c64(-1.0, 0.0)]])),
            GateKind::Hadamard => {
                let f = FRAC_1_SQRT_2;
                Matrix::from(arr2(&[
                    [c64(f, 0.0), c64(f, 0.0)],
                    [c64(f, 0.0), c64(-f, 0.0)],
                ]))
            }
            GateKind::Projector(Basis::Zero) => Matrix::from(arr2(&[[ONE, ZERO], [ZERO, ZERO]])),
            GateKind::Projector(Basis::One) => Matrix::from(arr2(&[[ZERO, ZERO], [ZERO, ONE]])),
        }
    }

    /// Whether a controlled variant of this gate exists.
    pub fn is_controllable(self) -> bool {
        matches!(
            self,
            GateKind::PauliX | GateKind::PauliY | GateKind::PauliZ | GateKind::Hadamard
        )
    }
}

/// Identity of arbitrary size `k x k`.
pub fn identity(size: usize) -> Matrix {
    Matrix::identity(size)
}

/// A fixed operator placed on one qubit.
#[derive(Clone, Debug, PartialEq)]
pub struct SingleQubitGate {
    kind: GateKind,
    qubit: usize,
    matrix: Matrix,
}

impl SingleQubitGate {
    pub fn new(kind: GateKind, qubit: usize) -> Self {
        Self {
            kind,
            qubit,
            matrix: kind.matrix(),
        }
    }

    /// Identity filler for an otherwise empty lane.
    pub fn identity(qubit: usize) -> Self {
        Self::new(GateKind::Identity, qubit)
    }

    pub fn projector(basis: Basis) -> Self {
        Self::new(GateKind::Projector(basis), 0)
    }

    pub fn kind(&self) -> GateKind {
        self.kind
    }

    pub fn qubit(&self) -> usize {
        self.qubit
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn symbol(&self) -> &'static str {
        self.kind.symbol()
    }

    pub fn is_identity(&self) -> bool {
        self.kind == GateKind::Identity
    }
}

/// A single-qubit gate applied to `target` only when `control` is `|1>`.
///
/// The matrix spans the whole `num_qubits` system, so a gate built for one
/// system size cannot be reused in another; see [`ControlledGate::resized`].
#[derive(Clone, Debug, PartialEq)]
pub struct ControlledGate {
    base: GateKind,
    control: usize,
    target: usize,
    num_qubits: usize,
    matrix: Matrix,
}

impl ControlledGate {
    /// Creates a controlled gate over a `num_qubits` system.
    ///
    /// # Errors
    ///
    /// Returns a `GateError` if:
    /// - `base` has no controlled variant.
    /// - `num_qubits` exceeds [`MAX_QUBITS`](utils::MAX_QUBITS).
    /// - `control` or `target` is not below `num_qubits`.
    /// - `control == target`.
    pub fn new(
        base: GateKind,
        control: usize,
        target: usize,
        num_qubits: usize,
    ) -> Result<Self, GateError> {
        if !base.is_controllable() {
            return Err(GateError::NotControllable(base));
        }
        if num_qubits > utils::MAX_QUBITS {
            return Err(GateError::TooManyQubits {
                requested: num_qubits,
                max: utils::MAX_QUBITS,
            });
        }
        for qubit in [control, target] {
            if qubit >= num_qubits {
                return Err(GateError::QubitOutOfRange { qubit, num_qubits });
            }
        }
        if control == target {
            return Err(GateError::ControlTargetOverlap(control));
        }

        let matrix = Self::construct_matrix(&base.matrix(), control, target, num_qubits)?;

        Ok(Self {
            base,
            control,
            target,
            num_qubits,
            matrix,
        })
    }

    /// Projector decomposition `P0(c) ⊗ I... + P1(c) ⊗ U(t) ⊗ I...`.
    fn construct_matrix(
        gate: &Matrix,
        control: usize,
        target: usize,
        num_qubits: usize,
    ) -> Result<Matrix, GateError> {
        let id = identity(2);
        let p0 = GateKind::Projector(Basis::Zero).matrix();
        let p1 = GateKind::Projector(Basis::One).matrix();

        let mut idle = Vec::with_capacity(num_qubits);
        let mut active = Vec::with_capacity(num_qubits);
        for q in 0..num_qubits {
            if q == control {
                idle.push(p0.clone());
                active.push(p1.clone());
            } else if q == target {
                idle.push(id.clone());
                active.push(gate.clone());
            } else {
                idle.push(id.clone());
                active.push(id.clone());
            }
        }

        let idle = utils::tensor_chain(&idle)?;
        let active = utils::tensor_chain(&active)?;
        Ok(idle.checked_add(&active)?)
    }

    /// Rebuilds the same gate for a system of `num_qubits`.
    pub fn resized(&self, num_qubits: usize) -> Result<Self, GateError> {
        Self::new(self.base, self.control, self.target, num_qubits)
    }

    pub fn base(&self) -> GateKind {
        self.base
    }

    pub fn control(&self) -> usize {
        self.control
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Symbol of the base gate, drawn in the target box.
    pub fn symbol(&self) -> &'static str {
        self.base.symbol()
    }
}

/// Represents a quantum gate as placed by the circuit builder.
#[derive(Clone, Debug, PartialEq)]
pub enum Gate {
    Single(SingleQubitGate),
    Controlled(ControlledGate),
}

impl Gate {
    // --- Standard Gates ---

    /// Creates a Pauli-X gate (NOT gate) on `qubit`.
    pub fn pauli_x(qubit: usize) -> Gate {
        Gate::Single(SingleQubitGate::new(GateKind::PauliX, qubit))
    }

    /// Creates a Pauli-Y gate on `qubit`.
    pub fn pauli_y(qubit: usize) -> Gate {
        Gate::Single(SingleQubitGate::new(GateKind::PauliY, qubit))
    }

    /// Creates a Pauli-Z gate on `qubit`.
    pub fn pauli_z(qubit: usize) -> Gate {
        Gate::Single(SingleQubitGate::new(GateKind::PauliZ, qubit))
    }

    /// Creates a Hadamard gate on `qubit`.
    pub fn hadamard(qubit: usize) -> Gate {
        Gate::Single(SingleQubitGate::new(GateKind::Hadamard, qubit))
    }

    /// Creates a CNOT (Controlled-X) gate.
    pub fn controlled_x(control: usize, target: usize, num_qubits: usize) -> Result<Gate, GateError> {
        ControlledGate::new(GateKind::PauliX, control, target, num_qubits).map(Gate::Controlled)
    }

    /// Creates a Controlled-Y gate.
    pub fn controlled_y(control: usize, target: usize, num_qubits: usize) -> Result<Gate, GateError> {
        ControlledGate::new(GateKind::PauliY, control, target, num_qubits).map(Gate::Controlled)
    }

    /// Creates a Controlled-Z gate.
    pub fn controlled_z(control: usize, target: usize, num_qubits: usize) -> Result<Gate, GateError> {
        ControlledGate::new(GateKind::PauliZ, control, target, num_qubits).map(Gate::Controlled)
    }

    /// Creates a Controlled-H gate.
    pub fn controlled_h(control: usize, target: usize, num_qubits: usize) -> Result<Gate, GateError> {
        ControlledGate::new(GateKind::Hadamard, control, target, num_qubits).map(Gate::Controlled)
    }

    /// Looks a gate up by its component-library name.
    ///
    /// `x`, `y`, `z` and `h` take one qubit index; `cx`, `cy`, `cz` and `ch`
    /// take `[control, target]`.
    pub fn from_name(name: &str, qubits: &[usize], num_qubits: usize) -> Result<Gate, GateError> {
        let (kind, controlled) = match name.to_ascii_lowercase().as_str() {
            "x" => (GateKind::PauliX, false),
            "y" => (GateKind::PauliY, false),
            "z" => (GateKind::PauliZ, false),
            "h" => (GateKind::Hadamard, false),
            "cx" => (GateKind::PauliX, true),
            "cy" => (GateKind::PauliY, true),
            "cz" => (GateKind::PauliZ, true),
            "ch" => (GateKind::Hadamard, true),
            _ => return Err(GateError::UnknownGate(name.to_string())),
        };

        let expected = if controlled { 2 } else { 1 };
        if qubits.len() != expected {
            return Err(GateError::QubitCountMismatch {
                name: name.to_string(),
                expected,
                got: qubits.len(),
            });
        }

        if controlled {
            ControlledGate::new(kind, qubits[0], qubits[1], num_qubits).map(Gate::Controlled)
        } else {
            if qubits[0] >= num_qubits {
                return Err(GateError::QubitOutOfRange {
                    qubit: qubits[0],
                    num_qubits,
                });
            }
            Ok(Gate::Single(SingleQubitGate::new(kind, qubits[0])))
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Gate::Single(g) => g.symbol(),
            Gate::Controlled(g) => g.symbol(),
        }
    }

    pub fn matrix(&self) -> &Matrix {
        match self {
            Gate::Single(g) => g.matrix(),
            Gate::Controlled(g) => g.matrix(),
        }
    }

    /// Control and target indices for controlled gates.
    pub fn control_target(&self) -> Option<(usize, usize)> {
        match self {
            Gate::Single(_) => None,
            Gate::Controlled(g) => Some((g.control(), g.target())),
        }
    }
}

impl From<SingleQubitGate> for Gate {
    fn from(gate: SingleQubitGate) -> Self {
        Gate::Single(gate)
    }
}

impl From<ControlledGate> for Gate {
    fn from(gate: ControlledGate) -> Self {
        Gate::Controlled(gate)
    }
}
