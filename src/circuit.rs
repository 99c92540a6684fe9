//! The circuit register.
//!
//! A [`Circuit`] is a time-ordered list of [`Column`]s. Each column is either
//! a full layer with one single-qubit operator per lane (identity on idle
//! lanes) or a single controlled gate already sized to the whole system.
//! The resultant unitary is the product of the column operators with the
//! oldest column rightmost, so it is applied to the input first.

use crate::braket::format_braket_with_tolerance;
use crate::config::CircuitConfig;
use crate::core::errors::{CircuitError, MatrixError};
use crate::core::utils::{self, MAX_QUBITS, build_initial_state};
use crate::core::{ControlledGate, Gate, GateKind, Matrix, SingleQubitGate};
use std::borrow::Cow;
use tracing::{debug, trace, warn};

/// One time step of the register.
#[derive(Clone, Debug, PartialEq)]
pub enum Column {
    /// One operator per qubit lane, lane `q` at index `q`.
    Layer(Vec<SingleQubitGate>),
    /// A multi-qubit gate spanning the whole system.
    Controlled(ControlledGate),
}

impl Column {
    /// The `2^n x 2^n` operator of this column.
    ///
    /// Layers are tensored with lane `n-1` outermost and lane 0 innermost.
    pub fn operator(&self) -> Result<Cow<'_, Matrix>, MatrixError> {
        match self {
            Column::Layer(lanes) => {
                utils::tensor_chain_refs(lanes.iter().map(SingleQubitGate::matrix)).map(Cow::Owned)
            }
            Column::Controlled(gate) => Ok(Cow::Borrowed(gate.matrix())),
        }
    }

    /// Number of entries: `n` for a layer, 1 for a controlled gate.
    pub fn len(&self) -> usize {
        match self {
            Column::Layer(lanes) => lanes.len(),
            Column::Controlled(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The single-qubit operator on `lane`, if this is a layer.
    pub fn lane(&self, lane: usize) -> Option<&SingleQubitGate> {
        match self {
            Column::Layer(lanes) => lanes.get(lane),
            Column::Controlled(_) => None,
        }
    }

    /// A non-identity single-qubit gate sits on `lane`.
    fn holds_gate(&self, lane: usize) -> bool {
        self.lane(lane).is_some_and(|g| !g.is_identity())
    }

    /// `lane` is an identity filler inside a layer.
    fn is_free(&self, lane: usize) -> bool {
        self.lane(lane).is_some_and(SingleQubitGate::is_identity)
    }

    /// Layer made only of identity fillers.
    pub fn is_idle(&self) -> bool {
        match self {
            Column::Layer(lanes) => lanes.iter().all(SingleQubitGate::is_identity),
            Column::Controlled(_) => false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Circuit {
    qubits: usize,
    input: Matrix,
    columns: Vec<Column>,
    config: CircuitConfig,
}

impl Circuit {
    /// Creates an empty circuit over `qubits` qubits with the given
    /// `2^qubits x 1` input statevector.
    pub fn new(qubits: usize, input: Matrix) -> Result<Self, CircuitError> {
        Self::with_config(qubits, input, CircuitConfig::default())
    }

    pub fn with_config(
        qubits: usize,
        input: Matrix,
        config: CircuitConfig,
    ) -> Result<Self, CircuitError> {
        Self::check_size(qubits, &config)?;
        Self::from_parts(qubits, input, config)
    }

    /// Builds the circuit once `qubits` has passed [`check_size`](Self::check_size).
    fn from_parts(
        qubits: usize,
        input: Matrix,
        config: CircuitConfig,
    ) -> Result<Self, CircuitError> {
        let dim = 1 << qubits;
        let (rows, cols) = input.dim();
        if rows != dim || cols != 1 {
            return Err(CircuitError::InvalidInitialState {
                expected: dim,
                got_rows: rows,
                got_cols: cols,
            });
        }

        Ok(Self {
            qubits,
            input,
            columns: Vec::new(),
            config,
        })
    }

    /// Creates a circuit whose input is the basis state given by `digits`,
    /// character `i` being the state of qubit `i`.
    pub fn from_digits(digits: &str) -> Result<Self, CircuitError> {
        Self::from_digits_with_config(digits, CircuitConfig::default())
    }

    pub fn from_digits_with_config(
        digits: &str,
        config: CircuitConfig,
    ) -> Result<Self, CircuitError> {
        // Bound the size before the 2^n input vector is allocated.
        let qubits = digits.chars().count();
        Self::check_size(qubits, &config)?;
        let input = build_initial_state(digits)?;
        Self::from_parts(qubits, input, config)
    }

    fn check_size(qubits: usize, config: &CircuitConfig) -> Result<(), CircuitError> {
        if qubits == 0 {
            return Err(CircuitError::NoQubits);
        }
        let max = config.max_qubits.min(MAX_QUBITS);
        if qubits > max {
            return Err(CircuitError::QubitLimitExceeded {
                requested: qubits,
                max,
            });
        }
        if qubits > config.warn_qubits {
            warn!(
                qubits,
                threshold = config.warn_qubits,
                "large circuit, memory and time grow as 4^n per column"
            );
        }
        Ok(())
    }

    pub fn qubit_count(&self) -> usize {
        self.qubits
    }

    pub fn input_state(&self) -> &Matrix {
        &self.input
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn config(&self) -> &CircuitConfig {
        &self.config
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Appends `gate` as a new column.
    ///
    /// A single-qubit gate becomes a layer with identity on every other
    /// lane; a controlled gate becomes a column of its own. Identity and
    /// projector operators are lane fillers and cannot be placed. The gate
    /// is validated against the circuit first, so a failed call leaves the
    /// register untouched.
    pub fn add(&mut self, gate: Gate) -> Result<(), CircuitError> {
        let symbol = gate.symbol();
        let column = match gate {
            Gate::Single(gate) => {
                if matches!(gate.kind(), GateKind::Identity | GateKind::Projector(_)) {
                    return Err(CircuitError::NotPlaceable(gate.kind()));
                }
                let target = gate.qubit();
                if target >= self.qubits {
                    return Err(CircuitError::QubitOutOfRange {
                        qubit: target,
                        num_qubits: self.qubits,
                    });
                }
                let mut lanes: Vec<SingleQubitGate> =
                    (0..self.qubits).map(SingleQubitGate::identity).collect();
                lanes[target] = gate;
                Column::Layer(lanes)
            }
            Gate::Controlled(gate) => {
                if gate.num_qubits() != self.qubits {
                    return Err(CircuitError::GateSizeMismatch {
                        expected: self.qubits,
                        got: gate.num_qubits(),
                    });
                }
                Column::Controlled(gate)
            }
        };

        self.columns.push(column);
        debug!(symbol, columns = self.columns.len(), "gate added");
        Ok(())
    }

    /// [`add`](Self::add) followed by [`compact`](Self::compact), the step
    /// an interactive builder performs after each gate choice.
    pub fn place(&mut self, gate: Gate) -> Result<bool, CircuitError> {
        self.add(gate)?;
        Ok(self.compact())
    }

    /// Moves the gates of the last column as far left as their lanes allow.
    ///
    /// Lanes of the last column are visited in order. A non-identity gate
    /// leapfrogs into the column to the left of the cursor while that
    /// column is a layer with an identity on the same lane. The cursor is
    /// shared by all lanes: once a gate has moved, later lanes are read
    /// from the column the cursor now points at. If anything moved, the
    /// trailing column is dropped once it holds only identities.
    ///
    /// The shared cursor can strand a gate in the trailing column (a lane
    /// read after the cursor has moved may find its gate still in the last
    /// column). Such a column is kept rather than dropped, so no gate is
    /// lost. This only arises when the last column holds several gates;
    /// after [`place`](Self::place) it holds exactly one.
    ///
    /// Returns whether any gate moved.
    pub fn compact(&mut self) -> bool {
        if self.columns.len() < 2 {
            return false;
        }

        let last = self.columns.len() - 1;
        let mut cursor = last;
        let mut moves = 0usize;

        for lane in 0..self.columns[last].len() {
            if !self.columns[cursor].holds_gate(lane) {
                continue;
            }
            while cursor > 0 && self.columns[cursor - 1].is_free(lane) {
                self.swap_lane(cursor - 1, lane);
                cursor -= 1;
                moves += 1;
            }
        }

        if moves == 0 {
            return false;
        }

        if self.columns[last].is_idle() {
            self.columns.pop();
            debug!(moves, columns = self.columns.len(), "register compacted");
        } else {
            // The shared cursor can leave a gate behind in the last column;
            // dropping it would silently change the circuit.
            warn!(
                moves,
                column = last,
                "trailing column still holds gates after compaction, keeping it"
            );
        }
        true
    }

    /// Swaps the `lane` entries of columns `left` and `left + 1`.
    fn swap_lane(&mut self, left: usize, lane: usize) {
        let (head, tail) = self.columns.split_at_mut(left + 1);
        if let (Column::Layer(a), Column::Layer(b)) = (&mut head[left], &mut tail[0]) {
            std::mem::swap(&mut a[lane], &mut b[lane]);
        }
    }

    /// The unitary of the whole circuit, `C_last * ... * C_1 * C_0`.
    pub fn resultant_matrix(&self) -> Result<Matrix, CircuitError> {
        if self.columns.is_empty() {
            return Err(CircuitError::EmptyCircuit);
        }

        let mut total = Matrix::identity(1 << self.qubits);
        for (index, column) in self.columns.iter().enumerate() {
            let operator = column.operator()?;
            trace!(column = index, dim = operator.rows(), "composing column");
            total = operator.checked_mul(&total)?;
        }
        Ok(total)
    }

    /// Applies the resultant matrix to the input statevector.
    pub fn output_state(&self) -> Result<Matrix, CircuitError> {
        Ok(self.resultant_matrix()?.checked_mul(&self.input)?)
    }

    /// The output state in bra-ket form, dropping amplitudes below the
    /// configured tolerance.
    pub fn format_output(&self) -> Result<String, CircuitError> {
        let out = self.output_state()?;
        format_braket_with_tolerance(&out, self.qubits, self.config.tolerance)
    }
}
