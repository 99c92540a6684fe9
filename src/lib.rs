//! Dense statevector simulation of small quantum circuits.
//!
//! Gates are placed into a [`Circuit`] register, the register is folded into
//! one unitary by exact matrix algebra, and the unitary is applied to a
//! classical input state:
//!
//! ```
//! use qcircuit::{Circuit, Gate, format_braket};
//!
//! let mut circuit = Circuit::from_digits("00")?;
//! circuit.place(Gate::hadamard(0))?;
//! circuit.place(Gate::controlled_x(0, 1, 2)?)?;
//!
//! let out = circuit.output_state()?;
//! assert_eq!(format_braket(&out, 2)?, "0.707|00⟩ + 0.707|11⟩");
//! # Ok::<(), qcircuit::errors::CircuitError>(())
//! ```

pub mod braket;
mod circuit;
mod config;
mod core;
pub mod diagram;

pub use crate::braket::format_braket;
pub use crate::circuit::{Circuit, Column};
pub use crate::config::CircuitConfig;
pub use crate::core::utils::build_initial_state;
pub use crate::core::{
    Basis, ControlledGate, Gate, GateKind, Matrix, SingleQubitGate, complex, errors, identity,
    utils,
};
