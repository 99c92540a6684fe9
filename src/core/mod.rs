pub mod complex;
pub mod errors;
mod gates;
mod matrix;
pub mod utils;

pub use gates::{Basis, ControlledGate, Gate, GateKind, SingleQubitGate, identity};
pub use matrix::Matrix;
