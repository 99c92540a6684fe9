use approx::{assert_abs_diff_eq, assert_relative_eq};
use qcircuit::complex::{ZERO, c64};
use qcircuit::errors::{CircuitError, GateError};
use qcircuit::{
    Circuit, CircuitConfig, Column, Gate, GateKind, Matrix, SingleQubitGate, build_initial_state,
    diagram, format_braket, identity,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::FRAC_1_SQRT_2;

const TOL: f64 = 1e-10;

fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Matrix {
    let values = (0..rows * cols)
        .map(|_| c64(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
        .collect();
    Matrix::from_shape_vec(rows, cols, values).unwrap()
}

#[test]
fn tensor_product_is_associative() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..20 {
        let dims: Vec<usize> = (0..6).map(|_| rng.random_range(1..4)).collect();
        let a = random_matrix(&mut rng, dims[0], dims[1]);
        let b = random_matrix(&mut rng, dims[2], dims[3]);
        let c = random_matrix(&mut rng, dims[4], dims[5]);

        let left = a.tensor_product(&b).tensor_product(&c);
        let right = a.tensor_product(&b.tensor_product(&c));
        assert!(left.approx_eq(&right, 1e-12));
    }
}

#[test]
fn tensor_product_dimension_law() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..20 {
        let (r1, c1, r2, c2) = (
            rng.random_range(0..5),
            rng.random_range(0..5),
            rng.random_range(0..5),
            rng.random_range(0..5),
        );
        let a = random_matrix(&mut rng, r1, c1);
        let b = random_matrix(&mut rng, r2, c2);
        assert_eq!(a.tensor_product(&b).dim(), (r1 * r2, c1 * c2));
    }
}

#[test]
fn tensor_product_is_not_commutative() {
    let x = GateKind::PauliX.matrix();
    let z = GateKind::PauliZ.matrix();
    assert!(!x.tensor_product(&z).approx_eq(&z.tensor_product(&x), TOL));
}

#[test]
fn every_gate_is_unitary() {
    for kind in [
        GateKind::PauliX,
        GateKind::PauliY,
        GateKind::PauliZ,
        GateKind::Hadamard,
    ] {
        let u = kind.matrix();
        let product = u.checked_mul(&u.adjoint()).unwrap();
        assert!(product.approx_eq(&identity(2), TOL), "{kind:?}");
    }

    for n in 2..=5 {
        let gate = Gate::controlled_h(n - 1, 0, n).unwrap();
        let u = gate.matrix();
        let product = u.checked_mul(&u.adjoint()).unwrap();
        assert!(product.approx_eq(&identity(1 << n), TOL));
        assert_relative_eq!(u.determinant().unwrap().norm(), 1.0, epsilon = 1e-9);
    }
}

#[test]
fn cnot_truth_table_through_circuit() {
    // ket |q1 q0>; digits are per qubit, q0 first.
    for (digits, expected_index) in [("00", 0b00), ("10", 0b11), ("01", 0b10), ("11", 0b01)] {
        let mut circuit = Circuit::from_digits(digits).unwrap();
        circuit.add(Gate::controlled_x(0, 1, 2).unwrap()).unwrap();
        let out = circuit.output_state().unwrap();

        for index in 0..4 {
            let want = if index == expected_index { 1.0 } else { 0.0 };
            assert_abs_diff_eq!(out[(index, 0)].norm(), want, epsilon = TOL);
        }
    }
}

#[test]
fn resultant_applies_earlier_gates_first() {
    let mut circuit = Circuit::from_digits("0").unwrap();
    circuit.add(Gate::pauli_x(0)).unwrap();
    circuit.add(Gate::hadamard(0)).unwrap();

    let h = GateKind::Hadamard.matrix();
    let x = GateKind::PauliX.matrix();
    let expected = h.checked_mul(&x).unwrap();
    assert!(circuit.resultant_matrix().unwrap().approx_eq(&expected, TOL));
}

#[test]
fn identity_equivalent_circuit_round_trips() {
    let input = build_initial_state("1011").unwrap();
    let mut circuit = Circuit::new(4, input.clone()).unwrap();
    for gate in [
        Gate::hadamard(0),
        Gate::pauli_x(2),
        Gate::controlled_z(3, 1, 4).unwrap(),
        Gate::pauli_y(1),
        Gate::pauli_y(1),
        Gate::controlled_z(3, 1, 4).unwrap(),
        Gate::pauli_x(2),
        Gate::hadamard(0),
    ] {
        circuit.place(gate).unwrap();
    }

    let out = circuit.output_state().unwrap();
    assert!(out.approx_eq(&input, TOL));
    assert_eq!(format_braket(&out, 4).unwrap(), "|1101⟩");
}

#[test]
fn bell_state_end_to_end() {
    let mut circuit = Circuit::new(2, build_initial_state("00").unwrap()).unwrap();
    circuit.place(Gate::hadamard(0)).unwrap();
    circuit.place(Gate::controlled_x(0, 1, 2).unwrap()).unwrap();

    let out = circuit.output_state().unwrap();
    assert_relative_eq!(out[(0, 0)].norm(), FRAC_1_SQRT_2, epsilon = TOL);
    assert_relative_eq!(out[(3, 0)].norm(), FRAC_1_SQRT_2, epsilon = TOL);
    assert_abs_diff_eq!(out[(1, 0)].norm(), 0.0, epsilon = TOL);
    assert_abs_diff_eq!(out[(2, 0)].norm(), 0.0, epsilon = TOL);

    assert_eq!(
        format_braket(&out, circuit.qubit_count()).unwrap(),
        "0.707|00⟩ + 0.707|11⟩"
    );
    assert_eq!(circuit.format_output().unwrap(), "0.707|00⟩ + 0.707|11⟩");
}

#[test]
fn ghz_state_across_three_qubits() {
    let mut circuit = Circuit::from_digits("000").unwrap();
    circuit.place(Gate::hadamard(2)).unwrap();
    circuit.place(Gate::controlled_x(2, 1, 3).unwrap()).unwrap();
    circuit.place(Gate::controlled_x(1, 0, 3).unwrap()).unwrap();

    let out = circuit.output_state().unwrap();
    assert_eq!(
        format_braket(&out, 3).unwrap(),
        "0.707|000⟩ + 0.707|111⟩"
    );
}

#[test]
fn phase_kickback_with_imaginary_amplitudes() {
    // Y|0> = i|1>
    let mut circuit = Circuit::from_digits("0").unwrap();
    circuit.add(Gate::pauli_y(0)).unwrap();
    let out = circuit.output_state().unwrap();
    assert_eq!(out[(0, 0)], ZERO);
    assert_eq!(format_braket(&out, 1).unwrap(), "i|1⟩");
}

#[test]
fn compaction_is_idempotent() {
    let mut circuit = Circuit::from_digits("0000").unwrap();
    let gates = [
        Gate::hadamard(0),
        Gate::hadamard(3),
        Gate::controlled_x(0, 2, 4).unwrap(),
        Gate::pauli_z(1),
        Gate::pauli_x(2),
        Gate::pauli_y(3),
    ];
    for gate in gates {
        circuit.add(gate).unwrap();
        circuit.compact();
    }
    let columns = circuit.columns().len();

    assert!(!circuit.compact());
    assert!(!circuit.compact());
    assert_eq!(circuit.columns().len(), columns);
}

#[test]
fn compaction_layout_respects_controlled_barrier() {
    let mut circuit = Circuit::from_digits("000").unwrap();
    circuit.place(Gate::hadamard(0)).unwrap();
    circuit.place(Gate::pauli_x(1)).unwrap();
    circuit.place(Gate::controlled_z(0, 2, 3).unwrap()).unwrap();
    circuit.place(Gate::pauli_y(1)).unwrap();
    circuit.place(Gate::hadamard(2)).unwrap();

    let columns = circuit.columns();
    assert_eq!(columns.len(), 3);
    assert_eq!(columns[0].lane(0).unwrap().symbol(), "H");
    assert_eq!(columns[0].lane(1).unwrap().symbol(), "X");
    assert!(matches!(columns[1], Column::Controlled(_)));
    assert_eq!(columns[2].lane(1).unwrap().symbol(), "Y");
    assert_eq!(columns[2].lane(2).unwrap().symbol(), "H");

    let text = diagram::render(&circuit);
    assert!(text.contains("q1: |0⟩ ──┤ X ├──────┼──────┤ Y ├──"));
}

#[test]
fn errors_surface_instead_of_panicking() {
    let mut circuit = Circuit::from_digits("00").unwrap();
    assert_eq!(
        circuit.resultant_matrix().unwrap_err(),
        CircuitError::EmptyCircuit
    );
    assert!(matches!(
        circuit.add(Gate::controlled_x(0, 1, 3).unwrap()),
        Err(CircuitError::GateSizeMismatch { .. })
    ));
    assert!(circuit.is_empty());

    let config = CircuitConfig::new().with_max_qubits(2);
    assert!(matches!(
        Circuit::with_config(3, build_initial_state("000").unwrap(), config),
        Err(CircuitError::QubitLimitExceeded { requested: 3, max: 2 })
    ));

    assert!(matches!(
        Gate::controlled_x(0, 1, 40),
        Err(GateError::TooManyQubits { requested: 40, .. })
    ));
    assert!(matches!(
        Circuit::from_digits(&"0".repeat(40)),
        Err(CircuitError::QubitLimitExceeded { requested: 40, .. })
    ));
    assert!(matches!(
        circuit.add(Gate::from(SingleQubitGate::identity(0))),
        Err(CircuitError::NotPlaceable(GateKind::Identity))
    ));
    assert!(circuit.is_empty());
}
