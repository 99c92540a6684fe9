//! ASCII circuit diagrams.
//!
//! Each qubit wire is drawn as three text rows (box top, wire, box bottom)
//! and each register column as a cell nine characters wide:
//!
//! ```text
//!           ┌───┐
//! q0: |0⟩ ──┤ H ├──────■────
//!           └───┘      │
//!                    ┌─┴─┐
//! q1: |0⟩ ───────────┤ X ├──
//!                    └───┘
//! ```

use crate::circuit::{Circuit, Column};
use crate::core::utils::qubit_bit;

const BLANK: &str = "         ";
const WIRE: &str = "─────────";
const LINE: &str = "    │    ";
const CROSS: &str = "────┼────";
const DOT: &str = "────■────";
const BOX_TOP: &str = "  ┌───┐  ";
const BOX_BOTTOM: &str = "  └───┘  ";
const BOX_TOP_LINK: &str = "  ┌─┴─┐  ";
const BOX_BOTTOM_LINK: &str = "  └─┬─┘  ";

/// Renders the circuit register as text, one wire per qubit, `q0` on top.
pub fn render(circuit: &Circuit) -> String {
    let labels = initial_labels(circuit);
    let mut lines = Vec::with_capacity(circuit.qubit_count() * 3);

    for (qubit, label) in labels.iter().enumerate() {
        let prefix = format!("q{qubit}: |{label}⟩ ");
        let pad = " ".repeat(prefix.chars().count());
        let mut rows = [pad.clone(), prefix, pad];

        for column in circuit.columns() {
            let parts = cell(column, qubit);
            for (row, part) in rows.iter_mut().zip(parts) {
                row.push_str(&part);
            }
        }

        lines.extend(rows.into_iter().map(|row| row.trim_end().to_string()));
    }

    lines.join("\n")
}

/// Per-qubit `0`/`1` labels when the input is a basis state, `?` otherwise.
fn initial_labels(circuit: &Circuit) -> Vec<char> {
    let n = circuit.qubit_count();
    let tol = circuit.config().tolerance;
    let input = circuit.input_state();

    let mut nonzero = input
        .column(0)
        .enumerate()
        .filter(|(_, amp)| amp.norm() >= tol);
    let basis_index = match (nonzero.next(), nonzero.next()) {
        (Some((index, amp)), None) if (amp.norm() - 1.0).abs() < tol => Some(index),
        _ => None,
    };

    (0..n)
        .map(|q| match basis_index {
            Some(index) if qubit_bit(index, q) => '1',
            Some(_) => '0',
            None => '?',
        })
        .collect()
}

/// The three rows of `column` on wire `qubit`.
fn cell(column: &Column, qubit: usize) -> [String; 3] {
    match column {
        Column::Layer(_) => match column.lane(qubit) {
            Some(gate) if !gate.is_identity() => boxed(gate.symbol(), BOX_TOP, BOX_BOTTOM),
            _ => plain(BLANK, WIRE, BLANK),
        },
        Column::Controlled(gate) => {
            let (control, target) = (gate.control(), gate.target());
            // Control below the target: the link leaves the box downwards.
            let upward = control > target;
            let (low, high) = (control.min(target), control.max(target));

            if qubit == control {
                if upward {
                    plain(LINE, DOT, BLANK)
                } else {
                    plain(BLANK, DOT, LINE)
                }
            } else if qubit == target {
                if upward {
                    boxed(gate.symbol(), BOX_TOP, BOX_BOTTOM_LINK)
                } else {
                    boxed(gate.symbol(), BOX_TOP_LINK, BOX_BOTTOM)
                }
            } else if low < qubit && qubit < high {
                plain(LINE, CROSS, LINE)
            } else {
                plain(BLANK, WIRE, BLANK)
            }
        }
    }
}

fn plain(top: &str, mid: &str, bottom: &str) -> [String; 3] {
    [top.to_string(), mid.to_string(), bottom.to_string()]
}

fn boxed(symbol: &str, top: &str, bottom: &str) -> [String; 3] {
    [
        top.to_string(),
        format!("──┤ {symbol} ├──"),
        bottom.to_string(),
    ]
}
