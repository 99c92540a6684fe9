//! Bra-ket rendering of statevectors.

use crate::core::errors::CircuitError;
use crate::core::Matrix;
use crate::core::utils::ket_label;
use num_complex::Complex64;

const DEFAULT_TOLERANCE: f64 = 1e-10;
const SIGNIFICANT_DIGITS: usize = 3;

/// Formats a `2^n x 1` statevector as a sum of kets, e.g.
/// `0.707|00⟩ + 0.707|11⟩`.
pub fn format_braket(vector: &Matrix, num_qubits: usize) -> Result<String, CircuitError> {
    format_braket_with_tolerance(vector, num_qubits, DEFAULT_TOLERANCE)
}

/// Like [`format_braket`], treating amplitudes with modulus below `tol` as zero.
pub fn format_braket_with_tolerance(
    vector: &Matrix,
    num_qubits: usize,
    tol: f64,
) -> Result<String, CircuitError> {
    let expected = u32::try_from(num_qubits)
        .ok()
        .and_then(|n| 1usize.checked_shl(n));
    let (rows, cols) = vector.dim();
    if expected != Some(rows) || cols != 1 {
        return Err(CircuitError::InvalidStatevector {
            expected: expected.unwrap_or(0),
            got_rows: rows,
            got_cols: cols,
        });
    }

    let mut out = String::new();
    for (index, amplitude) in vector.column(0).enumerate() {
        if amplitude.norm() < tol {
            continue;
        }
        let (negative, coefficient) = coefficient(amplitude, tol);

        match (out.is_empty(), negative) {
            (true, true) => out.push('-'),
            (true, false) => {}
            (false, true) => out.push_str(" - "),
            (false, false) => out.push_str(" + "),
        }
        out.push_str(&coefficient);
        out.push('|');
        out.push_str(&ket_label(index, num_qubits));
        out.push('⟩');
    }

    if out.is_empty() {
        out.push('0');
    }
    Ok(out)
}

/// Splits an amplitude into its sign and the text printed before the ket.
fn coefficient(z: Complex64, tol: f64) -> (bool, String) {
    let real_only = z.im.abs() < tol;
    let imag_only = z.re.abs() < tol;

    if real_only {
        let m = z.re.abs();
        let text = if (m - 1.0).abs() < tol {
            String::new()
        } else {
            significant(m)
        };
        (z.re < 0.0, text)
    } else if imag_only {
        let m = z.im.abs();
        let text = if (m - 1.0).abs() < tol {
            "i".to_string()
        } else {
            format!("{}i", significant(m))
        };
        (z.im < 0.0, text)
    } else {
        let sign = if z.im < 0.0 { '-' } else { '+' };
        let text = format!("({}{}{}i)", significant(z.re), sign, significant(z.im.abs()));
        (false, text)
    }
}

/// Rounds to three significant figures and trims trailing zeros.
fn significant(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - magnitude).max(0) as usize;
    let text = format!("{value:.decimals$}");

    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::complex::{ONE, ZERO, c64};
    use crate::core::utils::build_initial_state;
    use std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn test_basis_state() {
        let v = build_initial_state("10").unwrap();
        assert_eq!(format_braket(&v, 2).unwrap(), "|01⟩");
    }

    #[test]
    fn test_bell_state() {
        let a = c64(FRAC_1_SQRT_2, 0.0);
        let v = Matrix::column_vector(vec![a, ZERO, ZERO, a]);
        assert_eq!(format_braket(&v, 2).unwrap(), "0.707|00⟩ + 0.707|11⟩");
    }

    #[test]
    fn test_signs_and_units() {
        let v = Matrix::column_vector(vec![c64(-1.0, 0.0), ZERO]);
        assert_eq!(format_braket(&v, 1).unwrap(), "-|0⟩");

        let v = Matrix::column_vector(vec![ZERO, c64(0.0, -1.0)]);
        assert_eq!(format_braket(&v, 1).unwrap(), "-i|1⟩");

        let v = Matrix::column_vector(vec![c64(0.0, 1.0), ZERO]);
        assert_eq!(format_braket(&v, 1).unwrap(), "i|0⟩");

        let h = FRAC_1_SQRT_2;
        let v = Matrix::column_vector(vec![c64(h, 0.0), c64(-h, 0.0)]);
        assert_eq!(format_braket(&v, 1).unwrap(), "0.707|0⟩ - 0.707|1⟩");

        let v = Matrix::column_vector(vec![c64(0.5, 0.0), c64(0.0, -0.5)]);
        assert_eq!(format_braket(&v, 1).unwrap(), "0.5|0⟩ - 0.5i|1⟩");
    }

    #[test]
    fn test_general_complex_amplitude() {
        let v = Matrix::column_vector(vec![c64(0.5, -0.5), c64(0.5, 0.5)]);
        assert_eq!(
            format_braket(&v, 1).unwrap(),
            "(0.5-0.5i)|0⟩ + (0.5+0.5i)|1⟩"
        );
    }

    #[test]
    fn test_rounding_residue_is_dropped() {
        let v = Matrix::column_vector(vec![c64(1e-17, 0.0), c64(0.9999999999999998, 0.0)]);
        assert_eq!(format_braket(&v, 1).unwrap(), "|1⟩");

        let v = Matrix::zeros(2, 1);
        assert_eq!(format_braket(&v, 1).unwrap(), "0");
    }

    #[test]
    fn test_invalid_size() {
        let v = Matrix::column_vector(vec![ONE, ZERO]);
        assert_eq!(
            format_braket(&v, 2).unwrap_err(),
            CircuitError::InvalidStatevector {
                expected: 4,
                got_rows: 2,
                got_cols: 1
            }
        );
        assert!(format_braket(&Matrix::identity(2), 1).is_err());
        assert!(format_braket(&v, 200).is_err());
    }

    #[test]
    fn test_significant() {
        assert_eq!(significant(0.70710678), "0.707");
        assert_eq!(significant(0.5), "0.5");
        assert_eq!(significant(0.0625), "0.0625");
        assert_eq!(significant(0.35355339), "0.354");
        assert_eq!(significant(12.345), "12.3");
    }
}
