//! Shared numerical primitives anchored on `nalgebra`.

use nalgebra::Vector2;

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Primary complex scalar type used for characteristic roots.
pub type CScalar = num_complex::Complex<Scalar>;
/// Transient state `[v_C, i]`: capacitor voltage and loop current.
pub type StateVector = Vector2<Scalar>;

/// Splits a positive `value` into `(mantissa, exponent)` with
/// `value = mantissa * 10^exponent` and `mantissa` in `[1, 10)`.
///
/// Returns `None` for zero, negative, or non-finite input.
#[must_use]
pub fn decade(value: Scalar) -> Option<(Scalar, i32)> {
    if !(value.is_finite() && value > 0.0) {
        return None;
    }
    let exponent = value.log10().floor() as i32;
    Some((value / pow10(exponent), exponent))
}

/// Integer power of ten.
#[inline]
#[must_use]
pub fn pow10(exponent: i32) -> Scalar {
    10f64.powi(exponent)
}

/// Generates `n` linearly spaced samples in [start, stop].
#[must_use]
pub fn linspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as Scalar - 1.0);
            (0..n).map(|i| start + step * i as Scalar).collect()
        }
    }
}

/// Generates `n` logarithmically spaced samples in [start, stop].
/// Requires start > 0 and stop > 0.
#[must_use]
pub fn logspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    assert!(start > 0.0 && stop > 0.0);
    linspace(start.log10(), stop.log10(), n)
        .into_iter()
        .map(|e| 10f64.powf(e))
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn decade_normalizes_mantissa() {
        let (m, e) = decade(4835.0).expect("positive");
        assert_relative_eq!(m, 4.835, epsilon = 1.0e-12);
        assert_eq!(e, 3);

        let (m, e) = decade(0.047).expect("positive");
        assert_relative_eq!(m, 4.7, epsilon = 1.0e-12);
        assert_eq!(e, -2);
    }

    #[test]
    fn decade_rejects_non_positive() {
        assert!(decade(0.0).is_none());
        assert!(decade(-3.0).is_none());
        assert!(decade(Scalar::NAN).is_none());
    }

    #[test]
    fn logspace_hits_endpoints() {
        let v = logspace(1.0, 1000.0, 4);
        assert_relative_eq!(v[0], 1.0, epsilon = 1.0e-12);
        assert_relative_eq!(v[1], 10.0, epsilon = 1.0e-9);
        assert_relative_eq!(v[3], 1000.0, epsilon = 1.0e-9);
    }
}
