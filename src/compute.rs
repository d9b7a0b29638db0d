//! Shared numeric kernels: safe division and the stable sigmoid.

use ndarray::{Array, ArrayD, ArrayViewD, Dimension, Zip};

/// Elementwise `num / denom` that yields 0 wherever `denom == 0`.
///
/// Never panics on a zero denominator and never produces NaN or infinity
/// for finite inputs: the element maps to 0 regardless of the numerator.
///
/// Both arrays must have the same shape.
pub fn safe_divide<D: Dimension>(num: &Array<f64, D>, denom: &Array<f64, D>) -> Array<f64, D> {
    let mut out = Array::zeros(num.raw_dim());
    Zip::from(&mut out)
        .and(num)
        .and(denom)
        .for_each(|o, &n, &d| *o = if d == 0.0 { 0.0 } else { n / d });
    out
}

/// Numerically stable elementwise sigmoid: `σ(x) = 1 / (1 + exp(-x))`.
pub(crate) fn sigmoid(x: &ArrayViewD<'_, f64>) -> ArrayD<f64> {
    x.mapv(|v| {
        if v >= 0.0 {
            1.0 / (1.0 + (-v).exp())
        } else {
            let e = v.exp();
            e / (1.0 + e)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_safe_divide_zero_denominator() {
        let num = array![1.0, 0.0, 3.0];
        let denom = array![0.0, 0.0, 2.0];
        let out = safe_divide(&num, &denom);
        assert_eq!(out, array![0.0, 0.0, 1.5]);
    }

    #[test]
    fn test_safe_divide_never_nan() {
        let num = array![[0.0, 5.0], [2.0, 0.0]];
        let denom = array![[0.0, 0.0], [4.0, 8.0]];
        let out = safe_divide(&num, &denom);
        assert!(out.iter().all(|v| v.is_finite()));
        assert_eq!(out, array![[0.0, 0.0], [0.5, 0.0]]);
    }

    #[test]
    fn test_sigmoid_basic() {
        let x = array![0.0, 100.0, -100.0].into_dyn();
        let s = sigmoid(&x.view());
        assert_relative_eq!(s[[0]], 0.5, epsilon = 1e-9);
        assert_relative_eq!(s[[1]], 1.0, epsilon = 1e-9);
        assert_relative_eq!(s[[2]], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_sigmoid_symmetry() {
        // σ(x) + σ(-x) = 1
        let x = array![1.0, 2.0, -3.0, 0.5].into_dyn();
        let neg = x.mapv(|v| -v);
        let s = sigmoid(&x.view());
        let s_neg = sigmoid(&neg.view());
        for (a, b) in s.iter().zip(s_neg.iter()) {
            assert_relative_eq!(a + b, 1.0, epsilon = 1e-12);
        }
    }
}
