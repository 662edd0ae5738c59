//! The postfix factorial family.

use qu0x_core::FactorialStep;

use crate::EvalError;

/// Computes the step-`k` factorial of `n`.
///
/// Multiplies `n, n-k, n-2k, ...` while the term is positive, so `0` and `1`
/// map to `1` for every step. Overflow yields infinity, which the evaluator
/// reports as [`EvalError::NonFiniteResult`].
///
/// # Errors
///
/// Returns [`EvalError::InvalidFactorialOperand`] if `n` is negative,
/// fractional, or not a number.
///
/// # Examples
///
/// ```
/// use qu0x_core::FactorialStep;
/// use qu0x_eval::multifactorial;
///
/// let double = FactorialStep::new(2).unwrap();
/// assert_eq!(multifactorial(5.0, FactorialStep::SINGLE)?, 120.0);
/// assert_eq!(multifactorial(6.0, double)?, 48.0);
/// assert_eq!(multifactorial(0.0, double)?, 1.0);
/// assert!(multifactorial(-1.0, FactorialStep::SINGLE).is_err());
/// assert!(multifactorial(2.5, FactorialStep::SINGLE).is_err());
/// # Ok::<(), qu0x_eval::EvalError>(())
/// ```
pub fn multifactorial(n: f64, step: FactorialStep) -> Result<f64, EvalError> {
    if !(n.is_finite() && n >= 0.0 && n.fract() == 0.0) {
        return Err(EvalError::InvalidFactorialOperand { value: n });
    }
    let step = f64::from(step.get());
    let mut product: f64 = 1.0;
    let mut term = n;
    while term > 0.0 && product.is_finite() {
        product *= term;
        term -= step;
    }
    Ok(product)
}
