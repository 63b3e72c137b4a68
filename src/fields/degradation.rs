use crate::math::Real;

/// The energy-degradation law `g(d)` of a phase-field model.
///
/// Implementations must satisfy `g(0) = 1`, `g(d) ∈ [0, 1]` and be
/// non-increasing on `[0, 1]`.
pub trait DegradationFunction: Send + Sync {
    fn degradation_factor(&self, d: Real) -> Real;
    /// The derivative `g'(d)`.
    fn grad_degradation_factor(&self, d: Real) -> Real;
}

/// The classical quadratic law `g(d) = (1 - k)(1 - d)² + k`.
///
/// The residual stiffness `k` keeps fully broken points from making the
/// tangent singular.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QuadraticDegradation {
    pub residual: Real,
}

impl QuadraticDegradation {
    pub fn new() -> Self {
        Self { residual: 0.0 }
    }

    pub fn with_residual(residual: Real) -> Self {
        Self { residual }
    }
}

impl Default for QuadraticDegradation {
    fn default() -> Self {
        Self::new()
    }
}

impl DegradationFunction for QuadraticDegradation {
    fn degradation_factor(&self, d: Real) -> Real {
        (1.0 - self.residual) * (1.0 - d) * (1.0 - d) + self.residual
    }

    fn grad_degradation_factor(&self, d: Real) -> Real {
        -2.0 * (1.0 - self.residual) * (1.0 - d)
    }
}

/// A degradation factor that ignores the damage, e.g. `1` for an undamaged solid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ConstantDegradation(pub Real);

impl DegradationFunction for ConstantDegradation {
    fn degradation_factor(&self, _d: Real) -> Real {
        self.0
    }

    fn grad_degradation_factor(&self, _d: Real) -> Real {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn quadratic_degradation_bounds() {
        let g = QuadraticDegradation::new();
        assert_eq!(g.degradation_factor(0.0), 1.0);
        assert_eq!(g.degradation_factor(1.0), 0.0);
        assert_relative_eq!(g.degradation_factor(0.5), 0.25);
        assert_relative_eq!(g.grad_degradation_factor(0.5), -1.0);

        let mut prev = g.degradation_factor(0.0);
        for i in 1..=10 {
            let curr = g.degradation_factor(i as Real / 10.0);
            assert!(curr <= prev);
            prev = curr;
        }
    }

    #[test]
    fn residual_stiffness() {
        let g = QuadraticDegradation::with_residual(1.0e-3);
        assert_relative_eq!(g.degradation_factor(0.0), 1.0);
        assert_relative_eq!(g.degradation_factor(1.0), 1.0e-3);
    }
}
