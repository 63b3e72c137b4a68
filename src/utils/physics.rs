use crate::error::{FractureError, FractureResult};
use crate::math::{Real, Tensor};
use na::{DVector, SymmetricEigen};

/// Half-width of the band around zero where [`heaviside`] returns `0.5`.
pub const HEAVISIDE_TOLERANCE: Real = 1.0e-13;

/// Computes the Lamé parameters (lambda, mu) from the young modulus and poisson ratio.
pub fn lame_lambda_mu(young_modulus: Real, poisson_ratio: Real) -> (Real, Real) {
    (
        young_modulus * poisson_ratio / ((1.0 + poisson_ratio) * (1.0 - 2.0 * poisson_ratio)),
        shear_modulus(young_modulus, poisson_ratio),
    )
}

pub fn shear_modulus(young_modulus: Real, poisson_ratio: Real) -> Real {
    young_modulus / (2.0 * (1.0 + poisson_ratio))
}

/// The bulk modulus of a `dim`-dimensional tensor split: `lambda + 2 mu / dim`.
pub fn bulk_modulus_from_lame(lambda: Real, mu: Real, dim: usize) -> Real {
    lambda + 2.0 * mu / (dim as Real)
}

/// The symmetric part `(A + Aᵀ) / 2` of a square tensor.
pub fn symmetric_part(tensor: &Tensor) -> Tensor {
    (tensor + tensor.transpose()) * 0.5
}

pub fn spherical_part(tensor: &Tensor) -> Real {
    tensor.trace() / (tensor.nrows() as Real)
}

pub fn deviatoric_part(tensor: &Tensor) -> Tensor {
    let dim = tensor.nrows();
    tensor - Tensor::identity(dim, dim) * spherical_part(tensor)
}

/// Macaulay brackets of `x`: its non-negative and non-positive parts.
///
/// The returned `(p, m)` satisfy `p - m == x`, `p >= 0`, `m <= 0` and `p * m == 0`.
#[inline]
pub fn macaulay_operation(x: Real) -> (Real, Real) {
    let val = x.abs();
    ((x + val) / 2.0, (x - val) / 2.0)
}

/// Smoothed step used by the derivatives of the Macaulay brackets.
///
/// Returns `1` above [`HEAVISIDE_TOLERANCE`], `0` below its opposite and `0.5`
/// in between, so that `heaviside(x) + heaviside(-x) == 1` for every `x`.
#[inline]
pub fn heaviside(x: Real) -> Real {
    if x > HEAVISIDE_TOLERANCE {
        1.0
    } else if x < -HEAVISIDE_TOLERANCE {
        0.0
    } else {
        0.5
    }
}

/// Iteration cap of the symmetric eigen-solver. A 3×3 strain converges in a
/// handful of sweeps.
const MAX_EIGEN_ITERATIONS: usize = 1000;

/// Eigenvalues and orthonormal eigenvectors of a symmetric tensor.
#[derive(Clone, Debug, PartialEq)]
pub struct SpectralDecomposition {
    pub eigenvalues: DVector<Real>,
    /// Eigenvectors, stored column-wise in the order of `eigenvalues`.
    pub eigenvectors: Tensor,
}

impl SpectralDecomposition {
    /// Decomposes a symmetric tensor. Only its lower-triangular part is read.
    pub fn new(tensor: &Tensor) -> FractureResult<Self> {
        if !tensor.is_square() {
            return Err(FractureError::NonSquareTensor {
                rows: tensor.nrows(),
                cols: tensor.ncols(),
            });
        }

        if !tensor.iter().all(|x| x.is_finite()) {
            return Err(FractureError::EigenDecomposition);
        }

        let eig = SymmetricEigen::try_new(tensor.clone(), Real::EPSILON, MAX_EIGEN_ITERATIONS)
            .ok_or(FractureError::EigenDecomposition)?;

        Ok(Self {
            eigenvalues: eig.eigenvalues,
            eigenvectors: eig.eigenvectors,
        })
    }

    pub fn dim(&self) -> usize {
        self.eigenvalues.len()
    }

    /// The eigen-projector `n_a ⊗ n_a`.
    pub fn projector(&self, a: usize) -> Tensor {
        let n = self.eigenvectors.column(a);
        n * n.transpose()
    }

    /// Rebuilds `Σ_a f(λ_a) n_a ⊗ n_a`.
    pub fn recompose_with(&self, f: impl Fn(Real) -> Real) -> Tensor {
        let dim = self.dim();
        let mut result = Tensor::zeros(dim, dim);

        for a in 0..dim {
            result += self.projector(a) * f(self.eigenvalues[a]);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use na::dmatrix;

    #[test]
    fn lame_parameters() {
        let (lambda, mu) = lame_lambda_mu(200.0, 0.3);
        assert_relative_eq!(lambda, 115.384_615_384_615_38, epsilon = 1.0e-10);
        assert_relative_eq!(mu, 76.923_076_923_076_92, epsilon = 1.0e-10);
        assert_relative_eq!(
            bulk_modulus_from_lame(lambda, mu, 3),
            200.0 / (3.0 * (1.0 - 0.6)),
            epsilon = 1.0e-10
        );
    }

    #[test]
    fn macaulay_brackets() {
        assert_eq!(macaulay_operation(2.5), (2.5, 0.0));
        assert_eq!(macaulay_operation(-1.5), (0.0, -1.5));
        assert_eq!(macaulay_operation(0.0), (0.0, 0.0));
    }

    #[test]
    fn heaviside_band() {
        assert_eq!(heaviside(1.0), 1.0);
        assert_eq!(heaviside(2.0e-13), 1.0);
        assert_eq!(heaviside(1.0e-13), 0.5);
        assert_eq!(heaviside(0.0), 0.5);
        assert_eq!(heaviside(-1.0e-13), 0.5);
        assert_eq!(heaviside(-2.0e-13), 0.0);
        assert_eq!(heaviside(-3.0), 0.0);
    }

    #[test]
    fn deviatoric_and_spherical_parts() {
        let t = dmatrix![1.0, 2.0; 2.0, 5.0];
        assert_relative_eq!(spherical_part(&t), 3.0);
        assert_relative_eq!(deviatoric_part(&t), dmatrix![-2.0, 2.0; 2.0, 2.0]);
        assert_relative_eq!(deviatoric_part(&t).trace(), 0.0);
    }

    #[test]
    fn symmetric_part_of_gradient() {
        let grad = dmatrix![1.0, 4.0; 0.0, -2.0];
        assert_eq!(symmetric_part(&grad), dmatrix![1.0, 2.0; 2.0, -2.0]);
    }

    #[test]
    fn spectral_decomposition_recomposes() {
        let t = dmatrix![
            3.0, 1.0, 0.5;
            1.0, -2.0, 0.25;
            0.5, 0.25, 1.0
        ];
        let eig = SpectralDecomposition::new(&t).unwrap();
        assert_relative_eq!(eig.recompose_with(|w| w), t, epsilon = 1.0e-12);

        let ortho = eig.eigenvectors.transpose() * &eig.eigenvectors;
        assert_relative_eq!(ortho, Tensor::identity(3, 3), epsilon = 1.0e-12);
    }

    #[test]
    fn spectral_decomposition_rejects_non_square() {
        let t = Tensor::zeros(2, 3);
        assert_eq!(
            SpectralDecomposition::new(&t),
            Err(FractureError::NonSquareTensor { rows: 2, cols: 3 })
        );
    }

    #[test]
    fn spectral_decomposition_rejects_non_finite() {
        for bad in &[Real::NAN, Real::INFINITY] {
            let t = dmatrix![1.0, *bad; *bad, 0.0];
            assert_eq!(
                SpectralDecomposition::new(&t),
                Err(FractureError::EigenDecomposition)
            );
        }
    }
}
