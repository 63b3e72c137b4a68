use crate::error::{FractureError, FractureResult};
use crate::math::Real;

/// Isotropic linear-elastic constants, with the derived Lamé parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MaterialParameters {
    young_modulus: Real,
    poisson_ratio: Real,
    lambda: Real,
    mu: Real,
}

impl MaterialParameters {
    /// Requires `young_modulus > 0` and `poisson_ratio ∈ (-1, 0.5)`.
    pub fn new(young_modulus: Real, poisson_ratio: Real) -> FractureResult<Self> {
        if !young_modulus.is_finite() || young_modulus <= 0.0 {
            return Err(FractureError::InvalidMaterial(format!(
                "the young modulus must be positive, found {}",
                young_modulus
            )));
        }

        if !poisson_ratio.is_finite() || poisson_ratio <= -1.0 || poisson_ratio >= 0.5 {
            return Err(FractureError::InvalidMaterial(format!(
                "the poisson ratio must lie in (-1, 0.5), found {}",
                poisson_ratio
            )));
        }

        let (lambda, mu) = crate::utils::lame_lambda_mu(young_modulus, poisson_ratio);

        Ok(Self {
            young_modulus,
            poisson_ratio,
            lambda,
            mu,
        })
    }

    pub fn young_modulus(&self) -> Real {
        self.young_modulus
    }

    pub fn poisson_ratio(&self) -> Real {
        self.poisson_ratio
    }

    /// First Lamé parameter.
    pub fn lambda(&self) -> Real {
        self.lambda
    }

    /// Shear modulus.
    pub fn mu(&self) -> Real {
        self.mu
    }

    /// Bulk modulus of the `dim`-dimensional volumetric/deviatoric split.
    pub fn bulk_modulus(&self, dim: usize) -> Real {
        crate::utils::bulk_modulus_from_lame(self.lambda, self.mu, dim)
    }
}
