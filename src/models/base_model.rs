use crate::error::{FractureError, FractureResult, StateField};
use crate::fields::{DamageField, DegradationFunction, DisplacementField, PointArray, Quadrature};
use crate::math::{Real, Tensor, VoigtMatrix};
use crate::models::MaterialParameters;
use std::sync::Arc;

/// State and kernels shared by every constitutive model.
///
/// The displacement and phase fields belong to the solver: the model only
/// keeps shared handles to them, replaced at each solver iteration.
#[derive(Clone)]
pub struct ConstitutiveBase {
    pub material: MaterialParameters,
    pub degradation: Arc<dyn DegradationFunction>,
    displacement: Option<Arc<dyn DisplacementField>>,
    phase: Option<Arc<dyn DamageField>>,
}

impl ConstitutiveBase {
    pub fn new(material: MaterialParameters, degradation: Arc<dyn DegradationFunction>) -> Self {
        Self {
            material,
            degradation,
            displacement: None,
            phase: None,
        }
    }

    pub fn update_displacement(&mut self, uh: Arc<dyn DisplacementField>) {
        self.displacement = Some(uh);
    }

    pub fn update_phase(&mut self, d: Arc<dyn DamageField>) {
        self.phase = Some(d);
    }

    pub fn displacement(&self) -> FractureResult<&dyn DisplacementField> {
        self.displacement
            .as_deref()
            .ok_or(FractureError::UninitializedState(StateField::Displacement))
    }

    pub fn phase(&self) -> FractureResult<&dyn DamageField> {
        self.phase
            .as_deref()
            .ok_or(FractureError::UninitializedState(StateField::Phase))
    }

    /// The small-strain tensor `(∇u + ∇uᵀ) / 2` of `uh` at every quadrature point.
    pub fn strain(
        &self,
        uh: &dyn DisplacementField,
        quadrature: &Quadrature,
    ) -> FractureResult<PointArray<Tensor>> {
        uh.gradient_at(quadrature)?.par_try_map(|grad| {
            if !grad.is_square() {
                return Err(FractureError::NonSquareTensor {
                    rows: grad.nrows(),
                    cols: grad.ncols(),
                });
            }

            Ok(crate::utils::symmetric_part(grad))
        })
    }

    /// The strain of the current displacement field.
    pub fn current_strain(&self, quadrature: &Quadrature) -> FractureResult<PointArray<Tensor>> {
        self.strain(self.displacement()?, quadrature)
    }

    /// `g(d)` for the current phase field.
    pub fn current_degradation(&self, quadrature: &Quadrature) -> FractureResult<PointArray<Real>> {
        let d = self.phase()?.value_at(quadrature)?;
        let degradation = &*self.degradation;
        Ok(d.par_map(|d| degradation.degradation_factor(*d)))
    }

    /// The current strain together with the current degradation factor, checked
    /// to have matching shapes.
    pub fn current_state(
        &self,
        quadrature: &Quadrature,
    ) -> FractureResult<(PointArray<Tensor>, PointArray<Real>)> {
        let strain = self.current_strain(quadrature)?;
        let gd = self.current_degradation(quadrature)?;
        strain.check_shape(&gd)?;
        Ok((strain, gd))
    }

    /// Evaluates `f(ε, g(d))` at every quadrature point, in parallel.
    pub fn evaluate<T: Send>(
        &self,
        quadrature: &Quadrature,
        f: impl Fn(&Tensor, Real) -> FractureResult<T> + Sync + Send,
    ) -> FractureResult<PointArray<T>> {
        let (strain, gd) = self.current_state(quadrature)?;
        strain.par_try_zip_map(&gd, |strain, gd| f(strain, *gd))
    }

    /// The undamaged linear-elastic stress `λ tr(ε) I + 2μ ε`.
    pub fn effective_stress(&self, strain: &Tensor) -> Tensor {
        let dim = strain.nrows();
        Tensor::identity(dim, dim) * (self.material.lambda() * strain.trace())
            + strain * (2.0 * self.material.mu())
    }

    /// The isotropic stiffness in Voigt notation, sized after the strain dimension.
    pub fn linear_elastic_matrix(&self, strain: &Tensor) -> FractureResult<VoigtMatrix> {
        linear_elastic_matrix(&self.material, strain.nrows())
    }
}

/// The isotropic Voigt stiffness of a `dim`-dimensional solid.
pub fn linear_elastic_matrix(
    material: &MaterialParameters,
    dim: usize,
) -> FractureResult<VoigtMatrix> {
    let lam = material.lambda();
    let mu = material.mu();

    match dim {
        2 => Ok(VoigtMatrix::from_row_slice(
            3,
            3,
            &[
                lam + 2.0 * mu, lam, 0.0,
                lam, lam + 2.0 * mu, 0.0,
                0.0, 0.0, mu,
            ],
        )),
        3 => Ok(VoigtMatrix::from_row_slice(
            6,
            6,
            &[
                lam + 2.0 * mu, lam, lam, 0.0, 0.0, 0.0,
                lam, lam + 2.0 * mu, lam, 0.0, 0.0, 0.0,
                lam, lam, lam + 2.0 * mu, 0.0, 0.0, 0.0,
                0.0, 0.0, 0.0, mu, 0.0, 0.0,
                0.0, 0.0, 0.0, 0.0, mu, 0.0,
                0.0, 0.0, 0.0, 0.0, 0.0, mu,
            ],
        )),
        _ => Err(FractureError::UnsupportedDimension(dim)),
    }
}
