use crate::error::{FractureError, FractureResult};
use crate::fields::{DamageField, DegradationFunction, DisplacementField, PointArray, Quadrature};
use crate::math::{Real, Tensor, VoigtMatrix};
use crate::models::{ConstitutiveBase, ConstitutiveModel, MaterialParameters, ModelKind};
use crate::utils::{self, heaviside, macaulay_operation};
use na::DVector;
use std::sync::Arc;

/// Directional split: only the traction across the plane of normal `a` is
/// degraded.
///
/// With `M = a ⊗ a`, the effective normal traction `t = a·σ₀(ε)·a` and
/// `k = λ + 2μ = M:C:M`, the degraded energy is `φ⁺ = ⟨t⟩₊² / (2k)`, which never
/// exceeds the elastic energy. The stress reads
/// `σ = σ₀(ε) - (1 - g(d)) ⟨t⟩₊ / k (λ I + 2μ M)`.
#[derive(Clone)]
pub struct AnisotropicModel {
    pub base: ConstitutiveBase,
    /// `None` stands for the first coordinate axis of whatever space the
    /// strain lives in.
    director: Option<DVector<Real>>,
}

impl AnisotropicModel {
    /// A model whose director is the first coordinate axis, in 2D as in 3D.
    pub fn new(material: MaterialParameters, degradation: Arc<dyn DegradationFunction>) -> Self {
        Self {
            base: ConstitutiveBase::new(material, degradation),
            director: None,
        }
    }

    /// A model with the given director, normalized on construction. It can
    /// only act on strains of the same dimension.
    pub fn with_director(
        material: MaterialParameters,
        degradation: Arc<dyn DegradationFunction>,
        director: DVector<Real>,
    ) -> FractureResult<Self> {
        let norm = director.norm();
        if !norm.is_finite() || norm == 0.0 {
            return Err(FractureError::InvalidDirector(format!(
                "the director must be a finite non-zero vector, found {:?}",
                director.as_slice()
            )));
        }

        Ok(Self {
            base: ConstitutiveBase::new(material, degradation),
            director: Some(director / norm),
        })
    }

    /// The explicit director, if any.
    pub fn director(&self) -> Option<&DVector<Real>> {
        self.director.as_ref()
    }

    fn structural_tensor(&self, strain: &Tensor) -> FractureResult<Tensor> {
        let dim = strain.nrows();

        match &self.director {
            None => {
                let mut m = Tensor::zeros(dim, dim);
                if dim > 0 {
                    m[(0, 0)] = 1.0;
                }
                Ok(m)
            }
            Some(a) if a.len() == dim => Ok(a * a.transpose()),
            Some(a) => Err(FractureError::InvalidDirector(format!(
                "a director of dimension {} cannot act on a {}×{} strain",
                a.len(),
                strain.nrows(),
                strain.ncols()
            ))),
        }
    }

    /// `k = λ + 2μ`, the normal stiffness along any unit direction.
    fn normal_modulus(&self) -> Real {
        self.base.material.lambda() + 2.0 * self.base.material.mu()
    }

    /// The effective traction normal to the plane of the director.
    pub fn normal_traction(&self, strain: &Tensor) -> FractureResult<Real> {
        let m = self.structural_tensor(strain)?;
        Ok(m.dot(&self.base.effective_stress(strain)))
    }

    /// The tensile and compressive strain energy densities `(φ⁺, φ⁻)`.
    pub fn strain_energy_density_decomposition(
        &self,
        strain: &Tensor,
    ) -> FractureResult<(Real, Real)> {
        let (t_pos, _) = macaulay_operation(self.normal_traction(strain)?);
        let psi = 0.5 * self.base.effective_stress(strain).dot(strain);
        let phi_pos = t_pos * t_pos / (2.0 * self.normal_modulus());
        Ok((phi_pos, psi - phi_pos))
    }

    pub fn degraded_stress(&self, strain: &Tensor, gd: Real) -> FractureResult<Tensor> {
        let m = self.structural_tensor(strain)?;
        let stress = self.base.effective_stress(strain);
        let (t_pos, _) = macaulay_operation(m.dot(&stress));
        let normal_stress = self.base.effective_stress(&m);

        Ok(stress - normal_stress * ((1.0 - gd) * t_pos / self.normal_modulus()))
    }

    pub fn degraded_tangent(&self, strain: &Tensor, gd: Real) -> FractureResult<VoigtMatrix> {
        let m = self.structural_tensor(strain)?;
        let h = heaviside(m.dot(&self.base.effective_stress(strain)));
        let normal_stress = utils::stress_to_voigt(&self.base.effective_stress(&m))?;

        let d0 = self.base.linear_elastic_matrix(strain)?;
        let coeff = (1.0 - gd) * h / self.normal_modulus();
        Ok(d0 - &normal_stress * normal_stress.transpose() * coeff)
    }
}

impl ConstitutiveModel for AnisotropicModel {
    fn kind(&self) -> ModelKind {
        ModelKind::Anisotropic
    }

    fn update_displacement(&mut self, uh: Arc<dyn DisplacementField>) {
        self.base.update_displacement(uh)
    }

    fn update_phase(&mut self, d: Arc<dyn DamageField>) {
        self.base.update_phase(d)
    }

    fn stress_value(&self, quadrature: &Quadrature) -> FractureResult<PointArray<Tensor>> {
        self.base
            .evaluate(quadrature, |strain, gd| self.degraded_stress(strain, gd))
    }

    fn elastic_matrix(&self, quadrature: &Quadrature) -> FractureResult<PointArray<VoigtMatrix>> {
        self.base
            .evaluate(quadrature, |strain, gd| self.degraded_tangent(strain, gd))
    }
}
