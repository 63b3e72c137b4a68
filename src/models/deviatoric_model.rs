use crate::error::FractureResult;
use crate::fields::{DamageField, DegradationFunction, DisplacementField, PointArray, Quadrature};
use crate::math::{Real, Tensor, VoigtMatrix};
use crate::models::{ConstitutiveBase, ConstitutiveModel, MaterialParameters, ModelKind};
use crate::utils::{self, heaviside, macaulay_operation};
use std::sync::Arc;

/// Volumetric/deviatoric split: the deviatoric part and the volumetric
/// expansion are degraded, the volumetric compression is not.
///
/// With `K = λ + 2μ / dim`:
/// `σ = g(d) (K⟨tr ε⟩₊ I + 2μ dev ε) + K⟨tr ε⟩₋ I`.
#[derive(Clone)]
pub struct DeviatoricModel {
    pub base: ConstitutiveBase,
}

impl DeviatoricModel {
    pub fn new(material: MaterialParameters, degradation: Arc<dyn DegradationFunction>) -> Self {
        Self {
            base: ConstitutiveBase::new(material, degradation),
        }
    }

    /// The tensile and compressive strain energy densities `(φ⁺, φ⁻)`.
    pub fn strain_energy_density_decomposition(&self, strain: &Tensor) -> (Real, Real) {
        let k = self.base.material.bulk_modulus(strain.nrows());
        let mu = self.base.material.mu();
        let (tp, tm) = macaulay_operation(strain.trace());
        let dev = utils::deviatoric_part(strain);

        (k * tp * tp / 2.0 + mu * dev.dot(&dev), k * tm * tm / 2.0)
    }

    pub fn degraded_stress(&self, strain: &Tensor, gd: Real) -> Tensor {
        let dim = strain.nrows();
        let k = self.base.material.bulk_modulus(dim);
        let mu = self.base.material.mu();
        let (tp, tm) = macaulay_operation(strain.trace());
        let id = Tensor::identity(dim, dim);

        let pos_stress = &id * (k * tp) + utils::deviatoric_part(strain) * (2.0 * mu);
        let neg_stress = id * (k * tm);
        pos_stress * gd + neg_stress
    }

    pub fn degraded_tangent(&self, strain: &Tensor, gd: Real) -> FractureResult<VoigtMatrix> {
        let dim = strain.nrows();
        let k = self.base.material.bulk_modulus(dim);
        let mu = self.base.material.mu();
        let tr = strain.trace();

        let ii = utils::identity_outer_identity(dim)?;
        let dev_projector = utils::symmetric_identity(dim)? - &ii * (1.0 / dim as Real);

        let pos = &ii * (k * heaviside(tr)) + dev_projector * (2.0 * mu);
        let neg = ii * (k * heaviside(-tr));
        Ok(pos * gd + neg)
    }
}

impl ConstitutiveModel for DeviatoricModel {
    fn kind(&self) -> ModelKind {
        ModelKind::Deviatoric
    }

    fn update_displacement(&mut self, uh: Arc<dyn DisplacementField>) {
        self.base.update_displacement(uh)
    }

    fn update_phase(&mut self, d: Arc<dyn DamageField>) {
        self.base.update_phase(d)
    }

    fn stress_value(&self, quadrature: &Quadrature) -> FractureResult<PointArray<Tensor>> {
        self.base
            .evaluate(quadrature, |strain, gd| Ok(self.degraded_stress(strain, gd)))
    }

    fn elastic_matrix(&self, quadrature: &Quadrature) -> FractureResult<PointArray<VoigtMatrix>> {
        self.base
            .evaluate(quadrature, |strain, gd| self.degraded_tangent(strain, gd))
    }
}
