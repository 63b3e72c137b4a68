use crate::error::FractureResult;
use crate::fields::{DamageField, DegradationFunction, DisplacementField, PointArray, Quadrature};
use crate::math::{Real, Tensor, VoigtMatrix};
use crate::models::{ConstitutiveBase, ConstitutiveModel, MaterialParameters, ModelKind};
use std::sync::Arc;

/// Degrades the whole effective stress and stiffness by `g(d)`.
///
/// Simple, but also lets damage grow under pure compression.
#[derive(Clone)]
pub struct IsotropicModel {
    pub base: ConstitutiveBase,
}

impl IsotropicModel {
    pub fn new(material: MaterialParameters, degradation: Arc<dyn DegradationFunction>) -> Self {
        Self {
            base: ConstitutiveBase::new(material, degradation),
        }
    }

    pub fn degraded_stress(&self, strain: &Tensor, gd: Real) -> Tensor {
        self.base.effective_stress(strain) * gd
    }

    pub fn degraded_tangent(&self, strain: &Tensor, gd: Real) -> FractureResult<VoigtMatrix> {
        Ok(self.base.linear_elastic_matrix(strain)? * gd)
    }
}

impl ConstitutiveModel for IsotropicModel {
    fn kind(&self) -> ModelKind {
        ModelKind::Isotropic
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
