use crate::error::FractureResult;
use crate::fields::{DamageField, DegradationFunction, DisplacementField, PointArray, Quadrature};
use crate::math::{Real, Tensor, VoigtMatrix};
use crate::models::{
    ConstitutiveModel, IsotropicModel, MaterialParameters, ModelCapabilities, ModelKind,
    SpectralModel,
};
use std::sync::Arc;

/// Isotropic degradation for the stress and tangent, spectral split for the
/// damage driving force.
///
/// The displacement equation stays linear in the strain while damage only
/// grows from tensile energy.
#[derive(Clone)]
pub struct HybridModel {
    isotropic: IsotropicModel,
    spectral: SpectralModel,
}

impl HybridModel {
    pub fn new(material: MaterialParameters, degradation: Arc<dyn DegradationFunction>) -> Self {
        Self {
            isotropic: IsotropicModel::new(material, degradation.clone()),
            spectral: SpectralModel::new(material, degradation),
        }
    }

    pub fn isotropic(&self) -> &IsotropicModel {
        &self.isotropic
    }

    pub fn spectral(&self) -> &SpectralModel {
        &self.spectral
    }
}

impl ConstitutiveModel for HybridModel {
    fn kind(&self) -> ModelKind {
        ModelKind::Hybrid
    }

    fn capabilities(&self) -> ModelCapabilities {
        ModelCapabilities::all()
    }

    fn update_displacement(&mut self, uh: Arc<dyn DisplacementField>) {
        self.isotropic.update_displacement(uh.clone());
        self.spectral.update_displacement(uh);
    }

    fn update_phase(&mut self, d: Arc<dyn DamageField>) {
        self.isotropic.update_phase(d.clone());
        self.spectral.update_phase(d);
    }

    fn stress_value(&self, quadrature: &Quadrature) -> FractureResult<PointArray<Tensor>> {
        self.isotropic.stress_value(quadrature)
    }

    fn elastic_matrix(&self, quadrature: &Quadrature) -> FractureResult<PointArray<VoigtMatrix>> {
        self.isotropic.elastic_matrix(quadrature)
    }

    fn maximum_historical_field(
        &mut self,
        quadrature: &Quadrature,
    ) -> FractureResult<PointArray<Real>> {
        self.spectral.maximum_historical_field(quadrature)
    }

    fn reset(&mut self) {
        self.spectral.reset()
    }
}
