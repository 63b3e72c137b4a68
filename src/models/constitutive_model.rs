use crate::error::{FractureError, FractureResult};
use crate::fields::{DamageField, DisplacementField, PointArray, Quadrature};
use crate::math::{Real, Tensor, VoigtMatrix};
use crate::models::ModelKind;
use std::sync::Arc;

bitflags::bitflags! {
    #[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
    pub struct ModelCapabilities: u8 {
        const STRESS = 1 << 0;
        const TANGENT = 1 << 1;
        const HISTORY_FIELD = 1 << 2;
    }
}

/// A phase-field fracture constitutive model.
///
/// The solver hands the current displacement and phase fields to the model
/// through the `update_*` methods, then queries stresses and tangents one
/// quadrature batch at a time.
pub trait ConstitutiveModel: Send + Sync {
    fn kind(&self) -> ModelKind;

    fn capabilities(&self) -> ModelCapabilities {
        ModelCapabilities::STRESS | ModelCapabilities::TANGENT
    }

    fn update_displacement(&mut self, uh: Arc<dyn DisplacementField>);
    fn update_phase(&mut self, d: Arc<dyn DamageField>);

    /// The degraded Cauchy stress at every quadrature point.
    fn stress_value(&self, quadrature: &Quadrature) -> FractureResult<PointArray<Tensor>>;

    /// The degraded tangent stiffness, in Voigt notation, at every quadrature point.
    fn elastic_matrix(&self, quadrature: &Quadrature) -> FractureResult<PointArray<VoigtMatrix>>;

    /// Updates and returns the irreversible damage driving force.
    ///
    /// Only the variants with [`ModelCapabilities::HISTORY_FIELD`] implement it.
    fn maximum_historical_field(
        &mut self,
        _quadrature: &Quadrature,
    ) -> FractureResult<PointArray<Real>> {
        Err(FractureError::NoHistoryField(self.kind()))
    }

    /// Forgets all the state accumulated since creation, for a new simulation.
    fn reset(&mut self) {}
}
