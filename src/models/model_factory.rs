use crate::error::{FractureError, FractureResult};
use crate::fields::DegradationFunction;
use crate::math::Real;
use crate::models::{
    AnisotropicModel, ConstitutiveModel, DeviatoricModel, HybridModel, IsotropicModel,
    MaterialParameters, SpectralModel,
};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// The constitutive model variants known to the factory.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ModelKind {
    Isotropic,
    Anisotropic,
    Deviatoric,
    Spectral,
    Hybrid,
}

impl ModelKind {
    pub const ALL: [ModelKind; 5] = [
        ModelKind::Isotropic,
        ModelKind::Anisotropic,
        ModelKind::Deviatoric,
        ModelKind::Spectral,
        ModelKind::Hybrid,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ModelKind::Isotropic => "Isotropic",
            ModelKind::Anisotropic => "Anisotropic",
            ModelKind::Deviatoric => "Deviatoric",
            ModelKind::Spectral => "Spectral",
            ModelKind::Hybrid => "Hybrid",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelKind {
    type Err = FractureError;

    /// Accepts `Isotropic` as well as the longer `IsotropicModel` spelling, and
    /// likewise for every variant.
    fn from_str(s: &str) -> FractureResult<Self> {
        let name = s.strip_suffix("Model").unwrap_or(s);
        ModelKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| FractureError::UnknownModelType(s.to_string()))
    }
}

/// The parameters needed to build a constitutive model.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ModelConfig {
    pub model: ModelKind,
    pub young_modulus: Real,
    pub poisson_ratio: Real,
}

impl ModelConfig {
    pub fn material(&self) -> FractureResult<MaterialParameters> {
        MaterialParameters::new(self.young_modulus, self.poisson_ratio)
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            model: ModelKind::Hybrid,
            young_modulus: 200.0,
            poisson_ratio: 0.3,
        }
    }
}

pub struct ConstitutiveModelFactory;

impl ConstitutiveModelFactory {
    /// Creates the model named `model_type`.
    pub fn create(
        model_type: &str,
        material: MaterialParameters,
        degradation: Arc<dyn DegradationFunction>,
    ) -> FractureResult<Box<dyn ConstitutiveModel>> {
        let kind = model_type.parse::<ModelKind>()?;
        Self::create_kind(kind, material, degradation)
    }

    /// Creates a model of the given kind.
    ///
    /// Anisotropic models get the first coordinate axis as director; use
    /// [`AnisotropicModel::with_director`] for any other orientation.
    pub fn create_kind(
        kind: ModelKind,
        material: MaterialParameters,
        degradation: Arc<dyn DegradationFunction>,
    ) -> FractureResult<Box<dyn ConstitutiveModel>> {
        debug!(
            "Creating {} constitutive model (E = {}, nu = {}).",
            kind,
            material.young_modulus(),
            material.poisson_ratio()
        );

        let model: Box<dyn ConstitutiveModel> = match kind {
            ModelKind::Isotropic => Box::new(IsotropicModel::new(material, degradation)),
            ModelKind::Anisotropic => Box::new(AnisotropicModel::new(material, degradation)),
            ModelKind::Deviatoric => Box::new(DeviatoricModel::new(material, degradation)),
            ModelKind::Spectral => Box::new(SpectralModel::new(material, degradation)),
            ModelKind::Hybrid => Box::new(HybridModel::new(material, degradation)),
        };

        Ok(model)
    }

    pub fn from_config(
        config: &ModelConfig,
        degradation: Arc<dyn DegradationFunction>,
    ) -> FractureResult<Box<dyn ConstitutiveModel>> {
        Self::create_kind(config.model, config.material()?, degradation)
    }
}
