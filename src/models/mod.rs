//! Phase-field fracture constitutive models.
//!
//! Every variant splits the elastic response into a part degraded by the
//! phase field and a part that is not, and differs only in how the split is
//! made.

pub use self::anisotropic_model::AnisotropicModel;
pub use self::base_model::{linear_elastic_matrix, ConstitutiveBase};
pub use self::constitutive_model::{ConstitutiveModel, ModelCapabilities};
pub use self::deviatoric_model::DeviatoricModel;
pub use self::history_field::HistoryField;
pub use self::hybrid_model::HybridModel;
pub use self::isotropic_model::IsotropicModel;
pub use self::material_parameters::MaterialParameters;
pub use self::model_factory::{ConstitutiveModelFactory, ModelConfig, ModelKind};
pub use self::spectral_model::{strain_pm_eig_decomposition, SpectralModel};

mod anisotropic_model;
mod base_model;
mod constitutive_model;
mod deviatoric_model;
mod history_field;
mod hybrid_model;
mod isotropic_model;
mod material_parameters;
mod model_factory;
mod spectral_model;
