pub extern crate nalgebra as na;

#[macro_use]
extern crate log;

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;

pub mod prelude {
    pub use crate::error::*;
    pub use crate::fields::*;
    pub use crate::math::*;
    pub use crate::models::*;
}

pub mod math {
    use na::{DMatrix, DVector};

    /// The scalar type used throughout this crate.
    pub type Real = f64;

    /// A rank-2 tensor of shape `GD × GD` (strain, stress, displacement gradient).
    pub type Tensor = DMatrix<Real>;

    /// A rank-4 tensor flattened with Voigt notation (3×3 in 2D, 6×6 in 3D).
    pub type VoigtMatrix = DMatrix<Real>;

    /// A symmetric rank-2 tensor flattened with Voigt notation.
    pub type VoigtVector = DVector<Real>;

    /// Number of independent components of a symmetric `dim × dim` tensor.
    pub fn voigt_size(dim: usize) -> usize {
        dim * (dim + 1) / 2
    }
}

pub mod error;
pub mod fields;
pub mod models;
pub mod utils;
