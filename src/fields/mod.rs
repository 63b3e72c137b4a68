//! Interfaces to the solver-owned fields and the degradation law.

pub use self::degradation::{ConstantDegradation, DegradationFunction, QuadraticDegradation};
pub use self::field::{DamageField, DisplacementField};
pub use self::point_array::PointArray;
pub use self::quadrature::Quadrature;

mod degradation;
mod field;
mod point_array;
mod quadrature;
