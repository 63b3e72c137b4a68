use crate::error::{FractureError, FractureResult};
use crate::fields::{PointArray, Quadrature};
use crate::math::{Real, Tensor};

/// A finite-element displacement field, owned by the solver.
pub trait DisplacementField: Send + Sync {
    /// The spatial gradient `∇u` at every quadrature point of every cell.
    fn gradient_at(&self, quadrature: &Quadrature) -> FractureResult<PointArray<Tensor>>;
}

/// A finite-element damage (phase) field, owned by the solver.
pub trait DamageField: Send + Sync {
    /// The damage value, in `[0, 1]`, at every quadrature point of every cell.
    fn value_at(&self, quadrature: &Quadrature) -> FractureResult<PointArray<Real>>;
}

fn check_num_points<T>(values: &PointArray<T>, quadrature: &Quadrature) -> FractureResult<()> {
    if values.num_points() != quadrature.num_points() {
        Err(FractureError::ShapeMismatch {
            expected: (values.num_cells(), quadrature.num_points()),
            found: values.shape(),
        })
    } else {
        Ok(())
    }
}

/// Displacement gradients tabulated per point, e.g. by an external assembly code.
impl DisplacementField for PointArray<Tensor> {
    fn gradient_at(&self, quadrature: &Quadrature) -> FractureResult<PointArray<Tensor>> {
        check_num_points(self, quadrature)?;
        Ok(self.clone())
    }
}

/// Damage values tabulated per point.
impl DamageField for PointArray<Real> {
    fn value_at(&self, quadrature: &Quadrature) -> FractureResult<PointArray<Real>> {
        check_num_points(self, quadrature)?;
        Ok(self.clone())
    }
}
