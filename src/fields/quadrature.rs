use crate::math::Real;
use na::DVector;

/// Quadrature points of the reference cell, in barycentric coordinates.
///
/// The constitutive models never look inside: they only forward it to the
/// field evaluators, which return one value per (cell, point).
#[derive(Clone, Debug, PartialEq)]
pub struct Quadrature {
    bcs: Vec<DVector<Real>>,
}

impl Quadrature {
    pub fn new(bcs: Vec<DVector<Real>>) -> Self {
        Self { bcs }
    }

    /// The one-point rule at the barycenter of a simplex with `num_vertices` vertices.
    pub fn barycenter(num_vertices: usize) -> Self {
        let w = 1.0 / num_vertices as Real;
        Self {
            bcs: vec![DVector::from_element(num_vertices, w)],
        }
    }

    pub fn num_points(&self) -> usize {
        self.bcs.len()
    }

    pub fn bcs(&self) -> &[DVector<Real>] {
        &self.bcs
    }
}
