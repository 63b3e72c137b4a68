use crate::error::FractureResult;
use crate::fields::PointArray;
use crate::math::Real;
use rayon::prelude::*;

/// Running maximum of the tensile strain energy density at each quadrature point.
///
/// The only way to modify the stored values is [`HistoryField::update`], which
/// never lets them decrease: damage is irreversible.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistoryField {
    values: Option<PointArray<Real>>,
}

impl HistoryField {
    pub fn new() -> Self {
        Self { values: None }
    }

    /// The current history, if it has been initialized.
    pub fn values(&self) -> Option<&PointArray<Real>> {
        self.values.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.values.is_some()
    }

    /// Merges new tensile energy densities into the history: `H ← max(H, φ⁺)`.
    ///
    /// The first call initializes `H` to `φ⁺`. Later calls must provide the
    /// same `(cells, points)` shape.
    pub fn update(&mut self, phi_pos: PointArray<Real>) -> FractureResult<&PointArray<Real>> {
        if let Some(values) = &self.values {
            values.check_shape(&phi_pos)?;
        }

        let values = match self.values.take() {
            Some(mut values) => {
                values
                    .as_mut_slice()
                    .par_iter_mut()
                    .zip(phi_pos.as_slice().par_iter())
                    .for_each(|(h, phi)| *h = h.max(*phi));
                values
            }
            None => phi_pos,
        };

        let values = &*self.values.insert(values);
        trace!(
            "History field updated over {} points, max: {}",
            values.len(),
            values.iter().cloned().fold(0.0, Real::max)
        );
        Ok(values)
    }

    /// Drops the stored history.
    pub fn reset(&mut self) {
        if self.values.take().is_some() {
            debug!("History field reset.");
        }
    }
}
