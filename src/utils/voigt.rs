//! Voigt notation helpers.
//!
//! Strains are flattened with engineering shear components (`2 ε_ij`),
//! stresses with plain tensor components, both in the order
//! `[00, 11, 01]` in 2D and `[00, 11, 22, 12, 02, 01]` in 3D. With these
//! conventions the Voigt stiffness is simply `D_IJ = C_ijkl`.

use crate::error::{FractureError, FractureResult};
use crate::math::{voigt_size, Real, Tensor, VoigtMatrix, VoigtVector};

const VOIGT_PAIRS_2D: [(usize, usize); 3] = [(0, 0), (1, 1), (0, 1)];
const VOIGT_PAIRS_3D: [(usize, usize); 6] = [(0, 0), (1, 1), (2, 2), (1, 2), (0, 2), (0, 1)];

/// The tensor index pair stored at each Voigt position.
pub fn voigt_pairs(dim: usize) -> FractureResult<&'static [(usize, usize)]> {
    match dim {
        2 => Ok(&VOIGT_PAIRS_2D),
        3 => Ok(&VOIGT_PAIRS_3D),
        _ => Err(FractureError::UnsupportedDimension(dim)),
    }
}

/// Builds the Voigt matrix of the rank-4 tensor with components `c(i, j, k, l)`.
///
/// `c` is expected to have the minor symmetries.
pub fn voigt_matrix_from_fn(
    dim: usize,
    c: impl Fn(usize, usize, usize, usize) -> Real,
) -> FractureResult<VoigtMatrix> {
    let pairs = voigt_pairs(dim)?;
    let n = pairs.len();

    Ok(VoigtMatrix::from_fn(n, n, |r, s| {
        let (i, j) = pairs[r];
        let (k, l) = pairs[s];
        c(i, j, k, l)
    }))
}

/// Voigt matrix of `A ⊗ B` for two symmetric rank-2 tensors.
pub fn voigt_outer(a: &Tensor, b: &Tensor) -> FractureResult<VoigtMatrix> {
    voigt_matrix_from_fn(a.nrows(), |i, j, k, l| a[(i, j)] * b[(k, l)])
}

/// Voigt matrix of `I ⊗ I`: ones on the normal block, zeros elsewhere.
pub fn identity_outer_identity(dim: usize) -> FractureResult<VoigtMatrix> {
    let id = Tensor::identity(dim, dim);
    voigt_outer(&id, &id)
}

/// Voigt matrix of the symmetric rank-4 identity `(δ_ik δ_jl + δ_il δ_jk) / 2`.
///
/// Diagonal with `1` on normal and `1/2` on shear positions.
pub fn symmetric_identity(dim: usize) -> FractureResult<VoigtMatrix> {
    voigt_matrix_from_fn(dim, |i, j, k, l| {
        let d = |a: usize, b: usize| if a == b { 1.0 } else { 0.0 };
        0.5 * (d(i, k) * d(j, l) + d(i, l) * d(j, k))
    })
}

/// Flattens a symmetric strain tensor, doubling shear components.
pub fn strain_to_voigt(strain: &Tensor) -> FractureResult<VoigtVector> {
    let pairs = voigt_pairs(strain.nrows())?;
    Ok(VoigtVector::from_iterator(
        voigt_size(strain.nrows()),
        pairs
            .iter()
            .map(|&(i, j)| if i == j { strain[(i, j)] } else { 2.0 * strain[(i, j)] }),
    ))
}

/// Flattens a symmetric stress tensor.
pub fn stress_to_voigt(stress: &Tensor) -> FractureResult<VoigtVector> {
    let pairs = voigt_pairs(stress.nrows())?;
    Ok(VoigtVector::from_iterator(
        voigt_size(stress.nrows()),
        pairs.iter().map(|&(i, j)| stress[(i, j)]),
    ))
}

/// Inverse of [`strain_to_voigt`].
pub fn voigt_to_strain(voigt: &VoigtVector, dim: usize) -> FractureResult<Tensor> {
    let pairs = voigt_pairs(dim)?;
    let mut strain = Tensor::zeros(dim, dim);

    for (r, &(i, j)) in pairs.iter().enumerate() {
        if i == j {
            strain[(i, i)] = voigt[r];
        } else {
            strain[(i, j)] = 0.5 * voigt[r];
            strain[(j, i)] = 0.5 * voigt[r];
        }
    }

    Ok(strain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use na::{dmatrix, dvector};

    #[test]
    fn voigt_pairs_dimensions() {
        assert_eq!(voigt_pairs(2).unwrap().len(), 3);
        assert_eq!(voigt_pairs(3).unwrap().len(), 6);
        assert_eq!(voigt_pairs(1), Err(FractureError::UnsupportedDimension(1)));
        assert_eq!(voigt_pairs(4), Err(FractureError::UnsupportedDimension(4)));
    }

    #[test]
    fn symmetric_identity_has_half_shear_terms() {
        let i4 = symmetric_identity(3).unwrap();
        let expected = VoigtMatrix::from_diagonal(&dvector![1.0, 1.0, 1.0, 0.5, 0.5, 0.5]);
        assert_eq!(i4, expected);
    }

    #[test]
    fn identity_outer_identity_2d() {
        let ii = identity_outer_identity(2).unwrap();
        assert_eq!(ii, dmatrix![1.0, 1.0, 0.0; 1.0, 1.0, 0.0; 0.0, 0.0, 0.0]);
    }

    #[test]
    fn strain_voigt_uses_engineering_shear() {
        let strain = dmatrix![0.1, 0.02, 0.0; 0.02, -0.3, 0.05; 0.0, 0.05, 0.7];
        let v = strain_to_voigt(&strain).unwrap();
        assert_relative_eq!(v, dvector![0.1, -0.3, 0.7, 0.1, 0.0, 0.04]);
        assert_relative_eq!(voigt_to_strain(&v, 3).unwrap(), strain);

        let s = stress_to_voigt(&strain).unwrap();
        assert_relative_eq!(s, dvector![0.1, -0.3, 0.7, 0.05, 0.0, 0.02]);
    }
}
