use crate::error::FractureResult;
use crate::fields::{DamageField, DegradationFunction, DisplacementField, PointArray, Quadrature};
use crate::math::{Real, Tensor, VoigtMatrix};
use crate::models::{
    ConstitutiveBase, ConstitutiveModel, HistoryField, MaterialParameters, ModelCapabilities,
    ModelKind,
};
use crate::utils::{self, heaviside, macaulay_operation, SpectralDecomposition};
use std::sync::Arc;

/// Eigenvalue split of one strain tensor, shared by the stress, tangent and
/// energy computations.
struct MieheSplit {
    eig: SpectralDecomposition,
    trace_pos: Real,
    trace_neg: Real,
}

impl MieheSplit {
    fn new(strain: &Tensor) -> FractureResult<Self> {
        let eig = SpectralDecomposition::new(strain)?;
        let (trace_pos, trace_neg) = macaulay_operation(strain.trace());
        Ok(Self {
            eig,
            trace_pos,
            trace_neg,
        })
    }

    fn positive_strain(&self) -> Tensor {
        self.eig.recompose_with(|w| macaulay_operation(w).0)
    }

    fn negative_strain(&self) -> Tensor {
        self.eig.recompose_with(|w| macaulay_operation(w).1)
    }

    /// `(φ⁺, φ⁻)`. `tr(ε±²)` is the sum of the squared bracketed eigenvalues.
    fn energies(&self, lambda: Real, mu: Real) -> (Real, Real) {
        let (sq_pos, sq_neg) = self.eig.eigenvalues.iter().fold((0.0, 0.0), |acc, w| {
            let (p, m) = macaulay_operation(*w);
            (acc.0 + p * p, acc.1 + m * m)
        });

        (
            lambda * self.trace_pos * self.trace_pos / 2.0 + mu * sq_pos,
            lambda * self.trace_neg * self.trace_neg / 2.0 + mu * sq_neg,
        )
    }

    /// Divided differences `θ⁺_ab = (⟨w_a⟩₊ - ⟨w_b⟩₊) / (w_a - w_b)` of the positive
    /// bracket, replaced by the mean of the heaviside steps for (nearly) repeated
    /// eigenvalues. `θ⁺_aa = H(w_a)`.
    fn positive_divided_differences(&self) -> Tensor {
        let w = &self.eig.eigenvalues;
        let dim = w.len();

        Tensor::from_fn(dim, dim, |a, b| {
            let dw = w[a] - w[b];
            if a != b && dw.abs() > utils::HEAVISIDE_TOLERANCE {
                (macaulay_operation(w[a]).0 - macaulay_operation(w[b]).0) / dw
            } else {
                0.5 * (heaviside(w[a]) + heaviside(w[b]))
            }
        })
    }

    /// Component `P_ijkl` of the derivative of `Σ_a f(w_a) n_a ⊗ n_a` with
    /// respect to the strain, given the divided differences `theta` of `f`.
    fn projection(&self, theta: &Tensor, i: usize, j: usize, k: usize, l: usize) -> Real {
        let n = &self.eig.eigenvectors;
        let dim = self.eig.dim();
        let mut result = 0.0;

        for a in 0..dim {
            result += theta[(a, a)] * n[(i, a)] * n[(j, a)] * n[(k, a)] * n[(l, a)];

            for b in 0..dim {
                if a != b {
                    result += 0.5
                        * theta[(a, b)]
                        * n[(i, a)]
                        * n[(j, b)]
                        * (n[(k, a)] * n[(l, b)] + n[(k, b)] * n[(l, a)]);
                }
            }
        }

        result
    }
}

/// The positive and negative parts `(ε⁺, ε⁻)` of a strain tensor:
/// `ε± = Σ_a ⟨w_a⟩± n_a ⊗ n_a` over its eigenpairs `(w_a, n_a)`.
pub fn strain_pm_eig_decomposition(strain: &Tensor) -> FractureResult<(Tensor, Tensor)> {
    let split = MieheSplit::new(strain)?;
    Ok((split.positive_strain(), split.negative_strain()))
}

/// Miehe's tension/compression split of the strain energy, with an
/// irreversible history of the tensile part.
///
/// Only the tensile branch is degraded:
/// `σ = g(d) (λ⟨tr ε⟩₊ I + 2μ ε⁺) + λ⟨tr ε⟩₋ I + 2μ ε⁻`.
#[derive(Clone)]
pub struct SpectralModel {
    pub base: ConstitutiveBase,
    history: HistoryField,
}

impl SpectralModel {
    pub fn new(material: MaterialParameters, degradation: Arc<dyn DegradationFunction>) -> Self {
        Self {
            base: ConstitutiveBase::new(material, degradation),
            history: HistoryField::new(),
        }
    }

    pub fn history(&self) -> &HistoryField {
        &self.history
    }

    /// The tensile and compressive strain energy densities `(φ⁺, φ⁻)`.
    pub fn strain_energy_density_decomposition(
        &self,
        strain: &Tensor,
    ) -> FractureResult<(Real, Real)> {
        let split = MieheSplit::new(strain)?;
        Ok(split.energies(self.base.material.lambda(), self.base.material.mu()))
    }

    pub fn degraded_stress(&self, strain: &Tensor, gd: Real) -> FractureResult<Tensor> {
        let split = MieheSplit::new(strain)?;
        let dim = strain.nrows();
        let lambda = self.base.material.lambda();
        let mu = self.base.material.mu();
        let id = Tensor::identity(dim, dim);

        let pos_stress = &id * (lambda * split.trace_pos) + split.positive_strain() * (2.0 * mu);
        let neg_stress = &id * (lambda * split.trace_neg) + split.negative_strain() * (2.0 * mu);

        Ok(pos_stress * gd + neg_stress)
    }

    /// The tangent consistent with [`SpectralModel::degraded_stress`]:
    /// `g (λ H(tr ε) I⊗I + 2μ P⁺) + λ H(-tr ε) I⊗I + 2μ P⁻`, with `P± = ∂ε±/∂ε`.
    pub fn degraded_tangent(&self, strain: &Tensor, gd: Real) -> FractureResult<VoigtMatrix> {
        let split = MieheSplit::new(strain)?;
        let lambda = self.base.material.lambda();
        let mu = self.base.material.mu();
        let h_pos = heaviside(strain.trace());
        let h_neg = heaviside(-strain.trace());
        let theta_pos = split.positive_divided_differences();
        let theta_neg = theta_pos.map(|t| 1.0 - t);

        utils::voigt_matrix_from_fn(strain.nrows(), |i, j, k, l| {
            let ii = if i == j && k == l { 1.0 } else { 0.0 };
            let pos = lambda * h_pos * ii + 2.0 * mu * split.projection(&theta_pos, i, j, k, l);
            let neg = lambda * h_neg * ii + 2.0 * mu * split.projection(&theta_neg, i, j, k, l);
            gd * pos + neg
        })
    }

    /// Feeds a batch of strains into the history field and returns the updated
    /// history `H = max(H, φ⁺)`.
    pub fn historical_field_from_strain(
        &mut self,
        strain: &PointArray<Tensor>,
    ) -> FractureResult<&PointArray<Real>> {
        let phi_pos = {
            let this = &*self;
            strain.par_try_map(|s| Ok(this.strain_energy_density_decomposition(s)?.0))?
        };
        self.history.update(phi_pos)
    }
}

impl ConstitutiveModel for SpectralModel {
    fn kind(&self) -> ModelKind {
        ModelKind::Spectral
    }

    fn capabilities(&self) -> ModelCapabilities {
        ModelCapabilities::all()
    }

    fn update_displacement(&mut self, uh: Arc<dyn DisplacementField>) {
        self.base.update_displacement(uh)
    }

    fn update_phase(&mut self, d: Arc<dyn DamageField>) {
        self.base.update_phase(d)
    }

    fn stress_value(&self, quadrature: &Quadrature) -> FractureResult<PointArray<Tensor>> {
        self.base
            .evaluate(quadrature, |strain, gd| self.degraded_stress(strain, gd))
    }

    fn elastic_matrix(&self, quadrature: &Quadrature) -> FractureResult<PointArray<VoigtMatrix>> {
        self.base
            .evaluate(quadrature, |strain, gd| self.degraded_tangent(strain, gd))
    }

    fn maximum_historical_field(
        &mut self,
        quadrature: &Quadrature,
    ) -> FractureResult<PointArray<Real>> {
        let strain = self.base.current_strain(quadrature)?;
        self.historical_field_from_strain(&strain).map(Clone::clone)
    }

    fn reset(&mut self) {
        self.history.reset()
    }
}
