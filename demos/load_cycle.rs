//! Drives a constitutive model through a tension/unloading/compression cycle on
//! a strip of cells and prints the stress, history and damage at each step.
//!
//! Usage: `load_cycle [config.json]`, where the optional file holds a
//! `ModelConfig`, e.g. `{ "model": "Spectral", "young_modulus": 210.0, "poisson_ratio": 0.3 }`.

#[macro_use]
extern crate log;

use anyhow::Context;
use fracturex::na::dmatrix;
use fracturex::prelude::*;
use std::sync::Arc;

const NUM_CELLS: usize = 64;
const CRITICAL_ENERGY_RELEASE_RATE: Real = 2.7e-3;
const LENGTH_SCALE: Real = 1.5e-2;
const RESIDUAL_STIFFNESS: Real = 1.0e-6;
const BISECTION_ITERATIONS: usize = 60;

fn load_config() -> anyhow::Result<ModelConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("could not read the model configuration {}", path))?;
            serde_json::from_str(&json)
                .with_context(|| format!("invalid model configuration in {}", path))
        }
        None => Ok(ModelConfig::default()),
    }
}

/// Imposed uniaxial strain along `x` for each load step.
fn load_path() -> Vec<Real> {
    let ramp = |from: Real, to: Real, n: usize| {
        (1..=n).map(move |i| from + (to - from) * i as Real / n as Real)
    };

    ramp(0.0, 0.01, 5)
        .chain(ramp(0.01, 0.0, 5))
        .chain(ramp(0.0, -0.01, 5))
        .chain(ramp(-0.01, 0.012, 6))
        .collect()
}

/// The local (gradient-free) damage in equilibrium with the history `H`: the
/// root in `[0, 1]` of `g'(d) H + Gc / l d`, found by bisection.
fn local_damage(degradation: &dyn DegradationFunction, h: Real) -> Real {
    let stiffness = CRITICAL_ENERGY_RELEASE_RATE / LENGTH_SCALE;
    let residual = |d: Real| degradation.grad_degradation_factor(d) * h + stiffness * d;

    if residual(0.0) >= 0.0 {
        return 0.0;
    }
    if residual(1.0) <= 0.0 {
        return 1.0;
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    for _ in 0..BISECTION_ITERATIONS {
        let mid = 0.5 * (lo + hi);
        if residual(mid) < 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    0.5 * (lo + hi)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = load_config()?;
    let degradation: Arc<dyn DegradationFunction> =
        Arc::new(QuadraticDegradation::with_residual(RESIDUAL_STIFFNESS));
    let mut model = ConstitutiveModelFactory::from_config(&config, degradation.clone())?;
    let quadrature = Quadrature::barycenter(3);
    let tracks_history = model
        .capabilities()
        .contains(ModelCapabilities::HISTORY_FIELD);

    info!(
        "Running a load cycle on {} cells with the {} model.",
        NUM_CELLS, config.model
    );
    if !tracks_history {
        warn!("The {} model tracks no history: damage stays at zero.", config.model);
    }

    let mut damage = Arc::new(PointArray::filled(NUM_CELLS, 1, 0.0));
    let t0 = instant::now();

    println!(
        "{:>5} {:>10} {:>14} {:>14} {:>10}",
        "step", "strain", "mean σ_xx", "max H", "max d"
    );

    for (step, e) in load_path().into_iter().enumerate() {
        // Slightly heterogeneous strip so that damage localizes at its end.
        let grad = PointArray::from_fn(NUM_CELLS, 1, |c, _| {
            let scale = 1.0 + 0.2 * c as Real / NUM_CELLS as Real;
            dmatrix![e * scale, 0.0; 0.0, 0.0]
        });
        model.update_displacement(Arc::new(grad));
        model.update_phase(damage.clone());

        let mut max_history = 0.0;
        if tracks_history {
            let history = model.maximum_historical_field(&quadrature)?;
            max_history = history.iter().cloned().fold(0.0, Real::max);
            damage = Arc::new(history.map(|h| local_damage(&*degradation, *h)));
            model.update_phase(damage.clone());
        }

        let stress = model.stress_value(&quadrature)?;
        let mean_stress =
            stress.iter().map(|s| s[(0, 0)]).sum::<Real>() / stress.len() as Real;
        let max_damage = damage.iter().cloned().fold(0.0, Real::max);

        println!(
            "{:>5} {:>10.5} {:>14.6e} {:>14.6e} {:>10.4}",
            step, e, mean_stress, max_history, max_damage
        );
    }

    info!("Load cycle time: {}ms", instant::now() - t0);
    Ok(())
}
