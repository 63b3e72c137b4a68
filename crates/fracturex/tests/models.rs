use approx::assert_relative_eq;
use fracturex::na::{dmatrix, dvector};
use fracturex::prelude::*;
use std::sync::Arc;

fn material() -> MaterialParameters {
    MaterialParameters::new(200.0, 0.3).unwrap()
}

fn create(kind: ModelKind) -> Box<dyn ConstitutiveModel> {
    ConstitutiveModelFactory::create_kind(kind, material(), Arc::new(QuadraticDegradation::new()))
        .unwrap()
}

fn uniform_gradient(num_cells: usize, grad: Tensor) -> Arc<PointArray<Tensor>> {
    Arc::new(PointArray::filled(num_cells, 1, grad))
}

#[test]
fn factory_builds_by_name() {
    let model = ConstitutiveModelFactory::create(
        "IsotropicModel",
        material(),
        Arc::new(QuadraticDegradation::new()),
    )
    .unwrap();
    assert_eq!(model.kind(), ModelKind::Isotropic);

    let err = ConstitutiveModelFactory::create(
        "bogus",
        material(),
        Arc::new(QuadraticDegradation::new()),
    )
    .err();
    assert_eq!(err, Some(FractureError::UnknownModelType("bogus".to_string())));
}

#[test]
fn isotropic_stress_from_tabulated_fields() {
    let quadrature = Quadrature::barycenter(3);
    let mut model = create(ModelKind::Isotropic);
    let lambda = material().lambda();
    let mu = material().mu();

    // The gradient is not symmetric: only its symmetric part produces stress.
    model.update_displacement(uniform_gradient(2, dmatrix![0.01, 0.02; 0.0, 0.0]));
    model.update_phase(Arc::new(PointArray::from_vec(2, 1, vec![0.0, 0.5]).unwrap()));

    let stress = model.stress_value(&quadrature).unwrap();
    assert_eq!(stress.shape(), (2, 1));

    let sound = dmatrix![
        0.01 * lambda + 0.02 * mu, 0.02 * mu;
        0.02 * mu, 0.01 * lambda
    ];
    assert_relative_eq!(stress[(0, 0)], sound, epsilon = 1.0e-12);
    assert_relative_eq!(stress[(1, 0)], &sound * 0.25, epsilon = 1.0e-12);

    let tangent = model.elastic_matrix(&quadrature).unwrap();
    assert_relative_eq!(
        tangent[(0, 0)],
        linear_elastic_matrix(&material(), 2).unwrap(),
        epsilon = 1.0e-10
    );
    assert_relative_eq!(
        tangent[(1, 0)],
        linear_elastic_matrix(&material(), 2).unwrap() * 0.25,
        epsilon = 1.0e-10
    );
}

#[test]
fn queries_fail_until_fields_are_set() {
    let quadrature = Quadrature::barycenter(3);

    for kind in &ModelKind::ALL {
        let mut model = create(*kind);
        assert_eq!(
            model.stress_value(&quadrature).err(),
            Some(FractureError::UninitializedState(StateField::Displacement))
        );

        model.update_displacement(uniform_gradient(1, Tensor::zeros(2, 2)));
        assert_eq!(
            model.elastic_matrix(&quadrature).err(),
            Some(FractureError::UninitializedState(StateField::Phase))
        );

        model.update_phase(Arc::new(PointArray::filled(1, 1, 0.0)));
        assert!(model.stress_value(&quadrature).is_ok());
    }
}

#[test]
fn mismatched_field_shapes_are_rejected() {
    let quadrature = Quadrature::barycenter(3);
    let mut model = create(ModelKind::Spectral);
    model.update_displacement(uniform_gradient(2, Tensor::zeros(2, 2)));
    model.update_phase(Arc::new(PointArray::filled(3, 1, 0.0)));

    assert!(matches!(
        model.stress_value(&quadrature),
        Err(FractureError::ShapeMismatch { .. })
    ));

    // A field tabulated for another quadrature rule.
    model.update_phase(Arc::new(PointArray::filled(2, 1, 0.0)));
    let three_points = Quadrature::new(vec![
        dvector![0.6, 0.2, 0.2],
        dvector![0.2, 0.6, 0.2],
        dvector![0.2, 0.2, 0.6],
    ]);
    assert!(matches!(
        model.stress_value(&three_points),
        Err(FractureError::ShapeMismatch { .. })
    ));
}

#[test]
fn hybrid_combines_isotropic_stress_and_spectral_history() {
    let quadrature = Quadrature::barycenter(3);
    let grad = uniform_gradient(3, dmatrix![0.01, 0.003; 0.003, -0.02]);
    let phase = Arc::new(PointArray::from_vec(3, 1, vec![0.0, 0.3, 0.9]).unwrap());

    let mut hybrid = create(ModelKind::Hybrid);
    let mut isotropic = create(ModelKind::Isotropic);
    let mut spectral = create(ModelKind::Spectral);

    for model in [&mut hybrid, &mut isotropic, &mut spectral].iter_mut() {
        model.update_displacement(grad.clone());
        model.update_phase(phase.clone());
    }

    assert_eq!(
        hybrid.stress_value(&quadrature).unwrap(),
        isotropic.stress_value(&quadrature).unwrap()
    );
    assert_eq!(
        hybrid.elastic_matrix(&quadrature).unwrap(),
        isotropic.elastic_matrix(&quadrature).unwrap()
    );
    assert_eq!(
        hybrid.maximum_historical_field(&quadrature).unwrap(),
        spectral.maximum_historical_field(&quadrature).unwrap()
    );
}

#[test]
fn history_is_only_tracked_by_spectral_variants() {
    let quadrature = Quadrature::barycenter(3);

    for kind in &[ModelKind::Isotropic, ModelKind::Deviatoric, ModelKind::Anisotropic] {
        let mut model = create(*kind);
        model.update_displacement(uniform_gradient(1, Tensor::zeros(2, 2)));
        model.update_phase(Arc::new(PointArray::filled(1, 1, 0.0)));

        assert!(!model.capabilities().contains(ModelCapabilities::HISTORY_FIELD));
        assert_eq!(
            model.maximum_historical_field(&quadrature).err(),
            Some(FractureError::NoHistoryField(*kind))
        );
    }
}

#[test]
fn history_never_decreases_over_a_load_cycle() {
    let quadrature = Quadrature::barycenter(3);
    let mut model = create(ModelKind::Hybrid);
    model.update_phase(Arc::new(PointArray::filled(1, 1, 0.0)));

    let steps = [0.002, 0.005, 0.001, 0.0, -0.004, 0.003];
    let mut previous = 0.0;
    let mut peak: f64 = 0.0;

    for e in &steps {
        model.update_displacement(uniform_gradient(1, dmatrix![*e, 0.0; 0.0, 0.0]));
        let history = model.maximum_historical_field(&quadrature).unwrap();
        let h = history[(0, 0)];

        assert!(h >= previous);
        previous = h;
        peak = peak.max(*e);
    }

    // Uniaxial tension: φ⁺ = (λ / 2 + μ) e².
    let expected = (0.5 * material().lambda() + material().mu()) * peak * peak;
    assert_relative_eq!(previous, expected, epsilon = 1.0e-12);

    // Starting over forgets the peak.
    model.reset();
    model.update_displacement(uniform_gradient(1, dmatrix![0.001, 0.0; 0.0, 0.0]));
    let history = model.maximum_historical_field(&quadrature).unwrap();
    assert!(history[(0, 0)] < expected);
}

#[test]
fn tangents_have_voigt_shape() {
    let quadrature = Quadrature::barycenter(4);
    let grad = dmatrix![0.01, 0.0, 0.002; 0.0, -0.005, 0.0; 0.001, 0.0, 0.003];

    let mut models = vec![
        create(ModelKind::Isotropic),
        create(ModelKind::Deviatoric),
        create(ModelKind::Spectral),
        create(ModelKind::Hybrid),
    ];
    models.push(Box::new(
        AnisotropicModel::with_director(
            material(),
            Arc::new(QuadraticDegradation::new()),
            dvector![0.0, 0.0, 1.0],
        )
        .unwrap(),
    ));

    for model in &mut models {
        model.update_displacement(uniform_gradient(2, grad.clone()));
        model.update_phase(Arc::new(PointArray::filled(2, 1, 0.2)));

        let tangent = model.elastic_matrix(&quadrature).unwrap();
        for d in tangent.iter() {
            assert_eq!(d.shape(), (6, 6));
            assert_relative_eq!(*d, d.transpose(), epsilon = 1.0e-9);
        }
    }
}

#[test]
fn factory_anisotropic_model_works_in_2d_and_3d() {
    let mut model = ConstitutiveModelFactory::create(
        "Anisotropic",
        material(),
        Arc::new(QuadraticDegradation::new()),
    )
    .unwrap();

    // Fully broken points opened along the first axis carry no stress.
    let cases = [
        (Quadrature::barycenter(3), dmatrix![0.01, 0.0; 0.0, 0.0], 3),
        (
            Quadrature::barycenter(4),
            dmatrix![0.01, 0.0, 0.0; 0.0, 0.0, 0.0; 0.0, 0.0, 0.0],
            6,
        ),
    ];

    for (quadrature, grad, voigt) in cases.iter() {
        let dim = grad.nrows();
        model.update_displacement(uniform_gradient(2, grad.clone()));
        model.update_phase(Arc::new(PointArray::filled(2, 1, 1.0)));

        let stress = model.stress_value(quadrature).unwrap();
        for s in stress.iter() {
            assert_relative_eq!(*s, Tensor::zeros(dim, dim), epsilon = 1.0e-12);
        }

        let tangent = model.elastic_matrix(quadrature).unwrap();
        for d in tangent.iter() {
            assert_eq!(d.shape(), (*voigt, *voigt));
        }
    }
}

#[test]
fn explicit_director_must_match_the_strain_dimension() {
    let quadrature = Quadrature::barycenter(4);
    let mut model = AnisotropicModel::with_director(
        material(),
        Arc::new(QuadraticDegradation::new()),
        dvector![1.0, 1.0],
    )
    .unwrap();
    model.update_displacement(uniform_gradient(1, Tensor::zeros(3, 3)));
    model.update_phase(Arc::new(PointArray::filled(1, 1, 0.0)));

    assert!(matches!(
        model.stress_value(&quadrature),
        Err(FractureError::InvalidDirector(_))
    ));
}

#[test]
fn non_finite_strain_is_reported() {
    let quadrature = Quadrature::barycenter(3);
    let grad = uniform_gradient(1, dmatrix![Real::NAN, 0.0; 0.0, 0.01]);

    for kind in &[ModelKind::Spectral, ModelKind::Hybrid] {
        let mut model = create(*kind);
        model.update_displacement(grad.clone());
        model.update_phase(Arc::new(PointArray::filled(1, 1, 0.0)));

        assert_eq!(
            model.maximum_historical_field(&quadrature).err(),
            Some(FractureError::EigenDecomposition)
        );
    }

    let mut spectral = create(ModelKind::Spectral);
    spectral.update_displacement(grad);
    spectral.update_phase(Arc::new(PointArray::filled(1, 1, 0.0)));
    assert_eq!(
        spectral.stress_value(&quadrature).err(),
        Some(FractureError::EigenDecomposition)
    );
}

#[test]
fn spectral_damage_field_only_degrades_tension() {
    let quadrature = Quadrature::barycenter(3);
    let mut model = SpectralModel::new(material(), Arc::new(QuadraticDegradation::new()));
    let strain = dmatrix![0.01, 0.0; 0.0, -0.02];

    model.update_displacement(uniform_gradient(2, strain.clone()));
    model.update_phase(Arc::new(PointArray::from_vec(2, 1, vec![0.0, 0.5]).unwrap()));

    let stress = model.stress_value(&quadrature).unwrap();
    let sound = &stress[(0, 0)];
    let damaged = &stress[(1, 0)];

    // g(0.5) = 0.25 for the quadratic law.
    assert_relative_eq!(*sound, model.degraded_stress(&strain, 1.0).unwrap(), epsilon = 1.0e-12);
    assert_relative_eq!(
        *damaged,
        model.degraded_stress(&strain, 0.25).unwrap(),
        epsilon = 1.0e-12
    );

    // Net volumetric compression: only the tensile eigen-direction loses stiffness.
    let lambda = material().lambda();
    let mu = material().mu();
    assert_relative_eq!(damaged[(1, 1)], sound[(1, 1)], epsilon = 1.0e-12);
    assert_relative_eq!(damaged[(0, 0)], -0.01 * lambda + 0.25 * 2.0 * mu * 0.01, epsilon = 1.0e-12);
    assert_relative_eq!(sound[(0, 0)], -0.01 * lambda + 2.0 * mu * 0.01, epsilon = 1.0e-12);
}
