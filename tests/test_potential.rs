use approx::assert_relative_eq;
use bempp_potential::assembly::{
    evaluate, evaluate_into, EvaluationOptions, PotentialBuffer, PotentialEvaluation,
};
use bempp_potential::element::BasisFamily;
use bempp_potential::grid::{ElementGeometry, NormalSigns, TriangleGrid};
use bempp_potential::kernel::{KernelParameters, KernelVariant};
use bempp_potential::lanes::VectorWidth;
use bempp_potential::quadrature::QuadratureRule;
use bempp_potential::shapes::{regular_sphere, screen};
use bempp_potential::types::{BemppError, ValueType, ValueTypes};
use bempp_potential::{laplace, PotentialOperator};
use paste::paste;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_points(rng: &mut StdRng, npoints: usize) -> Vec<f64> {
    // Points outside the unit sphere
    let mut points = Vec::with_capacity(3 * npoints);
    while points.len() < 3 * npoints {
        let p = [
            rng.gen_range(-3.0..3.0),
            rng.gen_range(-3.0..3.0),
            rng.gen_range(-3.0..3.0),
        ];
        if p[0] * p[0] + p[1] * p[1] + p[2] * p[2] > 1.5 {
            points.extend_from_slice(&p);
        }
    }
    points
}

fn sum_with(
    evaluation: &PotentialEvaluation<f64>,
    width: VectorWidth,
    batches_per_unit: usize,
) -> Vec<f64> {
    let mut options = EvaluationOptions::default();
    options.set_vector_width(width);
    options.set_batches_per_unit(batches_per_unit).unwrap();
    evaluate(evaluation, &options).unwrap().sum_groups()
}

macro_rules! test_width_equivalence {
    ($(($width:ident, $kernel:ident, $basis:ident)),+) => {
    $(
        paste! {
            #[test]
            fn [<test_width_equivalence_ $width:lower _ $kernel:snake _ $basis:lower>]() {
                let grid = regular_sphere::<f64>(2).unwrap();
                let ncells = grid.number_of_cells();
                let basis = BasisFamily::$basis;
                let mut rng = StdRng::seed_from_u64(42);
                let coefficients = (0..ncells * basis.dim())
                    .map(|_| rng.gen_range(-1.0..1.0))
                    .collect::<Vec<_>>();
                let points = random_points(&mut rng, 5);
                let mut signs = NormalSigns::all_positive(ncells);
                for cell in (0..ncells).step_by(3) {
                    signs.flip(cell).unwrap();
                }
                // An element count that is not a multiple of any width
                let elements = (0..ncells - 3).rev().collect::<Vec<_>>();
                let rule = QuadratureRule::triangle(7).unwrap();
                let evaluation = PotentialEvaluation {
                    grid: &grid,
                    elements: &elements,
                    normal_signs: &signs,
                    evaluation_points: &points,
                    coefficients: &coefficients,
                    basis,
                    quadrature_rule: &rule,
                    kernel_parameters: KernelParameters::empty(),
                    kernel: KernelVariant::$kernel,
                    value_types: ValueTypes::real(),
                };

                let scalar = sum_with(&evaluation, VectorWidth::W1, 1);
                let batched = sum_with(&evaluation, VectorWidth::$width, 3);
                assert_eq!(scalar.len(), batched.len());
                for (a, b) in scalar.iter().zip(batched.iter()) {
                    assert_relative_eq!(a, b, epsilon = 1e-14, max_relative = 1e-10);
                }
            }
        }
    )*
    };
}

test_width_equivalence!(
    (W4, LaplaceSingleLayer, Constant),
    (W8, LaplaceSingleLayer, Linear),
    (W16, LaplaceSingleLayer, Linear),
    (W4, LaplaceSingleLayerGradient, Linear),
    (W8, LaplaceSingleLayerGradient, Constant),
    (W16, LaplaceSingleLayerGradient, Linear)
);

#[test]
fn test_partition_of_unity() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..100 {
        let s = rng.gen_range(0.0..1.0);
        let t = rng.gen_range(0.0..1.0 - s);
        let values = BasisFamily::Linear.tabulate::<f64>([s, t]);
        assert_relative_eq!(values.iter().sum::<f64>(), 1.0, epsilon = 1e-15);
        assert_eq!(BasisFamily::Constant.tabulate::<f64>([s, t])[0], 1.0);
    }
}

#[test]
fn test_integration_element_is_twice_area() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..50 {
        let vertices = (0..9)
            .map(|_| rng.gen_range(-2.0..2.0))
            .collect::<Vec<f64>>();
        let grid = TriangleGrid::new(&vertices, &[0, 1, 2]).unwrap();
        let geometry = ElementGeometry::new(&grid, &NormalSigns::all_positive(1), 0).unwrap();

        let a = [
            vertices[3] - vertices[0],
            vertices[4] - vertices[1],
            vertices[5] - vertices[2],
        ];
        let b = [
            vertices[6] - vertices[0],
            vertices[7] - vertices[1],
            vertices[8] - vertices[2],
        ];
        let c = [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ];
        let area = 0.5 * (c[0] * c[0] + c[1] * c[1] + c[2] * c[2]).sqrt();

        assert!(geometry.integration_element > 0.0);
        assert_relative_eq!(geometry.integration_element, 2.0 * area, max_relative = 1e-12);
    }
}

#[test]
fn test_quadrature_order_invariance() {
    let grid = screen::<f64>(4).unwrap();
    let ncells = grid.number_of_cells();
    let signs = NormalSigns::all_positive(ncells);
    let mut rng = StdRng::seed_from_u64(3);
    let coefficients = (0..3 * ncells)
        .map(|_| rng.gen_range(-1.0..1.0))
        .collect::<Vec<_>>();
    let elements = (0..ncells).collect::<Vec<_>>();
    let points = [0.3, 0.4, 0.5, -1.0, 2.0, 0.25];
    let rule = QuadratureRule::triangle(7).unwrap();
    let permuted = rule.permuted(&[6, 2, 4, 0, 5, 1, 3]).unwrap();

    for kernel in [
        KernelVariant::LaplaceSingleLayer,
        KernelVariant::LaplaceSingleLayerGradient,
    ] {
        let results = [&rule, &permuted].map(|quadrature_rule| {
            let evaluation = PotentialEvaluation {
                grid: &grid,
                elements: &elements,
                normal_signs: &signs,
                evaluation_points: &points,
                coefficients: &coefficients,
                basis: BasisFamily::Linear,
                quadrature_rule,
                kernel_parameters: KernelParameters::empty(),
                kernel,
                value_types: ValueTypes::real(),
            };
            sum_with(&evaluation, VectorWidth::W8, 2)
        });
        for (a, b) in results[0].iter().zip(results[1].iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-14, max_relative = 1e-12);
        }
    }
}

#[test]
fn test_reduction_order_invariance() {
    let grid = regular_sphere::<f64>(2).unwrap();
    let ncells = grid.number_of_cells();
    let signs = NormalSigns::all_positive(ncells);
    let mut rng = StdRng::seed_from_u64(4);
    let coefficients = (0..ncells)
        .map(|_| rng.gen_range(0.0..1.0))
        .collect::<Vec<_>>();
    let elements = (0..ncells).collect::<Vec<_>>();
    let points = random_points(&mut rng, 3);
    let rule = QuadratureRule::triangle(6).unwrap();
    let evaluation = PotentialEvaluation {
        grid: &grid,
        elements: &elements,
        normal_signs: &signs,
        evaluation_points: &points,
        coefficients: &coefficients,
        basis: BasisFamily::Constant,
        quadrature_rule: &rule,
        kernel_parameters: KernelParameters::empty(),
        kernel: KernelVariant::LaplaceSingleLayerGradient,
        value_types: ValueTypes::real(),
    };
    let mut options = EvaluationOptions::default();
    options.set_vector_width(VectorWidth::W4);
    options.set_batches_per_unit(2).unwrap();
    let buffer = evaluate(&evaluation, &options).unwrap();
    // 128 elements -> 32 batches -> 16 groups
    assert_eq!(buffer.shape(), [3, 3, 16]);

    let forward = buffer.sum_groups();
    let reverse = buffer
        .sum_groups_in_order(&(0..16).rev().collect::<Vec<_>>())
        .unwrap();
    let shuffled = buffer
        .sum_groups_in_order(&[5, 11, 0, 15, 3, 8, 13, 1, 10, 6, 14, 2, 9, 4, 12, 7])
        .unwrap();
    for ((a, b), c) in forward.iter().zip(reverse.iter()).zip(shuffled.iter()) {
        assert_relative_eq!(a, b, epsilon = 1e-14, max_relative = 1e-12);
        assert_relative_eq!(a, c, epsilon = 1e-14, max_relative = 1e-12);
    }

    assert!(buffer.sum_groups_in_order(&[0, 1]).is_err());
}

#[test]
fn test_single_element_closed_form() {
    let grid = TriangleGrid::new(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], &[0, 1, 2])
        .unwrap();
    let signs = NormalSigns::all_positive(1);
    let rule = QuadratureRule::new(&[1.0 / 3.0, 1.0 / 3.0], &[0.5]).unwrap();
    let expected = 0.5 / (4.0 * std::f64::consts::PI * f64::sqrt(2.0 / 9.0 + 100.0));

    for width in [VectorWidth::W1, VectorWidth::W4, VectorWidth::W8, VectorWidth::W16] {
        let evaluation = PotentialEvaluation {
            grid: &grid,
            elements: &[0],
            normal_signs: &signs,
            evaluation_points: &[0.0, 0.0, 10.0],
            coefficients: &[1.0],
            basis: BasisFamily::Constant,
            quadrature_rule: &rule,
            kernel_parameters: KernelParameters::empty(),
            kernel: KernelVariant::LaplaceSingleLayer,
            value_types: ValueTypes::real(),
        };
        let result = sum_with(&evaluation, width, 1);
        assert_eq!(result.len(), 1);
        assert_relative_eq!(result[0], expected, max_relative = 1e-6);
    }
}

#[test]
fn test_normal_sign_flip() {
    let grid = regular_sphere::<f64>(1).unwrap();
    let ncells = grid.number_of_cells();
    let mut flipped = NormalSigns::all_positive(ncells);
    for cell in 0..ncells / 2 {
        flipped.flip(cell).unwrap();
    }
    let positive = NormalSigns::all_positive(ncells);

    for cell in 0..ncells {
        let a = ElementGeometry::new(&grid, &positive, cell).unwrap();
        let b = ElementGeometry::new(&grid, &flipped, cell).unwrap();
        let sign = if cell < ncells / 2 { -1.0 } else { 1.0 };
        for i in 0..3 {
            assert_eq!(a.normal[i] * sign, b.normal[i]);
        }
        assert_eq!(a.integration_element, b.integration_element);
    }

    // Neither kernel depends on the normal
    let points = [0.1, 0.2, 2.0, -2.5, 0.0, 0.5];
    let coefficients = vec![1.0; 3 * ncells];
    let options = EvaluationOptions::default();
    for op in [
        laplace::single_layer(&grid, BasisFamily::Linear, &points, &options).unwrap(),
        laplace::single_layer_gradient(&grid, BasisFamily::Linear, &points, &options).unwrap(),
    ] {
        let a = op.evaluate(&coefficients, &positive).unwrap();
        let b = op.evaluate(&coefficients, &flipped).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_operator_matches_engine() {
    let grid = screen::<f64>(3).unwrap();
    let ncells = grid.number_of_cells();
    let signs = NormalSigns::all_positive(ncells);
    let points = [0.5, 0.5, 1.0, 0.2, 0.9, -0.3];
    let coefficients = (0..ncells).map(|i| i as f64 / 10.0).collect::<Vec<_>>();
    let mut options = EvaluationOptions::default();
    options.set_quadrature_npoints(4);

    let op: PotentialOperator<f64> =
        laplace::single_layer_gradient(&grid, BasisFamily::Constant, &points, &options).unwrap();
    let values = op.evaluate(&coefficients, &signs).unwrap();

    let rule = QuadratureRule::triangle(4).unwrap();
    let elements = (0..ncells).collect::<Vec<_>>();
    let evaluation = PotentialEvaluation {
        grid: &grid,
        elements: &elements,
        normal_signs: &signs,
        evaluation_points: &points,
        coefficients: &coefficients,
        basis: BasisFamily::Constant,
        quadrature_rule: &rule,
        kernel_parameters: KernelParameters::empty(),
        kernel: KernelVariant::LaplaceSingleLayerGradient,
        value_types: ValueTypes::real(),
    };
    let reference = evaluate(&evaluation, &options).unwrap().sum_groups();
    assert_eq!(values, reference);
}

#[test]
fn test_f32() {
    let grid = regular_sphere::<f32>(1).unwrap();
    let ncells = grid.number_of_cells();
    let signs = NormalSigns::all_positive(ncells);
    let coefficients = vec![1.0f32; ncells];
    let options = EvaluationOptions::default();
    let value = laplace::single_layer(&grid, BasisFamily::Constant, &[0.0, 0.0, 10.0], &options)
        .unwrap()
        .evaluate(&coefficients, &signs)
        .unwrap();
    let area = (0..ncells).map(|c| grid.volume(c)).sum::<f32>();
    assert_relative_eq!(
        value[0],
        area / (40.0 * std::f32::consts::PI),
        max_relative = 1e-3
    );
}

mod errors {
    use super::*;

    fn grid() -> TriangleGrid<f64> {
        // Cell 1 is degenerate
        TriangleGrid::new(
            &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 2.0, 0.0, 0.0],
            &[0, 1, 2, 0, 1, 3],
        )
        .unwrap()
    }

    fn evaluation<'a>(
        grid: &'a TriangleGrid<f64>,
        signs: &'a NormalSigns,
        rule: &'a QuadratureRule<f64>,
        elements: &'a [usize],
        coefficients: &'a [f64],
    ) -> PotentialEvaluation<'a, f64> {
        PotentialEvaluation {
            grid,
            elements,
            normal_signs: signs,
            evaluation_points: &[0.0, 0.0, 1.0, 1.0, 1.0, 1.0],
            coefficients,
            basis: BasisFamily::Constant,
            quadrature_rule: rule,
            kernel_parameters: KernelParameters::empty(),
            kernel: KernelVariant::LaplaceSingleLayer,
            value_types: ValueTypes::real(),
        }
    }

    #[test]
    fn test_complex_rejected() {
        let grid = grid();
        let signs = NormalSigns::all_positive(2);
        let rule = QuadratureRule::triangle(1).unwrap();
        for value_types in [
            ValueTypes {
                coefficients: ValueType::Complex,
                ..ValueTypes::real()
            },
            ValueTypes {
                kernel: ValueType::Complex,
                ..ValueTypes::real()
            },
            ValueTypes {
                result: ValueType::Complex,
                ..ValueTypes::real()
            },
        ] {
            let mut e = evaluation(&grid, &signs, &rule, &[0], &[1.0, 1.0]);
            e.value_types = value_types;
            assert!(matches!(
                evaluate(&e, &EvaluationOptions::default()),
                Err(BemppError::UnsupportedVariant(_))
            ));
        }
    }

    #[test]
    fn test_unknown_identifier() {
        assert!(matches!(
            KernelVariant::from_identifier("laplace_double_layer"),
            Err(BemppError::UnsupportedVariant(_))
        ));
        assert_eq!(
            KernelVariant::from_identifier("laplace_single_layer_gradient").unwrap(),
            KernelVariant::LaplaceSingleLayerGradient
        );
    }

    #[test]
    fn test_empty_rule() {
        assert_eq!(
            QuadratureRule::<f64>::new(&[], &[]),
            Err(BemppError::EmptyQuadratureRule)
        );
    }

    #[test]
    fn test_invalid_width() {
        let mut options = EvaluationOptions::default();
        assert_eq!(
            options.set_vector_width_lanes(6),
            Err(BemppError::InvalidVectorWidth(6))
        );
        assert_eq!(
            options.set_batches_per_unit(0),
            Err(BemppError::InvalidUnitSize)
        );
    }

    #[test]
    fn test_mismatched_lengths() {
        let grid = grid();
        let signs = NormalSigns::all_positive(2);
        let rule = QuadratureRule::triangle(1).unwrap();
        let options = EvaluationOptions::default();

        let e = evaluation(&grid, &signs, &rule, &[0], &[1.0]);
        assert!(matches!(
            evaluate(&e, &options),
            Err(BemppError::DimensionMismatch {
                what: "coefficients",
                expected: 2,
                actual: 1
            })
        ));

        let mut e = evaluation(&grid, &signs, &rule, &[0], &[1.0, 1.0]);
        e.basis = BasisFamily::Linear;
        assert!(matches!(
            evaluate(&e, &options),
            Err(BemppError::DimensionMismatch {
                what: "coefficients",
                ..
            })
        ));

        let short_signs = NormalSigns::all_positive(1);
        let e = evaluation(&grid, &short_signs, &rule, &[0], &[1.0, 1.0]);
        assert!(matches!(
            evaluate(&e, &options),
            Err(BemppError::DimensionMismatch {
                what: "normal signs",
                ..
            })
        ));

        let mut e = evaluation(&grid, &signs, &rule, &[0], &[1.0, 1.0]);
        e.evaluation_points = &[0.0, 0.0];
        assert!(matches!(
            evaluate(&e, &options),
            Err(BemppError::DimensionMismatch {
                what: "evaluation points",
                ..
            })
        ));

        let e = evaluation(&grid, &signs, &rule, &[0, 2], &[1.0, 1.0]);
        assert!(matches!(
            evaluate(&e, &options),
            Err(BemppError::ElementOutOfRange {
                element: 2,
                nelements: 2
            })
        ));

        let mut e = evaluation(&grid, &signs, &rule, &[0], &[1.0, 1.0]);
        e.kernel_parameters = KernelParameters::new(&[1.0]).unwrap();
        assert!(evaluate(&e, &options).is_err());
    }

    #[test]
    fn test_invalid_normal_sign() {
        assert!(matches!(
            NormalSigns::from_vec(vec![1, 0, -1]),
            Err(BemppError::InvalidNormalSign {
                element: 1,
                sign: 0
            })
        ));
    }

    #[test]
    fn test_degenerate_element_leaves_buffer_untouched() {
        let grid = grid();
        let signs = NormalSigns::all_positive(2);
        let rule = QuadratureRule::triangle(3).unwrap();
        let coefficients = [1.0, 1.0];
        let elements = [0, 0, 0, 0, 0, 1];
        let e = evaluation(&grid, &signs, &rule, &elements, &coefficients);

        let mut options = EvaluationOptions::default();
        options.set_vector_width(VectorWidth::W4);
        options.set_batches_per_unit(1).unwrap();

        let mut buffer = PotentialBuffer::new(2, 1, e.ngroups(&options));
        *buffer.get_mut(1, 0, 1) = 7.0;
        let before = buffer.clone();

        assert!(matches!(
            evaluate_into(&e, &options, &mut buffer),
            Err(BemppError::DegenerateElement { element: 1, .. })
        ));
        assert_eq!(buffer, before);

        // Without the degenerate element the evaluation succeeds
        let e = evaluation(&grid, &signs, &rule, &elements[..5], &coefficients);
        assert!(evaluate(&e, &options).is_ok());
    }
}
