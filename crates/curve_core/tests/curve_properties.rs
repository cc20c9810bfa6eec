//! Property and scenario tests for grid point curves.

use approx::assert_relative_eq;
use curve_core::curves::{GridCurve, GridPointCurve};
use curve_core::fitting::{
    ConstantExtrapolation, CurveStrategies, ExtrapolationStrategy, FittingStrategy,
    LinearExtrapolation, LinearInterpolation, LogLinearInterpolation,
    NaturalCubicSplineInterpolation, NoExtrapolation, PiecewiseConstantInterpolation,
};
use curve_core::math::search::non_last_nearest_index;
use curve_core::types::{ChangeState, CurveError, GridPoint};
use proptest::prelude::*;
use std::sync::Arc;

fn curve_with(
    interpolation: Arc<dyn FittingStrategy>,
    left: Arc<dyn ExtrapolationStrategy>,
    right: Arc<dyn ExtrapolationStrategy>,
    points: &[(f64, f64)],
) -> GridPointCurve {
    let mut curve = GridPointCurve::new(CurveStrategies::new(interpolation, left, right).unwrap());
    let points = points
        .iter()
        .map(|&(x, y)| GridPoint::unlabeled(x, y))
        .collect();
    curve.add_range(points, false).unwrap();
    curve.update().unwrap();
    curve
}

fn linear_constant(points: &[(f64, f64)]) -> GridPointCurve {
    curve_with(
        Arc::new(LinearInterpolation),
        Arc::new(ConstantExtrapolation::left()),
        Arc::new(ConstantExtrapolation::right()),
        points,
    )
}

fn spline_linear(points: &[(f64, f64)]) -> GridPointCurve {
    curve_with(
        Arc::new(NaturalCubicSplineInterpolation),
        Arc::new(LinearExtrapolation::left()),
        Arc::new(LinearExtrapolation::right()),
        points,
    )
}

// ========================================
// Scenarios
// ========================================

#[test]
fn test_linear_constant_scenario() {
    let curve = linear_constant(&[(0.0, 0.0), (1.0, 10.0), (2.0, 20.0)]);
    assert_relative_eq!(curve.value(-5.0).unwrap(), 0.0);
    assert_relative_eq!(curve.value(0.5).unwrap(), 5.0, epsilon = 1e-12);
    assert_relative_eq!(curve.value(2.5).unwrap(), 20.0);
    assert_relative_eq!(curve.integral(0.0, 2.0).unwrap(), 20.0, epsilon = 1e-12);
}

#[test]
fn test_non_last_nearest_index_boundaries() {
    let arguments = [1.0, 2.0, 3.0];
    assert_eq!(non_last_nearest_index(1.0, &arguments).unwrap(), 0);
    assert_eq!(non_last_nearest_index(2.5, &arguments).unwrap(), 1);
    assert_eq!(non_last_nearest_index(3.0, &arguments).unwrap(), 1);
    assert!(non_last_nearest_index(0.5, &arguments)
        .unwrap_err()
        .is_out_of_domain());
}

#[test]
fn test_moved_point_keeps_value_until_update() {
    let mut curve = linear_constant(&[(0.0, 1.0), (1.0, 2.0), (2.0, 3.0), (3.0, 4.0)]);

    let index = curve.set_grid_point_argument(0, 2.5).unwrap();
    assert_eq!(index, 2);
    assert_eq!(curve.arguments(), &[1.0, 2.0, 2.5, 3.0]);
    assert_eq!(curve.grid_value(index).unwrap(), 1.0);
    assert!(!curve.is_operable());
    assert!(matches!(curve.value(1.0), Err(CurveError::NotOperable(_))));

    curve.update().unwrap();
    assert!(curve.is_operable());
    assert_relative_eq!(curve.value(2.5).unwrap(), 1.0);
    assert_relative_eq!(curve.value(-10.0).unwrap(), 2.0);
}

#[test]
fn test_value_only_edit_refits() {
    let mut curve = spline_linear(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0)]);
    curve.set_value(1, 5.0).unwrap();
    assert_eq!(curve.change_state(), ChangeState::ValueChanged);
    curve.update().unwrap();
    assert_relative_eq!(curve.value(1.0).unwrap(), 5.0, epsilon = 1e-12);
}

#[test]
fn test_tracing_output_does_not_disturb_update() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();

    let mut curve = linear_constant(&[(0.0, 1.0), (1.0, 2.0)]);
    curve.set_grid_point_argument(0, 5.0).unwrap();
    curve.update().unwrap();
    assert_eq!(curve.arguments(), &[1.0, 5.0]);
}

// ========================================
// Properties
// ========================================

/// Strictly ascending arguments with values.
fn grid_strategy(min_len: usize) -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::btree_set(-500i32..500, min_len..16).prop_flat_map(|keys| {
        let len = keys.len();
        let arguments: Vec<f64> = keys.into_iter().map(|k| k as f64 / 10.0).collect();
        prop::collection::vec(-100.0f64..100.0, len)
            .prop_map(move |values| arguments.iter().copied().zip(values).collect())
    })
}

fn tolerance(scale: f64) -> f64 {
    1e-9 * scale.abs().max(1.0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_arguments_stay_sorted(arguments in prop::collection::vec(-50i32..50, 1..40)) {
        let mut curve: GridPointCurve = GridPointCurve::new(
            CurveStrategies::new(
                Arc::new(LinearInterpolation),
                Arc::new(ConstantExtrapolation::left()),
                Arc::new(ConstantExtrapolation::right()),
            )
            .unwrap(),
        );
        for a in arguments {
            let a = a as f64;
            match curve.add(a, a, 0.0) {
                Ok(index) => prop_assert_eq!(curve.argument(index).unwrap(), a),
                Err(err) => prop_assert_eq!(err, CurveError::DuplicateArgument { argument: a }),
            }
            prop_assert!(curve.arguments().windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_exact_strategies_reproduce_grid_points(points in grid_strategy(3)) {
        let strategies: Vec<Arc<dyn FittingStrategy>> = vec![
            Arc::new(LinearInterpolation),
            Arc::new(PiecewiseConstantInterpolation),
            Arc::new(NaturalCubicSplineInterpolation),
        ];
        for strategy in strategies {
            let curve = curve_with(
                strategy,
                Arc::new(ConstantExtrapolation::left()),
                Arc::new(ConstantExtrapolation::right()),
                &points,
            );
            for &(x, y) in &points {
                let value = curve.value(x).unwrap();
                prop_assert!(
                    (value - y).abs() <= tolerance(y),
                    "{} at {}: {} vs {}",
                    curve.strategies().fitting().name(),
                    x,
                    value,
                    y
                );
            }
        }
    }

    #[test]
    fn test_log_linear_reproduces_positive_grid_points(points in grid_strategy(2)) {
        let positive: Vec<(f64, f64)> = points.iter().map(|&(x, y)| (x, y.abs() + 0.1)).collect();
        let curve = curve_with(
            Arc::new(LogLinearInterpolation),
            Arc::new(ConstantExtrapolation::left()),
            Arc::new(LinearExtrapolation::right()),
            &positive,
        );
        for &(x, y) in &positive {
            prop_assert!((curve.value(x).unwrap() - y).abs() <= tolerance(y));
        }
    }

    #[test]
    fn test_tails_route_to_extrapolators(points in grid_strategy(3), offset in 0.01f64..100.0) {
        let curve = spline_linear(&points);
        let first = points[0].0;
        let last = points[points.len() - 1].0;

        let mut left = LinearExtrapolation::left().create();
        left.update(curve.fitter()).unwrap();
        let mut right = LinearExtrapolation::right().create();
        right.update(curve.fitter()).unwrap();

        prop_assert_eq!(
            curve.value(first - offset).unwrap(),
            left.value(first - offset).unwrap()
        );
        prop_assert_eq!(
            curve.value(last + offset).unwrap(),
            right.value(last + offset).unwrap()
        );
        prop_assert_eq!(
            curve.derivative(last + offset).unwrap(),
            right.derivative(last + offset).unwrap()
        );
    }

    #[test]
    fn test_integral_antisymmetry(
        points in grid_strategy(3),
        a in -80.0f64..80.0,
        b in -80.0f64..80.0,
    ) {
        let curve = spline_linear(&points);
        let forward = curve.integral(a, b).unwrap();
        let backward = curve.integral(b, a).unwrap();
        prop_assert!((forward + backward).abs() <= tolerance(forward));
    }

    #[test]
    fn test_integral_additivity(
        points in grid_strategy(3),
        mut bounds in prop::collection::vec(-80.0f64..80.0, 3),
    ) {
        bounds.sort_by(f64::total_cmp);
        let (a, b, c) = (bounds[0], bounds[1], bounds[2]);

        let magnitude = points.iter().map(|p| p.1.abs()).fold(1.0, f64::max) * (c - a);
        for curve in [linear_constant(&points), spline_linear(&points)] {
            let whole = curve.integral(a, c).unwrap();
            let left = curve.integral(a, b).unwrap();
            let right = curve.integral(b, c).unwrap();
            let scale = magnitude + left.abs() + right.abs();
            prop_assert!(
                (whole - (left + right)).abs() <= tolerance(scale),
                "{} vs {}",
                whole,
                left + right
            );
        }
    }

    #[test]
    fn test_no_extrapolation_never_widens_integral_domain(
        points in grid_strategy(2),
        a in -80.0f64..80.0,
        b in -80.0f64..80.0,
    ) {
        let curve = curve_with(
            Arc::new(LinearInterpolation),
            Arc::new(NoExtrapolation::left()),
            Arc::new(NoExtrapolation::right()),
            &points,
        );
        let first = points[0].0;
        let last = points[points.len() - 1].0;
        let outside = |x: f64| x < first || x > last;

        for (lower, upper) in [(a, b), (b, a), (a, a), (b, b)] {
            let result = curve.integral(lower, upper);
            if outside(lower) || outside(upper) {
                prop_assert!(
                    matches!(result, Err(ref err) if err.is_out_of_domain()),
                    "integral({}, {}) on [{}, {}] gave {:?}",
                    lower,
                    upper,
                    first,
                    last,
                    result
                );
            } else {
                prop_assert!(result.is_ok());
            }
        }
    }
}
