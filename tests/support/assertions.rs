use capline::domain::FactorComputationResult;
use rust_decimal::Decimal;

pub fn assert_near(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

pub fn assert_decimal_near(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "expected {} ± {}, got {}",
        expected,
        tolerance,
        actual
    );
}

/// At most one side carries points and the signal stays in `[-1, 1]`.
pub fn assert_well_formed(result: &FactorComputationResult) {
    assert!(
        (-1.0..=1.0).contains(&result.signal),
        "{} signal {} out of range",
        result.key,
        result.signal
    );
    assert!(result.points.a() >= 0.0 && result.points.b() >= 0.0);
    assert!(
        result.points.a() == 0.0 || result.points.b() == 0.0,
        "{} scored both sides: {:?}",
        result.key,
        result.points
    );
}
