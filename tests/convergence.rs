use humid_air_toolbox::convergence::{analyze, axis_bounds, ConvergenceReport};
use humid_air_toolbox::history::ActiveSeries;
use humid_air_toolbox::quantity::MeasurementUnit;

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "actual={actual} expected={expected}");
}

#[test]
fn zero_target_reports_zero_error() {
    let rows = analyze(&[10.0], 0.0);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].index, 1);
    assert_close(rows[0].gap, 10.0);
    assert_eq!(rows[0].error_pct, 0.0);
}

#[test]
fn gap_and_error_against_target() {
    let rows = analyze(&[5.0, 7.0], 6.0);
    assert_eq!(rows.len(), 2);
    assert_close(rows[0].gap, 1.0);
    assert_close(rows[0].error_pct, 100.0 / 6.0);
    assert_close(rows[1].gap, 1.0);
    assert_eq!(rows[1].index, 2);
}

#[test]
fn negative_target_keeps_sign_of_error() {
    let rows = analyze(&[-4.0], -5.0);
    assert_close(rows[0].gap, 1.0);
    assert_close(rows[0].error_pct, -20.0);
}

#[test]
fn bounds_include_target_with_margin() {
    let b = axis_bounds(&[5.0, 7.0], 6.0);
    assert_close(b.min, 4.4);
    assert_close(b.max, 7.6);

    let b = axis_bounds(&[5.0, 7.0], 20.0);
    assert_close(b.min, 5.0 - 4.5);
    assert_close(b.max, 20.0 + 4.5);
}

#[test]
fn flat_series_uses_fixed_margin() {
    let b = axis_bounds(&[3.0, 3.0], 3.0);
    assert_close(b.min, 1.0);
    assert_close(b.max, 5.0);
    assert!(b.span() > 0.0);
}

#[test]
fn report_draws_target_line_only_for_nonzero_target() {
    let active = ActiveSeries {
        values: vec![12.0, 13.5],
        unit: MeasurementUnit::Celsius,
    };
    let report = ConvergenceReport::build(active.clone(), 0.0);
    assert!(!report.draws_target_line());
    assert_eq!(report.rows.len(), 2);

    let report = ConvergenceReport::build(active, 14.0);
    assert!(report.draws_target_line());
    assert_close(report.latest().expect("row").gap, 0.5);
}
