use humid_air_toolbox::air::{
    dew_point, format_dew_point, format_humidity, relative_humidity, require_input, PsychroError,
};
use proptest::prelude::*;

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "actual={actual} expected={expected} tol={tol}"
    );
}

#[test]
fn dew_point_reference_25c_50pct() {
    let dp = dew_point(25.0, 50.0).expect("dew point");
    assert_close(dp, 13.86, 0.01);
    assert_eq!(format_dew_point(dp), "13.86 °C");
}

#[test]
fn dew_point_equals_temperature_at_saturation() {
    let dp = dew_point(18.0, 100.0).expect("dew point");
    assert_close(dp, 18.0, 1e-9);
}

#[test]
fn humidity_reference_25c_dp_13_9() {
    let rh = relative_humidity(25.0, 13.9).expect("humidity");
    assert_close(rh.value, 50.1, 0.1);
    assert!(!rh.clamped);
    assert_eq!(format_humidity(rh.value), "50.1 %");
}

#[test]
fn humidity_just_over_saturation_is_clamped() {
    // 25.01°C 노점은 약 100.06%
    let rh = relative_humidity(25.0, 25.01).expect("humidity");
    assert_eq!(rh.value, 100.0);
    assert!(rh.clamped);
}

#[test]
fn humidity_far_over_saturation_is_rejected() {
    let err = relative_humidity(20.0, 25.0).expect_err("supersaturated");
    match err {
        PsychroError::PhysicallyInvalidResult { raw_rh } => assert!(raw_rh > 130.0, "{raw_rh}"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(matches!(
        relative_humidity(25.0, 25.05),
        Err(PsychroError::PhysicallyInvalidResult { .. })
    ));
}

#[test]
fn dew_point_rejects_out_of_range_humidity() {
    for rh in [0.0, -5.0, 100.5] {
        assert!(
            matches!(dew_point(20.0, rh), Err(PsychroError::InvalidInput { .. })),
            "rh={rh}"
        );
    }
    assert!(matches!(
        dew_point(f64::NAN, 50.0),
        Err(PsychroError::InvalidInput { field: "temp_c", .. })
    ));
}

#[test]
fn singular_temperature_is_degenerate() {
    assert_eq!(
        dew_point(-243.04, 50.0),
        Err(PsychroError::DegenerateNumeric {
            operation: "dew_point"
        })
    );
}

#[test]
fn missing_input_names_field() {
    assert_eq!(require_input(Some(1.5), "temp_c"), Ok(1.5));
    assert_eq!(
        require_input(None, "dew_point_c"),
        Err(PsychroError::MissingInput {
            field: "dew_point_c"
        })
    );
}

#[test]
fn negative_dew_point_below_freezing() {
    let dp = dew_point(0.0, 40.0).expect("dew point");
    assert!(dp < -10.0 && dp > -15.0, "dp={dp}");
}

proptest! {
    #[test]
    fn dew_point_then_humidity_round_trips(t in -40.0f64..50.0, rh in 0.1f64..=100.0) {
        let dp = dew_point(t, rh).expect("dew point");
        prop_assert!(dp <= t + 1e-9);
        let back = relative_humidity(t, dp).expect("humidity");
        prop_assert!((back.value - rh).abs() < 1e-6, "rh={} back={}", rh, back.value);
    }
}
