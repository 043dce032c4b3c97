use humid_air_toolbox::air::PsychroError;
use humid_air_toolbox::history::CalcMode;
use humid_air_toolbox::quantity::MeasurementUnit;
use humid_air_toolbox::session::{Action, Outcome, Session};

fn dew_point_action(t: f64, rh: f64) -> Action {
    Action::ComputeDewPoint {
        temp_c: Some(t),
        relative_humidity_pct: Some(rh),
    }
}

fn humidity_action(t: f64, dp: f64) -> Action {
    Action::ComputeHumidity {
        temp_c: Some(t),
        dew_point_c: Some(dp),
    }
}

#[test]
fn dew_point_is_recorded_and_reported() {
    let mut session = Session::new();
    let outcome = session.handle(dew_point_action(25.0, 50.0)).expect("compute");
    match outcome {
        Outcome::Computed {
            mode,
            measurement,
            clamped,
        } => {
            assert_eq!(mode, CalcMode::DewPoint);
            assert_eq!(measurement.unit, MeasurementUnit::Celsius);
            assert_eq!(measurement.display(), "13.86 °C");
            assert!(!clamped);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    let report = session.report().expect("report");
    assert_eq!(report.series.len(), 1);
    assert_eq!(report.unit, MeasurementUnit::Celsius);
}

#[test]
fn supersaturated_result_is_not_recorded() {
    let mut session = Session::new();
    let err = session.handle(humidity_action(20.0, 25.0)).expect_err("reject");
    assert!(matches!(err, PsychroError::PhysicallyInvalidResult { .. }));
    assert!(session.history().series(CalcMode::Humidity).is_empty());
    assert!(session.report().is_none());
}

#[test]
fn clamped_result_is_recorded_as_saturated() {
    let mut session = Session::new();
    let outcome = session.handle(humidity_action(25.0, 25.01)).expect("clamp");
    assert!(matches!(outcome, Outcome::Computed { clamped: true, .. }));
    assert_eq!(
        session.history().series(CalcMode::Humidity).to_vec(),
        vec![100.0]
    );
}

#[test]
fn missing_input_leaves_state_untouched() {
    let mut session = Session::new();
    let err = session
        .handle(Action::ComputeDewPoint {
            temp_c: Some(20.0),
            relative_humidity_pct: None,
        })
        .expect_err("missing");
    assert_eq!(
        err,
        PsychroError::MissingInput {
            field: "relative_humidity_pct"
        }
    );
    assert!(session.history().series(CalcMode::DewPoint).is_empty());
}

#[test]
fn dew_point_history_wins_over_humidity() {
    let mut session = Session::new();
    session.handle(humidity_action(25.0, 13.9)).expect("rh");
    assert_eq!(
        session.report().expect("report").unit,
        MeasurementUnit::Percent
    );
    session.handle(dew_point_action(25.0, 50.0)).expect("dp");
    assert_eq!(
        session.report().expect("report").unit,
        MeasurementUnit::Celsius
    );
}

#[test]
fn target_feeds_analysis_and_reset_clears_everything() {
    let mut session = Session::new();
    session.handle(dew_point_action(25.0, 50.0)).expect("dp");
    assert_eq!(
        session.handle(Action::SetTarget(14.0)),
        Ok(Outcome::TargetSet(14.0))
    );
    let report = session.report().expect("report");
    assert!(report.draws_target_line());
    let row = report.latest().expect("row");
    assert!((row.gap - (14.0 - row.measured)).abs() < 1e-12);

    assert_eq!(session.handle(Action::Reset), Ok(Outcome::Reset));
    assert!(session.report().is_none());
    assert_eq!(session.history().target(), 0.0);
}

#[test]
fn non_finite_target_is_rejected() {
    let mut session = Session::new();
    session.handle(Action::SetTarget(3.0)).expect("target");
    assert!(matches!(
        session.handle(Action::SetTarget(f64::NAN)),
        Err(PsychroError::InvalidInput { field: "target", .. })
    ));
    assert_eq!(session.history().target(), 3.0);
}
