use humid_air_toolbox::history::{CalcMode, HistoryStore, HISTORY_CAPACITY};
use humid_air_toolbox::quantity::MeasurementUnit;

#[test]
fn eleventh_append_evicts_oldest() {
    let mut store = HistoryStore::new();
    for i in 1..=11 {
        store.append(CalcMode::DewPoint, i as f64);
    }
    let series = store.series(CalcMode::DewPoint);
    assert_eq!(series.len(), HISTORY_CAPACITY);
    assert_eq!(series.to_vec(), (2..=11).map(|i| i as f64).collect::<Vec<_>>());
    assert_eq!(series.latest(), Some(11.0));
}

#[test]
fn series_are_independent() {
    let mut store = HistoryStore::new();
    store.append(CalcMode::Humidity, 55.0);
    assert!(store.series(CalcMode::DewPoint).is_empty());
    assert_eq!(store.series(CalcMode::Humidity).to_vec(), vec![55.0]);
}

#[test]
fn active_series_prefers_dew_point() {
    let mut store = HistoryStore::new();
    assert!(store.active_series().is_none());

    store.append(CalcMode::Humidity, 48.0);
    let active = store.active_series().expect("humidity active");
    assert_eq!(active.unit, MeasurementUnit::Percent);
    assert_eq!(active.values, vec![48.0]);

    store.append(CalcMode::DewPoint, 12.0);
    let active = store.active_series().expect("dew point active");
    assert_eq!(active.unit, MeasurementUnit::Celsius);
    assert_eq!(active.values, vec![12.0]);
}

#[test]
fn reset_clears_both_series_and_target() {
    let mut store = HistoryStore::new();
    store.append(CalcMode::DewPoint, 10.0);
    store.append(CalcMode::Humidity, 60.0);
    store.set_target(14.0);
    store.reset();
    assert!(store.series(CalcMode::DewPoint).is_empty());
    assert!(store.series(CalcMode::Humidity).is_empty());
    assert_eq!(store.target(), 0.0);
    assert!(store.active_series().is_none());
}
