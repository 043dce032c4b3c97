use humid_air_toolbox::i18n::Translator;
use humid_air_toolbox::report::{
    report_file_name, save_report, ReportError, ReportLabels, ReportOptions,
};
use humid_air_toolbox::session::{Action, Session};

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

fn small_options() -> ReportOptions {
    ReportOptions::default().with_dpi(40)
}

fn labels() -> ReportLabels {
    ReportLabels::localized(&Translator::new("en"), "trend")
}

fn session_with_history() -> Session {
    let mut session = Session::new();
    for rh in [40.0, 45.0, 50.0] {
        session
            .handle(Action::ComputeDewPoint {
                temp_c: Some(25.0),
                relative_humidity_pct: Some(rh),
            })
            .expect("dew point");
    }
    session.handle(Action::SetTarget(13.0)).expect("target");
    session
}

#[test]
fn render_produces_png_with_expected_size() {
    let session = session_with_history();
    let png = session
        .render_report(&small_options(), &labels())
        .expect("render");
    assert!(png.starts_with(PNG_MAGIC));

    let img = image::load_from_memory(&png).expect("decode");
    assert_eq!((img.width(), img.height()), (320, 360));
}

#[test]
fn render_without_target_line_still_succeeds() {
    let mut session = Session::new();
    session
        .handle(Action::ComputeHumidity {
            temp_c: Some(25.0),
            dew_point_c: Some(13.9),
        })
        .expect("humidity");
    let png = session
        .render_report(&small_options(), &labels())
        .expect("render");
    assert!(png.starts_with(PNG_MAGIC));
}

#[test]
fn empty_history_has_nothing_to_render() {
    let session = Session::new();
    assert!(matches!(
        session.render_report(&small_options(), &labels()),
        Err(ReportError::EmptyHistory)
    ));
}

#[test]
fn invalid_dimensions_are_rejected() {
    let zero_dpi = ReportOptions::default().with_dpi(0);
    assert!(matches!(
        zero_dpi.pixel_size(),
        Err(ReportError::InvalidOptions(_))
    ));

    let huge = ReportOptions::default().with_dpi(5000);
    assert!(matches!(huge.pixel_size(), Err(ReportError::InvalidOptions(_))));

    assert_eq!(ReportOptions::default().pixel_size().expect("size"), (2400, 2700));
}

#[test]
fn file_name_is_sanitized() {
    assert_eq!(report_file_name("dew trend", "fallback"), "dew trend.png");
    assert_eq!(report_file_name("a/b:c", "fallback"), "a_b_c.png");
    assert_eq!(report_file_name("chart.png", "fallback"), "chart.png");
    assert_eq!(report_file_name("  ", "fallback"), "fallback.png");
    assert_eq!(report_file_name("", ""), "graph.png");
}

#[test]
fn save_report_writes_named_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("reports");
    let session = session_with_history();
    let png = session
        .render_report(&small_options(), &labels())
        .expect("render");

    let path = save_report(&out, "line A", "humidity_trend", &png).expect("save");
    assert_eq!(path, out.join("line A.png"));
    assert_eq!(std::fs::read(&path).expect("read back"), png);
}
