use humid_air_toolbox::air::PsychroError;
use humid_air_toolbox::config::{self, Config};
use humid_air_toolbox::i18n::{self, keys, Language, Translator};
use humid_air_toolbox::session::{Action, Session};
use humid_air_toolbox::ui_cli::{analysis_table, parse_menu_choice, MenuChoice};

#[test]
fn missing_config_is_created_with_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");

    let cfg = config::load_or_default_at(&path).expect("load");
    assert_eq!(cfg, Config::default());
    assert!(path.exists());
    assert_eq!(cfg.report.dpi, 300);
    assert_eq!(cfg.report.default_graph_name, "humidity_trend");
}

#[test]
fn partial_config_keeps_other_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "language = \"en\"\n[report]\ndpi = 150\n").expect("write");

    let cfg = config::load_or_default_at(&path).expect("load");
    assert_eq!(cfg.language, "en");
    assert_eq!(cfg.report.dpi, 150);
    assert_eq!(cfg.report.width_in, 8.0);
}

#[test]
fn saved_config_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    let mut cfg = Config::default();
    cfg.language = "ko".into();
    cfg.report.default_graph_name = "line_b".into();
    cfg.save_to(&path).expect("save");
    assert_eq!(config::load_or_default_at(&path).expect("load"), cfg);
}

#[test]
fn broken_config_reports_parse_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "language = [").expect("write");
    assert!(matches!(
        config::load_or_default_at(&path),
        Err(config::ConfigError::Parse(_))
    ));
}

#[test]
fn language_resolution_prefers_cli_then_config() {
    assert_eq!(i18n::resolve_language("en", Some("ko")), "en");
    assert_eq!(i18n::resolve_language("auto", Some("ko-KR")), "ko-kr");
    assert_eq!(Translator::new("en-us").language(), Language::En);
    assert_eq!(Translator::new("fr").language(), Language::Ko);
}

#[test]
fn nested_language_pack_is_flattened() {
    let map = i18n::parse_toml_to_map("[result]\ndew_point = \"DP\"\n").expect("map");
    assert_eq!(map.get(keys::RESULT_DEW_POINT).map(String::as_str), Some("DP"));
    assert!(i18n::parse_toml_to_map("").is_none());
}

#[test]
fn supersaturation_message_shows_raw_humidity() {
    let tr = Translator::new("en");
    let msg = tr.error_message(&PsychroError::PhysicallyInvalidResult { raw_rh: 135.54 });
    assert!(msg.contains("135.5%"), "{msg}");

    let ko = Translator::new("ko");
    let msg = ko.error_message(&PsychroError::MissingInput { field: "temp_c" });
    assert!(msg.contains("temp_c"), "{msg}");
}

#[test]
fn footer_caption_is_fixed() {
    for lang in ["ko", "en"] {
        assert_eq!(
            Translator::new(lang).t(keys::FOOTER_CAPTION),
            "Calculation based on Magnus-Tetens Formula | Professional Engineering Tool"
        );
    }
}

#[test]
fn menu_numbers_map_to_choices() {
    assert_eq!(parse_menu_choice("1"), Some(MenuChoice::DewPoint));
    assert_eq!(parse_menu_choice(" 4\n"), Some(MenuChoice::Analysis));
    assert_eq!(parse_menu_choice("0"), Some(MenuChoice::Exit));
    assert_eq!(parse_menu_choice("9"), None);
}

#[test]
fn analysis_table_lists_each_row() {
    let mut session = Session::new();
    for rh in [40.0, 60.0] {
        session
            .handle(Action::ComputeDewPoint {
                temp_c: Some(25.0),
                relative_humidity_pct: Some(rh),
            })
            .expect("dew point");
    }
    let report = session.report().expect("report");
    let table = analysis_table(&Translator::new("en"), &report);
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("Measured [°C]"), "{}", lines[0]);
    assert!(lines[1].trim_start().starts_with('1'));
}
