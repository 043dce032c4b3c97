use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

use crate::air::PsychroError;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const APP_TITLE: &str = "general.app_title";
    pub const FOOTER_CAPTION: &str = "general.footer_caption";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_DEW_POINT: &str = "main_menu.dew_point";
    pub const MAIN_MENU_HUMIDITY: &str = "main_menu.humidity";
    pub const MAIN_MENU_SET_TARGET: &str = "main_menu.set_target";
    pub const MAIN_MENU_ANALYSIS: &str = "main_menu.analysis";
    pub const MAIN_MENU_EXPORT: &str = "main_menu.export";
    pub const MAIN_MENU_RESET: &str = "main_menu.reset";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const PROMPT_TEMPERATURE: &str = "prompt.temperature";
    pub const PROMPT_HUMIDITY: &str = "prompt.humidity";
    pub const PROMPT_DEW_POINT: &str = "prompt.dew_point";
    pub const PROMPT_TARGET: &str = "prompt.target";
    pub const PROMPT_GRAPH_NAME: &str = "prompt.graph_name";

    pub const RESULT_DEW_POINT: &str = "result.dew_point";
    pub const RESULT_HUMIDITY: &str = "result.humidity";
    pub const RESULT_CLAMPED_NOTE: &str = "result.clamped_note";
    pub const RESULT_TARGET_SET: &str = "result.target_set";
    pub const RESULT_RESET: &str = "result.reset";
    pub const RESULT_EXPORTED: &str = "result.exported";

    pub const HISTORY_HEADING: &str = "history.heading";
    pub const HISTORY_EMPTY: &str = "history.empty";
    pub const HISTORY_DEW_POINT_SERIES: &str = "history.dew_point_series";
    pub const HISTORY_HUMIDITY_SERIES: &str = "history.humidity_series";
    pub const ANALYSIS_HEADING: &str = "analysis.heading";

    pub const ERROR_MISSING_INPUT: &str = "error.missing_input";
    pub const ERROR_INVALID_INPUT: &str = "error.invalid_input";
    pub const ERROR_SUPERSATURATED: &str = "error.supersaturated";
    pub const ERROR_DEGENERATE: &str = "error.degenerate";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const TAB_DEW_POINT: &str = "gui.tab.dew_point";
    pub const TAB_HUMIDITY: &str = "gui.tab.humidity";
    pub const HEADER_INPUT: &str = "gui.header.input";
    pub const HEADER_RESULT: &str = "gui.header.result";
    pub const HEADER_CHART: &str = "gui.header.chart";
    pub const BUTTON_COMPUTE: &str = "gui.button.compute";
    pub const BUTTON_RESET: &str = "gui.button.reset";
    pub const BUTTON_EXPORT: &str = "gui.button.export";
    pub const LABEL_GRAPH_NAME: &str = "gui.label.graph_name";
    pub const LABEL_TARGET: &str = "gui.label.target";

    pub const REPORT_X_AXIS: &str = "report.x_axis";
    pub const REPORT_Y_AXIS: &str = "report.y_axis";
    pub const REPORT_SERIES: &str = "report.series";
    pub const REPORT_TARGET: &str = "report.target";
    pub const REPORT_COL_INDEX: &str = "report.col_index";
    pub const REPORT_COL_MEASURED: &str = "report.col_measured";
    pub const REPORT_COL_TARGET: &str = "report.col_target";
    pub const REPORT_COL_GAP: &str = "report.col_gap";
    pub const REPORT_COL_ERROR: &str = "report.col_error";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 순이며, 영어 번역이 없으면 한국어로 폴백한다.
    pub fn t(&self, key: &str) -> String {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        let s = match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        };
        s.to_string()
    }

    /// `{name}` 자리표시자를 채운 번역 문자열.
    pub fn fill(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(&self.t(key), vars)
    }

    /// 계산 오류를 사용자에게 보여줄 문장으로 바꾼다.
    pub fn error_message(&self, err: &PsychroError) -> String {
        match err {
            PsychroError::MissingInput { field } => {
                self.fill(keys::ERROR_MISSING_INPUT, &[("field", field.to_string())])
            }
            PsychroError::InvalidInput { field, value, .. } => self.fill(
                keys::ERROR_INVALID_INPUT,
                &[("field", field.to_string()), ("value", value.to_string())],
            ),
            PsychroError::PhysicallyInvalidResult { raw_rh } => {
                self.fill(keys::ERROR_SUPERSATURATED, &[("rh", format!("{raw_rh:.1}"))])
            }
            PsychroError::DegenerateNumeric { operation } => {
                self.fill(keys::ERROR_DEGENERATE, &[("operation", operation.to_string())])
            }
        }
    }
}

/// 템플릿의 `{key}`를 값으로 치환한다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "ko".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        "ko" | "ko-kr" => Some(c.clone()),
        "en" | "en-us" => Some(c.clone()),
        "en-uk" | "en-gb" => Some("en-us".into()),
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

/// 중첩 테이블은 `a.b.c` 형태의 점 구분 키로 펼친다.
pub fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        APP_TITLE => "🌡️ 공기 라인 습도/노점 계산기",
        FOOTER_CAPTION => "Calculation based on Magnus-Tetens Formula | Professional Engineering Tool",
        MAIN_MENU_TITLE => "\n=== 엔지니어링 습공기 계산기 ===",
        MAIN_MENU_DEW_POINT => "1) 노점 계산 (Temp/RH → DP)",
        MAIN_MENU_HUMIDITY => "2) 상대습도 계산 (Temp/DP → RH)",
        MAIN_MENU_SET_TARGET => "3) 목표값 설정",
        MAIN_MENU_ANALYSIS => "4) 이력/오차 분석표 보기",
        MAIN_MENU_EXPORT => "5) 보고서 PNG 저장",
        MAIN_MENU_RESET => "6) 초기화",
        MAIN_MENU_SETTINGS => "7) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        PROMPT_TEMPERATURE => "현재 온도 (°C): ",
        PROMPT_HUMIDITY => "상대습도 (%): ",
        PROMPT_DEW_POINT => "이슬점(노점) (°C): ",
        PROMPT_TARGET => "목표값: ",
        PROMPT_GRAPH_NAME => "그래프 이름 (엔터 시 기본값): ",
        RESULT_DEW_POINT => "계산된 이슬점 (Dew Point)",
        RESULT_HUMIDITY => "계산된 상대습도 (Relative Humidity)",
        RESULT_CLAMPED_NOTE => "포화 허용 범위(100.0~100.1%)로 100%로 표시합니다.",
        RESULT_TARGET_SET => "목표값이 {value}(으)로 설정되었습니다.",
        RESULT_RESET => "이력과 목표값을 초기화했습니다.",
        RESULT_EXPORTED => "보고서를 저장했습니다: {path}",
        HISTORY_HEADING => "\n-- 계산 이력 --",
        HISTORY_EMPTY => "이력이 없습니다.",
        HISTORY_DEW_POINT_SERIES => "노점 이력",
        HISTORY_HUMIDITY_SERIES => "상대습도 이력",
        ANALYSIS_HEADING => "\n-- 목표 수렴 오차 분석 --",
        ERROR_MISSING_INPUT => "값을 입력하세요: {field}",
        ERROR_INVALID_INPUT => "입력값이 올바르지 않습니다: {field}={value}",
        ERROR_SUPERSATURATED => {
            "계산된 습도가 {rh}% 입니다. 노점이 현재 온도보다 높을 수 없습니다."
        }
        ERROR_DEGENERATE => "수치적으로 계산할 수 없는 입력입니다 ({operation}).",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_PROMPT_LANGUAGE => "언어 코드 입력 (ko/en, 취소하려면 엔터): ",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        TAB_DEW_POINT => "💧 노점 계산 (Temp/RH → DP)",
        TAB_HUMIDITY => "☁️ 상대습도 계산 (Temp/DP → RH)",
        HEADER_INPUT => "📌 입력 (Input)",
        HEADER_RESULT => "📊 결과 (Result)",
        HEADER_CHART => "📈 추세 / 수렴 분석",
        BUTTON_COMPUTE => "계산",
        BUTTON_RESET => "초기화",
        BUTTON_EXPORT => "PNG 저장",
        LABEL_GRAPH_NAME => "그래프 이름",
        LABEL_TARGET => "목표값",
        REPORT_X_AXIS => "측정 순번",
        REPORT_Y_AXIS => "측정값",
        REPORT_SERIES => "측정값",
        REPORT_TARGET => "목표",
        REPORT_COL_INDEX => "No.",
        REPORT_COL_MEASURED => "측정",
        REPORT_COL_TARGET => "목표",
        REPORT_COL_GAP => "차이",
        REPORT_COL_ERROR => "오차율",
        _ => "",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        APP_TITLE => "🌡️ Air Line Humidity / Dew Point Calculator",
        MAIN_MENU_TITLE => "\n=== Humid Air Toolbox ===",
        MAIN_MENU_DEW_POINT => "1) Dew point (Temp/RH → DP)",
        MAIN_MENU_HUMIDITY => "2) Relative humidity (Temp/DP → RH)",
        MAIN_MENU_SET_TARGET => "3) Set target",
        MAIN_MENU_ANALYSIS => "4) History / error analysis",
        MAIN_MENU_EXPORT => "5) Export report PNG",
        MAIN_MENU_RESET => "6) Reset",
        MAIN_MENU_SETTINGS => "7) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please choose again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        PROMPT_TEMPERATURE => "Temperature (°C): ",
        PROMPT_HUMIDITY => "Relative humidity (%): ",
        PROMPT_DEW_POINT => "Dew point (°C): ",
        PROMPT_TARGET => "Target value: ",
        PROMPT_GRAPH_NAME => "Graph name (Enter for default): ",
        RESULT_DEW_POINT => "Dew Point",
        RESULT_HUMIDITY => "Relative Humidity",
        RESULT_CLAMPED_NOTE => "Within saturation tolerance (100.0-100.1%), shown as 100%.",
        RESULT_TARGET_SET => "Target set to {value}.",
        RESULT_RESET => "History and target cleared.",
        RESULT_EXPORTED => "Report saved: {path}",
        HISTORY_HEADING => "\n-- History --",
        HISTORY_EMPTY => "No history yet.",
        HISTORY_DEW_POINT_SERIES => "Dew point history",
        HISTORY_HUMIDITY_SERIES => "Humidity history",
        ANALYSIS_HEADING => "\n-- Convergence error analysis --",
        ERROR_MISSING_INPUT => "Please enter a value: {field}",
        ERROR_INVALID_INPUT => "Invalid input: {field}={value}",
        ERROR_SUPERSATURATED => {
            "Computed humidity is {rh}%. Dew point cannot exceed the current temperature."
        }
        ERROR_DEGENERATE => "Input cannot be evaluated numerically ({operation}).",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_PROMPT_LANGUAGE => "Language code (ko/en, Enter to cancel): ",
        SETTINGS_SAVED => "Settings saved.",
        TAB_DEW_POINT => "💧 Dew point (Temp/RH → DP)",
        TAB_HUMIDITY => "☁️ Relative humidity (Temp/DP → RH)",
        HEADER_INPUT => "📌 Input",
        HEADER_RESULT => "📊 Result",
        HEADER_CHART => "📈 Trend / convergence",
        BUTTON_COMPUTE => "Compute",
        BUTTON_RESET => "Reset",
        BUTTON_EXPORT => "Save PNG",
        LABEL_GRAPH_NAME => "Graph name",
        LABEL_TARGET => "Target value",
        REPORT_X_AXIS => "Measurement #",
        REPORT_Y_AXIS => "Value",
        REPORT_SERIES => "Measured",
        REPORT_TARGET => "Target",
        REPORT_COL_INDEX => "No.",
        REPORT_COL_MEASURED => "Measured",
        REPORT_COL_TARGET => "Target",
        REPORT_COL_GAP => "Gap",
        REPORT_COL_ERROR => "Error",
        _ => return None,
    };
    Some(s)
}
