use plotters::style::{FontDesc, FontFamily, FontStyle};
use tracing::{debug, warn};

/// 선호 목록이 모두 실패했을 때 시도하는 일반 계열.
pub const GENERIC_SANS_SERIF: &str = "sans-serif";

const PROBE_TEXT: &str = "Ag 0.1";

/// 기본 선호 폰트 목록. 한글 표와 제목을 위해 한글 지원 폰트를 앞에 둔다.
pub fn default_font_preferences() -> Vec<String> {
    [
        "Malgun Gothic",
        "NanumGothic",
        "Noto Sans CJK KR",
        "Apple SD Gothic Neo",
        "AppleGothic",
        "DejaVu Sans",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// 선호 목록에서 실제로 글자 크기를 잴 수 있는 첫 폰트를 고른다.
///
/// 모두 실패하면 sans-serif를 시도하고, 그것도 없으면 `None`(텍스트 없이 그림)을 반환한다.
pub fn resolve_font_family(preferences: &[String]) -> Option<String> {
    let found = preferences
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(GENERIC_SANS_SERIF))
        .find(|family| can_measure(family))
        .map(str::to_string);
    match &found {
        Some(family) => debug!(family = %family, "report font resolved"),
        None => warn!("no usable font found; report will be drawn without text"),
    }
    found
}

fn can_measure(family: &str) -> bool {
    FontDesc::new(FontFamily::from(family), 16.0, FontStyle::Normal)
        .box_size(PROBE_TEXT)
        .is_ok()
}
