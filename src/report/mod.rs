//! 수렴 분석 보고서(차트 + 표) 이미지 생성과 저장.

pub mod chart;
pub mod export;
pub mod font;

use thiserror::Error;

use crate::config::ReportSettings;
use crate::i18n::{keys, Translator};

pub use chart::render_png;
pub use export::{report_file_name, save_report};
pub use font::{default_font_preferences, resolve_font_family};

/// 한 변의 최대 픽셀 수. 잘못된 dpi로 거대한 버퍼를 잡지 않도록 제한한다.
pub const MAX_SIDE_PX: u32 = 12_000;

/// 보고서 생성/저장 중 발생 가능한 오류.
#[derive(Debug, Error)]
pub enum ReportError {
    /// 분석할 이력이 없음
    #[error("보고서를 만들 이력이 없습니다")]
    EmptyHistory,
    /// 크기/해상도 설정 오류
    #[error("보고서 설정 오류: {0}")]
    InvalidOptions(String),
    /// 차트 그리기 실패
    #[error("차트 그리기 오류: {0}")]
    Draw(String),
    /// PNG 인코딩 실패
    #[error("PNG 인코딩 오류: {0}")]
    Encode(String),
    #[error("이미지 오류: {0}")]
    Image(#[from] image::ImageError),
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
}

/// 보고서 이미지 크기와 글꼴 선호 목록.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    pub dpi: u32,
    pub width_in: f64,
    pub height_in: f64,
    pub font_preferences: Vec<String>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            dpi: 300,
            width_in: 8.0,
            height_in: 9.0,
            font_preferences: default_font_preferences(),
        }
    }
}

impl ReportOptions {
    pub fn from_settings(settings: &ReportSettings) -> Self {
        Self {
            dpi: settings.dpi,
            width_in: settings.width_in,
            height_in: settings.height_in,
            font_preferences: settings.font_preferences.clone(),
        }
    }

    /// 같은 설정에서 해상도만 바꾼 사본 (화면 미리보기용).
    pub fn with_dpi(&self, dpi: u32) -> Self {
        Self {
            dpi,
            ..self.clone()
        }
    }

    /// 인치 × dpi 로 픽셀 크기를 계산한다.
    pub fn pixel_size(&self) -> Result<(u32, u32), ReportError> {
        if self.dpi == 0 {
            return Err(ReportError::InvalidOptions("dpi는 0보다 커야 합니다".into()));
        }
        let side = |inches: f64, name: &str| -> Result<u32, ReportError> {
            let px = (inches * self.dpi as f64).round();
            if !px.is_finite() || px < 1.0 {
                return Err(ReportError::InvalidOptions(format!(
                    "{name}는 0보다 커야 합니다"
                )));
            }
            if px > MAX_SIDE_PX as f64 {
                return Err(ReportError::InvalidOptions(format!(
                    "{name} × dpi 가 {MAX_SIDE_PX}px를 넘습니다"
                )));
            }
            Ok(px as u32)
        };
        Ok((side(self.width_in, "width_in")?, side(self.height_in, "height_in")?))
    }
}

/// 차트/표에 찍히는 문자열.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLabels {
    pub title: String,
    pub x_axis: String,
    pub y_axis: String,
    pub series: String,
    pub target: String,
    pub col_index: String,
    pub col_measured: String,
    pub col_target: String,
    pub col_gap: String,
    pub col_error: String,
}

impl ReportLabels {
    /// 번역기에서 라벨을 채운다. 제목은 사용자가 지정한 그래프 이름.
    pub fn localized(tr: &Translator, title: &str) -> Self {
        Self {
            title: title.to_string(),
            x_axis: tr.t(keys::REPORT_X_AXIS),
            y_axis: tr.t(keys::REPORT_Y_AXIS),
            series: tr.t(keys::REPORT_SERIES),
            target: tr.t(keys::REPORT_TARGET),
            col_index: tr.t(keys::REPORT_COL_INDEX),
            col_measured: tr.t(keys::REPORT_COL_MEASURED),
            col_target: tr.t(keys::REPORT_COL_TARGET),
            col_gap: tr.t(keys::REPORT_COL_GAP),
            col_error: tr.t(keys::REPORT_COL_ERROR),
        }
    }
}
