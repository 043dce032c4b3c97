use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::report::default_font_preferences;

/// 기본 설정 파일 경로.
pub const CONFIG_FILE: &str = "config.toml";

/// 보고서 이미지 출력 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// 인쇄 품질 기준 300 dpi 권장
    pub dpi: u32,
    pub width_in: f64,
    pub height_in: f64,
    /// 앞에서부터 사용 가능한 첫 폰트를 쓴다.
    pub font_preferences: Vec<String>,
    /// 그래프 이름이 비었을 때 쓰는 파일명
    pub default_graph_name: String,
    pub export_dir: PathBuf,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            dpi: 300,
            width_in: 8.0,
            height_in: 9.0,
            font_preferences: default_font_preferences(),
            default_graph_name: "humidity_trend".into(),
            export_dir: PathBuf::from("."),
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드 (auto/ko/en-us ...)
    pub language: String,
    /// 언어팩(TOML) 디렉터리
    pub language_pack_dir: Option<String>,
    pub report: ReportSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".into(),
            language_pack_dir: None,
            report: ReportSettings::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_or_default_at(Path::new(CONFIG_FILE))
}

/// 지정 경로의 설정을 로드한다. 파일이 없으면 기본값을 저장한 뒤 반환한다.
pub fn load_or_default_at(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        info!(path = %path.display(), "default config written");
        Ok(cfg)
    }
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        save_config(self, Path::new(CONFIG_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        save_config(self, path)
    }
}
