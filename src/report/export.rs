use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::ReportError;

const FORBIDDEN: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// 그래프 이름으로 `{이름}.png` 파일명을 만든다.
///
/// 경로 구분자 등은 `_`로 바꾸고, 이름이 비면 `fallback`을 쓴다.
pub fn report_file_name(graph_name: &str, fallback: &str) -> String {
    let sanitize = |name: &str| -> String {
        let trimmed = name.trim();
        let trimmed = trimmed
            .strip_suffix(".png")
            .or_else(|| trimmed.strip_suffix(".PNG"))
            .unwrap_or(trimmed);
        trimmed
            .chars()
            .map(|c| {
                if FORBIDDEN.contains(&c) || c.is_control() {
                    '_'
                } else {
                    c
                }
            })
            .collect::<String>()
            .trim_matches(|c: char| c == '.' || c == '_' || c.is_whitespace())
            .to_string()
    };
    let name = sanitize(graph_name);
    let name = if name.is_empty() {
        sanitize(fallback)
    } else {
        name
    };
    let name = if name.is_empty() { "graph".to_string() } else { name };
    format!("{name}.png")
}

/// PNG 바이트를 `dir/{그래프 이름}.png`로 저장하고 경로를 반환한다.
pub fn save_report(
    dir: &Path,
    graph_name: &str,
    fallback: &str,
    png: &[u8],
) -> Result<PathBuf, ReportError> {
    if !dir.as_os_str().is_empty() {
        fs::create_dir_all(dir)?;
    }
    let path = dir.join(report_file_name(graph_name, fallback));
    fs::write(&path, png)?;
    info!(path = %path.display(), bytes = png.len(), "report exported");
    Ok(path)
}
