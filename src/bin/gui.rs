#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use clap::Parser;
use eframe::{egui, App, Frame};
use humid_air_toolbox::{
    config::{self, Config},
    history::CalcMode,
    i18n::{self, keys, Translator},
    report::{self, ReportError, ReportLabels, ReportOptions},
    session::{Action, Outcome, Session},
};
use rfd::FileDialog;
use std::{fs, io, path::Path};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 화면 미리보기용 해상도. 저장은 설정의 dpi를 쓴다.
const PREVIEW_DPI: u32 = 60;

#[derive(Debug, Parser)]
#[command(name = "humid_air_toolbox")]
struct GuiCli {
    /// 언어 코드 (auto/ko/en)
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<(), eframe::Error> {
    let cli = GuiCli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let app_cfg = config::load_or_default().unwrap_or_else(|e| {
        warn!(error = %e, "config load failed, using defaults");
        Config::default()
    });
    let lang = i18n::resolve_language(&cli.lang, Some(app_cfg.language.as_str()));
    let viewport = egui::ViewportBuilder::default().with_inner_size([960.0, 860.0]);
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "Humid Air Toolbox",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                warn!(error = %e, "korean font not available");
            }
            Box::new(GuiApp::new(app_cfg, &lang))
        }),
    )
}

fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .push(font_name);
    ctx.set_fonts(fonts);
}

/// 한글 표시를 위해 시스템 폰트를 순서대로 찾아 적용한다.
/// 1) assets/fonts/ 2) Windows 맑은 고딕/굴림 3) macOS/Linux 한글 폰트
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates: Vec<std::path::PathBuf> = vec![
        "assets/fonts/malgun.ttf".into(),
        "assets/fonts/NanumGothic.ttf".into(),
    ];
    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        for cand in ["malgun.ttf", "gulim.ttc", "batang.ttc"] {
            candidates.push(fonts.join(cand));
        }
    }
    for cand in [
        "/System/Library/Fonts/AppleSDGothicNeo.ttc",
        "/Library/Fonts/AppleGothic.ttf",
        "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    ] {
        candidates.push(cand.into());
    }

    let path = candidates
        .iter()
        .find(|p| p.exists())
        .ok_or_else(|| "no Korean-capable font found".to_string())?;
    let bytes = fs::read(path)
        .map_err(|e| format!("Failed to read font file ({}): {e}", path.display()))?;
    apply_font_bytes(ctx, bytes, "korean_font");
    info!(path = %path.display(), "gui font loaded");
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    DewPoint,
    Humidity,
}

/// 최근 동작의 표시 상태.
#[derive(Debug, Clone, PartialEq)]
enum Feedback {
    Value { label: String, value: String, note: Option<String> },
    Message(String),
    Error(String),
}

struct GuiApp {
    config: Config,
    tr: Translator,
    session: Session,
    tab: Tab,
    // 노점 탭
    dp_temp: f64,
    dp_rh: f64,
    // 상대습도 탭
    rh_temp: f64,
    rh_dew_point: f64,
    target_input: String,
    graph_name: String,
    feedback: Option<Feedback>,
    preview: Option<egui::TextureHandle>,
    preview_dirty: bool,
}

impl GuiApp {
    fn new(config: Config, lang_code: &str) -> Self {
        let tr = Translator::new_with_pack(lang_code, config.language_pack_dir.as_deref());
        let graph_name = config.report.default_graph_name.clone();
        Self {
            config,
            tr,
            session: Session::new(),
            tab: Tab::DewPoint,
            dp_temp: 25.0,
            dp_rh: 50.0,
            rh_temp: 25.0,
            rh_dew_point: 13.9,
            target_input: "0.0".into(),
            graph_name,
            feedback: None,
            preview: None,
            preview_dirty: true,
        }
    }

    /// 세션 처리기로 동작을 넘기고 결과를 표시 상태로 바꾼다.
    fn apply(&mut self, action: Action) {
        let feedback = match self.session.handle(action) {
            Ok(Outcome::Computed {
                mode,
                measurement,
                clamped,
            }) => Feedback::Value {
                label: match mode {
                    CalcMode::DewPoint => self.tr.t(keys::RESULT_DEW_POINT),
                    CalcMode::Humidity => self.tr.t(keys::RESULT_HUMIDITY),
                },
                value: measurement.display(),
                note: clamped.then(|| self.tr.t(keys::RESULT_CLAMPED_NOTE)),
            },
            Ok(Outcome::TargetSet(value)) => Feedback::Message(
                self.tr
                    .fill(keys::RESULT_TARGET_SET, &[("value", value.to_string())]),
            ),
            Ok(Outcome::Reset) => Feedback::Message(self.tr.t(keys::RESULT_RESET)),
            Err(e) => Feedback::Error(self.tr.error_message(&e)),
        };
        self.feedback = Some(feedback);
        self.preview_dirty = true;
    }

    fn compute(&mut self) {
        let action = match self.tab {
            Tab::DewPoint => Action::ComputeDewPoint {
                temp_c: Some(self.dp_temp),
                relative_humidity_pct: Some(self.dp_rh),
            },
            Tab::Humidity => Action::ComputeHumidity {
                temp_c: Some(self.rh_temp),
                dew_point_c: Some(self.rh_dew_point),
            },
        };
        self.apply(action);
    }

    fn commit_target(&mut self) {
        match self.target_input.trim().parse::<f64>() {
            Ok(value) => self.apply(Action::SetTarget(value)),
            Err(_) => {
                self.feedback = Some(Feedback::Error(self.tr.t(keys::ERROR_INVALID_NUMBER)));
            }
        }
    }

    fn reset(&mut self) {
        self.apply(Action::Reset);
        self.target_input = "0.0".into();
    }

    fn labels(&self) -> ReportLabels {
        let title = if self.graph_name.trim().is_empty() {
            self.config.report.default_graph_name.as_str()
        } else {
            self.graph_name.trim()
        };
        ReportLabels::localized(&self.tr, title)
    }

    fn refresh_preview(&mut self, ctx: &egui::Context) {
        if !self.preview_dirty {
            return;
        }
        self.preview_dirty = false;
        let options = ReportOptions::from_settings(&self.config.report).with_dpi(PREVIEW_DPI);
        self.preview = match self.session.render_report(&options, &self.labels()) {
            Ok(png) => match decode_preview(&png) {
                Ok(image) => Some(ctx.load_texture(
                    "report_preview",
                    image,
                    egui::TextureOptions::LINEAR,
                )),
                Err(e) => {
                    warn!(error = %e, "preview decode failed");
                    None
                }
            },
            Err(ReportError::EmptyHistory) => None,
            Err(e) => {
                warn!(error = %e, "preview render failed");
                None
            }
        };
    }

    /// 설정 dpi로 다시 그려 저장 대화상자로 `{그래프 이름}.png`를 저장한다.
    fn export(&mut self) {
        let options = ReportOptions::from_settings(&self.config.report);
        let png = match self.session.render_report(&options, &self.labels()) {
            Ok(png) => png,
            Err(e) => {
                self.feedback = Some(Feedback::Error(e.to_string()));
                return;
            }
        };
        let file_name =
            report::report_file_name(&self.graph_name, &self.config.report.default_graph_name);
        let Some(path) = FileDialog::new()
            .set_directory(&self.config.report.export_dir)
            .set_file_name(file_name)
            .add_filter("PNG", &["png"])
            .save_file()
        else {
            return;
        };
        self.feedback = Some(match fs::write(&path, &png) {
            Ok(()) => {
                info!(path = %path.display(), bytes = png.len(), "report exported");
                Feedback::Message(
                    self.tr
                        .fill(keys::RESULT_EXPORTED, &[("path", path.display().to_string())]),
                )
            }
            Err(e) => Feedback::Error(e.to_string()),
        });
    }

    fn input_ui(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.heading(tr.t(keys::HEADER_INPUT));
        ui.horizontal(|ui| match self.tab {
            Tab::DewPoint => {
                ui.label(tr.t(keys::PROMPT_TEMPERATURE));
                ui.add(egui::DragValue::new(&mut self.dp_temp).speed(0.1).suffix(" °C"));
                ui.label(tr.t(keys::PROMPT_HUMIDITY));
                ui.add(
                    egui::DragValue::new(&mut self.dp_rh)
                        .speed(0.1)
                        .clamp_range(0.1..=100.0)
                        .suffix(" %"),
                );
            }
            Tab::Humidity => {
                ui.label(tr.t(keys::PROMPT_TEMPERATURE));
                ui.add(egui::DragValue::new(&mut self.rh_temp).speed(0.1).suffix(" °C"));
                ui.label(tr.t(keys::PROMPT_DEW_POINT));
                ui.add(
                    egui::DragValue::new(&mut self.rh_dew_point)
                        .speed(0.1)
                        .suffix(" °C"),
                );
            }
        });
        if ui.button(tr.t(keys::BUTTON_COMPUTE)).clicked() {
            self.compute();
        }
    }

    fn result_ui(&self, ui: &mut egui::Ui) {
        ui.heading(self.tr.t(keys::HEADER_RESULT));
        match &self.feedback {
            Some(Feedback::Value { label, value, note }) => {
                ui.label(label);
                ui.label(egui::RichText::new(value).size(28.0).strong());
                if let Some(note) = note {
                    ui.small(note);
                }
            }
            Some(Feedback::Message(msg)) => {
                ui.label(msg);
            }
            Some(Feedback::Error(msg)) => {
                ui.colored_label(egui::Color32::from_rgb(200, 40, 40), msg);
            }
            None => {}
        }
    }

    fn analysis_ui(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.heading(tr.t(keys::HEADER_CHART));
        ui.horizontal(|ui| {
            ui.label(tr.t(keys::LABEL_TARGET));
            let resp = ui.text_edit_singleline(&mut self.target_input);
            if resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                self.commit_target();
            }
            if ui.button("✔").clicked() {
                self.commit_target();
            }
        });

        let history = self.session.history();
        for (mode, key) in [
            (CalcMode::DewPoint, keys::HISTORY_DEW_POINT_SERIES),
            (CalcMode::Humidity, keys::HISTORY_HUMIDITY_SERIES),
        ] {
            let values: Vec<String> = history
                .series(mode)
                .iter()
                .map(|v| format!("{v:.2}"))
                .collect();
            ui.label(format!("{}: [{}]", tr.t(key), values.join(", ")));
        }

        match self.session.report() {
            Some(report) => {
                let unit = report.unit.symbol();
                egui::Grid::new("analysis_grid")
                    .striped(true)
                    .num_columns(5)
                    .show(ui, |ui| {
                        ui.strong(tr.t(keys::REPORT_COL_INDEX));
                        ui.strong(format!("{} [{unit}]", tr.t(keys::REPORT_COL_MEASURED)));
                        ui.strong(format!("{} [{unit}]", tr.t(keys::REPORT_COL_TARGET)));
                        ui.strong(format!("{} [{unit}]", tr.t(keys::REPORT_COL_GAP)));
                        ui.strong(format!("{} [%]", tr.t(keys::REPORT_COL_ERROR)));
                        ui.end_row();
                        for row in &report.rows {
                            ui.label(row.index.to_string());
                            ui.label(format!("{:.2}", row.measured));
                            ui.label(format!("{:.2}", row.target));
                            ui.label(format!("{:.2}", row.gap));
                            ui.label(format!("{:.2}", row.error_pct));
                            ui.end_row();
                        }
                    });
            }
            None => {
                ui.label(tr.t(keys::HISTORY_EMPTY));
            }
        }

        if let Some(tex) = &self.preview {
            let size = tex.size_vec2();
            let scale = (ui.available_width() / size.x).min(1.0);
            ui.add(egui::Image::from_texture(egui::load::SizedTexture::new(
                tex.id(),
                size * scale,
            )));
        }

        ui.horizontal(|ui| {
            ui.label(tr.t(keys::LABEL_GRAPH_NAME));
            if ui.text_edit_singleline(&mut self.graph_name).changed() {
                self.preview_dirty = true;
            }
            if ui.button(tr.t(keys::BUTTON_EXPORT)).clicked() {
                self.export();
            }
            if ui.button(tr.t(keys::BUTTON_RESET)).clicked() {
                self.reset();
            }
        });
    }
}

fn decode_preview(png: &[u8]) -> Result<egui::ColorImage, image::ImageError> {
    let img = image::load_from_memory(png)?.to_rgba8();
    let size = [img.width() as usize, img.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw()))
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.refresh_preview(ctx);
        let tr = self.tr.clone();

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.small(tr.t(keys::FOOTER_CAPTION));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading(tr.t(keys::APP_TITLE));
                ui.separator();
                ui.horizontal(|ui| {
                    ui.selectable_value(&mut self.tab, Tab::DewPoint, tr.t(keys::TAB_DEW_POINT));
                    ui.selectable_value(&mut self.tab, Tab::Humidity, tr.t(keys::TAB_HUMIDITY));
                });
                ui.separator();
                self.input_ui(ui);
                ui.separator();
                self.result_ui(ui);
                ui.separator();
                self.analysis_ui(ui);
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> GuiApp {
        GuiApp::new(Config::default(), "ko")
    }

    #[test]
    fn starts_with_default_inputs() {
        let app = app();
        assert_eq!(app.dp_temp, 25.0);
        assert_eq!(app.dp_rh, 50.0);
        assert_eq!(app.rh_dew_point, 13.9);
        assert_eq!(app.tab, Tab::DewPoint);
    }

    #[test]
    fn compute_dew_point_shows_formatted_value() {
        let mut app = app();
        app.compute();
        match app.feedback {
            Some(Feedback::Value { ref value, .. }) => assert_eq!(value, "13.86 °C"),
            ref other => panic!("unexpected feedback: {other:?}"),
        }
        assert_eq!(app.session.history().series(CalcMode::DewPoint).len(), 1);
        assert!(app.preview_dirty);
    }

    #[test]
    fn supersaturated_humidity_shows_error_without_history() {
        let mut app = app();
        app.tab = Tab::Humidity;
        app.rh_temp = 20.0;
        app.rh_dew_point = 25.0;
        app.compute();
        assert!(matches!(app.feedback, Some(Feedback::Error(_))));
        assert!(app.session.history().series(CalcMode::Humidity).is_empty());
    }

    #[test]
    fn invalid_target_text_keeps_previous_target() {
        let mut app = app();
        app.target_input = "12.5".into();
        app.commit_target();
        app.target_input = "abc".into();
        app.commit_target();
        assert!(matches!(app.feedback, Some(Feedback::Error(_))));
        assert_eq!(app.session.history().target(), 12.5);
    }

    #[test]
    fn reset_clears_session_and_target_text() {
        let mut app = app();
        app.compute();
        app.target_input = "3".into();
        app.commit_target();
        app.reset();
        assert!(app.session.report().is_none());
        assert_eq!(app.target_input, "0.0");
    }
}
