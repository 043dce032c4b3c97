use std::io::{self, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::convergence::ConvergenceReport;
use crate::history::CalcMode;
use crate::i18n::{self, keys, Translator};
use crate::report::{self, ReportLabels, ReportOptions};
use crate::session::{Action, Outcome, Session};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    DewPoint,
    Humidity,
    SetTarget,
    Analysis,
    Export,
    Reset,
    Settings,
    Exit,
}

/// 메뉴 번호 문자열을 선택지로 바꾼다.
pub fn parse_menu_choice(input: &str) -> Option<MenuChoice> {
    match input.trim() {
        "1" => Some(MenuChoice::DewPoint),
        "2" => Some(MenuChoice::Humidity),
        "3" => Some(MenuChoice::SetTarget),
        "4" => Some(MenuChoice::Analysis),
        "5" => Some(MenuChoice::Export),
        "6" => Some(MenuChoice::Reset),
        "7" => Some(MenuChoice::Settings),
        "0" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_DEW_POINT,
        keys::MAIN_MENU_HUMIDITY,
        keys::MAIN_MENU_SET_TARGET,
        keys::MAIN_MENU_ANALYSIS,
        keys::MAIN_MENU_EXPORT,
        keys::MAIN_MENU_RESET,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(&tr.t(keys::PROMPT_MENU_SELECT))?;
        match parse_menu_choice(&sel) {
            Some(choice) => return Ok(choice),
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 노점 계산 메뉴를 처리한다.
pub fn handle_dew_point(tr: &Translator, session: &mut Session) -> Result<(), AppError> {
    let temp_c = read_optional_f64(tr, &tr.t(keys::PROMPT_TEMPERATURE))?;
    let rh = read_optional_f64(tr, &tr.t(keys::PROMPT_HUMIDITY))?;
    let action = Action::ComputeDewPoint {
        temp_c,
        relative_humidity_pct: rh,
    };
    apply(tr, session, action);
    Ok(())
}

/// 상대습도 역산 메뉴를 처리한다.
pub fn handle_humidity(tr: &Translator, session: &mut Session) -> Result<(), AppError> {
    let temp_c = read_optional_f64(tr, &tr.t(keys::PROMPT_TEMPERATURE))?;
    let dew_point_c = read_optional_f64(tr, &tr.t(keys::PROMPT_DEW_POINT))?;
    apply(
        tr,
        session,
        Action::ComputeHumidity {
            temp_c,
            dew_point_c,
        },
    );
    Ok(())
}

/// 목표값 설정 메뉴를 처리한다.
pub fn handle_set_target(tr: &Translator, session: &mut Session) -> Result<(), AppError> {
    let value = read_f64(tr, &tr.t(keys::PROMPT_TARGET))?;
    apply(tr, session, Action::SetTarget(value));
    Ok(())
}

pub fn handle_reset(tr: &Translator, session: &mut Session) {
    apply(tr, session, Action::Reset);
}

/// 이력과 오차 분석표를 출력한다.
pub fn handle_analysis(tr: &Translator, session: &Session) {
    println!("{}", tr.t(keys::HISTORY_HEADING));
    let history = session.history();
    for (mode, key) in [
        (CalcMode::DewPoint, keys::HISTORY_DEW_POINT_SERIES),
        (CalcMode::Humidity, keys::HISTORY_HUMIDITY_SERIES),
    ] {
        let values: Vec<String> = history
            .series(mode)
            .iter()
            .map(|v| format!("{v:.2}"))
            .collect();
        println!("{}: [{}]", tr.t(key), values.join(", "));
    }
    match session.report() {
        Some(report) => {
            println!("{}", tr.t(keys::ANALYSIS_HEADING));
            print!("{}", analysis_table(tr, &report));
        }
        None => println!("{}", tr.t(keys::HISTORY_EMPTY)),
    }
}

/// 오차 분석표를 고정폭 텍스트로 만든다.
pub fn analysis_table(tr: &Translator, report: &ConvergenceReport) -> String {
    let unit = report.unit.symbol();
    let mut out = format!(
        "{:>4} {:>14} {:>14} {:>12} {:>10}\n",
        tr.t(keys::REPORT_COL_INDEX),
        format!("{} [{unit}]", tr.t(keys::REPORT_COL_MEASURED)),
        format!("{} [{unit}]", tr.t(keys::REPORT_COL_TARGET)),
        format!("{} [{unit}]", tr.t(keys::REPORT_COL_GAP)),
        format!("{} [%]", tr.t(keys::REPORT_COL_ERROR)),
    );
    for row in &report.rows {
        out.push_str(&format!(
            "{:>4} {:>14.2} {:>14.2} {:>12.2} {:>10.2}\n",
            row.index, row.measured, row.target, row.gap, row.error_pct
        ));
    }
    out
}

/// 보고서 PNG를 저장한다. 실패해도 메뉴로 돌아간다.
pub fn handle_export(tr: &Translator, cfg: &Config, session: &Session) -> Result<(), AppError> {
    let name = read_line(&tr.t(keys::PROMPT_GRAPH_NAME))?;
    let name = name.trim();
    let graph_name = if name.is_empty() {
        cfg.report.default_graph_name.as_str()
    } else {
        name
    };
    let options = ReportOptions::from_settings(&cfg.report);
    let labels = ReportLabels::localized(tr, graph_name);
    let saved = session.render_report(&options, &labels).and_then(|png| {
        report::save_report(
            &cfg.report.export_dir,
            graph_name,
            &cfg.report.default_graph_name,
            &png,
        )
    });
    match saved {
        Ok(path) => println!(
            "{}",
            tr.fill(keys::RESULT_EXPORTED, &[("path", path.display().to_string())])
        ),
        Err(e) => println!("{}: {e}", tr.t(keys::ERROR_PREFIX)),
    }
    Ok(())
}

/// 설정 메뉴를 처리한다. 언어가 바뀌면 새 번역기를 반환한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<Option<Translator>, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_LANGUAGE), cfg.language);
    let sel = read_line(&tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
    if sel.trim().is_empty() {
        return Ok(None);
    }
    cfg.language = sel.trim().to_string();
    let code = i18n::resolve_language(&cfg.language, None);
    Ok(Some(Translator::new_with_pack(
        &code,
        cfg.language_pack_dir.as_deref(),
    )))
}

/// 동작을 처리하고 결과 또는 오류 문장을 출력한다.
fn apply(tr: &Translator, session: &mut Session, action: Action) {
    match session.handle(action) {
        Ok(outcome) => print_outcome(tr, &outcome),
        Err(e) => println!("{}: {}", tr.t(keys::ERROR_PREFIX), tr.error_message(&e)),
    }
}

fn print_outcome(tr: &Translator, outcome: &Outcome) {
    match outcome {
        Outcome::Computed {
            mode,
            measurement,
            clamped,
        } => {
            let label = match mode {
                CalcMode::DewPoint => tr.t(keys::RESULT_DEW_POINT),
                CalcMode::Humidity => tr.t(keys::RESULT_HUMIDITY),
            };
            println!("{label}: {}", measurement.display());
            if *clamped {
                println!("{}", tr.t(keys::RESULT_CLAMPED_NOTE));
            }
        }
        Outcome::TargetSet(value) => {
            println!("{}", tr.fill(keys::RESULT_TARGET_SET, &[("value", value.to_string())]))
        }
        Outcome::Reset => println!("{}", tr.t(keys::RESULT_RESET)),
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Err(AppError::InputClosed);
    }
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

/// 빈 입력은 `None`으로 넘겨 계산 전에 누락 오류로 처리되게 한다.
fn read_optional_f64(tr: &Translator, prompt: &str) -> Result<Option<f64>, AppError> {
    loop {
        let s = read_line(prompt)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        match s.parse::<f64>() {
            Ok(v) => return Ok(Some(v)),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
