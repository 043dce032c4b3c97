use thiserror::Error;
use tracing::info;

use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::session::Session;
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
///
/// 계산/보고서 오류는 메뉴 안에서 메시지로 처리하므로 여기에 포함하지 않는다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 오류: {0}")]
    Config(#[from] crate::config::ConfigError),
    /// 표준 입력이 닫힘 (EOF)
    #[error("입력이 종료되었습니다")]
    InputClosed,
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
///
/// 세션 상태는 이 루프가 단독으로 소유한다.
pub fn run(config: &mut Config, tr: &mut Translator) -> Result<(), AppError> {
    let mut session = Session::new();
    info!(language = tr.language_code(), "interactive session started");
    loop {
        let choice = match ui_cli::main_menu(tr) {
            Ok(choice) => choice,
            Err(AppError::InputClosed) => MenuChoice::Exit,
            Err(e) => return Err(e),
        };
        let step = match choice {
            MenuChoice::DewPoint => ui_cli::handle_dew_point(tr, &mut session),
            MenuChoice::Humidity => ui_cli::handle_humidity(tr, &mut session),
            MenuChoice::SetTarget => ui_cli::handle_set_target(tr, &mut session),
            MenuChoice::Analysis => {
                ui_cli::handle_analysis(tr, &session);
                Ok(())
            }
            MenuChoice::Export => ui_cli::handle_export(tr, config, &session),
            MenuChoice::Reset => {
                ui_cli::handle_reset(tr, &mut session);
                Ok(())
            }
            MenuChoice::Settings => ui_cli::handle_settings(tr, config).and_then(|next| {
                if let Some(next) = next {
                    *tr = next;
                    config.save()?;
                    println!("{}", tr.t(keys::SETTINGS_SAVED));
                }
                Ok(())
            }),
            MenuChoice::Exit => {
                println!("{}", tr.t(keys::APP_EXIT));
                break;
            }
        };
        match step {
            Ok(()) => {}
            Err(AppError::InputClosed) => {
                println!("{}", tr.t(keys::APP_EXIT));
                break;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
