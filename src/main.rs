use std::io;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use humid_air_toolbox::{
    app, config,
    i18n::{self, keys, Translator},
    session::{Action, Outcome, Session},
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "humid_air_toolbox_cli", about = "Magnus-Tetens dew point / humidity calculator")]
struct Cli {
    /// 언어 코드 (auto/ko/en)
    #[arg(long, short = 'L', global = true, default_value = "auto")]
    lang: String,
    /// 디버그 로그 출력
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 온도/상대습도로 노점 계산
    DewPoint {
        #[arg(long, allow_negative_numbers = true)]
        temp: f64,
        #[arg(long)]
        rh: f64,
    },
    /// 온도/노점으로 상대습도 계산
    Humidity {
        #[arg(long, allow_negative_numbers = true)]
        temp: f64,
        #[arg(long, allow_negative_numbers = true)]
        dew_point: f64,
    },
    /// 메뉴 기반 대화형 세션 (기본값)
    Interactive,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let mut cfg = config::load_or_default()?;
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let mut tr = Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());

    match cli.command.unwrap_or(Command::Interactive) {
        Command::DewPoint { temp, rh } => one_shot(
            &tr,
            Action::ComputeDewPoint {
                temp_c: Some(temp),
                relative_humidity_pct: Some(rh),
            },
        ),
        Command::Humidity { temp, dew_point } => one_shot(
            &tr,
            Action::ComputeHumidity {
                temp_c: Some(temp),
                dew_point_c: Some(dew_point),
            },
        ),
        Command::Interactive => {
            app::run(&mut cfg, &mut tr)?;
            Ok(())
        }
    }
}

/// 단발 계산. 오류는 사용자 문장으로 바꿔 종료 코드로 알린다.
fn one_shot(tr: &Translator, action: Action) -> Result<()> {
    let mut session = Session::new();
    match session.handle(action) {
        Ok(Outcome::Computed {
            measurement,
            clamped,
            ..
        }) => {
            println!("{}", measurement.display());
            if clamped {
                eprintln!("{}", tr.t(keys::RESULT_CLAMPED_NOTE));
            }
            Ok(())
        }
        Ok(_) => Ok(()),
        Err(e) => Err(anyhow!("{}: {}", tr.t(keys::ERROR_PREFIX), tr.error_message(&e))),
    }
}
