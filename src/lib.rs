//! 습공기 계산 핵심 로직을 라이브러리로 분리하여 CLI와 GUI가 같은 세션 처리기를 쓰도록 한다.

pub mod air;
pub mod app;
pub mod config;
pub mod convergence;
pub mod history;
pub mod i18n;
pub mod quantity;
pub mod report;
pub mod session;
pub mod ui_cli;
