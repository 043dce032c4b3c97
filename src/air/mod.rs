//! 습공기(공기 라인) 계산 모듈.

pub mod magnus;

pub use magnus::{
    dew_point, format_dew_point, format_humidity, relative_humidity, require_input,
    HumidityResult, PsychroError,
};
