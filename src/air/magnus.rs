//! Magnus-Tetens 근사식 기반 노점/상대습도 계산.
//!
//! 포화수증기압을 `exp(b·T / (c + T))` 꼴로 근사하며, 상수는 b=17.625, c=243.04(°C)를 쓴다.

use thiserror::Error;

/// Magnus 상수 b (무차원)
pub const MAGNUS_B: f64 = 17.625;
/// Magnus 상수 c [°C]
pub const MAGNUS_C: f64 = 243.04;

/// 이 값을 넘는 상대습도는 과포화로 보고 결과를 거부한다.
pub const RH_REJECT_THRESHOLD_PCT: f64 = 100.1;
/// 허용 구간(100.0, 100.1]의 값은 이 값으로 고정한다.
pub const RH_SATURATED_PCT: f64 = 100.0;

/// 습공기 계산 중 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PsychroError {
    /// 필수 입력이 비어 있음
    #[error("입력 누락: {field}")]
    MissingInput { field: &'static str },
    /// 계산 전에 거부되는 입력값
    #[error("입력 오류: {field}={value} ({reason})")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// 노점이 현재 온도와 맞지 않아 상대습도가 100.1%를 넘음
    #[error("계산된 습도가 {raw_rh:.1}% 입니다. 노점이 현재 온도보다 높을 수 없습니다.")]
    PhysicallyInvalidResult { raw_rh: f64 },
    /// 분모가 0에 가까워 유한한 결과를 얻지 못함
    #[error("수치 계산 불가: {operation}")]
    DegenerateNumeric { operation: &'static str },
}

/// 상대습도 역산 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HumidityResult {
    /// 보고할 상대습도 [%], 100.0 이하
    pub value: f64,
    /// 100.0~100.1 구간에서 100.0으로 고정되었는지 여부
    pub clamped: bool,
}

/// UI에서 넘어온 선택 입력값을 확인한다. 비어 있으면 `MissingInput`.
pub fn require_input(value: Option<f64>, field: &'static str) -> Result<f64, PsychroError> {
    value.ok_or(PsychroError::MissingInput { field })
}

fn ensure_finite(value: f64, field: &'static str) -> Result<f64, PsychroError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PsychroError::InvalidInput {
            field,
            value,
            reason: "유한한 숫자가 아닙니다",
        })
    }
}

fn gamma_t(temp_c: f64) -> f64 {
    MAGNUS_B * temp_c / (MAGNUS_C + temp_c)
}

/// 건구온도와 상대습도로 노점을 계산한다.
///
/// γ = ln(RH/100) + b·T/(c+T), DP = c·γ / (b − γ)
///
/// 상대습도는 (0, 100] 범위여야 한다. 온도 범위는 제한하지 않는다.
pub fn dew_point(temp_c: f64, relative_humidity_pct: f64) -> Result<f64, PsychroError> {
    let t = ensure_finite(temp_c, "temp_c")?;
    let rh = ensure_finite(relative_humidity_pct, "relative_humidity_pct")?;
    if rh <= 0.0 {
        return Err(PsychroError::InvalidInput {
            field: "relative_humidity_pct",
            value: rh,
            reason: "상대습도는 0보다 커야 합니다",
        });
    }
    if rh > 100.0 {
        return Err(PsychroError::InvalidInput {
            field: "relative_humidity_pct",
            value: rh,
            reason: "상대습도는 100%를 넘을 수 없습니다",
        });
    }

    let gamma = (rh / 100.0).ln() + gamma_t(t);
    let dp = MAGNUS_C * gamma / (MAGNUS_B - gamma);
    if !dp.is_finite() {
        return Err(PsychroError::DegenerateNumeric {
            operation: "dew_point",
        });
    }
    Ok(dp)
}

/// 건구온도와 노점으로 상대습도를 역산한다.
///
/// γ_dp = b·DP/(c+DP), RH = 100·exp(γ_dp − b·T/(c+T))
///
/// 100.1%를 넘으면 `PhysicallyInvalidResult`, 그 이하는 `min(RH, 100.0)`을 반환한다.
pub fn relative_humidity(temp_c: f64, dew_point_c: f64) -> Result<HumidityResult, PsychroError> {
    let t = ensure_finite(temp_c, "temp_c")?;
    let dp = ensure_finite(dew_point_c, "dew_point_c")?;

    let raw = 100.0 * (gamma_t(dp) - gamma_t(t)).exp();
    if !raw.is_finite() {
        return Err(PsychroError::DegenerateNumeric {
            operation: "relative_humidity",
        });
    }
    if raw > RH_REJECT_THRESHOLD_PCT {
        return Err(PsychroError::PhysicallyInvalidResult { raw_rh: raw });
    }
    Ok(HumidityResult {
        value: raw.min(RH_SATURATED_PCT),
        clamped: raw > RH_SATURATED_PCT,
    })
}

/// 노점 표시 문자열 (소수 2자리).
pub fn format_dew_point(dew_point_c: f64) -> String {
    format!("{dew_point_c:.2} °C")
}

/// 상대습도 표시 문자열 (소수 1자리).
pub fn format_humidity(relative_humidity_pct: f64) -> String {
    format!("{relative_humidity_pct:.1} %")
}
