//! 사용자 한 명의 대화형 세션 상태와 이벤트 처리기.
//!
//! 각 UI 동작은 [`Action`] 하나로 표현되고, [`Session::handle`]이 검증 → 계산 → 이력 갱신을
//! 한 번에 처리한다. 세션은 스레드 간에 공유하지 않는다.

use tracing::{debug, info, warn};

use crate::air::{self, PsychroError};
use crate::convergence::ConvergenceReport;
use crate::history::{CalcMode, HistoryStore};
use crate::quantity::Measurement;
use crate::report::{self, ReportError, ReportLabels, ReportOptions};

/// UI에서 들어오는 사용자 동작.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// 온도/상대습도 → 노점
    ComputeDewPoint {
        temp_c: Option<f64>,
        relative_humidity_pct: Option<f64>,
    },
    /// 온도/노점 → 상대습도
    ComputeHumidity {
        temp_c: Option<f64>,
        dew_point_c: Option<f64>,
    },
    SetTarget(f64),
    /// 두 이력과 목표값을 한 번에 초기화
    Reset,
}

/// 처리 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Computed {
        mode: CalcMode,
        measurement: Measurement,
        /// 100.0~100.1% 구간이 100.0으로 고정되었는지
        clamped: bool,
    },
    TargetSet(f64),
    Reset,
}

/// 세션 범위 상태. 이력 저장소는 이 핸들러만 변경한다.
#[derive(Debug, Clone, Default)]
pub struct Session {
    history: HistoryStore,
}

impl Session {
    pub fn new() -> Self {
        Self {
            history: HistoryStore::new(),
        }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// 동작 하나를 처리한다. 오류가 나도 상태는 변경되지 않는다.
    ///
    /// 과포화(100.1% 초과)나 수치 불가 결과는 이력에 추가하지 않는다.
    pub fn handle(&mut self, action: Action) -> Result<Outcome, PsychroError> {
        let outcome = match action {
            Action::ComputeDewPoint {
                temp_c,
                relative_humidity_pct,
            } => {
                let t = air::require_input(temp_c, "temp_c")?;
                let rh = air::require_input(relative_humidity_pct, "relative_humidity_pct")?;
                let dp = air::dew_point(t, rh)
                    .inspect_err(|e| warn!(error = %e, "dew point rejected"))?;
                self.history.append(CalcMode::DewPoint, dp);
                info!(temp_c = t, rh_pct = rh, dew_point_c = dp, "dew point computed");
                Outcome::Computed {
                    mode: CalcMode::DewPoint,
                    measurement: Measurement::celsius(dp),
                    clamped: false,
                }
            }
            Action::ComputeHumidity {
                temp_c,
                dew_point_c,
            } => {
                let t = air::require_input(temp_c, "temp_c")?;
                let dp = air::require_input(dew_point_c, "dew_point_c")?;
                let rh = air::relative_humidity(t, dp)
                    .inspect_err(|e| warn!(error = %e, "humidity rejected"))?;
                self.history.append(CalcMode::Humidity, rh.value);
                info!(
                    temp_c = t,
                    dew_point_c = dp,
                    rh_pct = rh.value,
                    clamped = rh.clamped,
                    "humidity computed"
                );
                Outcome::Computed {
                    mode: CalcMode::Humidity,
                    measurement: Measurement::percent(rh.value),
                    clamped: rh.clamped,
                }
            }
            Action::SetTarget(value) => {
                if !value.is_finite() {
                    return Err(PsychroError::InvalidInput {
                        field: "target",
                        value,
                        reason: "유한한 숫자가 아닙니다",
                    });
                }
                self.history.set_target(value);
                debug!(target_value = value, "target updated");
                Outcome::TargetSet(value)
            }
            Action::Reset => {
                self.history.reset();
                info!("session reset");
                Outcome::Reset
            }
        };
        Ok(outcome)
    }

    /// 현재 활성 이력과 목표값으로 분석 보고서를 만든다. 이력이 없으면 `None`.
    pub fn report(&self) -> Option<ConvergenceReport> {
        self.history
            .active_series()
            .map(|active| ConvergenceReport::build(active, self.history.target()))
    }

    /// 현재 상태의 보고서 PNG를 그린다.
    pub fn render_report(
        &self,
        options: &ReportOptions,
        labels: &ReportLabels,
    ) -> Result<Vec<u8>, ReportError> {
        let report = self.report().ok_or(ReportError::EmptyHistory)?;
        report::render_png(&report, options, labels)
    }
}
