//! 목표값 대비 수렴 오차 분석.

use crate::history::ActiveSeries;
use crate::quantity::MeasurementUnit;

/// 값 범위에 곱해 축 여백으로 쓰는 비율.
pub const AXIS_MARGIN_FRACTION: f64 = 0.3;
/// 모든 값과 목표값이 같을 때 쓰는 고정 여백.
pub const AXIS_FALLBACK_MARGIN: f64 = 2.0;

/// 이력 한 항목의 오차 분석 결과. 렌더링마다 새로 계산하며 저장하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisRow {
    /// 1부터 시작하는 순번
    pub index: usize,
    pub measured: f64,
    pub target: f64,
    /// |target − measured|
    pub gap: f64,
    /// gap / target × 100, 목표값이 0이면 0.0
    pub error_pct: f64,
}

/// 차트 y축 범위.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

impl AxisBounds {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// 각 측정값과 목표값의 차이와 오차율을 계산한다.
pub fn analyze(series: &[f64], target: f64) -> Vec<AnalysisRow> {
    series
        .iter()
        .enumerate()
        .map(|(i, &measured)| {
            let gap = (target - measured).abs();
            let error_pct = if target == 0.0 {
                0.0
            } else {
                gap / target * 100.0
            };
            AnalysisRow {
                index: i + 1,
                measured,
                target,
                gap,
                error_pct,
            }
        })
        .collect()
}

/// 측정값과 목표값을 모두 포함하는 y축 범위를 구한다.
///
/// 범위가 0이면 높이 0인 그래프를 피하려고 고정 여백을 쓴다.
pub fn axis_bounds(series: &[f64], target: f64) -> AxisBounds {
    let (lo, hi) = series
        .iter()
        .copied()
        .chain(std::iter::once(target))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    let range = hi - lo;
    let margin = if range > 0.0 {
        range * AXIS_MARGIN_FRACTION
    } else {
        AXIS_FALLBACK_MARGIN
    };
    AxisBounds {
        min: lo - margin,
        max: hi + margin,
    }
}

/// 차트와 표 출력에 필요한 값을 한데 묶은 보고서.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceReport {
    pub unit: MeasurementUnit,
    pub series: Vec<f64>,
    pub target: f64,
    pub rows: Vec<AnalysisRow>,
    pub bounds: AxisBounds,
}

impl ConvergenceReport {
    pub fn build(active: ActiveSeries, target: f64) -> Self {
        let rows = analyze(&active.values, target);
        let bounds = axis_bounds(&active.values, target);
        Self {
            unit: active.unit,
            series: active.values,
            target,
            rows,
            bounds,
        }
    }

    /// 목표선은 목표값이 0이 아닐 때만 그린다.
    pub fn draws_target_line(&self) -> bool {
        self.target != 0.0
    }

    pub fn latest(&self) -> Option<&AnalysisRow> {
        self.rows.last()
    }
}
