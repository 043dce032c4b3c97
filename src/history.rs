//! 계산 모드별 최근 결과 이력과 목표값을 보관한다.
//!
//! 모드마다 최대 [`HISTORY_CAPACITY`]개를 보관하며, 넘치면 가장 오래된 값부터 버린다(FIFO).

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::quantity::MeasurementUnit;

/// 모드별 이력 최대 개수.
pub const HISTORY_CAPACITY: usize = 10;

/// 계산 모드.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalcMode {
    /// 온도/상대습도 → 노점
    DewPoint,
    /// 온도/노점 → 상대습도
    Humidity,
}

impl CalcMode {
    pub fn unit(&self) -> MeasurementUnit {
        match self {
            CalcMode::DewPoint => MeasurementUnit::Celsius,
            CalcMode::Humidity => MeasurementUnit::Percent,
        }
    }
}

/// 분석 대상으로 선택된 이력의 읽기 전용 뷰.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSeries {
    /// 오래된 값부터 순서대로
    pub values: Vec<f64>,
    pub unit: MeasurementUnit,
}

/// 용량이 제한된 단일 모드 이력.
#[derive(Debug, Clone, Default)]
pub struct HistorySeries {
    values: VecDeque<f64>,
}

impl HistorySeries {
    pub fn new() -> Self {
        Self {
            values: VecDeque::with_capacity(HISTORY_CAPACITY + 1),
        }
    }

    /// 값을 뒤에 추가하고, 용량을 넘으면 맨 앞 값을 버린다.
    pub fn push(&mut self, value: f64) {
        self.values.push_back(value);
        while self.values.len() > HISTORY_CAPACITY {
            self.values.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn latest(&self) -> Option<f64> {
        self.values.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }
}

/// 세션 단위 이력 저장소. 단일 스레드에서 `&mut`로만 변경한다.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    dew_point: HistorySeries,
    humidity: HistorySeries,
    target: f64,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self {
            dew_point: HistorySeries::new(),
            humidity: HistorySeries::new(),
            target: 0.0,
        }
    }

    pub fn append(&mut self, mode: CalcMode, value: f64) {
        self.series_mut(mode).push(value);
    }

    pub fn series(&self, mode: CalcMode) -> &HistorySeries {
        match mode {
            CalcMode::DewPoint => &self.dew_point,
            CalcMode::Humidity => &self.humidity,
        }
    }

    fn series_mut(&mut self, mode: CalcMode) -> &mut HistorySeries {
        match mode {
            CalcMode::DewPoint => &mut self.dew_point,
            CalcMode::Humidity => &mut self.humidity,
        }
    }

    /// 노점 이력이 있으면 노점, 없으면 습도 이력, 둘 다 없으면 `None`.
    pub fn active_series(&self) -> Option<ActiveSeries> {
        [CalcMode::DewPoint, CalcMode::Humidity]
            .into_iter()
            .map(|mode| (mode, self.series(mode)))
            .find(|(_, series)| !series.is_empty())
            .map(|(mode, series)| ActiveSeries {
                values: series.to_vec(),
                unit: mode.unit(),
            })
    }

    pub fn set_target(&mut self, value: f64) {
        self.target = value;
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// 두 이력과 목표값을 초기 상태로 되돌린다.
    pub fn reset(&mut self) {
        self.dew_point.clear();
        self.humidity.clear();
        self.target = 0.0;
    }
}
