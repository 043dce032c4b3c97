use serde::{Deserialize, Serialize};

use crate::air::{format_dew_point, format_humidity};

/// 계산 결과가 갖는 단위. 섭씨와 백분율만 다룬다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasurementUnit {
    Celsius,
    Percent,
}

impl MeasurementUnit {
    /// 축/표 머리글에 붙이는 단위 기호.
    pub fn symbol(&self) -> &'static str {
        match self {
            MeasurementUnit::Celsius => "°C",
            MeasurementUnit::Percent => "%",
        }
    }
}

/// 한 번의 계산으로 만들어진 값. 생성 후 변경하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub value: f64,
    pub unit: MeasurementUnit,
}

impl Measurement {
    pub fn celsius(value: f64) -> Self {
        Self {
            value,
            unit: MeasurementUnit::Celsius,
        }
    }

    pub fn percent(value: f64) -> Self {
        Self {
            value,
            unit: MeasurementUnit::Percent,
        }
    }

    /// 단위에 맞는 자릿수로 표시한다 (°C 2자리, % 1자리).
    pub fn display(&self) -> String {
        match self.unit {
            MeasurementUnit::Celsius => format_dew_point(self.value),
            MeasurementUnit::Percent => format_humidity(self.value),
        }
    }
}
