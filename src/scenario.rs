//! 방위 보정과 보수적/현실적/낙관적 시나리오 비교.
//!
//! 추정기는 하나의 `yield_factor`만 받으므로 방위계수와 시나리오계수의 합성은
//! [`compose_yield_factor`] 한 곳에서만 한다.

use serde::{Deserialize, Serialize};

use crate::estimator::{estimate_for_city, EstimationRequest, EstimationResult, ValidationError};
use crate::location::LocationYieldTable;

/// 동/서 배치의 일괄 보정계수 (최적 남향 대비 95%).
pub const EAST_WEST_FACTOR: f64 = 0.95;
/// 남향 배치의 기본 방위 품질 [%]
pub const DEFAULT_SOUTH_QUALITY_PCT: f64 = 90.0;

/// 모듈 배치 방향.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Orientation {
    /// 남향. `quality_pct`는 최적 남향 대비 방위 품질(0 초과 100 이하).
    South { quality_pct: f64 },
    /// 동/서 배치
    EastWest,
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::South {
            quality_pct: DEFAULT_SOUTH_QUALITY_PCT,
        }
    }
}

impl Orientation {
    /// 발전량에 곱할 방위 보정계수.
    pub fn factor(&self) -> f64 {
        match self {
            Orientation::South { quality_pct } => quality_pct / 100.0,
            Orientation::EastWest => EAST_WEST_FACTOR,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Orientation::South { quality_pct } = *self {
            if !(quality_pct > 0.0 && quality_pct <= 100.0) {
                return Err(ValidationError::OutOfRange {
                    field: "south_quality_pct",
                    value: quality_pct,
                    expected: "(0, 100]",
                });
            }
        }
        Ok(())
    }
}

/// 비교 시나리오 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Conservative,
    Realistic,
    Optimistic,
}

impl Scenario {
    /// 표시 순서 (보수적 → 현실적 → 낙관적).
    pub const ALL: [Scenario; 3] = [
        Scenario::Conservative,
        Scenario::Realistic,
        Scenario::Optimistic,
    ];
}

/// 시나리오별 발전량 배율. 설정 파일에서 조정할 수 있다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFactors {
    pub conservative: f64,
    pub realistic: f64,
    pub optimistic: f64,
}

impl Default for ScenarioFactors {
    fn default() -> Self {
        Self {
            conservative: 0.90,
            realistic: 1.00,
            optimistic: 1.10,
        }
    }
}

impl ScenarioFactors {
    pub fn factor(&self, scenario: Scenario) -> f64 {
        match scenario {
            Scenario::Conservative => self.conservative,
            Scenario::Realistic => self.realistic,
            Scenario::Optimistic => self.optimistic,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("scenario_factors.conservative", self.conservative),
            ("scenario_factors.realistic", self.realistic),
            ("scenario_factors.optimistic", self.optimistic),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ValidationError::OutOfRange {
                    field,
                    value,
                    expected: "(0, ∞)",
                });
            }
        }
        Ok(())
    }
}

/// 방위계수와 시나리오계수를 곱해 추정기에 넘길 단일 배율을 만든다.
pub fn compose_yield_factor(orientation: Orientation, scenario_factor: f64) -> f64 {
    orientation.factor() * scenario_factor
}

/// 한 시나리오의 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub scenario: Scenario,
    /// 추정기에 실제로 전달된 합성 배율
    pub yield_factor: f64,
    pub result: EstimationResult,
}

/// 세 시나리오를 각각 독립적으로 계산한다.
///
/// `request.yield_factor`는 무시되고 시나리오마다 [`compose_yield_factor`]로 다시 채워진다.
/// 결과는 항상 [`Scenario::ALL`] 순서다.
pub fn estimate_scenarios(
    table: &LocationYieldTable,
    request: &EstimationRequest,
    orientation: Orientation,
    factors: &ScenarioFactors,
) -> Result<Vec<ScenarioOutcome>, ValidationError> {
    orientation.validate()?;
    factors.validate()?;
    Scenario::ALL
        .iter()
        .map(|&scenario| {
            let yield_factor = compose_yield_factor(orientation, factors.factor(scenario));
            let scenario_request = EstimationRequest {
                yield_factor,
                ..request.clone()
            };
            let result = estimate_for_city(table, &scenario_request)?;
            Ok(ScenarioOutcome {
                scenario,
                yield_factor,
                result,
            })
        })
        .collect()
}
