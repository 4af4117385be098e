//! 연간 발전량, 자가소비, 잉여전력, 배터리 효과를 계산하는 핵심 모듈.
//!
//! 모든 계산은 닫힌 형태의 산술식이며 상태를 갖지 않는다. 시간대/계절 분해나
//! 일사량 모델링은 하지 않는다.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::location::LocationYieldTable;

/// 최적 경사각 [°]
pub const IDEAL_TILT_DEG: f64 = 30.0;
/// 최적 경사각에서 10° 벗어날 때마다의 손실률
const LOSS_PER_10_DEG: f64 = 0.02;
pub const MIN_TILT_FACTOR: f64 = 0.85;
pub const MAX_TILT_FACTOR: f64 = 1.05;

/// 요청값 검증 오류. 계산에 들어가기 전에 즉시 반환된다.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("unknown city: {0}")]
    UnknownCity(String),
    #[error("{field} = {value} is outside the allowed range {expected}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
}

/// 경사각 보정계수. 30°를 기준으로 10°당 2%씩 선형 감소하며 [0.85, 1.05]로 제한한다.
pub fn tilt_correction_factor(tilt_deg: f64) -> f64 {
    let diff = (tilt_deg - IDEAL_TILT_DEG).abs();
    let factor = 1.0 - LOSS_PER_10_DEG * (diff / 10.0);
    factor.clamp(MIN_TILT_FACTOR, MAX_TILT_FACTOR)
}

/// 한 번의 추정 계산 입력.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationRequest {
    /// 참조 테이블의 도시명
    pub city: String,
    /// 지붕 경사각 [°], 0~90
    pub tilt_degrees: f64,
    /// 방위/시나리오 보정계수의 곱. 호출 측에서 합성해 하나의 값으로 전달한다.
    pub yield_factor: f64,
    /// 설비 용량 [kWp]
    pub plant_size_kwp: f64,
    /// 저장장치 없는 직접 자가소비율 [%], 0~100
    pub self_consumption_share_pct: f64,
    /// 배터리 가용 용량 [kWh]. 0이면 배터리 없음.
    pub battery_capacity_kwh: f64,
    /// 연간 평균 완전 충방전 횟수
    pub battery_cycles_per_year: u32,
}

impl EstimationRequest {
    /// 수치 입력의 정의역을 검사한다. 도시명은 [`estimate_for_city`]에서 확인한다.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_within("tilt_degrees", self.tilt_degrees, 0.0, 90.0, "[0, 90]")?;
        check_positive("yield_factor", self.yield_factor)?;
        check_non_negative("plant_size_kwp", self.plant_size_kwp)?;
        check_within(
            "self_consumption_share_pct",
            self.self_consumption_share_pct,
            0.0,
            100.0,
            "[0, 100]",
        )?;
        check_non_negative("battery_capacity_kwh", self.battery_capacity_kwh)?;
        Ok(())
    }
}

/// 추정 결과. 모든 값은 요청으로부터 새로 유도된다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EstimationResult {
    /// 적용된 경사각 보정계수
    pub tilt_factor: f64,
    /// 보정 후 비발전량 [kWh/kWp·a]
    pub adjusted_specific_yield: f64,
    /// 연간 발전량 [kWh/a]
    pub annual_generation_kwh: f64,
    /// 저장장치 없는 직접 자가소비 [kWh/a]
    pub direct_self_consumption_kwh: f64,
    /// 저장장치 적용 전 잉여 [kWh/a]
    pub surplus_before_storage_kwh: f64,
    /// 배터리 연간 처리량 상한 (용량 × 사이클) [kWh/a]
    pub max_shifted_energy_kwh: f64,
    /// 배터리로 이동된 에너지 [kWh/a]
    pub shifted_energy_kwh: f64,
    /// 저장장치 포함 자가소비 [kWh/a]
    pub self_consumption_with_storage_kwh: f64,
    /// 저장장치 적용 후 잉여 [kWh/a]
    pub surplus_with_storage_kwh: f64,
    /// 저장장치 없는 자립률 [%]
    pub autarky_without_storage_pct: f64,
    /// 저장장치 포함 자립률 [%]
    pub autarky_with_storage_pct: f64,
}

/// 기준 비발전량으로부터 결과를 계산한다.
///
/// 배터리는 연간 처리량 상한(용량 × 완전 사이클 수)으로만 모델링하며 부하와 발전의
/// 시간 정합은 고려하지 않는다.
pub fn estimate(
    request: &EstimationRequest,
    base_yield: f64,
) -> Result<EstimationResult, ValidationError> {
    check_positive("base_yield", base_yield)?;
    request.validate()?;

    let tilt_factor = tilt_correction_factor(request.tilt_degrees);
    let adjusted_specific_yield = base_yield * tilt_factor * request.yield_factor;
    check_finite_product("yield_factor", request.yield_factor, adjusted_specific_yield)?;

    let annual_generation_kwh = request.plant_size_kwp * adjusted_specific_yield;
    check_finite_product("plant_size_kwp", request.plant_size_kwp, annual_generation_kwh)?;
    let direct_self_consumption_kwh =
        annual_generation_kwh * (request.self_consumption_share_pct / 100.0);
    let surplus_before_storage_kwh = (annual_generation_kwh - direct_self_consumption_kwh).max(0.0);

    let max_shifted_energy_kwh =
        if request.battery_capacity_kwh > 0.0 && request.battery_cycles_per_year > 0 {
            request.battery_capacity_kwh * f64::from(request.battery_cycles_per_year)
        } else {
            0.0
        };
    check_finite_product(
        "battery_capacity_kwh",
        request.battery_capacity_kwh,
        max_shifted_energy_kwh,
    )?;
    let shifted_energy_kwh = surplus_before_storage_kwh.min(max_shifted_energy_kwh);

    let self_consumption_with_storage_kwh = direct_self_consumption_kwh + shifted_energy_kwh;
    let surplus_with_storage_kwh =
        (annual_generation_kwh - self_consumption_with_storage_kwh).max(0.0);

    let result = EstimationResult {
        tilt_factor,
        adjusted_specific_yield,
        annual_generation_kwh,
        direct_self_consumption_kwh,
        surplus_before_storage_kwh,
        max_shifted_energy_kwh,
        shifted_energy_kwh,
        self_consumption_with_storage_kwh,
        surplus_with_storage_kwh,
        autarky_without_storage_pct: share_of(direct_self_consumption_kwh, annual_generation_kwh),
        autarky_with_storage_pct: share_of(
            self_consumption_with_storage_kwh,
            annual_generation_kwh,
        ),
    };
    debug!(
        city = %request.city,
        base_yield,
        tilt_factor,
        yield_factor = request.yield_factor,
        generation_kwh = result.annual_generation_kwh,
        shifted_kwh = result.shifted_energy_kwh,
        "estimate computed"
    );
    Ok(result)
}

/// 참조 테이블에서 도시를 먼저 조회한 뒤 계산한다. 알 수 없는 도시는 기본값으로 대체하지 않는다.
pub fn estimate_for_city(
    table: &LocationYieldTable,
    request: &EstimationRequest,
) -> Result<EstimationResult, ValidationError> {
    let base_yield = table
        .lookup(&request.city)
        .ok_or_else(|| ValidationError::UnknownCity(request.city.clone()))?;
    estimate(request, base_yield)
}

fn share_of(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        part / total * 100.0
    } else {
        0.0
    }
}

// NaN은 모든 비교에서 false이므로 부정 조건으로 함께 걸러진다.
fn check_within(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
    expected: &'static str,
) -> Result<(), ValidationError> {
    if !(value >= min && value <= max) {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            expected,
        });
    }
    Ok(())
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !(value >= 0.0 && value.is_finite()) {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            expected: "[0, ∞)",
        });
    }
    Ok(())
}

/// 유한한 입력이라도 곱한 결과가 f64 범위를 넘으면 거부한다.
fn check_finite_product(
    field: &'static str,
    value: f64,
    product: f64,
) -> Result<(), ValidationError> {
    if !product.is_finite() {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            expected: "a value whose annual energy stays finite",
        });
    }
    Ok(())
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !(value > 0.0 && value.is_finite()) {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            expected: "(0, ∞)",
        });
    }
    Ok(())
}
