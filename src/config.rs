use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::estimator::EstimationRequest;
use crate::location::{LocationEntry, LocationYieldTable, TableError, DEFAULT_CITY};
use crate::scenario::{compose_yield_factor, Orientation, ScenarioFactors};

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 입력 화면과 CLI 플래그가 비어 있을 때 사용하는 설비 입력값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantInputs {
    pub city: String,
    pub plant_size_kwp: f64,
    pub tilt_degrees: f64,
    pub self_consumption_share_pct: f64,
    pub battery_capacity_kwh: f64,
    pub battery_cycles_per_year: u32,
    pub orientation: Orientation,
}

impl Default for PlantInputs {
    fn default() -> Self {
        Self {
            city: DEFAULT_CITY.to_string(),
            plant_size_kwp: 1000.0,
            tilt_degrees: 30.0,
            self_consumption_share_pct: 40.0,
            battery_capacity_kwh: 0.0,
            battery_cycles_per_year: 250,
            orientation: Orientation::default(),
        }
    }
}

impl PlantInputs {
    /// 주어진 시나리오 배율로 추정 요청을 만든다.
    pub fn to_request(&self, scenario_factor: f64) -> EstimationRequest {
        EstimationRequest {
            city: self.city.clone(),
            tilt_degrees: self.tilt_degrees,
            yield_factor: compose_yield_factor(self.orientation, scenario_factor),
            plant_size_kwp: self.plant_size_kwp,
            self_consumption_share_pct: self.self_consumption_share_pct,
            battery_capacity_kwh: self.battery_capacity_kwh,
            battery_cycles_per_year: self.battery_cycles_per_year,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// UI 언어 코드 (auto / de / en)
    pub language: String,
    pub defaults: PlantInputs,
    pub scenario_factors: ScenarioFactors,
    /// 비어 있으면 내장 바덴뷔르템베르크 테이블을 사용한다.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cities: Vec<LocationEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            defaults: PlantInputs::default(),
            scenario_factors: ScenarioFactors::default(),
            cities: Vec::new(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid city table: {0}")]
    Table(#[from] TableError),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        info!(path = %path.display(), "loaded config");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        info!(path = %path.display(), "created default config");
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 TOML로 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 사용할 참조 테이블을 만든다. 사용자 정의 목록은 검증을 거친다.
    pub fn location_table(&self) -> Result<LocationYieldTable, ConfigError> {
        if self.cities.is_empty() {
            Ok(LocationYieldTable::baden_wuerttemberg())
        } else {
            Ok(LocationYieldTable::new(self.cities.clone())?)
        }
    }
}
