//! 핵심 계산 로직을 라이브러리로 분리하여 CLI 뿐 아니라 다른 표현 계층에서도 재사용한다.

pub mod app;
pub mod cli;
pub mod config;
pub mod estimator;
pub mod format;
pub mod i18n;
pub mod location;
pub mod presets;
pub mod scenario;
pub mod ui_cli;

pub use estimator::{
    estimate, estimate_for_city, tilt_correction_factor, EstimationRequest, EstimationResult,
    ValidationError,
};
pub use location::{LocationEntry, LocationYieldTable};
pub use scenario::{
    compose_yield_factor, estimate_scenarios, Orientation, Scenario, ScenarioFactors,
};
