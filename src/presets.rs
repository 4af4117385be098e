//! 지붕 형태별 경사각 프리셋. 화면 입력 편의를 위한 것이며 계산 규칙은 아니다.

use serde::{Deserialize, Serialize};

/// 편지붕(Pultdach)에서 고를 수 있는 경사각.
pub const MONO_PITCH_OPTIONS: [u8; 3] = [20, 30, 40];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoofType {
    /// 평지붕 위 거치대 (15°)
    FlatElevated,
    /// 일반 주택 지붕 (30°)
    TypicalHouse,
    /// 편지붕, 20/30/40° 중 선택
    MonoPitch { pitch_deg: u8 },
}

impl RoofType {
    /// 편지붕 경사각이 허용값이 아니면 `None`.
    pub fn mono_pitch(pitch_deg: u8) -> Option<Self> {
        MONO_PITCH_OPTIONS
            .contains(&pitch_deg)
            .then_some(RoofType::MonoPitch { pitch_deg })
    }

    pub fn tilt_degrees(&self) -> f64 {
        match self {
            RoofType::FlatElevated => 15.0,
            RoofType::TypicalHouse => 30.0,
            RoofType::MonoPitch { pitch_deg } => f64::from(*pitch_deg),
        }
    }
}
