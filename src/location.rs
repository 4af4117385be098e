//! 도시별 기준 비발전량(kWh/kWp·a) 참조 테이블.
//! 값은 바덴뷔르템베르크 지역의 장기 평균 근사치이며 상세 발전량 평가를 대체하지 않는다.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// 기본 선택 도시.
pub const DEFAULT_CITY: &str = "Konstanz";

/// 테이블의 한 행. 도시 이름과 보정 전 기준 비발전량을 담는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationEntry {
    pub name: String,
    /// 기준 비발전량 [kWh/kWp·a]
    pub specific_yield: f64,
}

impl LocationEntry {
    pub fn new(name: impl Into<String>, specific_yield: f64) -> Self {
        Self {
            name: name.into(),
            specific_yield,
        }
    }
}

/// 사용자 정의 테이블 구성 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("location table is empty")]
    Empty,
    #[error("duplicate city in location table: {0}")]
    DuplicateCity(String),
    #[error("specific yield for {city} must be a positive number, got {value}")]
    NonPositiveYield { city: String, value: f64 },
}

/// 입력 순서를 유지하는 도시 → 기준 비발전량 매핑.
///
/// 생성 시점에 검증을 마치므로 조회 결과는 항상 양수다.
/// 실행 중에는 읽기 전용으로만 사용하고 참조로 전달한다.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationYieldTable {
    entries: Vec<LocationEntry>,
}

const BADEN_WUERTTEMBERG: &[(&str, f64)] = &[
    ("Konstanz", 1000.0),
    ("Freiburg im Breisgau", 1050.0),
    ("Stuttgart", 1000.0),
    ("Karlsruhe", 1020.0),
    ("Mannheim", 1020.0),
    ("Heidelberg", 1020.0),
    ("Ulm", 980.0),
    ("Tuebingen", 980.0),
    ("Heilbronn", 1000.0),
    ("Pforzheim", 1000.0),
    ("Reutlingen", 980.0),
    ("Ravensburg", 990.0),
    ("Villingen-Schwenningen", 960.0),
    ("Offenburg", 1020.0),
    ("Loerrach", 1050.0),
    ("Baden-Baden", 1020.0),
];

impl LocationYieldTable {
    /// 사용자 데이터로 테이블을 만든다. 중복 도시명(대소문자 무시)과 0 이하 값은 거부한다.
    pub fn new(entries: Vec<LocationEntry>) -> Result<Self, TableError> {
        if entries.is_empty() {
            return Err(TableError::Empty);
        }
        for (i, entry) in entries.iter().enumerate() {
            if !(entry.specific_yield > 0.0 && entry.specific_yield.is_finite()) {
                return Err(TableError::NonPositiveYield {
                    city: entry.name.clone(),
                    value: entry.specific_yield,
                });
            }
            let duplicate = entries[..i]
                .iter()
                .any(|prev| prev.name.eq_ignore_ascii_case(&entry.name));
            if duplicate {
                return Err(TableError::DuplicateCity(entry.name.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// 내장된 바덴뷔르템베르크 16개 도시 테이블.
    pub fn baden_wuerttemberg() -> Self {
        Self {
            entries: BADEN_WUERTTEMBERG
                .iter()
                .map(|&(name, y)| LocationEntry::new(name, y))
                .collect(),
        }
    }

    /// 도시명으로 행을 찾는다. 정확히 일치하는 이름을 우선하고, 없으면 대소문자를 무시한다.
    pub fn find(&self, city: &str) -> Option<&LocationEntry> {
        let city = city.trim();
        let found = self
            .entries
            .iter()
            .find(|e| e.name == city)
            .or_else(|| self.entries.iter().find(|e| e.name.eq_ignore_ascii_case(city)));
        debug!(city, found = found.is_some(), "location lookup");
        found
    }

    /// 도시의 기준 비발전량을 반환한다.
    pub fn lookup(&self, city: &str) -> Option<f64> {
        self.find(city).map(|e| e.specific_yield)
    }

    /// 입력 순서 그대로의 전체 행.
    pub fn all_entries(&self) -> &[LocationEntry] {
        &self.entries
    }

    /// 화면 표시용으로 이름순 정렬된 행.
    pub fn sorted_entries(&self) -> Vec<&LocationEntry> {
        let mut sorted: Vec<&LocationEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        sorted
    }

    pub fn sorted_names(&self) -> Vec<&str> {
        self.sorted_entries()
            .into_iter()
            .map(|e| e.name.as_str())
            .collect()
    }
}
