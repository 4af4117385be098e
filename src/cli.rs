//! clap 기반 명령행 인자 정의.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{PlantInputs, DEFAULT_CONFIG_PATH};
use crate::estimator::ValidationError;
use crate::presets::RoofType;
use crate::scenario::{Orientation, DEFAULT_SOUTH_QUALITY_PCT};

#[derive(Debug, Parser)]
#[command(name = "pv_yield_toolbox")]
#[command(author, version, about = "PV yield, self-consumption and storage estimator")]
#[command(long_about = "Estimates annual PV generation, self-consumption, surplus and the \
    effect of a battery for cities in Baden-Wuerttemberg.\n\
    \nWithout a subcommand an interactive menu is started.\n\
    \nExamples:\n  \
    pv_yield_toolbox cities\n  \
    pv_yield_toolbox estimate --city Stuttgart --plant-kwp 250 --roof flat\n  \
    pv_yield_toolbox scenarios --battery-kwh 500 --cycles 250 --orientation east-west")]
pub struct Cli {
    /// UI language: auto, de, en
    #[arg(long, short = 'L', global = true)]
    pub lang: Option<String>,

    /// Path of the TOML configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Enable debug logging for this crate (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the reference cities with their base specific yield
    Cities,
    /// Estimate one plant with the realistic assumption
    Estimate(PlantArgs),
    /// Compare conservative, realistic and optimistic scenarios
    Scenarios(PlantArgs),
    /// Start the interactive menu (default)
    Interactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoofArg {
    /// Flat roof, elevated mounting (15 deg)
    Flat,
    /// Typical house roof (30 deg)
    House,
    /// Mono-pitch roof, see --pitch
    MonoPitch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrientationArg {
    South,
    EastWest,
}

/// 설비 입력 플래그. 비어 있는 값은 설정 파일의 기본값을 따른다.
#[derive(Debug, Clone, Default, Args)]
pub struct PlantArgs {
    /// City from the reference table
    #[arg(long)]
    pub city: Option<String>,

    /// Plant size in kWp
    #[arg(long = "plant-kwp")]
    pub plant_kwp: Option<f64>,

    /// Free roof tilt in degrees (0-90)
    #[arg(long, conflicts_with = "roof")]
    pub tilt: Option<f64>,

    /// Roof type preset instead of a free tilt
    #[arg(long, value_enum)]
    pub roof: Option<RoofArg>,

    /// Mono-pitch tilt: 20, 30 or 40 degrees
    #[arg(long, requires = "roof")]
    pub pitch: Option<u8>,

    #[arg(long, value_enum)]
    pub orientation: Option<OrientationArg>,

    /// Orientation quality relative to optimal south, in percent
    #[arg(long = "south-quality")]
    pub south_quality: Option<f64>,

    /// Self-consumption share without storage, in percent
    #[arg(long)]
    pub share: Option<f64>,

    /// Usable battery capacity in kWh (0 = none)
    #[arg(long = "battery-kwh")]
    pub battery_kwh: Option<f64>,

    /// Average full battery cycles per year
    #[arg(long)]
    pub cycles: Option<u32>,
}

impl PlantArgs {
    /// 기본값 위에 지정된 플래그를 덮어쓴다.
    pub fn apply(&self, defaults: &PlantInputs) -> Result<PlantInputs, ValidationError> {
        let mut inputs = defaults.clone();
        if let Some(city) = &self.city {
            inputs.city = city.clone();
        }
        if let Some(kwp) = self.plant_kwp {
            inputs.plant_size_kwp = kwp;
        }
        if let Some(tilt) = self.tilt {
            inputs.tilt_degrees = tilt;
        }
        if let Some(roof) = self.roof {
            inputs.tilt_degrees = roof_type(roof, self.pitch)?.tilt_degrees();
        }
        inputs.orientation = self.orientation(defaults.orientation);
        inputs.orientation.validate()?;
        if let Some(share) = self.share {
            inputs.self_consumption_share_pct = share;
        }
        if let Some(kwh) = self.battery_kwh {
            inputs.battery_capacity_kwh = kwh;
        }
        if let Some(cycles) = self.cycles {
            inputs.battery_cycles_per_year = cycles;
        }
        Ok(inputs)
    }

    fn orientation(&self, fallback: Orientation) -> Orientation {
        let fallback_quality = match fallback {
            Orientation::South { quality_pct } => quality_pct,
            Orientation::EastWest => DEFAULT_SOUTH_QUALITY_PCT,
        };
        match (self.orientation, self.south_quality) {
            (Some(OrientationArg::EastWest), _) => Orientation::EastWest,
            (Some(OrientationArg::South), q) | (None, q @ Some(_)) => Orientation::South {
                quality_pct: q.unwrap_or(fallback_quality),
            },
            (None, None) => fallback,
        }
    }
}

fn roof_type(roof: RoofArg, pitch: Option<u8>) -> Result<RoofType, ValidationError> {
    match roof {
        RoofArg::Flat => Ok(RoofType::FlatElevated),
        RoofArg::House => Ok(RoofType::TypicalHouse),
        RoofArg::MonoPitch => {
            let pitch = pitch.unwrap_or(30);
            RoofType::mono_pitch(pitch).ok_or(ValidationError::OutOfRange {
                field: "pitch",
                value: f64::from(pitch),
                expected: "{20, 30, 40}",
            })
        }
    }
}
