use comfy_table::{presets::UTF8_FULL, Attribute, Cell, CellAlignment, Table};
use std::io::{self, BufRead, Write};

use crate::app::AppError;
use crate::config::{Config, PlantInputs};
use crate::estimator::EstimationResult;
use crate::format::{bar_chart, format_decimal, format_grouped, format_thousands};
use crate::i18n::{keys, Language, Translator};
use crate::location::LocationYieldTable;
use crate::presets::RoofType;
use crate::scenario::{Orientation, Scenario, ScenarioOutcome};

const CHART_WIDTH: usize = 40;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Estimate,
    Scenarios,
    Cities,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_ESTIMATE));
    println!("{}", tr.t(keys::MAIN_MENU_SCENARIOS));
    println!("{}", tr.t(keys::MAIN_MENU_CITIES));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    read_menu_choice(tr, &mut io::stdin().lock())
}

/// 메뉴 번호를 읽는다. 입력이 끝나면(EOF) 종료로 처리한다.
pub fn read_menu_choice<R: BufRead>(
    tr: &Translator,
    input: &mut R,
) -> Result<MenuChoice, AppError> {
    loop {
        let sel = match read_line_from(input, tr.t(keys::PROMPT_MENU_SELECT)) {
            Ok(sel) => sel,
            Err(AppError::Io(err)) if err.kind() == io::ErrorKind::UnexpectedEof => {
                return Ok(MenuChoice::Exit);
            }
            Err(err) => return Err(err),
        };
        match sel.trim() {
            "1" => return Ok(MenuChoice::Estimate),
            "2" => return Ok(MenuChoice::Scenarios),
            "3" => return Ok(MenuChoice::Cities),
            "4" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 설비 입력값을 차례로 묻는다. 엔터만 누르면 기본값을 유지한다.
pub fn prompt_plant_inputs(
    tr: &Translator,
    table: &LocationYieldTable,
    defaults: &PlantInputs,
) -> Result<PlantInputs, AppError> {
    println!("{} {}", tr.t(keys::INPUT_HEADING), tr.t(keys::INPUT_DEFAULT_HINT));
    let city = read_city(tr, table, &defaults.city)?;
    let plant_size_kwp = read_f64_in(
        tr,
        keys::PROMPT_PLANT_SIZE,
        defaults.plant_size_kwp,
        10.0,
        50_000.0,
    )?;
    let tilt_degrees = read_tilt(tr, defaults.tilt_degrees)?;
    let orientation = read_orientation(tr, defaults.orientation)?;
    let self_consumption_share_pct = read_f64_in(
        tr,
        keys::PROMPT_SHARE,
        defaults.self_consumption_share_pct,
        0.0,
        100.0,
    )?;
    let battery_capacity_kwh = read_f64_in(
        tr,
        keys::PROMPT_BATTERY,
        defaults.battery_capacity_kwh,
        0.0,
        f64::MAX,
    )?;
    let cycles = read_f64_in(
        tr,
        keys::PROMPT_CYCLES,
        f64::from(defaults.battery_cycles_per_year),
        50.0,
        365.0,
    )?;
    Ok(PlantInputs {
        city,
        plant_size_kwp,
        tilt_degrees,
        self_consumption_share_pct,
        battery_capacity_kwh,
        battery_cycles_per_year: cycles.round() as u32,
        orientation,
    })
}

fn read_city(
    tr: &Translator,
    table: &LocationYieldTable,
    default: &str,
) -> Result<String, AppError> {
    loop {
        let s = read_line(&format!("{} [{default}]: ", tr.t(keys::PROMPT_CITY)))?;
        let s = s.trim();
        let candidate = if s.is_empty() { default } else { s };
        if let Some(entry) = table.find(candidate) {
            return Ok(entry.name.clone());
        }
        println!(
            "{} {}",
            tr.t(keys::ERROR_UNKNOWN_CITY),
            table.sorted_names().join(", ")
        );
    }
}

fn read_tilt(tr: &Translator, default: f64) -> Result<f64, AppError> {
    println!("{}", tr.t(keys::ROOF_OPTIONS));
    loop {
        let sel = read_line(&format!("{} [4]: ", tr.t(keys::PROMPT_ROOF)))?;
        match sel.trim() {
            "1" => return Ok(RoofType::FlatElevated.tilt_degrees()),
            "2" => return Ok(RoofType::TypicalHouse.tilt_degrees()),
            "3" => {
                let pitch = loop {
                    let p = read_f64_in(tr, keys::PROMPT_MONO_PITCH, 30.0, 20.0, 40.0)?;
                    if let Some(roof) = RoofType::mono_pitch(p.round() as u8) {
                        break roof;
                    }
                    println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
                };
                return Ok(pitch.tilt_degrees());
            }
            "4" | "" => return read_f64_in(tr, keys::ROW_TILT, default, 0.0, 90.0),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn read_orientation(tr: &Translator, default: Orientation) -> Result<Orientation, AppError> {
    println!("{}", tr.t(keys::ORIENTATION_OPTIONS));
    let (default_sel, default_quality) = match default {
        Orientation::South { quality_pct } => ("1", quality_pct),
        Orientation::EastWest => ("2", 90.0),
    };
    loop {
        let sel = read_line(&format!("{} [{default_sel}]: ", tr.t(keys::PROMPT_ORIENTATION)))?;
        let sel = sel.trim();
        match if sel.is_empty() { default_sel } else { sel } {
            "1" => {
                let quality_pct =
                    read_f64_in(tr, keys::PROMPT_SOUTH_QUALITY, default_quality, 60.0, 100.0)?;
                return Ok(Orientation::South { quality_pct });
            }
            "2" => return Ok(Orientation::EastWest),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 방위 설명 문구. 결과표의 마지막 행에 표시한다.
pub fn orientation_description(tr: &Translator, orientation: Orientation) -> String {
    match orientation {
        Orientation::South { quality_pct } => tr
            .t(keys::ORIENTATION_SOUTH_DESC)
            .replace("{pct}", &format_decimal(quality_pct, 0, tr.number_style())),
        Orientation::EastWest => tr.t(keys::ORIENTATION_EAST_WEST_DESC).to_string(),
    }
}

/// 참조 도시 목록을 이름순으로 출력한다.
pub fn print_cities(tr: &Translator, table: &LocationYieldTable) {
    println!("{}", tr.t(keys::CITIES_HEADING));
    let mut out = new_table(&[tr.t(keys::COL_CITY), tr.t(keys::COL_BASE_YIELD)]);
    for entry in table.sorted_entries() {
        out.add_row(vec![
            Cell::new(&entry.name),
            Cell::new(format_thousands(entry.specific_yield, tr.number_style()))
                .set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{out}");
}

/// 단일 결과표를 출력한다.
pub fn print_result(tr: &Translator, inputs: &PlantInputs, result: &EstimationResult) {
    let style = tr.number_style();
    println!("{}", tr.t(keys::RESULT_HEADING));
    let mut out = new_table(&[tr.t(keys::COL_CITY), inputs.city.as_str()]);
    let energy = |v: f64| format_thousands(v, style);
    let rows = [
        (keys::ROW_SPECIFIC_YIELD, format_grouped(result.adjusted_specific_yield, 1, style)),
        (keys::ROW_PLANT_SIZE, energy(inputs.plant_size_kwp)),
        (keys::ROW_GENERATION, energy(result.annual_generation_kwh)),
        (keys::ROW_DIRECT_SELF_CONSUMPTION, energy(result.direct_self_consumption_kwh)),
        (keys::ROW_SURPLUS_BEFORE, energy(result.surplus_before_storage_kwh)),
        (keys::ROW_SHIFTED, energy(result.shifted_energy_kwh)),
        (keys::ROW_SELF_CONSUMPTION_WITH, energy(result.self_consumption_with_storage_kwh)),
        (keys::ROW_SURPLUS_WITH, energy(result.surplus_with_storage_kwh)),
        (keys::ROW_AUTARKY_WITHOUT, format_decimal(result.autarky_without_storage_pct, 1, style)),
        (keys::ROW_AUTARKY_WITH, format_decimal(result.autarky_with_storage_pct, 1, style)),
        (keys::ROW_TILT, format_decimal(inputs.tilt_degrees, 0, style)),
        (keys::ROW_ORIENTATION, orientation_description(tr, inputs.orientation)),
    ];
    for (key, value) in rows {
        out.add_row(vec![
            Cell::new(tr.t(key)),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{out}");
}

/// 발전량/자가소비/잉여 막대그래프와 단순화 안내문을 출력한다.
pub fn print_chart(tr: &Translator, result: &EstimationResult) {
    println!("{}", tr.t(keys::CHART_HEADING));
    let rows = [
        (tr.t(keys::CHART_GENERATION), result.annual_generation_kwh),
        (tr.t(keys::CHART_SELF_CONSUMPTION), result.self_consumption_with_storage_kwh),
        (tr.t(keys::CHART_SURPLUS), result.surplus_with_storage_kwh),
    ];
    for line in bar_chart(&rows, CHART_WIDTH, tr.number_style()) {
        println!("{line}");
    }
    println!("\n{}", tr.t(keys::DISCLAIMER));
}

/// 시나리오 비교표를 출력한다.
pub fn print_scenarios(tr: &Translator, outcomes: &[ScenarioOutcome]) {
    let style = tr.number_style();
    println!("{}", tr.t(keys::SCENARIOS_HEADING));
    let mut out = new_table(&[
        tr.t(keys::COL_SCENARIO),
        tr.t(keys::COL_FACTOR),
        tr.t(keys::ROW_SPECIFIC_YIELD),
        tr.t(keys::ROW_GENERATION),
        tr.t(keys::ROW_SELF_CONSUMPTION_WITH),
        tr.t(keys::ROW_SURPLUS_WITH),
        tr.t(keys::ROW_AUTARKY_WITHOUT),
        tr.t(keys::ROW_AUTARKY_WITH),
    ]);
    for o in outcomes {
        let r = &o.result;
        out.add_row(vec![
            Cell::new(scenario_label(tr, o.scenario)),
            Cell::new(format_decimal(o.yield_factor, 3, style)),
            Cell::new(format_grouped(r.adjusted_specific_yield, 1, style)),
            Cell::new(format_thousands(r.annual_generation_kwh, style)),
            Cell::new(format_thousands(r.self_consumption_with_storage_kwh, style)),
            Cell::new(format_thousands(r.surplus_with_storage_kwh, style)),
            Cell::new(format_decimal(r.autarky_without_storage_pct, 1, style)),
            Cell::new(format_decimal(r.autarky_with_storage_pct, 1, style)),
        ]);
    }
    println!("{out}");
    println!("\n{}", tr.t(keys::DISCLAIMER));
}

pub fn scenario_label(tr: &Translator, scenario: Scenario) -> &str {
    match scenario {
        Scenario::Conservative => tr.t(keys::SCENARIO_CONSERVATIVE),
        Scenario::Realistic => tr.t(keys::SCENARIO_REALISTIC),
        Scenario::Optimistic => tr.t(keys::SCENARIO_OPTIMISTIC),
    }
}

/// 설정 메뉴를 처리한다. 언어가 바뀌면 `true`.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<bool, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} {} ({})",
        tr.t(keys::SETTINGS_CURRENT_LANGUAGE),
        cfg.language,
        tr.language().as_code()
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    let language = match sel.trim() {
        "" => return Ok(false),
        "1" => Language::De.as_code(),
        "2" => Language::En.as_code(),
        "3" => "auto",
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(false);
        }
    };
    cfg.language = language.to_string();
    println!("{} {}", tr.t(keys::SETTINGS_SAVED), cfg.language);
    Ok(true)
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(
        header
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    read_line_from(&mut io::stdin().lock(), prompt)
}

/// 프롬프트를 출력하고 한 줄을 읽는다. 입력이 끝났으면 `UnexpectedEof`.
fn read_line_from<R: BufRead>(input: &mut R, prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        println!();
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
    }
    Ok(buf)
}

fn read_f64_in(
    tr: &Translator,
    prompt_key: &str,
    default: f64,
    min: f64,
    max: f64,
) -> Result<f64, AppError> {
    read_f64_from(&mut io::stdin().lock(), tr, prompt_key, default, min, max)
}

/// 범위 안의 숫자를 입력받는다. 빈 입력은 기본값이며 기본값도 범위 검사를 거친다.
/// 쉼표 소수점도 허용한다.
pub fn read_f64_from<R: BufRead>(
    input: &mut R,
    tr: &Translator,
    prompt_key: &str,
    default: f64,
    min: f64,
    max: f64,
) -> Result<f64, AppError> {
    let prompt = format!("{} [{default}]: ", tr.t(prompt_key));
    loop {
        let s = read_line_from(input, &prompt)?;
        let s = s.trim();
        let parsed = if s.is_empty() {
            Ok(default)
        } else {
            s.replace(',', ".").parse::<f64>()
        };
        match parsed {
            Ok(v) if v >= min && v <= max => return Ok(v),
            Ok(_) if max == f64::MAX => println!("{} >= {min}", tr.t(keys::ERROR_OUT_OF_RANGE)),
            Ok(_) => println!("{} [{min}, {max}]", tr.t(keys::ERROR_OUT_OF_RANGE)),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
