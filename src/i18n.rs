use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;
use tracing::{debug, warn};

use crate::format::NumberStyle;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const DISCLAIMER: &str = "general.disclaimer";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_ESTIMATE: &str = "main_menu.estimate";
    pub const MAIN_MENU_SCENARIOS: &str = "main_menu.scenarios";
    pub const MAIN_MENU_CITIES: &str = "main_menu.cities";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_OUT_OF_RANGE: &str = "error.out_of_range";
    pub const ERROR_UNKNOWN_CITY: &str = "error.unknown_city";

    pub const INPUT_HEADING: &str = "input.heading";
    pub const INPUT_DEFAULT_HINT: &str = "input.default_hint";
    pub const PROMPT_CITY: &str = "prompt.city";
    pub const PROMPT_PLANT_SIZE: &str = "prompt.plant_size";
    pub const ROOF_OPTIONS: &str = "roof.options";
    pub const PROMPT_ROOF: &str = "prompt.roof";
    pub const PROMPT_MONO_PITCH: &str = "prompt.mono_pitch";
    pub const ORIENTATION_OPTIONS: &str = "orientation.options";
    pub const PROMPT_ORIENTATION: &str = "prompt.orientation";
    pub const PROMPT_SOUTH_QUALITY: &str = "prompt.south_quality";
    pub const PROMPT_SHARE: &str = "prompt.share";
    pub const PROMPT_BATTERY: &str = "prompt.battery";
    pub const PROMPT_CYCLES: &str = "prompt.cycles";

    pub const CITIES_HEADING: &str = "cities.heading";
    pub const COL_CITY: &str = "column.city";
    pub const COL_BASE_YIELD: &str = "column.base_yield";
    pub const COL_SCENARIO: &str = "column.scenario";

    pub const RESULT_HEADING: &str = "result.heading";
    pub const ROW_SPECIFIC_YIELD: &str = "row.specific_yield";
    pub const ROW_PLANT_SIZE: &str = "row.plant_size";
    pub const ROW_GENERATION: &str = "row.generation";
    pub const ROW_DIRECT_SELF_CONSUMPTION: &str = "row.direct_self_consumption";
    pub const ROW_SURPLUS_BEFORE: &str = "row.surplus_before";
    pub const ROW_SHIFTED: &str = "row.shifted";
    pub const ROW_SELF_CONSUMPTION_WITH: &str = "row.self_consumption_with";
    pub const ROW_SURPLUS_WITH: &str = "row.surplus_with";
    pub const ROW_AUTARKY_WITHOUT: &str = "row.autarky_without";
    pub const ROW_AUTARKY_WITH: &str = "row.autarky_with";
    pub const ROW_TILT: &str = "row.tilt";
    pub const ROW_ORIENTATION: &str = "row.orientation";

    pub const CHART_HEADING: &str = "chart.heading";
    pub const CHART_GENERATION: &str = "chart.generation";
    pub const CHART_SELF_CONSUMPTION: &str = "chart.self_consumption";
    pub const CHART_SURPLUS: &str = "chart.surplus";

    pub const SCENARIOS_HEADING: &str = "scenarios.heading";
    pub const SCENARIO_CONSERVATIVE: &str = "scenario.conservative";
    pub const SCENARIO_REALISTIC: &str = "scenario.realistic";
    pub const SCENARIO_OPTIMISTIC: &str = "scenario.optimistic";
    pub const COL_FACTOR: &str = "column.factor";

    pub const ORIENTATION_SOUTH_DESC: &str = "orientation.south_desc";
    pub const ORIENTATION_EAST_WEST_DESC: &str = "orientation.east_west_desc";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    De,
    En,
}

impl Language {
    fn from_code(code: &str) -> Option<Self> {
        let c = code.trim().to_lowercase();
        if c.starts_with("de") {
            Some(Language::De)
        } else if c.starts_with("en") {
            Some(Language::En)
        } else {
            None
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::De => "de",
            Language::En => "en",
        }
    }

    pub fn number_style(&self) -> NumberStyle {
        match self {
            Language::De => NumberStyle::German,
            Language::En => NumberStyle::English,
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    pub fn new(lang: Language) -> Self {
        Self {
            lang,
            overrides: None,
        }
    }

    /// 언어팩 디렉터리(locales/ 등)의 `<code>.toml`이 있으면 내장 문자열을 덮어쓴다.
    pub fn new_with_pack(lang: Language, pack_dir: &Path) -> Self {
        let overrides = load_overrides(pack_dir, lang.as_code());
        if overrides.is_some() {
            debug!(dir = %pack_dir.display(), lang = lang.as_code(), "loaded language pack");
        }
        Self { lang, overrides }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn number_style(&self) -> NumberStyle {
        self.lang.number_style()
    }

    /// 번역을 가져온다. 영어 문자열이 없으면 독일어로 폴백한다.
    pub fn t(&self, key: &str) -> &str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| de(key)),
            Language::De => de(key),
        }
    }
}

/// CLI 플래그 → 설정 → 시스템 로케일 순으로 언어를 결정한다. 모두 실패하면 독일어.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: &str) -> Language {
    cli_arg
        .and_then(Language::from_code)
        .or_else(|| Language::from_code(config_lang))
        .or_else(detect_system_language)
        .unwrap_or(Language::De)
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<Language> {
    let from_locale = get_locale().and_then(|loc| Language::from_code(&loc));
    if from_locale.is_some() {
        return from_locale;
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| Language::from_code(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫/중첩 맵.
fn load_overrides(dir: &Path, lang: &str) -> Option<HashMap<String, String>> {
    let path = dir.join(format!("{lang}.toml"));
    let content = fs::read_to_string(&path).ok()?;
    let map = parse_toml_to_map(&content);
    if map.is_none() {
        warn!(path = %path.display(), "ignoring unreadable language pack");
    }
    map
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    walk(&format!("{prefix}.{k}"), v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn de(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "Fehler",
        APP_EXIT => "Programm wird beendet.",
        DISCLAIMER => {
            "Hinweis: Die Speicherwirkung wird stark vereinfacht modelliert. Fuer praezise \
             Auslegungen (Lastgaenge, 15-Minuten-Profile, Temperatur, Degradation) sind \
             spezialisierte Simulationswerkzeuge erforderlich."
        }
        MAIN_MENU_TITLE => "\n=== PV-Ertrags-Simulator Baden-Wuerttemberg ===",
        MAIN_MENU_ESTIMATE => "1) Ertrag berechnen (realistische Annahme)",
        MAIN_MENU_SCENARIOS => "2) Szenarienvergleich",
        MAIN_MENU_CITIES => "3) Staedte und spezifische Ertraege",
        MAIN_MENU_SETTINGS => "4) Einstellungen",
        MAIN_MENU_EXIT => "0) Beenden",
        PROMPT_MENU_SELECT => "Auswahl: ",
        INVALID_SELECTION_RETRY => "Ungueltige Eingabe. Bitte erneut waehlen.",
        ERROR_INVALID_NUMBER => "Bitte eine Zahl eingeben.",
        ERROR_OUT_OF_RANGE => "Wert ausserhalb des zulaessigen Bereichs:",
        ERROR_UNKNOWN_CITY => "Unbekannte Stadt. Verfuegbar:",
        INPUT_HEADING => "\n-- Eingabeparameter --",
        INPUT_DEFAULT_HINT => "(Enter = Standardwert)",
        PROMPT_CITY => "Stadt",
        PROMPT_PLANT_SIZE => "Anlagengroesse (kWp, 10-50000)",
        ROOF_OPTIONS => {
            "Dachtyp: 1=Flachdach (aufgestaendert 15 Grad) 2=Typisches Hausdach (30 Grad) \
             3=Pultdach (20/30/40 Grad) 4=freie Neigung"
        }
        PROMPT_ROOF => "Dachtyp",
        PROMPT_MONO_PITCH => "Neigung Pultdach (20/30/40 Grad)",
        ORIENTATION_OPTIONS => "Ausrichtung: 1=Sued (mit Orientierungsgrad) 2=Ost/West",
        PROMPT_ORIENTATION => "Ausrichtung",
        PROMPT_SOUTH_QUALITY => {
            "Orientierungsgrad gegenueber optimaler Sued-Ausrichtung (%, 60-100)"
        }
        PROMPT_SHARE => "Eigenverbrauchsanteil ohne Speicher (%, 0-100)",
        PROMPT_BATTERY => "Speichergroesse (kWh nutzbar, 0 = kein Speicher)",
        PROMPT_CYCLES => "Durchschnittliche Vollzyklen pro Jahr (50-365)",
        CITIES_HEADING => "\n-- Hinterlegte Staedte und spezifische Ertraege (ohne Korrekturen) --",
        COL_CITY => "Stadt",
        COL_BASE_YIELD => "Spezifischer Ertrag (kWh/kWp*a)",
        COL_SCENARIO => "Szenario",
        RESULT_HEADING => "\n-- Ergebnis (realistische Annahme) --",
        ROW_SPECIFIC_YIELD => "Spezifischer Ertrag (kWh/kWp*a)",
        ROW_PLANT_SIZE => "Anlagengroesse (kWp)",
        ROW_GENERATION => "Jahreserzeugung (kWh/a)",
        ROW_DIRECT_SELF_CONSUMPTION => "Eigenverbrauch ohne Speicher (kWh/a)",
        ROW_SURPLUS_BEFORE => "Ueberschuss ohne Speicher (kWh/a)",
        ROW_SHIFTED => "Zusaetzliche Nutzung durch Speicher (kWh/a)",
        ROW_SELF_CONSUMPTION_WITH => "Eigenverbrauch mit Speicher (kWh/a)",
        ROW_SURPLUS_WITH => "Ueberschuss mit Speicher (kWh/a)",
        ROW_AUTARKY_WITHOUT => "Autarkie ohne Speicher (Prozent)",
        ROW_AUTARKY_WITH => "Autarkie mit Speicher (Prozent)",
        ROW_TILT => "Dachneigung (Grad)",
        ROW_ORIENTATION => "Ausrichtung",
        CHART_HEADING => "\n-- Erzeugung, Eigenverbrauch und Ueberschuss (mit Speicher) --",
        CHART_GENERATION => "Jahreserzeugung gesamt",
        CHART_SELF_CONSUMPTION => "Eigenverbrauch mit Speicher",
        CHART_SURPLUS => "Ueberschuss mit Speicher",
        SCENARIOS_HEADING => "\n-- Szenarienvergleich --",
        SCENARIO_CONSERVATIVE => "Konservativ",
        SCENARIO_REALISTIC => "Realistisch",
        SCENARIO_OPTIMISTIC => "Optimistisch",
        COL_FACTOR => "Faktor",
        ORIENTATION_SOUTH_DESC => "Sued, {pct} % von optimal",
        ORIENTATION_EAST_WEST_DESC => "Ost/West (pauschal 95 % von optimal Sued)",
        SETTINGS_HEADING => "\n-- Einstellungen --",
        SETTINGS_CURRENT_LANGUAGE => "Aktuelle Sprache:",
        SETTINGS_OPTIONS => "1) Deutsch  2) English  3) Automatisch",
        SETTINGS_PROMPT_CHANGE => "Nummer zum Aendern (Enter = abbrechen): ",
        SETTINGS_INVALID => "Ungueltige Eingabe, keine Aenderung.",
        SETTINGS_SAVED => "Sprache gespeichert:",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        DISCLAIMER => {
            "Note: the storage effect is modelled in a strongly simplified way. Precise sizing \
             (load profiles, 15-minute profiles, temperature, degradation) requires specialised \
             simulation tools."
        }
        MAIN_MENU_TITLE => "\n=== PV Yield Simulator Baden-Wuerttemberg ===",
        MAIN_MENU_ESTIMATE => "1) Estimate yield (realistic assumption)",
        MAIN_MENU_SCENARIOS => "2) Scenario comparison",
        MAIN_MENU_CITIES => "3) Cities and specific yields",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ERROR_OUT_OF_RANGE => "Value outside the allowed range:",
        ERROR_UNKNOWN_CITY => "Unknown city. Available:",
        INPUT_HEADING => "\n-- Input parameters --",
        INPUT_DEFAULT_HINT => "(Enter = default)",
        PROMPT_CITY => "City",
        PROMPT_PLANT_SIZE => "Plant size (kWp, 10-50000)",
        ROOF_OPTIONS => {
            "Roof type: 1=flat roof (elevated 15 deg) 2=typical house roof (30 deg) \
             3=mono-pitch roof (20/30/40 deg) 4=free tilt"
        }
        PROMPT_ROOF => "Roof type",
        PROMPT_MONO_PITCH => "Mono-pitch tilt (20/30/40 deg)",
        ORIENTATION_OPTIONS => "Orientation: 1=south (with orientation quality) 2=east/west",
        PROMPT_ORIENTATION => "Orientation",
        PROMPT_SOUTH_QUALITY => "Orientation quality relative to optimal south (%, 60-100)",
        PROMPT_SHARE => "Self-consumption share without storage (%, 0-100)",
        PROMPT_BATTERY => "Battery size (usable kWh, 0 = none)",
        PROMPT_CYCLES => "Average full cycles per year (50-365)",
        CITIES_HEADING => "\n-- Reference cities and specific yields (uncorrected) --",
        COL_CITY => "City",
        COL_BASE_YIELD => "Specific yield (kWh/kWp*a)",
        COL_SCENARIO => "Scenario",
        RESULT_HEADING => "\n-- Result (realistic assumption) --",
        ROW_SPECIFIC_YIELD => "Specific yield (kWh/kWp*a)",
        ROW_PLANT_SIZE => "Plant size (kWp)",
        ROW_GENERATION => "Annual generation (kWh/a)",
        ROW_DIRECT_SELF_CONSUMPTION => "Self-consumption without storage (kWh/a)",
        ROW_SURPLUS_BEFORE => "Surplus without storage (kWh/a)",
        ROW_SHIFTED => "Additional use via storage (kWh/a)",
        ROW_SELF_CONSUMPTION_WITH => "Self-consumption with storage (kWh/a)",
        ROW_SURPLUS_WITH => "Surplus with storage (kWh/a)",
        ROW_AUTARKY_WITHOUT => "Autarky without storage (percent)",
        ROW_AUTARKY_WITH => "Autarky with storage (percent)",
        ROW_TILT => "Roof tilt (deg)",
        ROW_ORIENTATION => "Orientation",
        CHART_HEADING => "\n-- Generation, self-consumption and surplus (with storage) --",
        CHART_GENERATION => "Total annual generation",
        CHART_SELF_CONSUMPTION => "Self-consumption with storage",
        CHART_SURPLUS => "Surplus with storage",
        SCENARIOS_HEADING => "\n-- Scenario comparison --",
        SCENARIO_CONSERVATIVE => "Conservative",
        SCENARIO_REALISTIC => "Realistic",
        SCENARIO_OPTIMISTIC => "Optimistic",
        COL_FACTOR => "Factor",
        ORIENTATION_SOUTH_DESC => "South, {pct} % of optimal",
        ORIENTATION_EAST_WEST_DESC => "East/West (flat 95 % of optimal south)",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_OPTIONS => "1) Deutsch  2) English  3) Automatic",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; nothing changed.",
        SETTINGS_SAVED => "Language saved:",
        _ => return None,
    })
}
