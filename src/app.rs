use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::cli::{Cli, Command, PlantArgs};
use crate::config::{Config, ConfigError, PlantInputs};
use crate::estimator::{estimate_for_city, ValidationError};
use crate::i18n::{self, Translator};
use crate::location::LocationYieldTable;
use crate::scenario::estimate_scenarios;
use crate::ui_cli::{self, MenuChoice};

/// 사용자 언어팩을 찾는 디렉터리.
pub const LOCALES_DIR: &str = "locales";

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
}

/// 명령행 인자와 설정 언어로 번역기를 만든다.
pub fn translator_for(cli_lang: Option<&str>, config: &Config) -> Translator {
    let lang = i18n::resolve_language(cli_lang, &config.language);
    Translator::new_with_pack(lang, Path::new(LOCALES_DIR))
}

/// 서브커맨드를 실행한다. 서브커맨드가 없으면 대화형 메뉴로 들어간다.
pub fn run(cli: &Cli, config: &mut Config) -> Result<(), AppError> {
    let table = config.location_table()?;
    debug!(cities = table.all_entries().len(), "location table ready");
    match &cli.command {
        Some(Command::Cities) => {
            let tr = translator_for(cli.lang.as_deref(), config);
            ui_cli::print_cities(&tr, &table);
        }
        Some(Command::Estimate(args)) => {
            let tr = translator_for(cli.lang.as_deref(), config);
            let inputs = resolve_inputs(args, &config.defaults)?;
            show_estimate(&tr, &table, &inputs, config)?;
        }
        Some(Command::Scenarios(args)) => {
            let tr = translator_for(cli.lang.as_deref(), config);
            let inputs = resolve_inputs(args, &config.defaults)?;
            show_scenarios(&tr, &table, &inputs, config)?;
        }
        Some(Command::Interactive) | None => interactive(cli, config, &table)?,
    }
    Ok(())
}

fn resolve_inputs(args: &PlantArgs, defaults: &PlantInputs) -> Result<PlantInputs, AppError> {
    Ok(args.apply(defaults)?)
}

fn show_estimate(
    tr: &Translator,
    table: &LocationYieldTable,
    inputs: &PlantInputs,
    config: &Config,
) -> Result<(), AppError> {
    let request = inputs.to_request(config.scenario_factors.realistic);
    let result = estimate_for_city(table, &request)?;
    ui_cli::print_result(tr, inputs, &result);
    ui_cli::print_chart(tr, &result);
    Ok(())
}

fn show_scenarios(
    tr: &Translator,
    table: &LocationYieldTable,
    inputs: &PlantInputs,
    config: &Config,
) -> Result<(), AppError> {
    let outcomes = estimate_scenarios(
        table,
        &inputs.to_request(config.scenario_factors.realistic),
        inputs.orientation,
        &config.scenario_factors,
    )?;
    ui_cli::print_scenarios(tr, &outcomes);
    Ok(())
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
///
/// 세션 중 입력한 값은 다음 입력의 기본값이 되지만 설정 파일에는 저장하지 않는다.
/// 입력 검증 오류는 출력 후 메뉴로 돌아가고, 입력이 끝나면(EOF) 종료한다.
fn interactive(cli: &Cli, config: &mut Config, table: &LocationYieldTable) -> Result<(), AppError> {
    let mut tr = translator_for(cli.lang.as_deref(), config);
    let mut session = config.defaults.clone();
    loop {
        let step = match ui_cli::main_menu(&tr)? {
            MenuChoice::Estimate => ui_cli::prompt_plant_inputs(&tr, table, &session)
                .and_then(|inputs| {
                    session = inputs;
                    show_estimate(&tr, table, &session, config)
                }),
            MenuChoice::Scenarios => ui_cli::prompt_plant_inputs(&tr, table, &session)
                .and_then(|inputs| {
                    session = inputs;
                    show_scenarios(&tr, table, &session, config)
                }),
            MenuChoice::Cities => {
                ui_cli::print_cities(&tr, table);
                Ok(())
            }
            MenuChoice::Settings => match ui_cli::handle_settings(&tr, config) {
                Ok(true) => {
                    config.save(&cli.config)?;
                    info!(language = %config.language, "language changed");
                    // 설정 메뉴에서 바꾼 언어가 --lang 플래그보다 우선한다.
                    tr = translator_for(None, config);
                    Ok(())
                }
                Ok(false) => Ok(()),
                Err(err) => Err(err),
            },
            MenuChoice::Exit => {
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        };
        match step {
            Ok(()) => {}
            Err(AppError::Validation(err)) => {
                debug!(%err, "estimate rejected");
                println!("{}: {err}", tr.t(i18n::keys::ERROR_PREFIX));
            }
            Err(AppError::Io(err)) if err.kind() == io::ErrorKind::UnexpectedEof => {
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}
