use clap::Parser;
use pv_yield_toolbox::{app, cli::Cli, config, i18n};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(err) = try_run(&cli) {
        let lang = i18n::resolve_language(cli.lang.as_deref(), "auto");
        let tr = i18n::Translator::new(lang);
        eprintln!("{}: {err}", tr.t(i18n::keys::ERROR_PREFIX));
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn try_run(cli: &Cli) -> Result<(), app::AppError> {
    let mut cfg = config::load_or_default(&cli.config)?;
    app::run(cli, &mut cfg)?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "warn,pv_yield_toolbox=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}
