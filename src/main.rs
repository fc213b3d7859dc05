use clap::Parser;
use primesum::app::{handle_fatal_error, handle_parse_error, initialize_app, AppConfig};
use primesum::cli::Cli;
use primesum::config::ConfigLoader;
use primesum::coordinator::Coordinator;
use primesum::error::AppResult;
use primesum::report::stdout_reporter;
use tracing::debug;

fn main() {
    let cli = Cli::try_parse().unwrap_or_else(|e| handle_parse_error(e));
    let verbose = cli.verbose;

    if let Err(e) = run(cli) {
        handle_fatal_error(e, verbose);
    }
}

fn run(cli: Cli) -> AppResult<()> {
    let app_config = AppConfig::new(cli.verbose)?;

    let config = ConfigLoader::new(&app_config.working_dir)
        .with_explicit_path(cli.config.clone())
        .load()?;
    let config = cli.apply_overrides(config);
    config.validate()?;

    let app_config = app_config.with_configured_level(config.log_level.clone());
    let cancel = initialize_app(&app_config)?;
    match &config.source {
        Some(path) => debug!("Loaded configuration from {}", path.display()),
        None => debug!("No configuration file found, using defaults"),
    }
    debug!(?config, "Resolved configuration");

    let coordinator = Coordinator::new(config.run_options())
        .with_reporter(stdout_reporter(config.format, config.quiet))
        .with_cancellation(cancel);

    coordinator.run(cli.num_threads, cli.max_number)?;
    Ok(())
}
