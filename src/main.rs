//! netpredict - Main CLI Entry Point

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use netpredict::{
    cli::{Args, Commands, Config, PredictArgs, Verbosity},
    client::HttpPredictionClient,
    errors::PredictorError,
    predictor::{Classification, PredictorSession, ServerStatus, Verdict},
    repl::{DisplayManager, ReplSession},
    site::Section,
    telemetry::{TelemetryCollector, TelemetryDisplay},
};
use tokio_util::sync::CancellationToken;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for `predict`
const EXIT_HEALTHY: i32 = 0;
const EXIT_ISSUE: i32 = 1;
const EXIT_ERROR: i32 = 2;
const EXIT_CANCELLED: i32 = 130;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) if matches!(args.command, Some(Commands::Predict(_))) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(EXIT_ERROR);
        }
        Err(e) => return Err(e.into()),
    };

    let verbosity = args.verbosity(config.verbosity());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(verbosity.log_filter())),
        )
        .init();

    let display = DisplayManager::new(
        config.display.color_output,
        config.display.show_spinner && verbosity.show_progress(),
    );

    match &args.command {
        Some(Commands::Predict(predict)) => {
            let code = run_predict(&config, &display, predict, verbosity).await?;
            std::process::exit(code);
        }
        Some(Commands::Status) => {
            run_status(&config, &display).await?;
        }
        Some(Commands::Format) => {
            run_format(&config, &display).await?;
        }
        Some(Commands::Start) => {
            run_repl(&config, display, verbosity).await?;
        }
        Some(Commands::About { section }) => match section {
            Some(section) => display.show_section(*section),
            None => Section::ALL.iter().for_each(|s| display.show_section(*s)),
        },
        Some(Commands::Config) => {
            show_config(&config, args.config.is_some())?;
        }
        None => {
            println!("netpredict v{} - NetworkAI Network Health Predictor", VERSION);
            println!("\nUsage:");
            println!("  netpredict predict --latency <ms> --packet-loss <pct> --jitter <ms> --bandwidth <pct>");
            println!("  netpredict start             Interactive predictor form");
            println!("  netpredict status            Check the prediction service");
            println!("  netpredict format            Show the expected input format");
            println!("  netpredict about [section]   home, predictor, about, contact");
            println!("  netpredict config            Show configuration");
            println!("\nExample:");
            println!("  netpredict predict --latency 45.2 --packet-loss 0.3 --jitter 4.5 --bandwidth 68");
            println!();
        }
    }

    Ok(())
}

/// Config file (or defaults) with command-line overrides applied
fn load_config(args: &Args) -> netpredict::Result<Config> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(url) = &args.url {
        config.service.base_url = url.clone();
    }
    if let Some(timeout) = args.timeout {
        config.service.request_timeout_secs = timeout;
    }
    config.validate()?;
    Ok(config)
}

/// Exit code for the outcome of `predict`
fn exit_code(result: &netpredict::Result<Classification>) -> i32 {
    match result {
        Ok(classification) if classification.verdict() == Verdict::Healthy => EXIT_HEALTHY,
        Ok(_) => EXIT_ISSUE,
        Err(PredictorError::Cancelled) => EXIT_CANCELLED,
        Err(_) => EXIT_ERROR,
    }
}

/// Build a session whose token fires on Ctrl-C
fn build_session(
    config: &Config,
    telemetry: TelemetryCollector,
) -> Result<PredictorSession<HttpPredictionClient>> {
    let client = HttpPredictionClient::with_config(
        &config.service.base_url,
        config.service.request_timeout_secs,
    )?;

    let token = CancellationToken::new();
    let on_interrupt = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    Ok(PredictorSession::with_telemetry(client, telemetry).with_cancellation(token))
}

async fn wake_with_spinner(
    session: &mut PredictorSession<HttpPredictionClient>,
    display: &DisplayManager,
) -> netpredict::Result<ServerStatus> {
    let spinner = display.start_spinner(ServerStatus::Checking.label());
    let status = session.wake().await;
    spinner.finish_and_clear();
    status
}

async fn run_predict(
    config: &Config,
    display: &DisplayManager,
    predict: &PredictArgs,
    verbosity: Verbosity,
) -> Result<i32> {
    let mut session = match build_session(config, TelemetryCollector::new()) {
        Ok(session) => session,
        Err(e) => {
            display.show_error(&e.to_string());
            return Ok(EXIT_ERROR);
        }
    };
    session.set_metrics(predict.metrics());

    let status = match wake_with_spinner(&mut session, display).await {
        Ok(status) => status,
        Err(e) => {
            if !matches!(e, PredictorError::Cancelled) {
                display.show_error(&e.to_string());
            }
            return Ok(exit_code(&Err(e)));
        }
    };
    if !predict.json && verbosity.show_progress() {
        display.show_status(status);
        if verbosity.show_events() {
            display.show_format(session.format_hints());
        }
    }

    let spinner = display.start_spinner("Analyzing Network...");
    let result = session.submit().await;
    spinner.finish_and_clear();

    let code = exit_code(&result);
    match &result {
        Err(PredictorError::Cancelled) => return Ok(code),
        Err(e) if !e.is_user_facing() => {
            display.show_error(&e.to_string());
            return Ok(code);
        }
        _ => {}
    }

    if predict.json {
        let panel = session.result_panel();
        let output = serde_json::json!({
            "metrics": session.metrics(),
            "server_status": format!("{:?}", session.server_status()).to_lowercase(),
            "prediction": session.state().classification().map(|c| c.value),
            "verdict": panel.title(),
            "error": session.state().failure().map(|f| f.message.clone()),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        display.show_result(&session.result_panel());
    }

    Ok(code)
}

async fn run_status(config: &Config, display: &DisplayManager) -> Result<()> {
    let mut session = build_session(config, TelemetryCollector::new())?;
    let status = wake_with_spinner(&mut session, display).await?;

    display.show_status(status);
    display.show_format(session.format_hints());
    display.show_submit_control(&session.submit_control());
    Ok(())
}

async fn run_format(config: &Config, display: &DisplayManager) -> Result<()> {
    let mut session = build_session(config, TelemetryCollector::new())?;
    let status = wake_with_spinner(&mut session, display).await?;

    match session.format_hints() {
        Some(hints) => display.show_format(Some(hints)),
        None if status == ServerStatus::Offline => {
            display.show_error(netpredict::errors::SERVER_OFFLINE_MESSAGE)
        }
        None => display.show_info("The server did not provide a format description."),
    }
    Ok(())
}

async fn run_repl(config: &Config, display: DisplayManager, verbosity: Verbosity) -> Result<()> {
    let telemetry = TelemetryCollector::new();
    let session = build_session(config, telemetry.clone())?;

    let mut repl = ReplSession::with_history(session, display, config.history_file())?;
    repl.run(VERSION, &config.service.base_url).await?;

    TelemetryDisplay::new(telemetry, verbosity).display_summary();
    Ok(())
}

fn show_config(config: &Config, explicit_path: bool) -> Result<()> {
    if !explicit_path {
        if let Some(path) = Config::default_path() {
            let origin = if path.exists() { "loaded" } else { "not found, using defaults" };
            println!("{}", format!("# {} ({})", path.display(), origin).dimmed());
        }
    }
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        assert_eq!(exit_code(&Ok(Classification::new(0.0))), EXIT_HEALTHY);
        assert_eq!(exit_code(&Ok(Classification::new(1.0))), EXIT_ISSUE);
        assert_eq!(exit_code(&Err(PredictorError::ServerOffline)), EXIT_ERROR);
        assert_eq!(
            exit_code(&Err(PredictorError::PredictionFailed("HTTP error! status: 500".into()))),
            EXIT_ERROR
        );
        assert_eq!(exit_code(&Err(PredictorError::Cancelled)), EXIT_CANCELLED);
    }

    #[test]
    fn test_setup_errors_map_to_error_code() {
        let err = PredictorError::ConfigError("bad".to_string());
        assert_eq!(exit_code(&Err(err)), EXIT_ERROR);
        assert_ne!(EXIT_ERROR, EXIT_ISSUE);
    }

    #[test]
    fn test_load_config_rejects_bad_inputs() {
        let missing = args(&["netpredict", "--config", "/nonexistent/cfg.toml", "predict"]);
        assert!(matches!(load_config(&missing), Err(PredictorError::ConfigError(_))));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        Config::default().save(&path).unwrap();
        let path = path.to_string_lossy().to_string();

        let bad_url = args(&["netpredict", "--config", &path, "--url", "not-a-url", "predict"]);
        assert!(matches!(load_config(&bad_url), Err(PredictorError::ConfigError(_))));

        let overridden = args(&["netpredict", "--config", &path, "--timeout", "3", "status"]);
        let config = load_config(&overridden).unwrap();
        assert_eq!(config.service.request_timeout_secs, 3);
    }
}
