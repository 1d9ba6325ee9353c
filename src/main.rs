//! # Path Gen
//!
//! Turn sparse planner waypoints into dense flight setpoint trajectories.
//!
//! Handles one planning request given on the command line and prints the
//! response as JSON on stdout.

use std::env;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

use path_gen::config::{Config, LoggingConfig};
use path_gen::planning::{PlanRequest, PlanningFacade};

/// Environment variable holding the configuration file path
const CONFIG_ENV_VAR: &str = "PATH_GEN_CONFIG";

/// Name prefix of the rolling log files
const LOG_FILE_PREFIX: &str = "path-gen.log";

const USAGE: &str = "usage: path-gen <start_x> <start_y> <goal_x> <goal_y> <height>";

/// Main entry point for Path Gen
///
/// # Control Flow
///
/// 1. Load configuration from `$PATH_GEN_CONFIG` (defaults when unset)
/// 2. Set up logging (stderr, plus rolling files when `logging.log_dir` is set)
/// 3. Run the planning request and print the response
///
/// Exits with status 1 when no trajectory file was produced.
///
/// # Examples
///
/// ```bash
/// PATH_GEN_CONFIG=config/default.toml cargo run --release -- 0 0 2.5 1.0 0.4
/// ```
#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args: Vec<String> = env::args().skip(1).collect();
    let request = parse_request(&args)?;

    let config = load_config(env::var(CONFIG_ENV_VAR).ok())?;

    let _guard = init_logging(&config.logging);
    info!("Path Gen v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut facade = PlanningFacade::from_config(&config)?;
    let response = facade.handle(request).await;

    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(if response.status.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Parse `<start_x> <start_y> <goal_x> <goal_y> <height>`
fn parse_request(args: &[String]) -> Result<PlanRequest> {
    if args.len() != 5 {
        bail!("{}", USAGE);
    }

    let mut values = [0.0f64; 5];
    for (value, arg) in values.iter_mut().zip(args) {
        *value = arg
            .parse()
            .with_context(|| format!("invalid number '{}'\n{}", arg, USAGE))?;
    }

    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        bail!("non-finite value '{}'\n{}", bad, USAGE);
    }

    Ok(PlanRequest {
        start: (values[0], values[1]),
        goal: (values[2], values[3]),
        height: values[4],
    })
}

/// Load the configuration file at `path`, or the defaults when unset
fn load_config(path: Option<String>) -> Result<Config> {
    match path {
        Some(path) => Config::load(&path).with_context(|| format!("loading config {}", path)),
        None => Ok(Config::default()),
    }
}

/// Install the tracing subscriber
///
/// The returned guard must live until exit so buffered file logs are flushed.
fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    if config.log_dir.is_empty() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return None;
    }

    let appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(std::io::stderr.and(file_writer))
        .init();
    Some(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_request() {
        let request = parse_request(&args(&["0", "-1.5", "2.5", "1", "0.4"])).unwrap();
        assert_eq!(request.start, (0.0, -1.5));
        assert_eq!(request.goal, (2.5, 1.0));
        assert_eq!(request.height, 0.4);
    }

    #[test]
    fn test_parse_request_wrong_arity() {
        let err = parse_request(&args(&["0", "0", "1"])).unwrap_err();
        assert!(err.to_string().contains("usage"));
    }

    #[test]
    fn test_parse_request_not_a_number() {
        let err = parse_request(&args(&["0", "0", "one", "0", "0.4"])).unwrap_err();
        assert!(err.to_string().contains("'one'"));
    }

    #[test]
    fn test_parse_request_rejects_non_finite() {
        for bad in ["inf", "-inf", "NaN", "1e400"] {
            let err = parse_request(&args(&["0", "0", bad, "0", "0.4"])).unwrap_err();
            assert!(err.to_string().contains("non-finite"), "value {}: {}", bad, err);
        }
    }

    #[test]
    fn test_load_config_defaults_when_unset() {
        assert_eq!(load_config(None).unwrap(), Config::default());
    }

    #[test]
    fn test_load_config_from_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[trajectory]\nstep_size = 0.05\n").unwrap();
        file.flush().unwrap();

        let path = file.path().to_string_lossy().into_owned();
        let config = load_config(Some(path)).unwrap();
        assert_eq!(config.trajectory.step_size, 0.05);
    }

    #[test]
    fn test_load_config_error_names_file() {
        let err = load_config(Some("/nonexistent/path-gen.toml".to_string())).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/path-gen.toml"));
    }
}
