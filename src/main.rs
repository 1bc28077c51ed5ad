use fastapi_launch::config::{ConfigError, Ecosystem, Variant};
use fastapi_launch::launch::Launcher;
use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{Level, debug, error, info};
use tracing_subscriber::{EnvFilter, fmt};

const CONFIG_ENV: &str = "LAUNCH_CONFIG";

/// Where the descriptors come from.
enum Source {
    File(PathBuf),
    Builtin(Variant),
}

fn arg_value(prefix: &str) -> Option<String> {
    env::args()
        .skip(1)
        .find_map(|arg| arg.strip_prefix(prefix).map(str::to_string))
}

fn parse_source() -> Result<Source, ConfigError> {
    if let Some(path) = arg_value("--config=") {
        return Ok(Source::File(path.into()));
    }
    if let Some(name) = arg_value("--variant=") {
        return name.parse().map(Source::Builtin);
    }
    if let Ok(path) = env::var(CONFIG_ENV) {
        return Ok(Source::File(path.into()));
    }
    Ok(Source::Builtin(Variant::Full))
}

fn init_tracing(log_level: Option<&str>) {
    let level = match log_level {
        Some("debug") => Level::DEBUG,
        Some("info") => Level::INFO,
        Some("warn") | Some("warning") => Level::WARN,
        Some("error") => Level::ERROR,
        Some("trace") => Level::TRACE,
        _ => Level::INFO,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    // stdout carries the descriptor JSON, so logs go to stderr.
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}

fn load(source: &Source) -> Result<(Ecosystem, PathBuf), ConfigError> {
    match source {
        Source::File(path) => {
            let ecosystem = Ecosystem::load(path)?;
            let base = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            Ok((ecosystem, base))
        }
        Source::Builtin(variant) => Ok((Ecosystem::builtin(*variant)?, PathBuf::from("."))),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    init_tracing(arg_value("--log-level=").as_deref());

    let source = match parse_source() {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Invalid arguments: {}", e);
            return ExitCode::from(2);
        }
    };

    let (mut ecosystem, base_dir) = match load(&source) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load launch config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    ecosystem.apply_secret_overrides(|key| env::var(key).ok());

    for app in ecosystem.descriptors() {
        match app.settings() {
            Ok(settings) => debug!(
                app = %app.name,
                host = %settings.app_host,
                port = settings.app_port,
                run_migrations = settings.toggles.run_migrations,
                nginx_setup = settings.toggles.nginx_setup,
                pg_host = %settings.postgres.host,
                pg_port = %settings.postgres.port,
                "Effective settings"
            ),
            Err(e) => error!(app = %app.name, error = %e, "Environment will be rejected by the app"),
        }
    }

    if !env::args().any(|arg| arg == "--run") {
        return match serde_json::to_string_pretty(ecosystem.descriptors()) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to serialize descriptors: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let [app] = ecosystem.descriptors() else {
        eprintln!(
            "--run needs exactly one app, config declares {}",
            ecosystem.descriptors().len()
        );
        return ExitCode::FAILURE;
    };

    info!(app = %app.name, base = %base_dir.display(), "Launching");

    match Launcher::new(base_dir).run(app).await {
        Ok(status) => match status.code() {
            Some(code) => ExitCode::from(code.clamp(0, 255) as u8),
            None => ExitCode::FAILURE,
        },
        Err(e) => {
            error!(error = %e, "Launch failed");
            ExitCode::FAILURE
        }
    }
}
