use crate::config::LoggingConfig;

/// File name prefix for rotated log files (`ui-sounds.log.YYYY-MM-DD`)
pub const LOG_FILE_NAME: &str = "ui-sounds.log";

/// Initialize tracing for the host process.
///
/// `RUST_LOG` takes precedence over `config.filter`. When `config.log_dir` is set,
/// logs are also written there with daily rotation.
///
/// Returns `false` if a global subscriber was already installed, in which case
/// nothing changes.
pub fn init_logging(config: &LoggingConfig) -> bool {
    use tracing_appender::rolling;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let file_layer = config.log_dir.as_ref().and_then(|log_dir| {
        if let Err(e) = std::fs::create_dir_all(log_dir) {
            eprintln!("Warning: Failed to create log directory: {}", e);
            return None;
        }
        let file_appender = rolling::daily(log_dir, LOG_FILE_NAME);
        Some(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(true),
        )
    });

    let console_layer = config.console.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .is_ok();

    if installed {
        if let Some(log_dir) = &config.log_dir {
            tracing::info!("Log directory: {}", log_dir.display());
        }
    }
    installed
}
