//! Logging setup for binaries embedding the binding, e.g. a reconciler.
//!
//! The library itself only emits `tracing` events and spans. Nothing is printed unless the
//! embedding binary installs a subscriber, for example with [`initialize_logging`].

use std::path::PathBuf;

use snafu::{ResultExt, Snafu};
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

/// Number of rotated log files kept in the log directory.
pub const MAX_LOG_FILES: usize = 6;

type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to initialize rolling file appender in {}", directory.display()))]
    InitRollingFileAppender {
        source: InitError,
        directory: PathBuf,
    },

    #[snafu(display("failed to install global tracing subscriber"))]
    InstallSubscriber { source: TryInitError },
}

/// Initializes `tracing` logging with options from the environment variable
/// given in the `env` parameter.
///
/// We force users to provide a variable name so it can be different per binary.
/// We encourage it to be the binary name plus `_LOG`, e.g. `KAFKA_BINDING_CONTROLLER_LOG`.
/// If the variable is not set, the maximum log level is INFO.
///
/// Log output can be copied to a file by setting `{env}_DIRECTORY` to a directory path.
/// This file will be rotated hourly.
pub fn initialize_logging(env: &str, app_name: &str) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_env_var(env)
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let file_appender_directory = log_directory(env);
    let file_layer = file_appender_directory
        .as_deref()
        .map(|directory| {
            RollingFileAppender::builder()
                .rotation(Rotation::HOURLY)
                .filename_suffix(format!("{app_name}.log"))
                .max_log_files(MAX_LOG_FILES)
                .build(directory)
                .context(InitRollingFileAppenderSnafu { directory })
        })
        .transpose()?
        .map(|appender| {
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(appender)
        });

    Registry::default()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .try_init()
        .context(InstallSubscriberSnafu)?;

    // need to delay logging until after tracing is initialized
    match file_appender_directory {
        Some(dir) => tracing::info!(directory = %dir.display(), "file logging enabled"),
        None => tracing::debug!("file logging disabled, because no log directory set"),
    }

    Ok(())
}

fn log_directory(env: &str) -> Option<PathBuf> {
    std::env::var_os(format!("{env}_DIRECTORY")).map(PathBuf::from)
}
