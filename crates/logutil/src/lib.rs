//! Utilities for logging.

use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    HumanReadable,
    Json,
}

/// Configure the global logger.
///
/// `default_level` applies unless `RUST_LOG` is set, in which case its
/// directives take over. Only the first call has an effect.
pub fn configure_global_logger<W>(default_level: Level, format: LogFormat, make_writer: W)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_writer(make_writer)
        .with_target(false);

    // Errors only if a global subscriber is already set.
    let _ = match format {
        LogFormat::HumanReadable => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

/// Install a logger capturing output for tests.
///
/// Safe to call from every test.
pub fn configure_test_logger() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(Level::DEBUG))
        .with_test_writer()
        .try_init();
}

fn env_filter(default_level: Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(default_level).into())
        .from_env_lossy()
}
