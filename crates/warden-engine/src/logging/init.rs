use std::sync::Once;

use env_logger::WriteStyle;
use log::LevelFilter;

use crate::config::EngineConfig;

/// How the process-wide logger is set up.
///
/// Useful filters while debugging ownership:
/// - `warden_engine::handle=debug`: every allocate, adopt, transfer and free
/// - `warden_engine::registry=debug`: names adopted, renamed and removed
/// - `warden_engine::device=warn`: stray frees and exhausted kinds only
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` filter string. `RUST_LOG` applies when absent.
    pub env_filter: Option<String>,
    pub write_style: WriteStyle,
}

impl LoggingConfig {
    /// Filter the logger will use: the configured one, then `RUST_LOG`.
    /// `None` means the `info` fallback.
    fn resolved_filter(&self) -> Option<String> {
        self.env_filter
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .filter(|filter| !filter.trim().is_empty())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: WriteStyle::Auto,
        }
    }
}

impl From<&EngineConfig> for LoggingConfig {
    fn from(config: &EngineConfig) -> Self {
        Self {
            env_filter: config.log_filter.clone(),
            ..Self::default()
        }
    }
}

static INIT: Once = Once::new();

/// Installs `env_logger` for the process. Only the first call has any
/// effect; a logger installed by the host application is kept.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        match config.resolved_filter() {
            Some(filter) => builder.parse_filters(&filter),
            None => builder.filter_level(LevelFilter::Info),
        };
        builder.write_style(config.write_style);

        match builder.try_init() {
            Ok(()) => log::debug!("logger installed"),
            Err(_) => log::warn!("host logger already installed; warden logs go there"),
        }
    });
}
