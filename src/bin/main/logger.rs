use env_logger::{Builder, Env};
use log::LevelFilter;

pub(super) const LOG_LEVEL_ENV: &str = "TOUCHLINE_LOG";
const DEFAULT_FILTER: &str = "info";

fn builder(env: Env<'_>) -> Builder {
    let mut builder = Builder::from_env(env);
    builder.format_timestamp(None).format_target(true);
    builder
}

/// Installs the stderr logger at the filter named by `TOUCHLINE_LOG` (default `info`).
pub(super) fn init_from_env() -> LevelFilter {
    let logger = builder(Env::new().filter_or(LOG_LEVEL_ENV, DEFAULT_FILTER)).build();
    let level = logger.filter();

    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
    }

    level
}
