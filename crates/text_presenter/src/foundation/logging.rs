//! Logging setup
//!
//! The library only emits through the `log` facade. Binaries pick a backend;
//! these helpers install `env_logger`, reading `RUST_LOG` when it is set.

use env_logger::Env;

/// Install `env_logger` with `RUST_LOG` filtering (default: `info`)
///
/// Later calls are ignored once a logger is installed.
pub fn init() {
    init_with_default("info");
}

/// Install `env_logger`, falling back to `filter` when `RUST_LOG` is unset
pub fn init_with_default(filter: &str) {
    let installed = env_logger::Builder::from_env(Env::default().default_filter_or(filter))
        .format_timestamp_millis()
        .try_init()
        .is_ok();
    if installed {
        log::debug!("Logger installed (default filter '{}')", filter);
    }
}
