use std::{env, path::PathBuf};

use dirs::home_dir;

const DEFAULT_DIR_NAME: &str = ".budgetbook";
const HOME_ENV: &str = "BUDGETBOOK_HOME";

/// Installs the global fmt subscriber, filtered by `RUST_LOG` plus
/// `budgetbook=info`. Call through [`crate::init`], which runs it once.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "budgetbook=info".parse() {
        filter = filter.add_directive(directive);
    }

    // Another subscriber may already be installed by the host.
    let _ = fmt().with_env_filter(filter).try_init();
}

/// Returns the application data directory, defaulting to `~/.budgetbook`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}
