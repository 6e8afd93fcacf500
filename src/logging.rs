//! Debug-build logging
//!
//! The TUI owns the terminal, so log output goes to
//! `<cache_dir>/storefront/storefront.log` instead of stderr. Release
//! builds keep the `log` macros but never install a logger.

use std::path::PathBuf;

use chrono::{DateTime, Local};

pub const LOG_FILE_NAME: &str = "storefront.log";
const DEFAULT_FILTER: &str = "storefront=debug";

pub fn log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("storefront").join(LOG_FILE_NAME))
}

/// Install the file logger; `RUST_LOG` overrides the default filter
#[cfg(debug_assertions)]
pub fn init() {
    use std::fs::OpenOptions;
    use std::io::Write;

    let Some(path) = log_path() else {
        return;
    };
    if let Some(parent) = path.parent()
        && std::fs::create_dir_all(parent).is_err()
    {
        return;
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let env = env_logger::Env::default().default_filter_or(DEFAULT_FILTER);
    let _ = env_logger::Builder::from_env(env)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{}",
                format_line(
                    Local::now(),
                    record.level(),
                    record.target(),
                    &record.args().to_string()
                )
            )
        })
        .try_init();
}

#[cfg(not(debug_assertions))]
pub fn init() {}

#[cfg_attr(not(debug_assertions), allow(dead_code))]
fn format_line(at: DateTime<Local>, level: log::Level, target: &str, message: &str) -> String {
    format!(
        "{} {:<5} {}: {}",
        at.format("%Y-%m-%d %H:%M:%S%.3f"),
        level,
        target,
        message
    )
}
