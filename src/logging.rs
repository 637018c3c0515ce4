// Logging setup
//
// The library logs through the `log` facade. Binaries call
// `init_logger` once to route records to stdout and, optionally, a file.

use log::LevelFilter;
use std::path::Path;

/// Timestamp prefix used on every log line
const TIME_FORMAT: &str = "[%Y-%m-%d][%H:%M:%S.%f]";

/// Install the global logger
///
/// # Arguments
/// * `level` - Most verbose level to emit
/// * `file` - Optional file that receives a copy of every line
///
/// # Errors
/// Fails if the log file cannot be opened or a logger is already installed
pub fn init_logger(level: LevelFilter, file: Option<&Path>) -> Result<(), fern::InitError> {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}] {}",
                chrono::Local::now().format(TIME_FORMAT),
                record.level(),
                message
            ))
        })
        .level(level)
        // wgpu is very chatty below warn
        .level_for("wgpu_core", LevelFilter::Warn)
        .level_for("wgpu_hal", LevelFilter::Warn)
        .level_for("naga", LevelFilter::Warn)
        .chain(std::io::stdout());

    if let Some(path) = file {
        dispatch = dispatch.chain(fern::log_file(path)?);
    }

    dispatch.apply()?;
    Ok(())
}
