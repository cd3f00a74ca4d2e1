use std::io::Write;

use log::LevelFilter;

/// Installs an `env_logger` writing to stderr with the given default level.
/// `RUST_LOG` takes precedence. Repeated calls are ignored.
pub fn build_logger_for_level(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:>5} {}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .parse_default_env()
        .try_init();
}

/// Each occurrence of `-v` raises `default` by one level
pub fn build_logger_for_verbosity(default: LevelFilter, verbosity: usize) {
    let level = LevelFilter::iter()
        .skip_while(|&l| l < default)
        .nth(verbosity)
        .unwrap_or(LevelFilter::Trace);

    build_logger_for_level(level);
}
