//! Logger setup shared by the demo and the tests.

use log::LevelFilter;
use std::str::FromStr;

/// Log to stderr at `level`.
///
/// The logger is installed on the first call; later calls only change the
/// level. RUST_LOG, when set, wins over `level`. Unknown levels mean `info`.
pub fn init(level: &str) {
    static ONCE: std::sync::Once = std::sync::Once::new();

    ONCE.call_once(|| {
        let _ = env_logger::Builder::new()
            .filter_level(LevelFilter::Trace)
            .parse_default_env()
            .format(|buf, record| {
                use std::io::Write;

                writeln!(
                    buf,
                    "{} {} time={} target={}",
                    record.level(),
                    record.args(),
                    buf.timestamp_millis(),
                    record.target()
                )
            })
            .try_init();
    });

    if std::env::var_os("RUST_LOG").is_none() {
        log::set_max_level(LevelFilter::from_str(level).unwrap_or(LevelFilter::Info));
    }
}
