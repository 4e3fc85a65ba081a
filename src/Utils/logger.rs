use log::LevelFilter;
use simplelog::{ColorChoice, Config, SimpleLogger, TermLogger, TerminalMode};

/// Initializes terminal logging at the given level. Falls back to a plain logger when
/// no terminal is attached; calling it again after a logger is set is a no-op.
pub fn init_logger(level: LevelFilter) {
    if TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .is_err()
    {
        let _ = SimpleLogger::init(level, Config::default());
    }
}
