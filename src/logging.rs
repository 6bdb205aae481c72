use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

static TUI_MODE: AtomicBool = AtomicBool::new(false);

/// Set up dual-mode logging: console output through env_logger, with every
/// record also drained into tui-logger so the in-app log pane has the full
/// history once the TUI takes over.
pub fn init(level: log::LevelFilter) {
    let drain = tui_logger::Drain::new();
    env_logger::Builder::default()
        .filter_level(level)
        .format(move |buf, record| {
            // Always forward to tui-logger for the TUI log pane.
            drain.log(record);

            if TUI_MODE.load(Ordering::Relaxed) {
                // The alternate screen owns stdout now; stay quiet.
                Ok(())
            } else {
                let timestamp = chrono::Local::now().format("%H:%M:%S");
                writeln!(buf, "[{timestamp}] {}: {}", record.level(), record.args())
            }
        })
        .init();
    tui_logger::set_default_level(level);

    log::debug!("Logger initialized at {level} level");
}

/// Silence console output once the alternate screen is entered; log records
/// keep flowing into the tui-logger buffer.
pub fn switch_to_tui_logging() {
    TUI_MODE.store(true, Ordering::Relaxed);
}
