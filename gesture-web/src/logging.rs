//! `log` backend
//!
//! In the browser, records go to the devtools console. Native builds (tests,
//! tooling) use env_logger so `RUST_LOG` works.

use log::LevelFilter;

#[cfg(target_arch = "wasm32")]
struct ConsoleLogger;

#[cfg(target_arch = "wasm32")]
impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let text = format!("[{}] {}", record.target(), record.args());
        let line = wasm_bindgen::JsValue::from_str(&text);
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&line),
            log::Level::Warn => web_sys::console::warn_1(&line),
            log::Level::Info => web_sys::console::info_1(&line),
            log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
static LOGGER: ConsoleLogger = ConsoleLogger;

/// Install the logger (first call wins) and set the max level (every call)
pub fn init(level: LevelFilter) {
    #[cfg(target_arch = "wasm32")]
    {
        let _ = log::set_logger(&LOGGER);
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .try_init();
    }

    log::set_max_level(level);
}
