use std::sync::Once;

static INIT: Once = Once::new();

/// Initialise the global `env_logger` backend once.
///
/// `filter` uses `env_logger` syntax (e.g. "debug", "pixel_blit=trace,wgpu=warn").
/// Without it `RUST_LOG` is honoured, falling back to `info` for this crate
/// and `warn` for everything else. Later calls are ignored.
pub fn init_logging(filter: Option<&str>) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match filter {
            Some(filter) => {
                builder.parse_filters(filter);
            }
            None => match std::env::var("RUST_LOG") {
                Ok(filter) => {
                    builder.parse_filters(&filter);
                }
                Err(_) => {
                    builder
                        .filter_level(log::LevelFilter::Warn)
                        .filter_module("pixel_blit", log::LevelFilter::Info);
                }
            },
        }

        // Tests may already have installed a logger
        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
