//! Logger setup for native and web builds.

/// Filter applied when `RUST_LOG` is not set. wgpu is chatty at info.
pub const DEFAULT_FILTER: &str = "info,wgpu=warn,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Installs the global logger. Calling it again is harmless.
///
/// Native builds log through `env_logger` and honour `RUST_LOG`. Web builds
/// forward to the browser console at info level.
pub fn init() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let mut builder = env_logger::Builder::new();
        match std::env::var("RUST_LOG") {
            Ok(filter) => builder.parse_filters(&filter),
            Err(_) => builder.parse_filters(DEFAULT_FILTER),
        };
        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    }

    #[cfg(target_arch = "wasm32")]
    {
        // a second call finds the logger already set
        let _ = console_log::init_with_level(log::Level::Info);
    }
}
