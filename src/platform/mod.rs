//! Platform abstraction layer
//!
//! Web-only pieces: the monotonic clock and the JS-facing game handle.
//! Native builds drive the simulation with a synthetic clock instead.

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Milliseconds on a monotonic clock (`performance.now()` on the web)
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}
