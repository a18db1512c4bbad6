//! Platform abstraction layer
//!
//! The simulation runs anywhere; hosts only differ in how they feed it time
//! and where they report scores.
//! - `web`: wasm-bindgen wrapper for the browser front end

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Milliseconds since the Unix epoch, for leaderboard timestamps
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Read a LocalStorage key; `None` when storage is unavailable or the key is unset
#[cfg(target_arch = "wasm32")]
pub fn storage_get(key: &str) -> Option<String> {
    web_sys::window()?.local_storage().ok()??.get_item(key).ok()?
}

/// Write a LocalStorage key, returning whether it stuck
#[cfg(target_arch = "wasm32")]
pub fn storage_set(key: &str, value: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .is_some_and(|storage| storage.set_item(key, value).is_ok())
}

/// Seed for runs that did not pin one in settings
pub fn fresh_seed() -> u64 {
    now_ms() as u64
}
