/// Seconds since the UNIX epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_secs() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

/// Seconds since the page was opened
#[cfg(target_arch = "wasm32")]
pub fn now_secs() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|perf| perf.now() / 1000.0)
        .unwrap_or(0.0)
}

/// Seed for the session's random generator. Only needs to differ between runs.
pub fn clock_seed() -> u64 {
    let secs = now_secs();
    secs.to_bits() ^ chrono::Utc::now().timestamp_subsec_nanos() as u64
}
