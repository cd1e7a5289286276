//! Fuzz target for `permguard.toml` parsing and resolution.
//!
//! Goal: config handling should **never panic**. It may return errors.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data)
        && let Ok(cfg) = permguard_settings::parse_config_toml(text)
    {
        let _ = permguard_settings::resolve_config(cfg, Default::default());
    }
});
