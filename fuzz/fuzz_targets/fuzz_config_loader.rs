#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // TOML parsing, validation and analyzer construction must never panic.
    // Parse and validation errors are fine.
    let Ok(cfg) = wear_config::load_toml(data) else {
        return;
    };
    if cfg.validate().is_ok() {
        // A validated config must also build.
        assert!(wear_core::Analyzer::from_config(&cfg).is_ok());
    }
});
