#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Overflowing sizes must come back as None, not wrap
    let _ = wp_prune::retention::parse_size(data);
});
