#![no_main]
use libfuzzer_sys::fuzz_target;
use wp_prune::fmt::{FormatTemplate, FormatValues};

fuzz_target!(|data: &str| {
    let template = FormatTemplate::parse(data);

    let values = FormatValues::new()
        .tag("INFO")
        .scope("CLEANUP")
        .msg("Deleted 3 files")
        .timestamp("2025-01-01 00:00:00")
        .level("info")
        .site("shop")
        .date(&chrono::Local::now());
    let _ = template.render(&values);
});
