#![no_main]
use libfuzzer_sys::fuzz_target;
use wp_prune::retention::NamePattern;

fuzz_target!(|data: (Vec<String>, &str)| {
    let (extensions, name) = data;
    if let Ok(pattern) = NamePattern::from_extensions(extensions.as_slice()) {
        let _ = pattern.matches(name);
    }
});
