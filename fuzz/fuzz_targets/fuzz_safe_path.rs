#![no_main]
use libfuzzer_sys::fuzz_target;
use std::path::Path;
use wp_prune::retention::{is_safe, normalize};

fuzz_target!(|data: &str| {
    let target = Path::new(data);
    let folded = normalize(target);
    // Folding twice changes nothing
    assert_eq!(normalize(&folded), folded);
    let _ = is_safe(target, &[Path::new("/var/backups").to_path_buf()]);
});
