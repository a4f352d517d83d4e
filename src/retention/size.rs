//! Human-friendly sizes ("10M", "2G", "512K") for config values and summaries.

/// Bytes in one gibibyte.
pub const GIB: u64 = 1024 * 1024 * 1024;

const UNITS: &[(&str, u64)] = &[
    ("T", 1024 * GIB),
    ("G", GIB),
    ("M", 1024 * 1024),
    ("K", 1024),
    ("B", 1),
];

/// Parses `"500M"`, `"1G"`, `"10KiB"`, `"2 GB"` or a plain byte count.
/// Units are binary. Fractions are allowed (`"1.5G"`).
#[must_use]
pub fn parse_size(s: &str) -> Option<u64> {
    let upper = s.trim().to_uppercase();
    let trimmed = upper
        .strip_suffix("IB")
        .or_else(|| upper.strip_suffix('B').filter(|rest| !rest.is_empty()))
        .unwrap_or(&upper);

    let (number, multiplier) = UNITS
        .iter()
        .find_map(|(suffix, mult)| trimmed.strip_suffix(suffix).map(|n| (n, *mult)))
        .unwrap_or((trimmed, 1));

    let number = number.trim();
    if let Ok(whole) = number.parse::<u64>() {
        return whole.checked_mul(multiplier);
    }

    let value = number.parse::<f64>().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let bytes = (value * multiplier as f64) as u64;
    Some(bytes)
}

/// Renders bytes with a binary unit for summaries.
#[must_use]
pub fn format_size(bytes: u64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let value = bytes as f64;

    match bytes {
        b if b >= GIB => format!("{:.2} GiB", value / GIB as f64),
        b if b >= 1024 * 1024 => format!("{:.2} MiB", value / (1024.0 * 1024.0)),
        b if b >= 1024 => format!("{:.2} KiB", value / 1024.0),
        b => format!("{b} B"),
    }
}

/// Whole gibibytes, rounded down.
#[must_use]
pub const fn bytes_to_gib(bytes: u64) -> u64 {
    bytes / GIB
}
