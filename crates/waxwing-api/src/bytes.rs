//! Human-readable byte sizes, matching the device's own rendering.
//!
//! The firmware reports traffic counters as strings like `"12.00 GB"`
//! using 1024-based units. `parse_bytes` reverses that formatting;
//! unparseable input maps to zero rather than an error because these
//! fields feed cosmetic statistics only.

/// Scaled units, smallest first. Bare bytes are handled separately:
/// they format without decimals and carry no parse multiplier.
const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
const STEP: f64 = 1024.0;

/// Render a byte count the way the device does, e.g. `12.00 GB`.
/// Counts below 1 KB print as whole bytes.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / STEP;
    let mut unit = 0;
    while value >= STEP && unit < UNITS.len() - 1 {
        value /= STEP;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}

/// Parse a device-formatted size string back into bytes.
///
/// Returns 0 for anything that does not look like `<number> <unit>`
/// with a scaled unit. A bare byte unit has no multiplier and maps to
/// 0 as well.
pub fn parse_bytes(text: &str) -> u64 {
    let mut parts = text.split_whitespace();
    let (Some(number), Some(unit)) = (parts.next(), parts.next()) else {
        return 0;
    };
    let Ok(value) = number.parse::<f64>() else {
        return 0;
    };
    let Some(index) = UNITS.iter().position(|u| u.eq_ignore_ascii_case(unit)) else {
        return 0;
    };
    (value * STEP.powi(index as i32 + 1)) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_twelve_gigabytes() {
        assert_eq!(format_bytes(12_884_901_888), "12.00 GB");
    }

    #[test]
    fn formats_small_counts_as_whole_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
    }

    #[test]
    fn parses_what_it_formats() {
        assert_eq!(parse_bytes("12.00 GB"), 12_884_901_888);
        assert_eq!(parse_bytes("1.00 KB"), 1024);
    }

    #[test]
    fn parse_is_unit_case_insensitive() {
        assert_eq!(parse_bytes("1.00 kb"), 1024);
    }

    #[test]
    fn bare_bytes_parse_to_zero() {
        assert_eq!(parse_bytes("512 B"), 0);
        assert_eq!(parse_bytes("0.00 B"), 0);
    }

    #[test]
    fn garbage_parses_to_zero() {
        assert_eq!(parse_bytes("garbage"), 0);
        assert_eq!(parse_bytes(""), 0);
        assert_eq!(parse_bytes("twelve GB"), 0);
        assert_eq!(parse_bytes("5 XB"), 0);
    }
}
