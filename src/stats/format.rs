const BYTE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Human readable byte count in base-1024 units, at most two decimals.
pub fn format_bytes(bytes: i64) -> String {
    if bytes <= 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rendered = format!("{value:.2}");
    let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, BYTE_UNITS[unit])
}

pub fn format_duration(minutes: f64) -> String {
    let minutes = minutes.max(0.0);
    if minutes < 60.0 {
        return format!("{} min", minutes.round() as i64);
    }

    let hours = (minutes / 60.0).floor() as i64;
    let remaining_minutes = (minutes % 60.0).round() as i64;
    if hours < 24 {
        return format!("{hours}h {remaining_minutes}m");
    }

    let days = hours / 24;
    let remaining_hours = hours % 24;
    format!("{days}d {remaining_hours}h")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1024), "1 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1_048_576), "1 MB");
        assert_eq!(format_bytes(1_234_567_890), "1.15 GB");
    }

    #[test]
    fn test_format_bytes_caps_at_terabytes() {
        assert_eq!(format_bytes(1024_i64.pow(5)), "1024 TB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0 min");
        assert_eq!(format_duration(42.4), "42 min");
        assert_eq!(format_duration(59.4), "59 min");
        assert_eq!(format_duration(60.0), "1h 0m");
        assert_eq!(format_duration(135.0), "2h 15m");
        assert_eq!(format_duration(24.0 * 60.0), "1d 0h");
        assert_eq!(format_duration(3.0 * 24.0 * 60.0 + 5.0 * 60.0 + 30.0), "3d 5h");
    }
}
