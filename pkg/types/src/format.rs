//! Display formatting for capacity figures.

const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Render a byte count with binary units, two decimals. `None` (no limit
/// set on the quota) renders as "N/A". Values that reach PB are not divided
/// further.
pub fn format_bytes(bytes: Option<u64>) -> String {
    let Some(bytes) = bytes else {
        return "N/A".to_string();
    };
    let mut value = bytes as f64;
    for unit in &UNITS[..UNITS.len() - 1] {
        if value < 1024.0 {
            return format!("{:.2} {}", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:.2} PB", value)
}

/// Usage percentage. 0.0 when the total is zero; never clamped, since an
/// over-quota path legitimately exceeds 100.
pub fn percentage(used: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    used as f64 / total as f64 * 100.0
}

/// Data reduction ratio: logical bytes written per physical byte stored.
/// 0.0 when nothing physical is stored.
pub fn drr(logical: u64, effective: u64) -> f64 {
    if effective == 0 {
        return 0.0;
    }
    logical as f64 / effective as f64
}
