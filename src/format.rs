use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

/// Percentage of `part` over `total`, rounded and clamped to 0..=100.
/// A zero or negative total yields 0.
pub fn percent_of(part: f64, total: f64) -> u8 {
    if total <= 0.0 || !part.is_finite() || !total.is_finite() {
        return 0;
    }
    let raw = (part / total * 100.0).round();
    raw.clamp(0.0, 100.0) as u8
}

/// "used/total" in GiB with one decimal, e.g. "7.5/14.9G".
pub fn ram_usage_text(used_bytes: f64, total_bytes: f64) -> String {
    const GIB: f64 = 1_073_741_824.0;
    format!("{:.1}/{:.1}G", used_bytes / GIB, total_bytes / GIB)
}

/// "13W" for a known reading, "--W" for an unknown one.
pub fn watts_text(watts: Option<u32>) -> String {
    match watts {
        Some(w) => format!("{w}W"),
        None => "--W".to_string(),
    }
}
