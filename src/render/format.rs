//! Text formatting shared by the chart, list and map renderers.

/// Format an integer with `,` thousands separators: 1500000 -> "1,500,000".
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 { out.push(',') }
        out.push(ch);
    }
    out
}

/// One-decimal rank display, ties rounded away from zero: 3.25 -> "3.3".
pub fn format_rank(rank: f64) -> String {
    let rounded = (rank * 10.0).round() / 10.0;
    format!("{rounded:.1}")
}

/// Axis tick label with just enough precision for `step`.
pub(crate) fn format_tick(value: f64, step: f64) -> String {
    let precision = if step > 0.0 && step.is_finite() {
        (-step.log10().floor()).max(0.0) as usize
    } else {
        0
    };

    if precision == 0 && value >= 0.0 {
        format_thousands(value.round() as u64)
    } else {
        format!("{value:.precision$}")
    }
}

/// Escape text for use in XML/HTML content and attribute values.
pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
