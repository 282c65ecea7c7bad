//! Formatting and escaping helpers shared by the page renderers

/// Format a number with a fixed count of decimal places
pub fn format_fixed(value: f64, decimal_places: usize) -> String {
    if !value.is_finite() {
        return format!("{:.*}", decimal_places, 0.0);
    }
    let formatted = format!("{:.*}", decimal_places, value);
    // "-0.00" reads as a debt on a zero balance
    if formatted.starts_with('-') && formatted[1..].chars().all(|c| c == '0' || c == '.') {
        formatted[1..].to_string()
    } else {
        formatted
    }
}

/// Prefix a fixed-decimal amount with a currency symbol, e.g. `$-20.00`
pub fn format_money(value: f64, symbol: &str, decimal_places: usize) -> String {
    format!("{}{}", symbol, format_fixed(value, decimal_places))
}

/// Escape text for safe interpolation into HTML content and attributes
pub fn escape_html(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(60.0, 2), "60.00");
        assert_eq!(format_fixed(12.345, 1), "12.3");
        assert_eq!(format_fixed(-20.0, 2), "-20.00");
        assert_eq!(format_fixed(-0.001, 2), "0.00");
        assert_eq!(format_fixed(f64::NAN, 2), "0.00");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(100.0, "$", 2), "$100.00");
        assert_eq!(format_money(-20.0, "$", 2), "$-20.00");
        assert_eq!(format_money(3.5, "", 0), "4");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("Rent & \"utilities\""), "Rent &amp; &quot;utilities&quot;");
        assert_eq!(escape_html("plain"), "plain");
    }
}
