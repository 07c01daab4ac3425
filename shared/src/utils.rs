// Number formatting shared by the engine logs and the console tables.

/// Formats `value` with `decimals` fraction digits and `,` thousands
/// separators, e.g. `212036.4` with 0 decimals -> `212,036`.
pub fn format_grouped(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value.is_sign_negative() && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_grouped_thousands() {
        assert_eq!(format_grouped(140000.0, 0), "140,000");
        assert_eq!(format_grouped(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_grouped(999.0, 0), "999");
    }

    #[test]
    fn test_format_grouped_negative() {
        assert_eq!(format_grouped(-72036.0, 0), "-72,036");
        assert_eq!(format_grouped(-0.2, 0), "0");
    }
}
