//! Number formatting for terminal output.

/// Format a USD price for display.
///
/// Dollar-and-up prices get four decimals, sub-dollar prices six (so small
/// tokens do not collapse to `$0.0000`). Zero, negative, or non-finite
/// prices render as "unavailable" rather than a misleading figure.
///
/// # Examples
///
/// ```rust
/// use coinwatch_cli::presentation::format_price;
///
/// assert_eq!(format_price(97000.5), "$97000.5000");
/// assert_eq!(format_price(0.004321), "$0.004321");
/// assert_eq!(format_price(0.0), "unavailable");
/// ```
pub fn format_price(price: f64) -> String {
    if !price.is_finite() || price <= 0.0 {
        return "unavailable".to_string();
    }
    if price >= 1.0 {
        format!("${price:.4}")
    } else {
        format!("${price:.6}")
    }
}

/// Format a signed percent change, e.g. `+1.25%` / `-0.40%`.
pub fn format_change(change: Option<f64>) -> String {
    match change {
        Some(c) if c.is_finite() => format!("{c:+.2}%"),
        _ => "--".to_string(),
    }
}

/// Format a large quantity (volume, market cap) with a magnitude suffix.
pub fn format_quantity(value: Option<f64>) -> String {
    let Some(v) = value.filter(|v| v.is_finite() && *v > 0.0) else {
        return "--".to_string();
    };
    if v >= 1e12 {
        format!("${:.2}T", v / 1e12)
    } else if v >= 1e9 {
        format!("${:.2}B", v / 1e9)
    } else if v >= 1e6 {
        format!("${:.2}M", v / 1e6)
    } else {
        format!("${v:.0}")
    }
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dollar_prices_get_four_decimals() {
        assert_eq!(format_price(1.0), "$1.0000");
        assert_eq!(format_price(97_000.5), "$97000.5000");
    }

    #[test]
    fn sub_dollar_prices_keep_precision() {
        assert_eq!(format_price(0.004_321), "$0.004321");
    }

    #[test]
    fn unusable_prices_are_flagged_not_zeroed() {
        assert_eq!(format_price(0.0), "unavailable");
        assert_eq!(format_price(-3.0), "unavailable");
        assert_eq!(format_price(f64::NAN), "unavailable");
    }

    #[test]
    fn change_is_signed() {
        assert_eq!(format_change(Some(1.254)), "+1.25%");
        assert_eq!(format_change(Some(-0.4)), "-0.40%");
        assert_eq!(format_change(None), "--");
    }

    #[test]
    fn quantities_pick_a_magnitude_suffix() {
        assert_eq!(format_quantity(Some(1.9e12)), "$1.90T");
        assert_eq!(format_quantity(Some(3.0e11)), "$300.00B");
        assert_eq!(format_quantity(Some(120_000_000.0)), "$120.00M");
        assert_eq!(format_quantity(None), "--");
    }
}
