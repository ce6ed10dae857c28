//! Rupee and percentage formatting.
//!
//! These are the only place rounding happens: the engines hand over
//! unrounded values and each renderer formats at the boundary.
//!
//! Non-finite values, which the engine produces for zero CPAs or rates,
//! render as `∞`, `-∞` or `N/A` instead of a number.

const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;
const THOUSAND: f64 = 1_000.0;

/// Rupee amount with Indian digit grouping, rounded to whole rupees.
///
/// The last three digits form one group and every two digits above that form
/// another: `1234567.4` becomes `₹12,34,567`.
pub fn format_indian_number(amount: f64) -> String {
    if let Some(text) = non_finite(amount) {
        return text.to_string();
    }

    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}₹{}", group_indian(&format!("{:.0}", rounded.abs())))
}

/// Compact rupee amount: crores, lakhs, thousands or whole rupees.
///
/// ```rust
/// use funnelmap::formatting::format_currency;
///
/// assert_eq!(format_currency(25_000_000.0), "₹2.50 Cr");
/// assert_eq!(format_currency(150_000.0), "₹1.50 Lakhs");
/// assert_eq!(format_currency(2_500.0), "₹2.5K");
/// assert_eq!(format_currency(999.4), "₹999");
/// ```
pub fn format_currency(amount: f64) -> String {
    if let Some(text) = non_finite(amount) {
        return text.to_string();
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    let value = amount.abs();

    let body = if value >= CRORE {
        format!("{:.2} Cr", value / CRORE)
    } else if value >= LAKH {
        format!("{:.2} Lakhs", value / LAKH)
    } else if value >= THOUSAND {
        format!("{:.1}K", value / THOUSAND)
    } else {
        format!("{:.0}", value.round())
    };

    format!("{sign}₹{body}")
}

/// Fraction as a percentage with a fixed number of decimals.
pub fn format_percent(fraction: f64, decimals: usize) -> String {
    match non_finite(fraction) {
        Some(text) => text.to_string(),
        None => format!("{:.*}%", decimals, fraction * 100.0),
    }
}

/// Whole-number count with Indian digit grouping and no currency sign.
pub fn format_count(count: f64) -> String {
    if let Some(text) = non_finite(count) {
        return text.to_string();
    }

    let rounded = count.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{}", group_indian(&format!("{:.0}", rounded.abs())))
}

fn non_finite(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("N/A")
    } else if value == f64::INFINITY {
        Some("∞")
    } else if value == f64::NEG_INFINITY {
        Some("-∞")
    } else {
        None
    }
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    groups.push(rest);
    groups.reverse();

    format!("{},{}", groups.join(","), last_three)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_indian_number(0.0), "₹0");
        assert_eq!(format_indian_number(999.0), "₹999");
        assert_eq!(format_indian_number(1000.0), "₹1,000");
        assert_eq!(format_indian_number(99999.0), "₹99,999");
        assert_eq!(format_indian_number(100000.0), "₹1,00,000");
        assert_eq!(format_indian_number(1234567.4), "₹12,34,567");
        assert_eq!(format_indian_number(1500000.0), "₹15,00,000");
        assert_eq!(format_indian_number(123456789.0), "₹12,34,56,789");
    }

    #[test]
    fn test_indian_number_rounds_and_keeps_sign() {
        assert_eq!(format_indian_number(2421944.6), "₹24,21,945");
        assert_eq!(format_indian_number(-150000.0), "-₹1,50,000");
    }

    #[test]
    fn test_currency_bands() {
        assert_eq!(format_currency(10_000_000.0), "₹1.00 Cr");
        assert_eq!(format_currency(2_242_800.0), "₹22.43 Lakhs");
        assert_eq!(format_currency(100_000.0), "₹1.00 Lakhs");
        assert_eq!(format_currency(30959.0), "₹31.0K");
        assert_eq!(format_currency(1000.0), "₹1.0K");
        assert_eq!(format_currency(750.0), "₹750");
        assert_eq!(format_currency(-2500.0), "-₹2.5K");
    }

    #[test]
    fn test_non_finite_values() {
        assert_eq!(format_currency(f64::INFINITY), "∞");
        assert_eq!(format_indian_number(f64::NEG_INFINITY), "-∞");
        assert_eq!(format_percent(f64::NAN, 2), "N/A");
        assert_eq!(format_count(f64::INFINITY), "∞");
    }

    #[test]
    fn test_percent() {
        assert_eq!(format_percent(0.0336, 2), "3.36%");
        assert_eq!(format_percent(0.7, 0), "70%");
    }

    #[test]
    fn test_count() {
        assert_eq!(format_count(25.2), "25");
        assert_eq!(format_count(1875.0), "1,875");
        assert_eq!(format_count(750.0), "750");
    }
}
