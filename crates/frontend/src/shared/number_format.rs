//! Форматирование чисел для таблиц

/// Format with thousands separators (`,`) and a fixed number of decimals.
///
/// ```
/// # use frontend::shared::number_format::format_number_with_decimals;
/// assert_eq!(format_number_with_decimals(1234.567, 2), "1,234.57");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);

    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (integer_part, decimal_part) = match unsigned.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer_part.len() + integer_part.len() / 3);
    for (i, c) in integer_part.chars().enumerate() {
        if i > 0 && (integer_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match decimal_part {
        Some(d) => format!("{}{}.{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Денежное значение: 2 знака и код валюты, "1,234.50 USD"
pub fn format_money(value: f64, currency: &str) -> String {
    let amount = format_number_with_decimals(value, 2);
    if currency.is_empty() {
        amount
    } else {
        format!("{} {}", amount, currency)
    }
}

/// Quantities keep up to 8 decimals (crypto) without trailing zeros
pub fn format_quantity(value: f64) -> String {
    let formatted = format_number_with_decimals(value, 8);
    if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1,235");
        assert_eq!(format_number_with_decimals(1234.567, 1), "1,234.6");
        assert_eq!(format_number_with_decimals(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number_with_decimals(999.0, 2), "999.00");
        assert_eq!(format_number_with_decimals(-1234.5, 2), "-1,234.50");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.5, "USD"), "1,234.50 USD");
        assert_eq!(format_money(0.0, ""), "0.00");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(10.0), "10");
        assert_eq!(format_quantity(0.00125), "0.00125");
        assert_eq!(format_quantity(1500.5), "1,500.5");
    }
}
