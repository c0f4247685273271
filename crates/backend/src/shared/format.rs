/// Форматирует число с разделителями тысяч (точками)
///
/// # Примеры
/// ```
/// use backend::shared::format::format_number;
/// assert_eq!(format_number(1234567), "1.234.567");
/// assert_eq!(format_number(42), "42");
/// assert_eq!(format_number(0), "0");
/// ```
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Money amount with dot thousands separators and a comma before two decimals.
///
/// ```
/// use backend::shared::format::format_amount;
/// assert_eq!(format_amount(1234567.891), "1.234.567,89");
/// assert_eq!(format_amount(0.5), "0,50");
/// ```
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "0,00".to_string();
    }
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}{},{:02}",
        sign,
        format_number((cents / 100) as usize),
        cents % 100
    )
}

/// Amount prefixed with a currency symbol, e.g. `AU$ 1.234,50`
pub fn format_currency(value: f64, symbol: &str) -> String {
    if symbol.is_empty() {
        return format_amount(value);
    }
    format!("{} {}", symbol, format_amount(value))
}

/// 12-hour clock label for an hour of day: 0 -> "12 AM", 13 -> "1 PM"
pub fn hour_label(hour: u32) -> String {
    let hour = hour % 24;
    let h12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    let suffix = if hour < 12 { "AM" } else { "PM" };
    format!("{} {}", h12, suffix)
}
