//! Форматирование чисел для таблиц в локали es-BO:
//! разделитель тысяч точка, дробная часть через запятую

/// Число с разделителем тысяч и `decimals` знаками после запятой
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let fixed = format!("{:.*}", decimals, value.abs());
    let (integer_part, decimal_part) = match fixed.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (fixed.as_str(), None),
    };

    let digits: Vec<char> = integer_part.chars().collect();
    let mut grouped = String::new();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*c);
    }

    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    match decimal_part {
        Some(d) => format!("{}{},{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Деньги: всегда два знака
pub fn format_money(value: f64) -> String {
    format_number_with_decimals(value, 2)
}

pub fn format_number_int(value: f64) -> String {
    format_number_with_decimals(value, 0)
}

/// Процент с одним знаком: "12,5 %"
pub fn format_percent(value: f64) -> String {
    format!("{} %", format_number_with_decimals(value, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.56), "1.234,56");
        assert_eq!(format_money(1234567.891), "1.234.567,89");
        assert_eq!(format_money(0.0), "0,00");
        assert_eq!(format_money(-1234.5), "-1.234,50");
        assert_eq!(format_money(-0.001), "0,00");
        assert_eq!(format_money(f64::NAN), "0,00");
    }

    #[test]
    fn test_format_int_and_percent() {
        assert_eq!(format_number_int(1234567.0), "1.234.567");
        assert_eq!(format_number_int(999.0), "999");
        assert_eq!(format_number_int(-1000.0), "-1.000");
        assert_eq!(format_percent(12.34), "12,3 %");
    }
}
