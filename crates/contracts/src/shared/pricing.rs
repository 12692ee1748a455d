//! Денежная арифметика списков: округление, разбор ввода, связка цена/разница

/// Округление до 2 знаков (деньги и остатки)
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // -0.00 показываем как 0.00
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Разбор пользовательского числа. Запятая считается десятичным разделителем,
/// всё, что не разбирается, превращается в 0.
pub fn parse_amount(raw: &str) -> f64 {
    let normalized = raw.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => round2(v),
        _ => 0.0,
    }
}

/// Цена варианта по базовой себестоимости и разнице
pub fn price_from_delta(base_cost: f64, delta: f64) -> f64 {
    round2(base_cost + delta)
}

/// Разница по цене варианта и базовой себестоимости
pub fn delta_from_price(base_cost: f64, price: f64) -> f64 {
    round2(price - base_cost)
}

/// Посимвольная проверка ввода в числовую ячейку.
///
/// Разрешены: пустая строка, одиночный минус, число с необязательным минусом
/// в начале и не более чем двумя знаками после точки. Запятая заменяется на точку.
/// Недопустимый ввод возвращает `previous`.
pub fn validate_number_input(typed: &str, previous: &str) -> String {
    if typed.is_empty() || typed == "-" {
        return typed.to_string();
    }

    let normalized = typed.replacen(',', ".", 1);
    if is_partial_amount(&normalized) {
        normalized
    } else {
        previous.to_string()
    }
}

fn is_partial_amount(value: &str) -> bool {
    let unsigned = value.strip_prefix('-').unwrap_or(value);
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    if !integer.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    match fraction {
        Some(f) => f.len() <= 2 && f.chars().all(|c| c.is_ascii_digit()),
        None => true,
    }
}

/// Текст ячейки после потери фокуса: всегда 2 знака
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", round2(value))
}

/// Текст ячейки после потери фокуса из сырого ввода
pub fn format_input_on_blur(raw: &str) -> String {
    format_amount(parse_amount(raw))
}

/// Маржа в процентах относительно себестоимости
pub fn profit_margin_pct(cost: f64, sale_price: f64) -> f64 {
    if cost == 0.0 {
        return 0.0;
    }
    round2((sale_price - cost) / cost * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(27.499), 27.5);
        assert_eq!(round2(10.0 / 3.0), 3.33);
        assert_eq!(round2(-0.001), 0.0);
        assert_eq!(round2(0.1 + 0.2), 0.3);
    }

    #[test]
    fn test_linked_price_and_delta() {
        // разница 5.00 -> 7.50 при себестоимости 20.00
        assert_eq!(price_from_delta(20.0, 7.5), 27.5);
        assert_eq!(delta_from_price(20.0, 27.5), 7.5);
        assert_eq!(price_from_delta(20.0, 5.0), 25.0);
    }

    #[test]
    fn test_delta_price_delta_is_stable() {
        let costs = [0.0, 1.1, 12.35, 20.0, 99.99, 1234.56];
        let deltas = [-3.33, -0.01, 0.0, 0.7, 5.0, 7.5, 18.25];
        for &c in &costs {
            for &d in &deltas {
                let price = price_from_delta(c, d);
                let back = delta_from_price(c, price);
                assert!((back - d).abs() < 0.005, "cost {} delta {} -> {}", c, d, back);
            }
        }
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12,5"), 12.5);
        assert_eq!(parse_amount(" 3.456 "), 3.46);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("-"), 0.0);
        assert_eq!(parse_amount("-4"), -4.0);
    }

    #[test]
    fn test_validate_number_input() {
        assert_eq!(validate_number_input("", "1.00"), "");
        assert_eq!(validate_number_input("-", "1.00"), "-");
        assert_eq!(validate_number_input("12,5", "12"), "12.5");
        assert_eq!(validate_number_input("12.55", "12.5"), "12.55");
        assert_eq!(validate_number_input("12.555", "12.55"), "12.55");
        assert_eq!(validate_number_input("1a", "1"), "1");
        assert_eq!(validate_number_input("--1", "-"), "-");
        assert_eq!(validate_number_input(".5", ""), ".5");
        assert_eq!(validate_number_input("1.2.3", "1.2"), "1.2");
    }

    #[test]
    fn test_format_on_blur() {
        assert_eq!(format_input_on_blur("7.5"), "7.50");
        assert_eq!(format_input_on_blur("-"), "0.00");
        assert_eq!(format_input_on_blur("3,1"), "3.10");
    }

    #[test]
    fn test_profit_margin() {
        assert_eq!(profit_margin_pct(0.0, 10.0), 0.0);
        assert_eq!(profit_margin_pct(20.0, 25.0), 25.0);
        assert_eq!(profit_margin_pct(30.0, 20.0), -33.33);
    }
}
