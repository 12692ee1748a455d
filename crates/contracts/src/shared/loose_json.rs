//! Разбор нестрого типизированного JSON из REST API.
//!
//! Часть полей приходит то числом, то строкой, а вложенные структуры
//! (варианты, Control de Stock, форматы) бывают сериализованы в JSON-строку.
//! Ошибки разбора здесь не поднимаются: значение деградирует до пустого,
//! а причина пишется в лог.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Число из числа или числовой строки
pub fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

/// Непустая строка; числа приводятся к строке
pub fn string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Раскрывает значение, которое могло быть сохранено как JSON-строка.
/// `null`, пустая строка и битый JSON дают `None`.
pub fn embedded(value: &Value, context: &str) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                log::warn!("{}: не удалось разобрать JSON-строку: {}", context, e);
                None
            }
        },
        other => Some(other.clone()),
    }
}

/// Список строк из строки, массива строк или JSON-строки с массивом
pub fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(string).collect(),
        Value::String(s) if s.trim_start().starts_with('[') => {
            embedded(value, "string_list")
                .map(|v| string_list(&v))
                .unwrap_or_default()
        }
        other => string(other).into_iter().collect(),
    }
}

/// serde: число или числовая строка, иначе 0
pub fn de_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number(&value).unwrap_or(0.0))
}

/// serde: необязательное число или числовая строка
pub fn de_opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number(&value))
}

/// serde: идентификатор записи, числовой или строковый
pub fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(string(&value).unwrap_or_default())
}

/// serde: строка, `null` превращается в пустую
pub fn de_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(string(&value).unwrap_or_default())
}

/// serde: булево из bool, числа 0/1 или строки "true"/"false"
pub fn de_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "1" | "si" | "sí"),
        _ => false,
    })
}

/// serde: список строк в любом из форм `string_list`
pub fn de_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(string_list(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number() {
        assert_eq!(number(&json!(12.5)), Some(12.5));
        assert_eq!(number(&json!("7,25")), Some(7.25));
        assert_eq!(number(&json!("n/a")), None);
        assert_eq!(number(&Value::Null), None);
    }

    #[test]
    fn test_embedded() {
        assert_eq!(embedded(&json!("{\"a\":1}"), "t"), Some(json!({"a": 1})));
        assert_eq!(embedded(&json!([1, 2]), "t"), Some(json!([1, 2])));
        assert_eq!(embedded(&json!("{broken"), "t"), None);
        assert_eq!(embedded(&json!(""), "t"), None);
    }

    #[test]
    fn test_string_list() {
        assert_eq!(string_list(&json!("La Paz")), vec!["La Paz"]);
        assert_eq!(string_list(&json!(["La Paz", "Santa Cruz"])), vec!["La Paz", "Santa Cruz"]);
        assert_eq!(string_list(&json!("[\"El Alto\"]")), vec!["El Alto"]);
        assert!(string_list(&json!("   ")).is_empty());
        assert!(string_list(&Value::Null).is_empty());
    }
}
