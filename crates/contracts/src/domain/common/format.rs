use crate::shared::loose_json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Формат поставки (например, «Rollo 50 m»)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatEntry {
    #[serde(default, deserialize_with = "loose_json::de_string")]
    pub formato: String,
    #[serde(default, deserialize_with = "loose_json::de_number")]
    pub cantidad: f64,
    #[serde(default, deserialize_with = "loose_json::de_string")]
    pub unidad_medida: String,
}

/// Разбор поля `formato`: массив, одиночный объект или JSON-строка с ними
pub fn parse_formats(raw: &Value) -> Vec<FormatEntry> {
    let Some(value) = loose_json::embedded(raw, "formato") else {
        return Vec::new();
    };
    let items = match value {
        Value::Array(items) => items,
        Value::Object(_) => vec![value],
        _ => return Vec::new(),
    };
    items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<FormatEntry>(item).ok())
        .collect()
}

/// Название первого формата, если оно задано
pub fn first_format(raw: &Value) -> Option<String> {
    parse_formats(raw)
        .into_iter()
        .next()
        .map(|f| f.formato)
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_format_variants() {
        let array = json!([{"formato": "Rollo", "cantidad": 50, "unidad_medida": "m"}, {"formato": "Hoja"}]);
        assert_eq!(first_format(&array), Some("Rollo".to_string()));

        let object = json!({"formato": "Caja", "cantidad": "12"});
        assert_eq!(first_format(&object), Some("Caja".to_string()));

        let encoded = json!("[{\"formato\":\"Bidón\",\"cantidad\":5}]");
        assert_eq!(first_format(&encoded), Some("Bidón".to_string()));

        assert_eq!(first_format(&json!("no es json")), None);
        assert_eq!(first_format(&Value::Null), None);
        assert_eq!(first_format(&json!([{"cantidad": 1}])), None);
    }
}
