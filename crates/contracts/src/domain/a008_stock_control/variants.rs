//! Оси вариантов, декартово произведение комбинаций и ключи Control de Stock.
//!
//! Ключ варианта строится из пар `ось:значение`, отсортированных по имени оси
//! и соединённых `|`. Филиал дописывается в конец: `Color:Rojo|Talla:M|Sucursal:La Paz`.

use crate::shared::loose_json;
use crate::shared::text::normalize_text;
use serde_json::Value;
use std::cmp::Ordering;

/// Имя оси филиала внутри ключа
pub const BRANCH_AXIS: &str = "Sucursal";

/// Ключ пустой комбинации без филиала
pub const NO_VARIANTS_KEY: &str = "sin_variantes";

/// Описание пустой комбинации
pub const NO_VARIANTS_LABEL: &str = "Sin variantes";

#[derive(Debug, Clone, PartialEq)]
pub struct VariantAxis {
    pub name: String,
    pub values: Vec<String>,
}

/// Одна конкретная комбинация: пары (ось, значение) в порядке объявления осей
pub type Combination = Vec<(String, String)>;

/// Разбор поля `variantes`: массив осей, объект `{ variantes: [...] }`
/// или JSON-строка с одним из них. Значения берутся из `posibilidades`
/// либо `valores`. Оси без имени или без значений отбрасываются.
pub fn parse_axes(raw: &Value) -> Vec<VariantAxis> {
    let Some(value) = loose_json::embedded(raw, "variantes") else {
        return Vec::new();
    };
    let list = match value {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("variantes") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    list.iter().filter_map(parse_axis).collect()
}

fn parse_axis(raw: &Value) -> Option<VariantAxis> {
    let name = raw.get("nombre").and_then(loose_json::string)?;
    let values_raw = raw
        .get("posibilidades")
        .filter(|v| !v.is_null())
        .or_else(|| raw.get("valores"))?;
    let values: Vec<String> = loose_json::string_list(values_raw);
    if values.is_empty() {
        return None;
    }
    Some(VariantAxis { name, values })
}

/// Декартово произведение значений всех осей.
/// Без осей результат ровно одна пустая комбинация.
pub fn combinations(axes: &[VariantAxis]) -> Vec<Combination> {
    axes.iter().fold(vec![Vec::new()], |acc, axis| {
        acc.iter()
            .flat_map(|prefix| {
                axis.values.iter().map(move |value| {
                    let mut combo = prefix.clone();
                    combo.push((axis.name.clone(), value.clone()));
                    combo
                })
            })
            .collect()
    })
}

/// Отображаемая часть значения: `Blanco:#FFFFFF` -> `Blanco`
pub fn display_value(raw: &str) -> &str {
    match raw.rsplit_once(':') {
        Some((name, code)) if is_hex_color(code) => name,
        _ => raw,
    }
}

fn is_hex_color(code: &str) -> bool {
    code.len() == 7
        && code.starts_with('#')
        && code[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Описание для таблицы: только значения, через запятую
pub fn describe(combo: &[(String, String)]) -> String {
    if combo.is_empty() {
        return NO_VARIANTS_LABEL.to_string();
    }
    combo
        .iter()
        .map(|(_, value)| display_value(value))
        .collect::<Vec<_>>()
        .join(", ")
}

fn axis_order(a: &str, b: &str) -> Ordering {
    normalize_text(a)
        .cmp(&normalize_text(b))
        .then_with(|| a.cmp(b))
}

fn join_sorted<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut pairs: Vec<(&str, &str)> = pairs.into_iter().collect();
    pairs.sort_by(|(a, _), (b, _)| axis_order(a, b));
    pairs
        .into_iter()
        .map(|(name, value)| format!("{}:{}", name, display_value(value)))
        .collect::<Vec<_>>()
        .join("|")
}

/// Ключ комбинации без филиала; не зависит от порядка осей
pub fn variant_key(combo: &[(String, String)]) -> String {
    if combo.is_empty() {
        return NO_VARIANTS_KEY.to_string();
    }
    join_sorted(combo.iter().map(|(n, v)| (n.as_str(), v.as_str())))
}

/// Ключ строки Control de Stock: ключ комбинации и филиал в конце
pub fn stock_key(combo: &[(String, String)], branch: &str) -> String {
    if combo.is_empty() {
        return format!("{}:{}", BRANCH_AXIS, branch);
    }
    format!("{}|{}:{}", variant_key(combo), BRANCH_AXIS, branch)
}

/// Ключ старого формата: `Sucursal` сортируется вместе с осями
pub fn legacy_stock_key(combo: &[(String, String)], branch: &str) -> String {
    join_sorted(
        combo
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
            .chain(std::iter::once((BRANCH_AXIS, branch))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn axis(name: &str, values: &[&str]) -> VariantAxis {
        VariantAxis {
            name: name.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    fn pair(n: &str, v: &str) -> (String, String) {
        (n.to_string(), v.to_string())
    }

    #[test]
    fn test_combination_count_is_product_of_axes() {
        let axes = vec![axis("Color", &["red", "blue"]), axis("Size", &["S", "M"])];
        assert_eq!(combinations(&axes).len(), 4);

        let axes = vec![
            axis("Color", &["a", "b", "c"]),
            axis("Size", &["S", "M"]),
            axis("Grosor", &["11oz"]),
        ];
        assert_eq!(combinations(&axes).len(), 6);
    }

    #[test]
    fn test_no_axes_yields_single_empty_combination() {
        let combos = combinations(&[]);
        assert_eq!(combos, vec![Vec::<(String, String)>::new()]);
        assert_eq!(describe(&combos[0]), "Sin variantes");
        assert_eq!(variant_key(&combos[0]), "sin_variantes");
    }

    #[test]
    fn test_combinations_keep_axis_order() {
        let axes = vec![axis("Color", &["red", "blue"]), axis("Size", &["S", "M"])];
        let combos = combinations(&axes);
        assert_eq!(combos[0], vec![pair("Color", "red"), pair("Size", "S")]);
        assert_eq!(combos[3], vec![pair("Color", "blue"), pair("Size", "M")]);
        assert_eq!(describe(&combos[1]), "red, M");
    }

    #[test]
    fn test_key_is_order_independent() {
        let a = vec![pair("Color", "red"), pair("Size", "M")];
        let b = vec![pair("Size", "M"), pair("Color", "red")];
        assert_eq!(variant_key(&a), variant_key(&b));
        assert_eq!(variant_key(&a), "Color:red|Size:M");
    }

    #[test]
    fn test_stock_key_appends_branch() {
        let combo = vec![pair("Talla", "M"), pair("Color", "Blanco:#FFFFFF")];
        assert_eq!(stock_key(&combo, "La Paz"), "Color:Blanco|Talla:M|Sucursal:La Paz");
        assert_eq!(stock_key(&[], "Santa Cruz"), "Sucursal:Santa Cruz");
    }

    #[test]
    fn test_legacy_key_sorts_branch_in() {
        let combo = vec![pair("Talla", "M"), pair("Color", "Rojo")];
        assert_eq!(legacy_stock_key(&combo, "La Paz"), "Color:Rojo|Sucursal:La Paz|Talla:M");
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value("Blanco:#FFFFFF"), "Blanco");
        assert_eq!(display_value("Azul:#00f"), "Azul:#00f");
        assert_eq!(display_value("11oz"), "11oz");
    }

    #[test]
    fn test_parse_axes_forms() {
        let array = json!([
            {"nombre": "Color", "posibilidades": ["Rojo", "Azul"]},
            {"nombre": "Talla", "valores": ["S", "M", "L"]},
            {"nombre": "Vacía", "posibilidades": []},
            {"posibilidades": ["sin nombre"]}
        ]);
        let axes = parse_axes(&array);
        assert_eq!(axes.len(), 2);
        assert_eq!(axes[1].values.len(), 3);

        let wrapped = json!({"variantes": [{"nombre": "Color", "posibilidades": ["Rojo"]}], "datosVariantes": {}});
        assert_eq!(parse_axes(&wrapped).len(), 1);

        let encoded = json!("[{\"nombre\":\"Grosor\",\"posibilidades\":[\"11oz\",\"15oz\"]}]");
        assert_eq!(parse_axes(&encoded)[0].values, vec!["11oz", "15oz"]);

        assert!(parse_axes(&json!("roto[")).is_empty());
        assert!(parse_axes(&Value::Null).is_empty());
    }
}
