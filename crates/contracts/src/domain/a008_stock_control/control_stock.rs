//! Control de Stock: денормализованная карта «ключ варианта+филиала -> остаток и цена»

use super::variants::{legacy_stock_key, stock_key};
use crate::shared::loose_json;
use crate::shared::pricing::round2;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockEntry {
    #[serde(default)]
    pub stock: f64,
    #[serde(rename = "diferenciaPrecio", default, skip_serializing_if = "Option::is_none")]
    pub price_delta: Option<f64>,
    #[serde(rename = "precioVariante", default, skip_serializing_if = "Option::is_none")]
    pub variant_price: Option<f64>,
}

/// Значения строки, прочитанные из карты
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockLookup {
    pub stock: f64,
    pub price_delta: f64,
    pub variant_price: f64,
}

/// Карта хранится как есть: записи, которые не правились, уходят обратно
/// без изменений, вместе с полями, которые панель не знает.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlStock {
    entries: Map<String, Value>,
}

impl ControlStock {
    /// Разбор из JSON-объекта или JSON-строки. Битые данные дают пустую карту.
    pub fn from_value(raw: &Value) -> Self {
        match loose_json::embedded(raw, "control_stock") {
            Some(Value::Object(entries)) => Self { entries },
            Some(other) => {
                log::warn!("control_stock: ожидался объект, получено {}", other);
                Self::default()
            }
            None => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Типизированное чтение записи; не-объект даёт `None`
    pub fn get(&self, key: &str) -> Option<StockEntry> {
        self.entries.get(key).and_then(parse_entry)
    }

    /// Запись по комбинации и филиалу: сначала основной ключ, затем старый формат
    pub fn find(&self, combo: &[(String, String)], branch: &str) -> Option<(String, StockEntry)> {
        let primary = stock_key(combo, branch);
        if let Some(entry) = self.get(&primary) {
            return Some((primary, entry));
        }
        let legacy = legacy_stock_key(combo, branch);
        self.get(&legacy).map(|entry| (legacy, entry))
    }

    /// Остаток, разница и цена варианта.
    /// Нет записи: остаток 0, разница 0, цена равна базовой себестоимости.
    /// Нулевая цена тоже заменяется себестоимостью.
    pub fn lookup(&self, combo: &[(String, String)], branch: &str, base_cost: f64) -> StockLookup {
        match self.find(combo, branch) {
            Some((_, entry)) => {
                let price_delta = round2(entry.price_delta.unwrap_or(0.0));
                let variant_price = match entry.variant_price {
                    Some(price) => round2(price),
                    None => round2(base_cost + price_delta),
                };
                StockLookup {
                    stock: entry.stock,
                    price_delta,
                    variant_price: if variant_price == 0.0 { base_cost } else { variant_price },
                }
            }
            None => StockLookup {
                stock: 0.0,
                price_delta: 0.0,
                variant_price: base_cost,
            },
        }
    }

    /// Пишет три поля под основным ключом. Остальные поля записи сохраняются;
    /// запись старого формата для той же комбинации переносится под новый ключ.
    pub fn upsert(&mut self, combo: &[(String, String)], branch: &str, entry: StockEntry) {
        let primary = stock_key(combo, branch);
        let legacy = legacy_stock_key(combo, branch);

        let previous = match self.entries.remove(&primary) {
            Some(existing) => Some(existing),
            None if legacy != primary => self.entries.remove(&legacy),
            None => None,
        };
        if legacy != primary {
            self.entries.remove(&legacy);
        }

        let mut object = match previous {
            Some(Value::Object(object)) => object,
            _ => Map::new(),
        };
        if let Ok(Value::Object(fields)) = serde_json::to_value(&entry) {
            object.extend(fields);
        }
        self.entries.insert(primary, Value::Object(object));
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.entries.clone())
    }
}

fn parse_entry(raw: &Value) -> Option<StockEntry> {
    let object = raw.as_object()?;
    Some(StockEntry {
        stock: object.get("stock").and_then(loose_json::number).unwrap_or(0.0),
        price_delta: object.get("diferenciaPrecio").and_then(loose_json::number),
        variant_price: object.get("precioVariante").and_then(loose_json::number),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn combo(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_lookup_missing_key_defaults_to_cost() {
        let cs = ControlStock::from_value(&Value::Null);
        let found = cs.lookup(&combo(&[("Color", "Rojo")]), "La Paz", 20.0);
        assert_eq!(
            found,
            StockLookup {
                stock: 0.0,
                price_delta: 0.0,
                variant_price: 20.0
            }
        );
    }

    #[test]
    fn test_lookup_stored_price_wins() {
        let cs = ControlStock::from_value(&json!({
            "Color:Rojo|Sucursal:La Paz": {"stock": 12, "diferenciaPrecio": 5, "precioVariante": 26.004}
        }));
        let found = cs.lookup(&combo(&[("Color", "Rojo")]), "La Paz", 20.0);
        assert_eq!(found.stock, 12.0);
        assert_eq!(found.price_delta, 5.0);
        assert_eq!(found.variant_price, 26.0);
    }

    #[test]
    fn test_lookup_price_from_delta_when_not_stored() {
        let cs = ControlStock::from_value(&json!("{\"Sucursal:Santa Cruz\":{\"stock\":\"3\",\"diferenciaPrecio\":7.5}}"));
        let found = cs.lookup(&[], "Santa Cruz", 20.0);
        assert_eq!(found.stock, 3.0);
        assert_eq!(found.variant_price, 27.5);
    }

    #[test]
    fn test_lookup_falls_back_to_legacy_key() {
        let cs = ControlStock::from_value(&json!({
            "Color:Rojo|Sucursal:La Paz|Talla:M": {"stock": 4}
        }));
        let c = combo(&[("Talla", "M"), ("Color", "Rojo")]);
        assert_eq!(cs.lookup(&c, "La Paz", 1.0).stock, 4.0);
    }

    #[test]
    fn test_upsert_replaces_legacy_entry() {
        let mut cs = ControlStock::from_value(&json!({
            "Color:Rojo|Sucursal:La Paz|Talla:M": {"stock": 4},
            "Otro": {"stock": 1}
        }));
        let c = combo(&[("Talla", "M"), ("Color", "Rojo")]);
        cs.upsert(
            &c,
            "La Paz",
            StockEntry {
                stock: 9.0,
                price_delta: Some(1.0),
                variant_price: Some(2.0),
            },
        );
        assert_eq!(cs.len(), 2);
        assert_eq!(
            cs.to_value(),
            json!({
                "Color:Rojo|Talla:M|Sucursal:La Paz": {"stock": 9.0, "diferenciaPrecio": 1.0, "precioVariante": 2.0},
                "Otro": {"stock": 1}
            })
        );
    }

    #[test]
    fn test_upsert_keeps_untouched_entries_verbatim() {
        let raw = json!({
            "Sucursal:La Paz": {"stock": 4, "precio_unitario": 12.5, "precio": "13"},
            "Sucursal:Santa Cruz": {"stock": 2, "lote": "A-7"},
            "nota": "revisado"
        });
        let mut cs = ControlStock::from_value(&raw);
        cs.upsert(
            &[],
            "Santa Cruz",
            StockEntry {
                stock: 6.0,
                price_delta: Some(0.0),
                variant_price: Some(20.0),
            },
        );
        let out = cs.to_value();
        assert_eq!(out["Sucursal:La Paz"], raw["Sucursal:La Paz"]);
        assert_eq!(out["nota"], json!("revisado"));
        assert_eq!(
            out["Sucursal:Santa Cruz"],
            json!({"stock": 6.0, "diferenciaPrecio": 0.0, "precioVariante": 20.0, "lote": "A-7"})
        );
    }

    #[test]
    fn test_zero_stored_price_falls_back_to_cost() {
        let cs = ControlStock::from_value(&json!({
            "Sucursal:La Paz": {"stock": 1, "precioVariante": 0}
        }));
        assert_eq!(cs.lookup(&[], "La Paz", 18.5).variant_price, 18.5);
    }

    #[test]
    fn test_non_object_entry_is_not_read_as_zero_stock() {
        let cs = ControlStock::from_value(&json!({"Sucursal:La Paz": 7}));
        assert_eq!(cs.get("Sucursal:La Paz"), None);
        assert_eq!(cs.to_value(), json!({"Sucursal:La Paz": 7}));
    }

    #[test]
    fn test_malformed_control_stock_is_empty() {
        assert!(ControlStock::from_value(&json!("{roto")).is_empty());
        assert!(ControlStock::from_value(&json!([1, 2])).is_empty());
    }
}
