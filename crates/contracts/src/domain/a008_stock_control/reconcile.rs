//! Правки строк остатков и сборка записей Control de Stock к сохранению

use super::control_stock::{ControlStock, StockEntry};
use super::rows::{ItemKind, StockRow};
use crate::domain::a002_resource::Resource;
use crate::domain::a003_consumable::Consumable;
use crate::shared::edit_buffer::Patch;
use crate::shared::pricing::{delta_from_price, price_from_delta, round2};
use crate::shared::save_report::SaveReport;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockField {
    Stock,
    PriceDelta,
    VariantPrice,
}

impl StockField {
    pub fn key(&self) -> &'static str {
        match self {
            StockField::Stock => "stock",
            StockField::PriceDelta => "diferenciaPrecio",
            StockField::VariantPrice => "precioVariante",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockField::Stock => "Stock",
            StockField::PriceDelta => "Diferencia de precio",
            StockField::VariantPrice => "Precio variante",
        }
    }

    pub fn value_of(&self, row: &StockRow) -> f64 {
        match self {
            StockField::Stock => row.stock,
            StockField::PriceDelta => row.price_delta,
            StockField::VariantPrice => row.variant_price,
        }
    }
}

/// Несохранённые значения строки остатков
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StockEdit {
    pub stock: Option<f64>,
    pub price_delta: Option<f64>,
    pub variant_price: Option<f64>,
}

impl StockEdit {
    /// Правка одного поля со связанным пересчётом:
    /// разница -> цена = себестоимость + разница, цена -> разница = цена - себестоимость.
    pub fn linked(field: StockField, value: f64, base_cost: f64) -> Self {
        let value = round2(value);
        match field {
            StockField::Stock => StockEdit {
                stock: Some(value),
                ..Self::default()
            },
            StockField::PriceDelta => StockEdit {
                stock: None,
                price_delta: Some(value),
                variant_price: Some(price_from_delta(base_cost, value)),
            },
            StockField::VariantPrice => StockEdit {
                stock: None,
                price_delta: Some(delta_from_price(base_cost, value)),
                variant_price: Some(value),
            },
        }
    }

    pub fn get(&self, field: StockField) -> Option<f64> {
        match field {
            StockField::Stock => self.stock,
            StockField::PriceDelta => self.price_delta,
            StockField::VariantPrice => self.variant_price,
        }
    }

    /// Строка с наложенной правкой (для отображения)
    pub fn apply_to(&self, row: &StockRow) -> StockRow {
        let mut shown = row.clone();
        if let Some(v) = self.stock {
            shown.stock = v;
        }
        if let Some(v) = self.price_delta {
            shown.price_delta = v;
        }
        if let Some(v) = self.variant_price {
            shown.variant_price = v;
        }
        shown
    }
}

impl Patch for StockEdit {
    fn merge(&mut self, other: &Self) {
        if other.stock.is_some() {
            self.stock = other.stock;
        }
        if other.price_delta.is_some() {
            self.price_delta = other.price_delta;
        }
        if other.variant_price.is_some() {
            self.variant_price = other.variant_price;
        }
    }
}

/// Итоговые значения строки к записи.
/// Цена, заданная явно, важнее разницы: по ней пересчитывается разница.
pub fn resolve_entry(row: &StockRow, edit: &StockEdit) -> StockEntry {
    let cost = row.base_cost;
    let mut price_delta = edit.price_delta.unwrap_or(row.price_delta);
    let mut variant_price = edit.variant_price.unwrap_or(row.variant_price);

    if edit.variant_price.is_some() {
        price_delta = delta_from_price(cost, variant_price);
    } else if edit.price_delta.is_some() {
        variant_price = price_from_delta(cost, price_delta);
    }

    StockEntry {
        stock: round2(edit.stock.unwrap_or(row.stock)),
        price_delta: Some(round2(price_delta)),
        variant_price: Some(round2(variant_price)),
    }
}

/// Один PUT на запись ресурса/расходника
#[derive(Debug, Clone, PartialEq)]
pub struct RecordWrite {
    pub kind: ItemKind,
    pub record_id: String,
    pub path: String,
    pub control_stock: ControlStock,
    /// Строки, чьи правки вошли в запись
    pub row_ids: Vec<String>,
}

impl RecordWrite {
    pub fn body(&self) -> Value {
        json!({ "control_stock": self.control_stock.to_value() })
    }
}

/// План сохранения: записи к PUT и строки, которые записать нельзя
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WritePlan {
    pub writes: Vec<RecordWrite>,
    /// Строки, которых нет среди загруженных или чья запись не загружена
    pub skipped: Vec<String>,
}

impl WritePlan {
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty() && self.skipped.is_empty()
    }

    /// Пропущенные строки попадают в отчёт как неудачные, их правки остаются
    pub fn record_skipped(&self, report: &mut SaveReport) {
        for row_id in &self.skipped {
            report.record(format!("fila {}", row_id), Err("fila no cargada".to_string()));
        }
    }
}

/// Группирует правки строк по записям и вливает их в текущий Control de Stock
/// каждой записи.
pub fn build_write_plan(
    rows: &[StockRow],
    changes: &BTreeMap<String, StockEdit>,
    resources: &[Resource],
    consumables: &[Consumable],
) -> WritePlan {
    let rows_by_id: HashMap<&str, &StockRow> = rows.iter().map(|r| (r.id.as_str(), r)).collect();
    let mut plan: BTreeMap<(ItemKind, String), RecordWrite> = BTreeMap::new();
    let mut skipped = Vec::new();

    for (row_id, edit) in changes {
        let Some(row) = rows_by_id.get(row_id.as_str()) else {
            log::warn!("control_stock: строка {} не найдена", row_id);
            skipped.push(row_id.clone());
            continue;
        };

        let group = (row.kind, row.record_id.clone());
        if !plan.contains_key(&group) {
            let current = match row.kind {
                ItemKind::Resource => resources
                    .iter()
                    .find(|r| r.id == row.record_id)
                    .map(|r| r.control_stock()),
                ItemKind::Consumable => consumables
                    .iter()
                    .find(|c| c.id == row.record_id)
                    .map(|c| c.control_stock()),
            };
            let Some(current) = current else {
                log::warn!("control_stock: запись {} не найдена", row.record_id);
                skipped.push(row_id.clone());
                continue;
            };
            plan.insert(
                group.clone(),
                RecordWrite {
                    kind: row.kind,
                    record_id: row.record_id.clone(),
                    path: row.kind.item_path(&row.record_id),
                    control_stock: current,
                    row_ids: Vec::new(),
                },
            );
        }

        if let Some(write) = plan.get_mut(&group) {
            write
                .control_stock
                .upsert(&row.combination, &row.branch, resolve_entry(row, edit));
            write.row_ids.push(row_id.clone());
        }
    }

    WritePlan {
        writes: plan.into_values().collect(),
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a008_stock_control::rows::{default_branches, expand_rows};
    use serde_json::json;

    fn fixtures() -> (Vec<Resource>, Vec<Consumable>) {
        let resources = vec![serde_json::from_value(json!({
            "id": "r1",
            "nombre": "Taza",
            "categoria": "Insumos",
            "coste": 20,
            "variantes": [{"nombre": "Color", "posibilidades": ["red", "blue"]}],
            "control_stock": {
                "Color:red|Sucursal:La Paz": {"stock": 3, "diferenciaPrecio": 5, "precioVariante": 25},
                "Nota": {"stock": 1}
            }
        }))
        .unwrap()];
        let consumables = vec![serde_json::from_value(json!({"id": 8, "nombre": "Cinta", "coste": 2})).unwrap()];
        (resources, consumables)
    }

    #[test]
    fn test_linked_delta_updates_price_and_back() {
        let edit = StockEdit::linked(StockField::PriceDelta, 7.5, 20.0);
        assert_eq!(edit.variant_price, Some(27.5));

        let edit = StockEdit::linked(StockField::VariantPrice, 27.5, 20.0);
        assert_eq!(edit.price_delta, Some(7.5));

        let edit = StockEdit::linked(StockField::Stock, 4.567, 20.0);
        assert_eq!(edit, StockEdit { stock: Some(4.57), price_delta: None, variant_price: None });
    }

    #[test]
    fn test_resolve_prefers_explicit_price() {
        let (resources, consumables) = fixtures();
        let rows = expand_rows(&resources, &consumables, &default_branches());
        let row = &rows[0];
        assert_eq!(row.price_delta, 5.0);

        let entry = resolve_entry(
            row,
            &StockEdit { stock: None, price_delta: Some(1.0), variant_price: Some(30.0) },
        );
        assert_eq!(entry.price_delta, Some(10.0));
        assert_eq!(entry.variant_price, Some(30.0));
        assert_eq!(entry.stock, 3.0);
    }

    #[test]
    fn test_plan_groups_rows_by_record() {
        let (resources, consumables) = fixtures();
        let rows = expand_rows(&resources, &consumables, &default_branches());

        let mut changes = BTreeMap::new();
        changes.insert("r1-0-La Paz".to_string(), StockEdit::linked(StockField::PriceDelta, 7.5, 20.0));
        changes.insert("r1-1-Santa Cruz".to_string(), StockEdit::linked(StockField::Stock, 12.0, 20.0));
        changes.insert("consumible-8-La Paz".to_string(), StockEdit::linked(StockField::Stock, 40.0, 2.0));
        changes.insert("desaparecida".to_string(), StockEdit::default());

        let plan = build_write_plan(&rows, &changes, &resources, &consumables);
        assert_eq!(plan.writes.len(), 2);
        assert_eq!(plan.skipped, vec!["desaparecida".to_string()]);

        let resource_write = &plan.writes[0];
        assert_eq!(resource_write.path, "/api/recursos/r1");
        assert_eq!(resource_write.row_ids.len(), 2);
        assert_eq!(
            resource_write.body(),
            json!({"control_stock": {
                "Color:blue|Sucursal:Santa Cruz": {"stock": 12.0, "diferenciaPrecio": 0.0, "precioVariante": 20.0},
                "Color:red|Sucursal:La Paz": {"stock": 3.0, "diferenciaPrecio": 7.5, "precioVariante": 27.5},
                "Nota": {"stock": 1}
            }})
        );

        let consumable_write = &plan.writes[1];
        assert_eq!(consumable_write.path, "/api/consumibles/8");
        assert_eq!(
            consumable_write.body(),
            json!({"control_stock": {
                "Sucursal:La Paz": {"stock": 40.0, "diferenciaPrecio": 0.0, "precioVariante": 2.0}
            }})
        );
    }

    #[test]
    fn test_rows_missing_after_reload_are_reported_as_failed() {
        let (resources, consumables) = fixtures();
        let rows = expand_rows(&resources, &consumables, &default_branches());

        let mut changes = BTreeMap::new();
        changes.insert("r9-0-La Paz".to_string(), StockEdit::linked(StockField::Stock, 9.0, 0.0));
        let plan = build_write_plan(&[], &changes, &resources, &consumables);
        assert!(plan.writes.is_empty());
        assert!(!plan.is_empty());

        // строка есть, но её запись уже не загружена
        let plan_without_record = build_write_plan(&rows, &changes_for(&rows[0].id), &[], &consumables);
        assert!(plan_without_record.writes.is_empty());
        assert_eq!(plan_without_record.skipped, vec![rows[0].id.clone()]);

        let mut report = SaveReport::new();
        plan.record_skipped(&mut report);
        assert!(!report.is_empty());
        assert!(!report.all_succeeded());
        assert_eq!(report.failed, vec![("fila r9-0-La Paz".to_string(), "fila no cargada".to_string())]);
    }

    fn changes_for(row_id: &str) -> BTreeMap<String, StockEdit> {
        let mut changes = BTreeMap::new();
        changes.insert(row_id.to_string(), StockEdit::linked(StockField::Stock, 1.0, 0.0));
        changes
    }
}
