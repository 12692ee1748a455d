//! Строки страницы контроля остатков: ресурс x комбинация x филиал

use super::control_stock::ControlStock;
use super::variants::{combinations, describe, Combination, NO_VARIANTS_LABEL};
use crate::domain::a002_resource::Resource;
use crate::domain::a003_consumable::Consumable;
use crate::shared::filters::{is_all, FilterChip, SessionFilters};
use crate::shared::text::any_field_matches;
use serde::{Deserialize, Serialize};

/// Филиалы, если у записи они не указаны
pub const DEFAULT_BRANCHES: &[&str] = &["La Paz", "Santa Cruz"];

pub const CATEGORY_SUPPLIES: &str = "Insumos";
pub const CATEGORY_CONSUMABLES: &str = "Consumibles";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ItemKind {
    Resource,
    Consumable,
}

impl ItemKind {
    /// Путь записи для PUT
    pub fn item_path(&self, record_id: &str) -> String {
        match self {
            ItemKind::Resource => format!("/api/recursos/{}", record_id),
            ItemKind::Consumable => format!("/api/consumibles/{}", record_id),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Resource => "recurso",
            ItemKind::Consumable => "consumible",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StockRow {
    pub id: String,
    pub record_id: String,
    pub kind: ItemKind,
    pub code: String,
    pub name: String,
    pub branch: String,
    pub variant_label: String,
    pub format: Option<String>,
    pub unit: String,
    pub base_cost: f64,
    pub price_delta: f64,
    pub variant_price: f64,
    pub stock: f64,
    /// Комбинация без филиала; ключ строится вместе с `branch`
    pub combination: Combination,
}

fn branches_or_default(explicit: Vec<String>, defaults: &[String]) -> Vec<String> {
    if explicit.is_empty() {
        defaults.to_vec()
    } else {
        explicit
    }
}

/// Строки ресурса: только категория «Insumos»
pub fn resource_rows(resource: &Resource, default_branches: &[String]) -> Vec<StockRow> {
    if !resource.is_supply() {
        return Vec::new();
    }
    let branches = branches_or_default(resource.branches(), default_branches);
    let control_stock = resource.control_stock();
    let format = resource.first_format();

    let mut rows = Vec::new();
    for (index, combo) in combinations(&resource.variant_axes()).into_iter().enumerate() {
        let label = describe(&combo);
        for branch in &branches {
            let found = control_stock.lookup(&combo, branch, resource.coste);
            rows.push(StockRow {
                id: format!("{}-{}-{}", resource.id, index, branch),
                record_id: resource.id.clone(),
                kind: ItemKind::Resource,
                code: resource.codigo.clone(),
                name: resource.nombre.clone(),
                branch: branch.clone(),
                variant_label: label.clone(),
                format: format.clone(),
                unit: resource.unidad_medida.clone(),
                base_cost: resource.coste,
                price_delta: found.price_delta,
                variant_price: found.variant_price,
                stock: found.stock,
                combination: combo.clone(),
            });
        }
    }
    rows
}

/// Строки расходника: без вариантов, по строке на филиал
pub fn consumable_rows(consumable: &Consumable, default_branches: &[String]) -> Vec<StockRow> {
    let branches = branches_or_default(consumable.branches(), default_branches);
    let control_stock: ControlStock = consumable.control_stock();
    let format = consumable.first_format();

    branches
        .into_iter()
        .map(|branch| {
            let found = control_stock.lookup(&[], &branch, consumable.coste);
            StockRow {
                id: format!("consumible-{}-{}", consumable.id, branch),
                record_id: consumable.id.clone(),
                kind: ItemKind::Consumable,
                code: consumable.codigo.clone(),
                name: consumable.nombre.clone(),
                variant_label: NO_VARIANTS_LABEL.to_string(),
                format: format.clone(),
                unit: consumable.unidad_medida.clone(),
                base_cost: consumable.coste,
                price_delta: found.price_delta,
                variant_price: found.variant_price,
                stock: found.stock,
                combination: Vec::new(),
                branch,
            }
        })
        .collect()
}

/// Все строки страницы: сначала ресурсы, затем расходники
pub fn expand_rows(
    resources: &[Resource],
    consumables: &[Consumable],
    default_branches: &[String],
) -> Vec<StockRow> {
    resources
        .iter()
        .flat_map(|r| resource_rows(r, default_branches))
        .chain(consumables.iter().flat_map(|c| consumable_rows(c, default_branches)))
        .collect()
}

pub fn default_branches() -> Vec<String> {
    DEFAULT_BRANCHES.iter().map(|b| b.to_string()).collect()
}

// ============================================================================
// Filters
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockControlFilters {
    #[serde(rename = "searchTerm", default)]
    pub search_term: String,
    #[serde(rename = "selectedSucursal", default = "all")]
    pub selected_branch: String,
    #[serde(rename = "selectedCategoria", default = "all")]
    pub selected_category: String,
}

fn all() -> String {
    crate::shared::filters::ALL.to_string()
}

impl Default for StockControlFilters {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            selected_branch: all(),
            selected_category: all(),
        }
    }
}

impl StockControlFilters {
    pub fn matches(&self, row: &StockRow) -> bool {
        let search_ok = any_field_matches(
            [row.name.as_str(), row.variant_label.as_str()],
            &self.search_term,
        );
        let branch_ok = is_all(&self.selected_branch) || row.branch == self.selected_branch;
        let category_ok = match self.selected_category.as_str() {
            CATEGORY_SUPPLIES => row.kind != ItemKind::Consumable,
            CATEGORY_CONSUMABLES => row.kind == ItemKind::Consumable,
            _ => true,
        };
        search_ok && branch_ok && category_ok
    }

    pub fn apply<'a>(&self, rows: &'a [StockRow]) -> Vec<&'a StockRow> {
        rows.iter().filter(|row| self.matches(row)).collect()
    }
}

impl SessionFilters for StockControlFilters {
    const STORAGE_KEY: &'static str = "control_stock_filtros";

    fn chips(&self) -> Vec<FilterChip> {
        let mut chips = Vec::new();
        if !self.search_term.trim().is_empty() {
            chips.push(FilterChip::new("busqueda", format!("Búsqueda: {}", self.search_term.trim())));
        }
        if !is_all(&self.selected_branch) {
            chips.push(FilterChip::new("sucursal", format!("Sucursal: {}", self.selected_branch)));
        }
        if !is_all(&self.selected_category) {
            chips.push(FilterChip::new("categoria", format!("Categoría: {}", self.selected_category)));
        }
        chips
    }

    fn remove(&mut self, chip_id: &str) {
        match chip_id {
            "busqueda" => self.search_term.clear(),
            "sucursal" => self.selected_branch = all(),
            "categoria" => self.selected_category = all(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resource(value: serde_json::Value) -> Resource {
        serde_json::from_value(value).unwrap()
    }

    fn shirt() -> Resource {
        resource(json!({
            "id": "r1",
            "codigo": "INS-1",
            "nombre": "Camiseta",
            "categoria": "Insumos",
            "coste": 20,
            "variantes": [
                {"nombre": "Color", "posibilidades": ["red", "blue"]},
                {"nombre": "Size", "posibilidades": ["S", "M"]}
            ],
            "control_stock": {
                "Color:blue|Size:M|Sucursal:Santa Cruz": {"stock": 7, "diferenciaPrecio": 5}
            }
        }))
    }

    #[test]
    fn test_two_axes_two_branches_make_eight_rows() {
        let rows = resource_rows(&shirt(), &default_branches());
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].id, "r1-0-La Paz");
        assert_eq!(rows[1].id, "r1-0-Santa Cruz");
        assert_eq!(rows[7].id, "r1-3-Santa Cruz");
        assert_eq!(rows[7].variant_label, "blue, M");
    }

    #[test]
    fn test_rows_read_control_stock() {
        let rows = resource_rows(&shirt(), &default_branches());
        let hit = &rows[7];
        assert_eq!(hit.stock, 7.0);
        assert_eq!(hit.price_delta, 5.0);
        assert_eq!(hit.variant_price, 25.0);

        let miss = &rows[0];
        assert_eq!(miss.stock, 0.0);
        assert_eq!(miss.variant_price, 20.0);
    }

    #[test]
    fn test_non_supply_resources_are_skipped() {
        let labor = resource(json!({"id": "m1", "categoria": "Mano de Obra"}));
        assert!(resource_rows(&labor, &default_branches()).is_empty());
    }

    #[test]
    fn test_explicit_branch_and_no_variants() {
        let item = resource(json!({"id": "r2", "categoria": "Insumos", "sucursal": "El Alto", "coste": 3}));
        let rows = resource_rows(&item, &default_branches());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "r2-0-El Alto");
        assert_eq!(rows[0].variant_label, "Sin variantes");
    }

    #[test]
    fn test_consumable_rows() {
        let item: Consumable = serde_json::from_value(json!({
            "id": 9, "nombre": "Cinta", "coste": 2.5,
            "control_stock": {"Sucursal:La Paz": {"stock": 11}}
        }))
        .unwrap();
        let rows = consumable_rows(&item, &default_branches());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "consumible-9-La Paz");
        assert_eq!(rows[0].stock, 11.0);
        assert_eq!(rows[1].stock, 0.0);
        assert_eq!(rows[1].variant_label, "Sin variantes");
    }

    #[test]
    fn test_filters() {
        let consumable: Consumable =
            serde_json::from_value(json!({"id": 1, "nombre": "Cinta azul"})).unwrap();
        let rows = expand_rows(&[shirt()], &[consumable], &default_branches());
        assert_eq!(rows.len(), 10);

        let mut filters = StockControlFilters::default();
        assert_eq!(filters.apply(&rows).len(), 10);

        filters.selected_category = CATEGORY_CONSUMABLES.to_string();
        assert_eq!(filters.apply(&rows).len(), 2);

        filters.selected_category = CATEGORY_SUPPLIES.to_string();
        filters.selected_branch = "La Paz".to_string();
        assert_eq!(filters.apply(&rows).len(), 4);

        filters.search_term = "BLUE".to_string();
        assert_eq!(filters.apply(&rows).len(), 2);

        filters.remove("categoria");
        filters.search_term = "azul".to_string();
        assert_eq!(filters.apply(&rows).len(), 1);
    }

    #[test]
    fn test_filters_storage_shape() {
        let filters: StockControlFilters =
            serde_json::from_value(json!({"searchTerm": "lona"})).unwrap();
        assert_eq!(filters.selected_branch, "all");
        assert_eq!(filters.active_count(), 1);
    }
}
