use crate::domain::a008_stock_control::control_stock::ControlStock;
use crate::domain::common::{first_format, ApiRecord};
use crate::shared::edit_buffer::Patch;
use crate::shared::filters::{is_all, FilterChip, SessionFilters};
use crate::shared::loose_json;
use crate::shared::pricing::parse_amount;
use crate::shared::text::{any_field_matches, clean_text_value};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Расходный материал (consumible). Вариантов нет, остаток ведётся по филиалам.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consumable {
    #[serde(deserialize_with = "loose_json::de_id")]
    pub id: String,

    #[serde(default, deserialize_with = "loose_json::de_string")]
    pub codigo: String,

    #[serde(default, deserialize_with = "loose_json::de_string")]
    pub nombre: String,

    #[serde(default, deserialize_with = "loose_json::de_string")]
    pub categoria: String,

    #[serde(default)]
    pub formato: Value,

    #[serde(default, deserialize_with = "loose_json::de_string")]
    pub responsable: String,

    #[serde(default, deserialize_with = "loose_json::de_string")]
    pub unidad_medida: String,

    #[serde(default, deserialize_with = "loose_json::de_number")]
    pub coste: f64,

    /// Общий остаток без разбивки по филиалам
    #[serde(default, deserialize_with = "loose_json::de_number")]
    pub stock: f64,

    #[serde(default)]
    pub control_stock: Value,

    #[serde(default)]
    pub sucursal: Value,
}

impl Consumable {
    pub fn control_stock(&self) -> ControlStock {
        ControlStock::from_value(&self.control_stock)
    }

    pub fn first_format(&self) -> Option<String> {
        first_format(&self.formato)
    }

    pub fn branches(&self) -> Vec<String> {
        loose_json::string_list(&self.sucursal)
    }

    pub fn with_patch(&self, patch: &ConsumablePatch) -> Consumable {
        let mut item = self.clone();
        if let Some(v) = &patch.nombre {
            item.nombre = v.clone();
        }
        if let Some(v) = &patch.categoria {
            item.categoria = v.clone();
        }
        if let Some(v) = &patch.unidad_medida {
            item.unidad_medida = v.clone();
        }
        if let Some(v) = &patch.responsable {
            item.responsable = v.clone();
        }
        if let Some(v) = patch.coste {
            item.coste = v;
        }
        if let Some(v) = patch.stock {
            item.stock = v;
        }
        item
    }

    pub fn matches(&self, filters: &ConsumableFilters) -> bool {
        any_field_matches(
            [self.codigo.as_str(), self.nombre.as_str(), self.categoria.as_str()],
            &filters.search_term,
        ) && (is_all(&filters.selected_category) || self.categoria == filters.selected_category)
    }
}

impl ApiRecord for Consumable {
    fn id(&self) -> &str {
        &self.id
    }

    fn code(&self) -> &str {
        &self.codigo
    }

    fn description(&self) -> &str {
        &self.nombre
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "consumibles"
    }

    fn element_name() -> &'static str {
        "Consumible"
    }

    fn list_name() -> &'static str {
        "Consumibles"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumableField {
    Nombre,
    Categoria,
    UnidadMedida,
    Responsable,
    Coste,
    Stock,
}

impl ConsumableField {
    pub fn key(&self) -> &'static str {
        match self {
            ConsumableField::Nombre => "nombre",
            ConsumableField::Categoria => "categoria",
            ConsumableField::UnidadMedida => "unidad_medida",
            ConsumableField::Responsable => "responsable",
            ConsumableField::Coste => "coste",
            ConsumableField::Stock => "stock",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConsumableField::Nombre => "Nombre",
            ConsumableField::Categoria => "Categoría",
            ConsumableField::UnidadMedida => "Unidad",
            ConsumableField::Responsable => "Responsable",
            ConsumableField::Coste => "Coste",
            ConsumableField::Stock => "Stock",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConsumablePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unidad_medida: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coste: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<f64>,
}

impl ConsumablePatch {
    pub fn from_field(field: ConsumableField, raw: &str) -> Self {
        let mut patch = Self::default();
        match field {
            ConsumableField::Nombre => patch.nombre = Some(clean_text_value(raw)),
            ConsumableField::Categoria => patch.categoria = Some(clean_text_value(raw)),
            ConsumableField::UnidadMedida => patch.unidad_medida = Some(clean_text_value(raw)),
            ConsumableField::Responsable => patch.responsable = Some(clean_text_value(raw)),
            ConsumableField::Coste => patch.coste = Some(parse_amount(raw)),
            ConsumableField::Stock => patch.stock = Some(parse_amount(raw)),
        }
        patch
    }
}

impl Patch for ConsumablePatch {
    fn merge(&mut self, other: &Self) {
        if other.nombre.is_some() {
            self.nombre = other.nombre.clone();
        }
        if other.categoria.is_some() {
            self.categoria = other.categoria.clone();
        }
        if other.unidad_medida.is_some() {
            self.unidad_medida = other.unidad_medida.clone();
        }
        if other.responsable.is_some() {
            self.responsable = other.responsable.clone();
        }
        if other.coste.is_some() {
            self.coste = other.coste;
        }
        if other.stock.is_some() {
            self.stock = other.stock;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsumableFilters {
    #[serde(rename = "searchTerm", default)]
    pub search_term: String,
    #[serde(rename = "selectedCategory", default)]
    pub selected_category: String,
}

impl SessionFilters for ConsumableFilters {
    const STORAGE_KEY: &'static str = "consumibles_filtros";

    fn chips(&self) -> Vec<FilterChip> {
        let mut chips = Vec::new();
        if !self.search_term.trim().is_empty() {
            chips.push(FilterChip::new("busqueda", format!("Búsqueda: {}", self.search_term.trim())));
        }
        if !is_all(&self.selected_category) {
            chips.push(FilterChip::new("categoria", format!("Categoría: {}", self.selected_category)));
        }
        chips
    }

    fn remove(&mut self, chip_id: &str) {
        match chip_id {
            "busqueda" => self.search_term.clear(),
            "categoria" => self.selected_category.clear(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_consumable_patch() {
        let item: Consumable = serde_json::from_value(json!({
            "id": 5, "codigo": "CON-5", "nombre": "Cinta doble faz", "coste": "3.5", "stock": 40
        }))
        .unwrap();
        let patch = ConsumablePatch::from_field(ConsumableField::Stock, "38,456");
        let shown = item.with_patch(&patch);
        assert_eq!(shown.stock, 38.46);
        assert_eq!(shown.coste, 3.5);
        assert!(shown.branches().is_empty());
    }
}
