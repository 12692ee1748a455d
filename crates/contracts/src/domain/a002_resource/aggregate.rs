use crate::domain::a008_stock_control::control_stock::ControlStock;
use crate::domain::a008_stock_control::variants::{parse_axes, VariantAxis};
use crate::domain::common::{first_format, ApiRecord};
use crate::shared::edit_buffer::Patch;
use crate::shared::filters::{is_all, FilterChip, SessionFilters};
use crate::shared::loose_json;
use crate::shared::pricing::parse_amount;
use crate::shared::text::{any_field_matches, clean_text_value};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Категории ресурсов
pub const CATEGORY_SUPPLIES: &str = "Insumos";
pub const CATEGORY_LABOR: &str = "Mano de Obra";
pub const CATEGORY_SERVICES: &str = "Suministros";
pub const CATEGORIES: &[&str] = &[CATEGORY_SUPPLIES, CATEGORY_LABOR, CATEGORY_SERVICES];

// ============================================================================
// Record
// ============================================================================

/// Ресурс производства (recurso). Для «Insumos» ведётся Control de Stock
/// по комбинациям вариантов и филиалам.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(deserialize_with = "loose_json::de_id")]
    pub id: String,

    #[serde(default, deserialize_with = "loose_json::de_string")]
    pub codigo: String,

    #[serde(default, deserialize_with = "loose_json::de_string")]
    pub nombre: String,

    #[serde(default)]
    pub imagen_portada: Option<String>,

    #[serde(default, deserialize_with = "loose_json::de_string")]
    pub categoria: String,

    /// Массив форматов, объект или JSON-строка
    #[serde(default)]
    pub formato: Value,

    #[serde(default, deserialize_with = "loose_json::de_string")]
    pub responsable: String,

    #[serde(default, deserialize_with = "loose_json::de_string")]
    pub unidad_medida: String,

    #[serde(default, deserialize_with = "loose_json::de_number")]
    pub coste: f64,

    #[serde(default, deserialize_with = "loose_json::de_number")]
    pub precio_venta: f64,

    /// Оси вариантов: массив, `{ variantes: [...] }` или JSON-строка
    #[serde(default)]
    pub variantes: Value,

    #[serde(default)]
    pub control_stock: Value,

    /// Филиал строкой или списком; пусто означает филиалы по умолчанию
    #[serde(default)]
    pub sucursal: Value,
}

impl Resource {
    pub fn is_supply(&self) -> bool {
        self.categoria == CATEGORY_SUPPLIES
    }

    pub fn variant_axes(&self) -> Vec<VariantAxis> {
        parse_axes(&self.variantes)
    }

    pub fn control_stock(&self) -> ControlStock {
        ControlStock::from_value(&self.control_stock)
    }

    pub fn first_format(&self) -> Option<String> {
        first_format(&self.formato)
    }

    pub fn branches(&self) -> Vec<String> {
        loose_json::string_list(&self.sucursal)
    }

    pub fn with_patch(&self, patch: &ResourcePatch) -> Resource {
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
        if let Some(v) = patch.precio_venta {
            item.precio_venta = v;
        }
        item
    }

    pub fn matches(&self, filters: &ResourceFilters) -> bool {
        any_field_matches(
            [self.codigo.as_str(), self.nombre.as_str(), self.categoria.as_str()],
            &filters.search_term,
        ) && (is_all(&filters.selected_category) || self.categoria == filters.selected_category)
    }
}

impl ApiRecord for Resource {
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
        "a002"
    }

    fn collection_name() -> &'static str {
        "recursos"
    }

    fn element_name() -> &'static str {
        "Recurso"
    }

    fn list_name() -> &'static str {
        "Recursos"
    }
}

// ============================================================================
// Patch
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceField {
    Nombre,
    Categoria,
    UnidadMedida,
    Responsable,
    Coste,
    PrecioVenta,
}

impl ResourceField {
    pub fn key(&self) -> &'static str {
        match self {
            ResourceField::Nombre => "nombre",
            ResourceField::Categoria => "categoria",
            ResourceField::UnidadMedida => "unidad_medida",
            ResourceField::Responsable => "responsable",
            ResourceField::Coste => "coste",
            ResourceField::PrecioVenta => "precio_venta",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResourceField::Nombre => "Nombre",
            ResourceField::Categoria => "Categoría",
            ResourceField::UnidadMedida => "Unidad",
            ResourceField::Responsable => "Responsable",
            ResourceField::Coste => "Coste",
            ResourceField::PrecioVenta => "Precio venta",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResourcePatch {
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
    pub precio_venta: Option<f64>,
}

impl ResourcePatch {
    pub fn from_field(field: ResourceField, raw: &str) -> Self {
        let mut patch = Self::default();
        match field {
            ResourceField::Nombre => patch.nombre = Some(clean_text_value(raw)),
            ResourceField::Categoria => patch.categoria = Some(clean_text_value(raw)),
            ResourceField::UnidadMedida => patch.unidad_medida = Some(clean_text_value(raw)),
            ResourceField::Responsable => patch.responsable = Some(clean_text_value(raw)),
            ResourceField::Coste => patch.coste = Some(parse_amount(raw)),
            ResourceField::PrecioVenta => patch.precio_venta = Some(parse_amount(raw)),
        }
        patch
    }
}

impl Patch for ResourcePatch {
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
        if other.precio_venta.is_some() {
            self.precio_venta = other.precio_venta;
        }
    }
}

// ============================================================================
// Filters
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceFilters {
    #[serde(rename = "searchTerm", default)]
    pub search_term: String,
    #[serde(rename = "selectedCategory", default)]
    pub selected_category: String,
}

impl SessionFilters for ResourceFilters {
    const STORAGE_KEY: &'static str = "recursos_filtros";

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
    fn test_resource_from_api() {
        let item: Resource = serde_json::from_value(json!({
            "id": "b7c1",
            "codigo": "INS-004",
            "nombre": "Vinilo adhesivo",
            "categoria": "Insumos",
            "formato": "[{\"formato\":\"Rollo\",\"cantidad\":50,\"unidad_medida\":\"m\"}]",
            "coste": 20,
            "variantes": [{"nombre": "Color", "posibilidades": ["Blanco:#FFFFFF", "Negro:#000000"]}],
            "sucursal": "La Paz"
        }))
        .unwrap();

        assert!(item.is_supply());
        assert_eq!(item.first_format(), Some("Rollo".to_string()));
        assert_eq!(item.branches(), vec!["La Paz"]);
        assert_eq!(item.variant_axes().len(), 1);
        assert!(item.control_stock().is_empty());
    }

    #[test]
    fn test_filters() {
        let item: Resource = serde_json::from_value(json!({
            "id": "1", "codigo": "MO-01", "nombre": "Instalación", "categoria": "Mano de Obra"
        }))
        .unwrap();
        let filters = ResourceFilters {
            search_term: "instalacion".to_string(),
            selected_category: CATEGORY_LABOR.to_string(),
        };
        assert!(item.matches(&filters));
        let filters = ResourceFilters {
            search_term: String::new(),
            selected_category: CATEGORY_SUPPLIES.to_string(),
        };
        assert!(!item.matches(&filters));
    }
}
