use crate::domain::common::ApiRecord;
use crate::shared::edit_buffer::Patch;
use crate::shared::filters::{is_all, FilterChip, SessionFilters};
use crate::shared::loose_json;
use crate::shared::pricing::{parse_amount, profit_margin_pct};
use crate::shared::text::{any_field_matches, clean_text_value, contains_normalized};
use serde::{Deserialize, Serialize};

// ============================================================================
// Record
// ============================================================================

/// Товар/услуга складского каталога (inventario)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "loose_json::de_id")]
    pub id: String,

    #[serde(default, deserialize_with = "loose_json::de_string")]
    pub codigo: String,

    #[serde(default, deserialize_with = "loose_json::de_string")]
    pub nombre: String,

    #[serde(default, deserialize_with = "loose_json::de_string")]
    pub responsable: String,

    #[serde(default, deserialize_with = "loose_json::de_string")]
    pub unidad_medida: String,

    #[serde(default, deserialize_with = "loose_json::de_number")]
    pub coste: f64,

    #[serde(default, deserialize_with = "loose_json::de_number")]
    pub precio_venta: f64,

    #[serde(default, deserialize_with = "loose_json::de_string")]
    pub categoria: String,

    #[serde(default, deserialize_with = "loose_json::de_string")]
    pub disponibilidad: String,

    #[serde(default)]
    pub imagen_portada: Option<String>,

    #[serde(default, deserialize_with = "loose_json::de_flag")]
    pub mostrar_en_web: bool,
}

impl Product {
    pub fn profit_margin_pct(&self) -> f64 {
        profit_margin_pct(self.coste, self.precio_venta)
    }

    /// Запись с наложенными несохранёнными изменениями (для отображения)
    pub fn with_patch(&self, patch: &ProductPatch) -> Product {
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
        if let Some(v) = &patch.disponibilidad {
            item.disponibilidad = v.clone();
        }
        if let Some(v) = patch.coste {
            item.coste = v;
        }
        if let Some(v) = patch.precio_venta {
            item.precio_venta = v;
        }
        if let Some(v) = patch.mostrar_en_web {
            item.mostrar_en_web = v;
        }
        item
    }

    pub fn matches(&self, filters: &ProductFilters) -> bool {
        let search_ok = any_field_matches(
            [self.codigo.as_str(), self.nombre.as_str(), self.categoria.as_str()],
            &filters.search_term,
        );
        let category_ok = is_all(&filters.selected_category)
            || contains_normalized(&self.categoria, &filters.selected_category);
        search_ok && category_ok
    }
}

impl ApiRecord for Product {
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
        "a001"
    }

    fn collection_name() -> &'static str {
        "inventario"
    }

    fn element_name() -> &'static str {
        "Producto"
    }

    fn list_name() -> &'static str {
        "Inventario"
    }
}

// ============================================================================
// Patch
// ============================================================================

/// Редактируемые поля списка
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Nombre,
    Categoria,
    UnidadMedida,
    Responsable,
    Disponibilidad,
    Coste,
    PrecioVenta,
}

impl ProductField {
    pub fn key(&self) -> &'static str {
        match self {
            ProductField::Nombre => "nombre",
            ProductField::Categoria => "categoria",
            ProductField::UnidadMedida => "unidad_medida",
            ProductField::Responsable => "responsable",
            ProductField::Disponibilidad => "disponibilidad",
            ProductField::Coste => "coste",
            ProductField::PrecioVenta => "precio_venta",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductField::Nombre => "Nombre",
            ProductField::Categoria => "Categoría",
            ProductField::UnidadMedida => "Unidad",
            ProductField::Responsable => "Responsable",
            ProductField::Disponibilidad => "Disponibilidad",
            ProductField::Coste => "Coste",
            ProductField::PrecioVenta => "Precio venta",
        }
    }
}

/// Частичное обновление: в теле PUT только затронутые поля
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unidad_medida: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disponibilidad: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coste: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precio_venta: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mostrar_en_web: Option<bool>,
}

impl ProductPatch {
    /// Патч одного поля из текста ячейки или массового ввода
    pub fn from_field(field: ProductField, raw: &str) -> Self {
        let mut patch = Self::default();
        match field {
            ProductField::Nombre => patch.nombre = Some(clean_text_value(raw)),
            ProductField::Categoria => patch.categoria = Some(clean_text_value(raw)),
            ProductField::UnidadMedida => patch.unidad_medida = Some(clean_text_value(raw)),
            ProductField::Responsable => patch.responsable = Some(clean_text_value(raw)),
            ProductField::Disponibilidad => patch.disponibilidad = Some(clean_text_value(raw)),
            ProductField::Coste => patch.coste = Some(parse_amount(raw)),
            ProductField::PrecioVenta => patch.precio_venta = Some(parse_amount(raw)),
        }
        patch
    }

    pub fn visibility(visible: bool) -> Self {
        Self {
            mostrar_en_web: Some(visible),
            ..Self::default()
        }
    }
}

impl Patch for ProductPatch {
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
        if other.disponibilidad.is_some() {
            self.disponibilidad = other.disponibilidad.clone();
        }
        if other.coste.is_some() {
            self.coste = other.coste;
        }
        if other.precio_venta.is_some() {
            self.precio_venta = other.precio_venta;
        }
        if other.mostrar_en_web.is_some() {
            self.mostrar_en_web = other.mostrar_en_web;
        }
    }
}

// ============================================================================
// Filters
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilters {
    #[serde(rename = "searchTerm", default)]
    pub search_term: String,
    #[serde(rename = "selectedCategory", default)]
    pub selected_category: String,
}

impl SessionFilters for ProductFilters {
    const STORAGE_KEY: &'static str = "inventario_filtros";

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

    fn sample() -> Product {
        serde_json::from_value(json!({
            "id": 12,
            "codigo": "INV-012",
            "nombre": "Display Roll-Up",
            "categoria": "Displays",
            "unidad_medida": "unidad",
            "coste": "80.5",
            "precio_venta": 120,
            "disponibilidad": "Disponible",
            "mostrar_en_web": null
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_loose_fields() {
        let item = sample();
        assert_eq!(item.id, "12");
        assert_eq!(item.coste, 80.5);
        assert!(!item.mostrar_en_web);
        assert_eq!(Product::item_path(&item.id), "/api/inventario/12");
    }

    #[test]
    fn test_margin() {
        assert_eq!(sample().profit_margin_pct(), 49.07);
    }

    #[test]
    fn test_filters_match() {
        let item = sample();
        let mut filters = ProductFilters::default();
        assert!(item.matches(&filters));

        filters.search_term = "roll-up".to_string();
        assert!(item.matches(&filters));

        filters.selected_category = "displays".to_string();
        assert!(item.matches(&filters));

        filters.selected_category = "Insumos".to_string();
        assert!(!item.matches(&filters));
    }

    #[test]
    fn test_patch_body_has_only_touched_fields() {
        let mut patch = ProductPatch::from_field(ProductField::Categoria, " \"Impresion  Digital\" ");
        patch.merge(&ProductPatch::from_field(ProductField::Coste, "12,347"));
        let body = serde_json::to_value(&patch).unwrap();
        assert_eq!(body, json!({"categoria": "Impresion Digital", "coste": 12.35}));
    }

    #[test]
    fn test_with_patch() {
        let shown = sample().with_patch(&ProductPatch::visibility(true));
        assert!(shown.mostrar_en_web);
    }

    #[test]
    fn test_filter_chips() {
        let mut filters = ProductFilters {
            search_term: "lona".to_string(),
            selected_category: "Displays".to_string(),
        };
        assert_eq!(filters.active_count(), 2);
        filters.remove("categoria");
        assert_eq!(filters.chips(), vec![FilterChip::new("busqueda", "Búsqueda: lona")]);
    }
}
