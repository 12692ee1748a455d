use crate::domain::common::ApiRecord;
use crate::shared::edit_buffer::Patch;
use crate::shared::filters::{FilterChip, SessionFilters};
use crate::shared::loose_json;
use crate::shared::pricing::{parse_amount, round2};
use crate::shared::text::{any_field_matches, clean_text_value, normalize_text};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;

pub const SUPPORT_TYPES: &[&str] = &[
    "Unipolar",
    "Bipolar",
    "Tripolar",
    "Mural",
    "Mega Valla",
    "Cartelera",
    "Paleta",
];

// ============================================================================
// Status
// ============================================================================

/// Статус рекламной конструкции (на проводе испанская подпись)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupportStatus {
    #[serde(rename = "Disponible", alias = "DISPONIBLE")]
    Available,
    #[serde(rename = "Reservado", alias = "RESERVADO")]
    Reserved,
    #[serde(rename = "Ocupado", alias = "OCUPADO")]
    Occupied,
    #[serde(rename = "No disponible", alias = "NO_DISPONIBLE")]
    Unavailable,
    #[serde(rename = "A Consultar", alias = "A_CONSULTAR")]
    OnRequest,
}

impl SupportStatus {
    pub const ALL: [SupportStatus; 5] = [
        SupportStatus::Available,
        SupportStatus::Reserved,
        SupportStatus::Occupied,
        SupportStatus::Unavailable,
        SupportStatus::OnRequest,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SupportStatus::Available => "Disponible",
            SupportStatus::Reserved => "Reservado",
            SupportStatus::Occupied => "Ocupado",
            SupportStatus::Unavailable => "No disponible",
            SupportStatus::OnRequest => "A Consultar",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        let wanted = normalize_text(&raw.replace('_', " "));
        Self::ALL
            .into_iter()
            .find(|s| normalize_text(s.label()) == wanted)
    }

    pub fn badge(&self) -> &'static str {
        match self {
            SupportStatus::Available => "success",
            SupportStatus::Reserved => "warning",
            SupportStatus::Occupied => "error",
            SupportStatus::Unavailable => "neutral",
            SupportStatus::OnRequest => "primary",
        }
    }
}

fn de_status<'de, D>(deserializer: D) -> Result<Option<SupportStatus>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(SupportStatus::from_label))
}

// ============================================================================
// Record
// ============================================================================

/// Рекламная конструкция (soporte)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Support {
    #[serde(deserialize_with = "loose_json::de_id")]
    pub id: String,

    #[serde(default, alias = "codigo", deserialize_with = "loose_json::de_string")]
    pub code: String,

    #[serde(default, alias = "titulo", deserialize_with = "loose_json::de_string")]
    pub title: String,

    #[serde(rename = "type", default, alias = "tipo_soporte", deserialize_with = "loose_json::de_string")]
    pub kind: String,

    #[serde(default, alias = "estado", deserialize_with = "de_status")]
    pub status: Option<SupportStatus>,

    #[serde(rename = "widthM", default, alias = "ancho", deserialize_with = "loose_json::de_opt_number")]
    pub width_m: Option<f64>,

    #[serde(rename = "heightM", default, alias = "alto", deserialize_with = "loose_json::de_opt_number")]
    pub height_m: Option<f64>,

    #[serde(rename = "areaM2", default, alias = "area_total", deserialize_with = "loose_json::de_opt_number")]
    pub area_m2: Option<f64>,

    #[serde(rename = "priceMonth", default, alias = "precio_mensual", deserialize_with = "loose_json::de_opt_number")]
    pub price_month: Option<f64>,

    #[serde(default, alias = "ciudad", deserialize_with = "loose_json::de_string")]
    pub city: String,

    #[serde(default, alias = "pais", deserialize_with = "loose_json::de_string")]
    pub country: String,

    #[serde(default, alias = "propietario")]
    pub owner: Option<String>,

    #[serde(rename = "googleMapsLink", default, alias = "enlace_maps")]
    pub maps_link: Option<String>,

    #[serde(default, alias = "latitud", deserialize_with = "loose_json::de_opt_number")]
    pub latitude: Option<f64>,

    #[serde(default, alias = "longitud", deserialize_with = "loose_json::de_opt_number")]
    pub longitude: Option<f64>,

    #[serde(default, deserialize_with = "loose_json::de_string_list")]
    pub images: Vec<String>,

    /// Прочие поля записи; возвращаются в PUT без изменений
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Support {
    /// Площадь: из записи, иначе ширина x высота
    pub fn area(&self) -> f64 {
        match self.area_m2 {
            Some(area) if area > 0.0 => round2(area),
            _ => round2(self.width_m.unwrap_or(0.0) * self.height_m.unwrap_or(0.0)),
        }
    }

    pub fn price_per_m2(&self) -> Option<f64> {
        let area = self.area();
        if area <= 0.0 {
            return None;
        }
        self.price_month.map(|price| round2(price / area))
    }

    /// Ссылка на карту: явная или из координат
    pub fn map_url(&self) -> Option<String> {
        if let Some(link) = self.maps_link.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
            return Some(link.to_string());
        }
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if lat != 0.0 || lng != 0.0 => {
                Some(format!("https://www.google.com/maps?q={},{}", lat, lng))
            }
            _ => None,
        }
    }

    pub fn with_patch(&self, patch: &SupportPatch) -> Support {
        let mut item = self.clone();
        if let Some(v) = &patch.code {
            item.code = v.clone();
        }
        if let Some(v) = &patch.title {
            item.title = v.clone();
        }
        if let Some(v) = &patch.kind {
            item.kind = v.clone();
        }
        if let Some(v) = patch.price_month {
            item.price_month = Some(v);
        }
        if let Some(v) = patch.status {
            item.status = Some(v);
        }
        item
    }

    pub fn matches_search(&self, query: &str) -> bool {
        any_field_matches(
            [self.code.as_str(), self.title.as_str(), self.city.as_str(), self.kind.as_str()],
            query,
        )
    }
}

impl ApiRecord for Support {
    fn id(&self) -> &str {
        &self.id
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn description(&self) -> &str {
        &self.title
    }

    fn aggregate_index() -> &'static str {
        "a007"
    }

    fn collection_name() -> &'static str {
        "soportes"
    }

    fn element_name() -> &'static str {
        "Soporte"
    }

    fn list_name() -> &'static str {
        "Soportes"
    }
}

// ============================================================================
// Patch
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportField {
    Code,
    Title,
    Kind,
    PriceMonth,
}

impl SupportField {
    /// Имя поля в теле запроса
    pub fn key(&self) -> &'static str {
        match self {
            SupportField::Code => "code",
            SupportField::Title => "title",
            SupportField::Kind => "type",
            SupportField::PriceMonth => "priceMonth",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SupportField::Code => "Código",
            SupportField::Title => "Título",
            SupportField::Kind => "Tipo",
            SupportField::PriceMonth => "Precio/mes",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SupportPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(rename = "priceMonth", skip_serializing_if = "Option::is_none")]
    pub price_month: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SupportStatus>,
}

impl SupportPatch {
    pub fn from_field(field: SupportField, raw: &str) -> Self {
        let mut patch = Self::default();
        match field {
            SupportField::Code => patch.code = Some(clean_text_value(raw)),
            SupportField::Title => patch.title = Some(clean_text_value(raw)),
            SupportField::Kind => patch.kind = Some(clean_text_value(raw)),
            SupportField::PriceMonth => patch.price_month = Some(parse_amount(raw)),
        }
        patch
    }

    pub fn status(status: SupportStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl Patch for SupportPatch {
    fn merge(&mut self, other: &Self) {
        if other.code.is_some() {
            self.code = other.code.clone();
        }
        if other.title.is_some() {
            self.title = other.title.clone();
        }
        if other.kind.is_some() {
            self.kind = other.kind.clone();
        }
        if other.price_month.is_some() {
            self.price_month = other.price_month;
        }
        if other.status.is_some() {
            self.status = other.status;
        }
    }
}

// ============================================================================
// Sorting
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    Code,
    Title,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Код вида "123-SCZ": сначала число, затем буквенный суффикс
fn code_parts(code: &str) -> (i64, String) {
    let mut parts = code.split('-');
    let number = parts
        .next()
        .and_then(|p| p.trim().parse::<i64>().ok())
        .unwrap_or(0);
    let letters = parts.next().unwrap_or("").to_lowercase();
    (number, letters)
}

pub fn compare_supports(a: &Support, b: &Support, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Code => code_parts(&a.code).cmp(&code_parts(&b.code)),
        SortColumn::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
    }
}

// ============================================================================
// Filters
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportFilters {
    #[serde(default)]
    pub q: String,
    #[serde(rename = "statusFilter", default)]
    pub status_filter: Vec<SupportStatus>,
    #[serde(rename = "cityFilter", default)]
    pub city_filter: String,
    #[serde(rename = "sortColumn", default)]
    pub sort_column: Option<SortColumn>,
    #[serde(rename = "sortDirection", default)]
    pub sort_direction: SortDirection,
}

impl SupportFilters {
    /// Поиск и сортировка выполняются на клиенте по полной выборке
    pub fn needs_full_window(&self) -> bool {
        !self.q.trim().is_empty() || self.sort_column.is_some()
    }

    /// Серверные параметры: статусы через запятую и город
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if !self.status_filter.is_empty() {
            let joined = self
                .status_filter
                .iter()
                .map(|s| s.label())
                .collect::<Vec<_>>()
                .join(",");
            params.push(("status", joined));
        }
        if !self.city_filter.trim().is_empty() {
            params.push(("city", self.city_filter.trim().to_string()));
        }
        params
    }

    pub fn toggle_status(&mut self, status: SupportStatus) {
        if let Some(pos) = self.status_filter.iter().position(|s| *s == status) {
            self.status_filter.remove(pos);
        } else {
            self.status_filter.push(status);
        }
    }

    /// Цикл по заголовку: asc -> desc -> без сортировки
    pub fn toggle_sort(&mut self, column: SortColumn) {
        if self.sort_column == Some(column) {
            if self.sort_direction == SortDirection::Asc {
                self.sort_direction = SortDirection::Desc;
            } else {
                self.sort_column = None;
                self.sort_direction = SortDirection::Asc;
            }
        } else {
            self.sort_column = Some(column);
            self.sort_direction = SortDirection::Asc;
        }
    }

    /// Локальный поиск и сортировка
    pub fn apply(&self, items: Vec<Support>) -> Vec<Support> {
        let mut items: Vec<Support> = items
            .into_iter()
            .filter(|s| s.matches_search(&self.q))
            .collect();
        if let Some(column) = self.sort_column {
            items.sort_by(|a, b| {
                let ord = compare_supports(a, b, column);
                match self.sort_direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }
        items
    }
}

impl SessionFilters for SupportFilters {
    const STORAGE_KEY: &'static str = "soportes_filtros";

    fn chips(&self) -> Vec<FilterChip> {
        let mut chips = Vec::new();
        if !self.q.trim().is_empty() {
            chips.push(FilterChip::new("busqueda", format!("Búsqueda: {}", self.q.trim())));
        }
        if !self.status_filter.is_empty() {
            let labels = self
                .status_filter
                .iter()
                .map(|s| s.label())
                .collect::<Vec<_>>()
                .join(", ");
            chips.push(FilterChip::new("estado", format!("Estado: {}", labels)));
        }
        if !self.city_filter.trim().is_empty() {
            chips.push(FilterChip::new("ciudad", format!("Ciudad: {}", self.city_filter.trim())));
        }
        if let Some(column) = self.sort_column {
            let name = match column {
                SortColumn::Code => "Código",
                SortColumn::Title => "Título",
            };
            let arrow = match self.sort_direction {
                SortDirection::Asc => "↑",
                SortDirection::Desc => "↓",
            };
            chips.push(FilterChip::new("orden", format!("Orden: {} {}", name, arrow)));
        }
        chips
    }

    fn remove(&mut self, chip_id: &str) {
        match chip_id {
            "busqueda" => self.q.clear(),
            "estado" => self.status_filter.clear(),
            "ciudad" => self.city_filter.clear(),
            "orden" => {
                self.sort_column = None;
                self.sort_direction = SortDirection::Asc;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn support(code: &str, title: &str) -> Support {
        serde_json::from_value(json!({"id": code, "code": code, "title": title})).unwrap()
    }

    #[test]
    fn test_area_and_price_per_m2() {
        let item: Support = serde_json::from_value(json!({
            "id": "s1",
            "code": "12-LPZ",
            "widthM": "8",
            "heightM": 3,
            "priceMonth": 1200,
            "status": "DISPONIBLE"
        }))
        .unwrap();
        assert_eq!(item.area(), 24.0);
        assert_eq!(item.price_per_m2(), Some(50.0));
        assert_eq!(item.status, Some(SupportStatus::Available));

        let no_size = support("1", "x");
        assert_eq!(no_size.price_per_m2(), None);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(SupportStatus::from_label("No disponible"), Some(SupportStatus::Unavailable));
        assert_eq!(SupportStatus::from_label("NO_DISPONIBLE"), Some(SupportStatus::Unavailable));
        assert_eq!(SupportStatus::from_label("otro"), None);
    }

    #[test]
    fn test_map_url() {
        let mut item = support("1", "x");
        assert_eq!(item.map_url(), None);
        item.latitude = Some(-16.5);
        item.longitude = Some(-68.15);
        assert_eq!(item.map_url().as_deref(), Some("https://www.google.com/maps?q=-16.5,-68.15"));
        item.maps_link = Some("https://maps.app/abc".to_string());
        assert_eq!(item.map_url().as_deref(), Some("https://maps.app/abc"));
    }

    #[test]
    fn test_put_body_keeps_unknown_fields() {
        let item: Support = serde_json::from_value(json!({
            "id": "s1", "code": "1-LPZ", "title": "Valla", "lighting": "Sí"
        }))
        .unwrap();
        let shown = item.with_patch(&SupportPatch::status(SupportStatus::Reserved));
        let body = serde_json::to_value(&shown).unwrap();
        assert_eq!(body["lighting"], json!("Sí"));
        assert_eq!(body["status"], json!("Reservado"));
    }

    #[test]
    fn test_code_sort_is_numeric() {
        let items = vec![support("10-SCZ", "b"), support("2-SCZ", "c"), support("2-LPZ", "a")];
        let mut filters = SupportFilters::default();
        filters.toggle_sort(SortColumn::Code);
        let sorted: Vec<String> = filters.apply(items.clone()).into_iter().map(|s| s.code).collect();
        assert_eq!(sorted, vec!["2-LPZ", "2-SCZ", "10-SCZ"]);

        filters.toggle_sort(SortColumn::Code);
        assert_eq!(filters.sort_direction, SortDirection::Desc);
        assert_eq!(filters.apply(items.clone())[0].code, "10-SCZ");

        filters.toggle_sort(SortColumn::Code);
        assert_eq!(filters.sort_column, None);
        assert_eq!(filters.apply(items)[0].code, "10-SCZ");
    }

    #[test]
    fn test_filters_storage_and_params() {
        let mut filters: SupportFilters = serde_json::from_value(json!({
            "q": "pasaje",
            "statusFilter": ["Disponible"],
            "cityFilter": "La Paz",
            "sortColumn": null,
            "sortDirection": "asc"
        }))
        .unwrap();
        assert!(filters.needs_full_window());
        filters.toggle_status(SupportStatus::Reserved);
        assert_eq!(
            filters.query_params(),
            vec![("status", "Disponible,Reservado".to_string()), ("city", "La Paz".to_string())]
        );
        assert_eq!(filters.active_count(), 3);
        filters.remove("estado");
        assert!(filters.status_filter.is_empty());
    }
}
