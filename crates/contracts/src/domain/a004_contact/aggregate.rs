use crate::domain::common::ApiRecord;
use crate::shared::edit_buffer::Patch;
use crate::shared::filters::{FilterChip, SessionFilters};
use crate::shared::loose_json;
use crate::shared::text::clean_text_value;
use serde::{Deserialize, Serialize};

/// Значение «все» в фильтрах контактов
pub const ALL: &str = "ALL";

// ============================================================================
// Enums
// ============================================================================

/// Отношение контакта к компании
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    #[serde(rename = "CUSTOMER", alias = "Cliente")]
    Customer,
    #[serde(rename = "SUPPLIER", alias = "Proveedor")]
    Supplier,
    #[serde(rename = "BOTH", alias = "Ambos")]
    Both,
}

impl Relation {
    pub const ALL: [Relation; 3] = [Relation::Customer, Relation::Supplier, Relation::Both];

    pub fn code(&self) -> &'static str {
        match self {
            Relation::Customer => "CUSTOMER",
            Relation::Supplier => "SUPPLIER",
            Relation::Both => "BOTH",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Relation::Customer => "Cliente",
            Relation::Supplier => "Proveedor",
            Relation::Both => "Ambos",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.code() == code || r.label() == code)
    }

    /// Вариант бейджа
    pub fn badge(&self) -> &'static str {
        match self {
            Relation::Customer => "primary",
            Relation::Supplier => "warning",
            Relation::Both => "success",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactKind {
    #[serde(rename = "INDIVIDUAL", alias = "Individual")]
    Individual,
    #[serde(rename = "COMPANY", alias = "Compañía")]
    Company,
}

impl ContactKind {
    pub const ALL: [ContactKind; 2] = [ContactKind::Individual, ContactKind::Company];

    pub fn code(&self) -> &'static str {
        match self {
            ContactKind::Individual => "INDIVIDUAL",
            ContactKind::Company => "COMPANY",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContactKind::Individual => "Individual",
            ContactKind::Company => "Compañía",
        }
    }
}

// ============================================================================
// Record
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(deserialize_with = "loose_json::de_id")]
    pub id: String,

    #[serde(rename = "displayName", default, deserialize_with = "loose_json::de_string")]
    pub display_name: String,

    #[serde(rename = "legalName", default)]
    pub legal_name: Option<String>,

    #[serde(rename = "taxId", default)]
    pub tax_id: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub address: Option<String>,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(rename = "postalCode", default)]
    pub postal_code: Option<String>,

    #[serde(default)]
    pub country: Option<String>,

    /// Неизвестные значения отношения читаем как None
    #[serde(default, deserialize_with = "de_relation")]
    pub relation: Option<Relation>,

    #[serde(default, deserialize_with = "loose_json::de_string")]
    pub status: String,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(rename = "salesOwnerId", default)]
    pub sales_owner_id: Option<String>,

    #[serde(default, deserialize_with = "de_kind")]
    pub kind: Option<ContactKind>,
}

fn de_relation<'de, D>(deserializer: D) -> Result<Option<Relation>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Relation::from_code))
}

fn de_kind<'de, D>(deserializer: D) -> Result<Option<ContactKind>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(|code| {
        ContactKind::ALL
            .into_iter()
            .find(|k| k.code() == code || k.label() == code)
    }))
}

impl Contact {
    pub fn with_patch(&self, patch: &ContactPatch) -> Contact {
        let mut item = self.clone();
        if let Some(v) = &patch.display_name {
            item.display_name = v.clone();
        }
        if let Some(v) = &patch.email {
            item.email = Some(v.clone());
        }
        if let Some(v) = &patch.phone {
            item.phone = Some(v.clone());
        }
        if let Some(v) = &patch.city {
            item.city = Some(v.clone());
        }
        if let Some(v) = patch.relation {
            item.relation = Some(v);
        }
        if let Some(v) = &patch.sales_owner_id {
            item.sales_owner_id = v.clone();
        }
        item
    }

    /// Тип контакта на странице фильтруется локально
    pub fn matches_kind(&self, filters: &ContactFilters) -> bool {
        filters.kind == ALL || self.kind.map(|k| k.code()) == Some(filters.kind.as_str())
    }
}

impl ApiRecord for Contact {
    fn id(&self) -> &str {
        &self.id
    }

    fn code(&self) -> &str {
        self.tax_id.as_deref().unwrap_or("")
    }

    fn description(&self) -> &str {
        &self.display_name
    }

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "contactos"
    }

    fn element_name() -> &'static str {
        "Contacto"
    }

    fn list_name() -> &'static str {
        "Contactos"
    }
}

/// Комерсант-владелец контакта из `/api/public/comerciales`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SalesOwner {
    #[serde(deserialize_with = "loose_json::de_id")]
    pub id: String,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl SalesOwner {
    pub fn display_name(&self) -> &str {
        self.nombre
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SalesOwnersResponse {
    #[serde(default)]
    pub users: Vec<SalesOwner>,
}

// ============================================================================
// Patch
// ============================================================================

/// Тело PATCH. `sales_owner_id: Some(None)` снимает комерсанта (null).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactPatch {
    #[serde(rename = "displayName", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<Relation>,
    #[serde(rename = "salesOwnerId", skip_serializing_if = "Option::is_none")]
    pub sales_owner_id: Option<Option<String>>,
}

impl ContactPatch {
    pub fn relation(relation: Relation) -> Self {
        Self {
            relation: Some(relation),
            ..Self::default()
        }
    }

    /// "none" или пустая строка снимают комерсанта
    pub fn sales_owner(owner_id: &str) -> Self {
        let owner = match owner_id.trim() {
            "" | "none" => None,
            id => Some(id.to_string()),
        };
        Self {
            sales_owner_id: Some(owner),
            ..Self::default()
        }
    }

    pub fn text_field(field: &str, raw: &str) -> Self {
        let value = clean_text_value(raw);
        let mut patch = Self::default();
        match field {
            "displayName" => patch.display_name = Some(value),
            "email" => patch.email = Some(value),
            "phone" => patch.phone = Some(value),
            "city" => patch.city = Some(value),
            _ => {}
        }
        patch
    }
}

impl Patch for ContactPatch {
    fn merge(&mut self, other: &Self) {
        if other.display_name.is_some() {
            self.display_name = other.display_name.clone();
        }
        if other.email.is_some() {
            self.email = other.email.clone();
        }
        if other.phone.is_some() {
            self.phone = other.phone.clone();
        }
        if other.city.is_some() {
            self.city = other.city.clone();
        }
        if other.relation.is_some() {
            self.relation = other.relation;
        }
        if other.sales_owner_id.is_some() {
            self.sales_owner_id = other.sales_owner_id.clone();
        }
    }
}

// ============================================================================
// Filters
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactFilters {
    #[serde(default)]
    pub q: String,
    #[serde(default = "all")]
    pub relation: String,
    #[serde(default = "all")]
    pub kind: String,
}

fn all() -> String {
    ALL.to_string()
}

impl Default for ContactFilters {
    fn default() -> Self {
        Self {
            q: String::new(),
            relation: all(),
            kind: all(),
        }
    }
}

impl ContactFilters {
    /// Параметры запроса к API (kind дополнительно фильтруется локально)
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if !self.q.trim().is_empty() {
            params.push(("q", self.q.trim().to_string()));
        }
        if self.relation != ALL {
            params.push(("relation", self.relation.clone()));
        }
        if self.kind != ALL {
            params.push(("kind", self.kind.clone()));
        }
        params
    }
}

impl SessionFilters for ContactFilters {
    const STORAGE_KEY: &'static str = "contactos_filtros";

    fn chips(&self) -> Vec<FilterChip> {
        let mut chips = Vec::new();
        if !self.q.trim().is_empty() {
            chips.push(FilterChip::new("q", format!("Búsqueda: {}", self.q.trim())));
        }
        if self.relation != ALL {
            let label = Relation::from_code(&self.relation)
                .map(|r| r.label())
                .unwrap_or(self.relation.as_str());
            chips.push(FilterChip::new("relation", format!("Relación: {}", label)));
        }
        if self.kind != ALL {
            let label = if self.kind == ContactKind::Individual.code() {
                ContactKind::Individual.label()
            } else {
                ContactKind::Company.label()
            };
            chips.push(FilterChip::new("kind", format!("Tipo: {}", label)));
        }
        chips
    }

    fn remove(&mut self, chip_id: &str) {
        match chip_id {
            "q" => self.q.clear(),
            "relation" => self.relation = all(),
            "kind" => self.kind = all(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_contact_from_api() {
        let contact: Contact = serde_json::from_value(json!({
            "id": "c-1",
            "displayName": "Imprenta Andina",
            "relation": "Proveedor",
            "kind": "COMPANY",
            "salesOwnerId": null,
            "status": "activo"
        }))
        .unwrap();
        assert_eq!(contact.relation, Some(Relation::Supplier));
        assert_eq!(contact.kind, Some(ContactKind::Company));
        assert_eq!(contact.sales_owner_id, None);
    }

    #[test]
    fn test_unknown_relation_is_none() {
        let contact: Contact =
            serde_json::from_value(json!({"id": 3, "relation": "LEAD"})).unwrap();
        assert_eq!(contact.relation, None);
    }

    #[test]
    fn test_patch_bodies() {
        let body = serde_json::to_value(ContactPatch::relation(Relation::Both)).unwrap();
        assert_eq!(body, json!({"relation": "BOTH"}));

        let body = serde_json::to_value(ContactPatch::sales_owner("none")).unwrap();
        assert_eq!(body, json!({"salesOwnerId": null}));

        let body = serde_json::to_value(ContactPatch::sales_owner("u-9")).unwrap();
        assert_eq!(body, json!({"salesOwnerId": "u-9"}));
    }

    #[test]
    fn test_filters() {
        let mut filters = ContactFilters::default();
        assert!(filters.query_params().is_empty());

        filters.relation = "CUSTOMER".to_string();
        filters.kind = "INDIVIDUAL".to_string();
        assert_eq!(
            filters.chips(),
            vec![
                FilterChip::new("relation", "Relación: Cliente"),
                FilterChip::new("kind", "Tipo: Individual"),
            ]
        );

        let contact: Contact = serde_json::from_value(json!({"id": 1, "kind": "COMPANY"})).unwrap();
        assert!(!contact.matches_kind(&filters));
        filters.remove("kind");
        assert!(contact.matches_kind(&filters));
    }

    #[test]
    fn test_sales_owner_name() {
        let owners: SalesOwnersResponse = serde_json::from_value(json!({
            "users": [{"id": 1, "nombre": "Ana"}, {"id": 2, "name": "Luis"}]
        }))
        .unwrap();
        assert_eq!(owners.users[0].display_name(), "Ana");
        assert_eq!(owners.users[1].display_name(), "Luis");
    }
}
