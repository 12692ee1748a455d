use crate::domain::common::ApiRecord;
use crate::shared::filters::{is_all, FilterChip, SessionFilters};
use crate::shared::loose_json;
use crate::shared::text::any_field_matches;
use serde::{Deserialize, Serialize};

pub const ACCOUNT_TYPES: &[&str] = &["Activo", "Pasivo", "Patrimonio", "Ingreso", "Gasto"];

/// Отступ одного уровня плана счетов, px
pub const LEVEL_INDENT_PX: usize = 16;

fn default_true() -> bool {
    true
}

fn default_level() -> f64 {
    1.0
}

/// Счёт плана счетов (plan de cuentas)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(deserialize_with = "loose_json::de_id")]
    pub id: String,

    #[serde(default, deserialize_with = "loose_json::de_string")]
    pub clasificador: String,

    #[serde(default, deserialize_with = "loose_json::de_string")]
    pub cuenta: String,

    #[serde(default, deserialize_with = "loose_json::de_string")]
    pub descripcion: String,

    #[serde(default)]
    pub cuenta_padre: Option<String>,

    #[serde(default = "default_level", deserialize_with = "loose_json::de_number")]
    pub nivel: f64,

    #[serde(default, deserialize_with = "loose_json::de_string")]
    pub tipo_cuenta: String,

    #[serde(default, deserialize_with = "loose_json::de_string")]
    pub moneda: String,

    #[serde(default, deserialize_with = "loose_json::de_flag")]
    pub permite_auxiliar: bool,

    #[serde(default, deserialize_with = "loose_json::de_flag")]
    pub efectivo: bool,

    #[serde(default, deserialize_with = "loose_json::de_flag")]
    pub aitb: bool,

    #[serde(default, deserialize_with = "loose_json::de_flag")]
    pub transaccional: bool,

    #[serde(default = "default_true", deserialize_with = "loose_json::de_flag")]
    pub vigente: bool,
}

impl Account {
    pub fn level(&self) -> usize {
        if self.nivel.is_finite() && self.nivel >= 1.0 {
            self.nivel as usize
        } else {
            1
        }
    }

    pub fn indent_px(&self) -> usize {
        (self.level() - 1) * LEVEL_INDENT_PX
    }

    /// Валюта по умолчанию BS
    pub fn currency(&self) -> &str {
        if self.moneda.is_empty() {
            "BS"
        } else {
            &self.moneda
        }
    }

    pub fn matches(&self, filters: &AccountFilters) -> bool {
        let search_ok = any_field_matches(
            [self.cuenta.as_str(), self.descripcion.as_str(), self.clasificador.as_str()],
            &filters.search_term,
        );
        let type_ok = is_all(&filters.account_type) || self.tipo_cuenta == filters.account_type;
        let validity_ok = match filters.validity.as_str() {
            VALIDITY_ACTIVE => self.vigente,
            VALIDITY_INACTIVE => !self.vigente,
            _ => true,
        };
        search_ok && type_ok && validity_ok
    }
}

impl ApiRecord for Account {
    fn id(&self) -> &str {
        &self.id
    }

    fn code(&self) -> &str {
        &self.cuenta
    }

    fn description(&self) -> &str {
        &self.descripcion
    }

    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn collection_name() -> &'static str {
        "contabilidad/cuentas"
    }

    fn element_name() -> &'static str {
        "Cuenta"
    }

    fn list_name() -> &'static str {
        "Plan de cuentas"
    }
}

/// Порядок дерева: по коду счёта, дочерние коды идут сразу за родителем
pub fn sort_accounts(accounts: &mut [Account]) {
    accounts.sort_by(|a, b| a.cuenta.cmp(&b.cuenta).then_with(|| a.id.cmp(&b.id)));
}

// ============================================================================
// Filters
// ============================================================================

pub const VALIDITY_ACTIVE: &str = "vigente";
pub const VALIDITY_INACTIVE: &str = "no_vigente";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountFilters {
    #[serde(rename = "searchTerm", default)]
    pub search_term: String,
    #[serde(rename = "tipoCuenta", default)]
    pub account_type: String,
    #[serde(rename = "vigencia", default)]
    pub validity: String,
}

impl AccountFilters {
    pub fn apply<'a>(&self, accounts: &'a [Account]) -> Vec<&'a Account> {
        accounts.iter().filter(|a| a.matches(self)).collect()
    }
}

impl SessionFilters for AccountFilters {
    const STORAGE_KEY: &'static str = "cuentas_filtros";

    fn chips(&self) -> Vec<FilterChip> {
        let mut chips = Vec::new();
        if !self.search_term.trim().is_empty() {
            chips.push(FilterChip::new("busqueda", format!("Búsqueda: {}", self.search_term.trim())));
        }
        if !is_all(&self.account_type) {
            chips.push(FilterChip::new("tipo", format!("Tipo: {}", self.account_type)));
        }
        match self.validity.as_str() {
            VALIDITY_ACTIVE => chips.push(FilterChip::new("vigencia", "Vigencia: Activas")),
            VALIDITY_INACTIVE => chips.push(FilterChip::new("vigencia", "Vigencia: Inactivas")),
            _ => {}
        }
        chips
    }

    fn remove(&mut self, chip_id: &str) {
        match chip_id {
            "busqueda" => self.search_term.clear(),
            "tipo" => self.account_type.clear(),
            "vigencia" => self.validity.clear(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn account(cuenta: &str, nivel: u32, vigente: bool) -> Account {
        serde_json::from_value(json!({
            "id": cuenta.len(),
            "cuenta": cuenta,
            "descripcion": format!("Cuenta {}", cuenta),
            "nivel": nivel,
            "tipo_cuenta": "Activo",
            "vigente": vigente
        }))
        .unwrap()
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let item: Account = serde_json::from_value(json!({"id": 7, "cuenta": "1"})).unwrap();
        assert!(item.vigente);
        assert_eq!(item.level(), 1);
        assert_eq!(item.currency(), "BS");
        assert_eq!(Account::collection_path(), "/api/contabilidad/cuentas");
        assert_eq!(Account::page_key(), "a005_contabilidad_cuentas");
    }

    #[test]
    fn test_tree_order_and_indent() {
        let mut items = vec![account("112", 3, true), account("1", 1, true), account("11", 2, true), account("2", 1, true)];
        sort_accounts(&mut items);
        let codes: Vec<&str> = items.iter().map(|a| a.cuenta.as_str()).collect();
        assert_eq!(codes, vec!["1", "11", "112", "2"]);
        assert_eq!(items[2].indent_px(), 32);
    }

    #[test]
    fn test_filters() {
        let items = vec![account("1", 1, true), account("11", 2, false)];
        let mut filters = AccountFilters::default();
        assert_eq!(filters.apply(&items).len(), 2);

        filters.validity = VALIDITY_INACTIVE.to_string();
        assert_eq!(filters.apply(&items)[0].cuenta, "11");

        filters.account_type = "Pasivo".to_string();
        assert!(filters.apply(&items).is_empty());
        assert_eq!(filters.active_count(), 2);

        filters.remove("tipo");
        filters.search_term = "cuenta 11".to_string();
        assert_eq!(filters.apply(&items).len(), 1);
    }
}
