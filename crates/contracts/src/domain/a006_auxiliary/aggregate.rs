use crate::domain::a005_account::{VALIDITY_ACTIVE, VALIDITY_INACTIVE};
use crate::domain::common::ApiRecord;
use crate::shared::filters::{is_all, FilterChip, SessionFilters};
use crate::shared::loose_json;
use crate::shared::text::any_field_matches;
use serde::{Deserialize, Serialize};

pub const AUXILIARY_TYPES: &[&str] = &["Cliente", "Proveedor", "Banco", "Caja", "Empleado", "Otro"];

fn default_true() -> bool {
    true
}

/// Данные связанного контакта (JOIN), важнее собственных полей
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkedContact {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub nit: Option<String>,
}

/// Вспомогательный счёт (auxiliar)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Auxiliary {
    #[serde(deserialize_with = "loose_json::de_id")]
    pub id: String,

    #[serde(default, deserialize_with = "loose_json::de_string")]
    pub tipo_auxiliar: String,

    #[serde(default, deserialize_with = "loose_json::de_string")]
    pub codigo: String,

    #[serde(default, deserialize_with = "loose_json::de_string")]
    pub nombre: String,

    #[serde(default)]
    pub cuenta_asociada: Option<String>,

    #[serde(default, deserialize_with = "loose_json::de_string")]
    pub moneda: String,

    #[serde(
        default,
        alias = "es_cuenta_bancaria",
        deserialize_with = "loose_json::de_flag"
    )]
    pub cuenta_bancaria_o_caja: bool,

    #[serde(default)]
    pub departamento: Option<String>,

    #[serde(default)]
    pub telefono: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub nit: Option<String>,

    #[serde(default = "default_true", alias = "vigente", deserialize_with = "loose_json::de_flag")]
    pub vigencia: bool,

    #[serde(default)]
    pub contactos: Option<LinkedContact>,
}

fn prefer<'a>(linked: Option<&'a String>, own: &'a Option<String>) -> &'a str {
    linked
        .or(own.as_ref())
        .map(String::as_str)
        .unwrap_or("")
}

impl Auxiliary {
    pub fn display_name(&self) -> &str {
        self.contactos
            .as_ref()
            .and_then(|c| c.nombre.as_ref())
            .map(String::as_str)
            .unwrap_or(&self.nombre)
    }

    pub fn phone(&self) -> &str {
        prefer(self.contactos.as_ref().and_then(|c| c.telefono.as_ref()), &self.telefono)
    }

    pub fn email(&self) -> &str {
        prefer(self.contactos.as_ref().and_then(|c| c.email.as_ref()), &self.email)
    }

    pub fn tax_id(&self) -> &str {
        prefer(self.contactos.as_ref().and_then(|c| c.nit.as_ref()), &self.nit)
    }

    /// Банк/касса: по флагу или по типу
    pub fn is_cash_or_bank(&self) -> bool {
        self.cuenta_bancaria_o_caja || matches!(self.tipo_auxiliar.as_str(), "Banco" | "Caja")
    }

    pub fn matches(&self, filters: &AuxiliaryFilters) -> bool {
        let search_ok = any_field_matches(
            [self.codigo.as_str(), self.display_name(), self.tax_id()],
            &filters.search_term,
        );
        let type_ok = is_all(&filters.auxiliary_type) || self.tipo_auxiliar == filters.auxiliary_type;
        let validity_ok = match filters.validity.as_str() {
            VALIDITY_ACTIVE => self.vigencia,
            VALIDITY_INACTIVE => !self.vigencia,
            _ => true,
        };
        search_ok && type_ok && validity_ok
    }
}

impl ApiRecord for Auxiliary {
    fn id(&self) -> &str {
        &self.id
    }

    fn code(&self) -> &str {
        &self.codigo
    }

    fn description(&self) -> &str {
        self.display_name()
    }

    fn aggregate_index() -> &'static str {
        "a006"
    }

    fn collection_name() -> &'static str {
        "contabilidad/auxiliares"
    }

    fn element_name() -> &'static str {
        "Auxiliar"
    }

    fn list_name() -> &'static str {
        "Auxiliares"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuxiliaryFilters {
    #[serde(rename = "searchTerm", default)]
    pub search_term: String,
    #[serde(rename = "tipoAuxiliar", default)]
    pub auxiliary_type: String,
    #[serde(rename = "vigencia", default)]
    pub validity: String,
}

impl AuxiliaryFilters {
    pub fn apply<'a>(&self, items: &'a [Auxiliary]) -> Vec<&'a Auxiliary> {
        items.iter().filter(|a| a.matches(self)).collect()
    }
}

impl SessionFilters for AuxiliaryFilters {
    const STORAGE_KEY: &'static str = "auxiliares_filtros";

    fn chips(&self) -> Vec<FilterChip> {
        let mut chips = Vec::new();
        if !self.search_term.trim().is_empty() {
            chips.push(FilterChip::new("busqueda", format!("Búsqueda: {}", self.search_term.trim())));
        }
        if !is_all(&self.auxiliary_type) {
            chips.push(FilterChip::new("tipo", format!("Tipo: {}", self.auxiliary_type)));
        }
        match self.validity.as_str() {
            VALIDITY_ACTIVE => chips.push(FilterChip::new("vigencia", "Vigencia: Vigentes")),
            VALIDITY_INACTIVE => chips.push(FilterChip::new("vigencia", "Vigencia: No vigentes")),
            _ => {}
        }
        chips
    }

    fn remove(&mut self, chip_id: &str) {
        match chip_id {
            "busqueda" => self.search_term.clear(),
            "tipo" => self.auxiliary_type.clear(),
            "vigencia" => self.validity.clear(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_linked_contact_wins() {
        let item: Auxiliary = serde_json::from_value(json!({
            "id": "aux-1",
            "tipo_auxiliar": "Cliente",
            "codigo": "CLI-01",
            "nombre": "Viejo nombre",
            "telefono": "700",
            "vigente": false,
            "contactos": {"nombre": "Imprenta Andina", "telefono": null, "nit": "1020"}
        }))
        .unwrap();
        assert_eq!(item.display_name(), "Imprenta Andina");
        assert_eq!(item.phone(), "700");
        assert_eq!(item.tax_id(), "1020");
        assert!(!item.vigencia);
    }

    #[test]
    fn test_cash_or_bank() {
        let bank: Auxiliary =
            serde_json::from_value(json!({"id": 1, "tipo_auxiliar": "Banco"})).unwrap();
        assert!(bank.is_cash_or_bank());
        let flagged: Auxiliary =
            serde_json::from_value(json!({"id": 2, "tipo_auxiliar": "Otro", "es_cuenta_bancaria": 1}))
                .unwrap();
        assert!(flagged.is_cash_or_bank());
        let client: Auxiliary =
            serde_json::from_value(json!({"id": 3, "tipo_auxiliar": "Cliente"})).unwrap();
        assert!(!client.is_cash_or_bank());
    }

    #[test]
    fn test_filters() {
        let items: Vec<Auxiliary> = serde_json::from_value(json!([
            {"id": 1, "tipo_auxiliar": "Caja", "codigo": "CJ-1", "nombre": "Caja chica"},
            {"id": 2, "tipo_auxiliar": "Proveedor", "codigo": "PR-1", "nombre": "Papelería", "vigencia": false}
        ]))
        .unwrap();
        let mut filters = AuxiliaryFilters {
            search_term: "papeleria".to_string(),
            ..Default::default()
        };
        assert_eq!(filters.apply(&items).len(), 1);

        filters.validity = VALIDITY_ACTIVE.to_string();
        assert!(filters.apply(&items).is_empty());

        filters.remove("busqueda");
        filters.auxiliary_type = "Caja".to_string();
        assert_eq!(filters.apply(&items)[0].codigo, "CJ-1");
    }
}
