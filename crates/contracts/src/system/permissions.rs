//! Матрица прав пользователя: модуль -> действие -> bool
//!
//! Модуль `tecnico` хранит технические функции с произвольными именами
//! действий ("reservar soportes", "ver costes" ...).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const TECHNICAL_MODULE: &str = "tecnico";

/// Модуль, где admin даёт только просмотр
pub const SETTINGS_MODULE: &str = "ajustes";

pub const INVENTORY_MODULE: &str = "inventario";
pub const CONTACTS_MODULE: &str = "contactos";
pub const ACCOUNTING_MODULE: &str = "contabilidad";
pub const SUPPORTS_MODULE: &str = "soportes";

pub const ACTION_VIEW: &str = "ver";
pub const ACTION_EDIT: &str = "editar";
pub const ACTION_DELETE: &str = "eliminar";
pub const ACTION_ADMIN: &str = "admin";

/// Ответ `GET /api/permisos`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PermissionsResponse {
    #[serde(default)]
    pub permisos: PermissionMatrix,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionMatrix(pub BTreeMap<String, BTreeMap<String, bool>>);

impl PermissionMatrix {
    fn action(&self, module: &str, action: &str) -> bool {
        self.0
            .get(module)
            .and_then(|actions| actions.get(action))
            .copied()
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn can_admin(&self, module: &str) -> bool {
        module != TECHNICAL_MODULE && self.action(module, ACTION_ADMIN)
    }

    pub fn can_view(&self, module: &str) -> bool {
        self.can_admin(module) || self.action(module, ACTION_VIEW)
    }

    pub fn can_edit(&self, module: &str) -> bool {
        if module == SETTINGS_MODULE {
            return self.action(module, ACTION_EDIT);
        }
        self.can_admin(module) || self.action(module, ACTION_EDIT)
    }

    pub fn can_delete(&self, module: &str) -> bool {
        if module == SETTINGS_MODULE {
            return self.action(module, ACTION_DELETE);
        }
        self.can_admin(module) || self.action(module, ACTION_DELETE)
    }

    pub fn has_technical(&self, capability: &str) -> bool {
        self.action(TECHNICAL_MODULE, capability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn matrix() -> PermissionMatrix {
        let response: PermissionsResponse = serde_json::from_value(json!({
            "permisos": {
                "inventario": {"ver": true, "editar": false, "eliminar": false, "admin": false},
                "soportes": {"ver": false, "editar": false, "eliminar": false, "admin": true},
                "ajustes": {"ver": false, "editar": false, "eliminar": false, "admin": true},
                "tecnico": {"reservar soportes": true, "admin": true}
            }
        }))
        .unwrap();
        response.permisos
    }

    #[test]
    fn test_plain_actions() {
        let m = matrix();
        assert!(m.can_view("inventario"));
        assert!(!m.can_edit("inventario"));
        assert!(!m.can_view("contactos"));
    }

    #[test]
    fn test_admin_implies_all_but_settings() {
        let m = matrix();
        assert!(m.can_view("soportes"));
        assert!(m.can_edit("soportes"));
        assert!(m.can_delete("soportes"));

        assert!(m.can_view("ajustes"));
        assert!(!m.can_edit("ajustes"));
        assert!(!m.can_delete("ajustes"));
    }

    #[test]
    fn test_technical_capabilities() {
        let m = matrix();
        assert!(m.has_technical("reservar soportes"));
        assert!(!m.has_technical("ver costes"));
        assert!(!m.can_admin("tecnico"));
    }

    #[test]
    fn test_empty_response() {
        let response: PermissionsResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.permisos.is_empty());
        assert!(!response.permisos.can_view("inventario"));
    }
}
