//! Заголовки вкладок. Для записей API берётся `list_name` из contracts.

use contracts::domain::a001_product::Product;
use contracts::domain::a002_resource::Resource;
use contracts::domain::a003_consumable::Consumable;
use contracts::domain::a004_contact::Contact;
use contracts::domain::a005_account::Account;
use contracts::domain::a006_auxiliary::Auxiliary;
use contracts::domain::a007_support::Support;
use contracts::domain::common::ApiRecord;

/// Страница контроля остатков не привязана к одной коллекции
pub const STOCK_CONTROL_KEY: &str = "a008_control_stock";

fn page<T: ApiRecord>() -> (String, &'static str) {
    (T::page_key(), T::list_name())
}

fn known_pages() -> Vec<(String, &'static str)> {
    vec![
        page::<Product>(),
        page::<Resource>(),
        page::<Consumable>(),
        page::<Contact>(),
        page::<Account>(),
        page::<Auxiliary>(),
        page::<Support>(),
        (STOCK_CONTROL_KEY.to_string(), "Control de stock"),
    ]
}

/// Заголовок вкладки по ключу; неизвестный ключ -> "Página"
pub fn tab_label_for_key(key: &str) -> &'static str {
    known_pages()
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, label)| label)
        .unwrap_or("Página")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(tab_label_for_key("a001_inventario"), "Inventario");
        assert_eq!(tab_label_for_key("a005_contabilidad_cuentas"), "Plan de cuentas");
        assert_eq!(tab_label_for_key(STOCK_CONTROL_KEY), "Control de stock");
        assert_eq!(tab_label_for_key("z999"), "Página");
    }
}
