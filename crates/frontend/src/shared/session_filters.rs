//! Фильтры страниц в sessionStorage: читаются один раз при монтировании,
//! пишутся на каждое изменение, удаляются при полном сбросе

use contracts::shared::filters::SessionFilters;
use leptos::prelude::*;
use web_sys::window;

fn session_storage() -> Option<web_sys::Storage> {
    window()?.session_storage().ok()?
}

/// Разбор сохранённого JSON. Битое значение даёт фильтры по умолчанию.
pub fn parse_saved<F: SessionFilters>(raw: Option<&str>) -> F {
    match raw {
        Some(raw) => serde_json::from_str(raw).unwrap_or_else(|e| {
            log::warn!("{}: сохранённые фильтры не разобраны: {}", F::STORAGE_KEY, e);
            F::default()
        }),
        None => F::default(),
    }
}

pub fn load<F: SessionFilters>() -> F {
    let raw = session_storage().and_then(|s| s.get_item(F::STORAGE_KEY).ok().flatten());
    parse_saved(raw.as_deref())
}

pub fn save<F: SessionFilters>(filters: &F) {
    let Some(storage) = session_storage() else {
        return;
    };
    match serde_json::to_string(filters) {
        Ok(raw) => {
            let _ = storage.set_item(F::STORAGE_KEY, &raw);
        }
        Err(e) => log::warn!("{}: фильтры не сохранены: {}", F::STORAGE_KEY, e),
    }
}

pub fn clear<F: SessionFilters>() {
    if let Some(storage) = session_storage() {
        let _ = storage.remove_item(F::STORAGE_KEY);
    }
}

/// Сигнал фильтров страницы, синхронизированный с sessionStorage.
/// Пустой набор удаляет ключ вместо записи.
pub fn use_session_filters<F>() -> RwSignal<F>
where
    F: SessionFilters + Send + Sync + 'static,
{
    let filters = RwSignal::new(load::<F>());
    Effect::new(move |_| {
        let current = filters.get();
        if current == F::default() {
            clear::<F>();
        } else {
            save(&current);
        }
    });
    filters
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a004_contact::ContactFilters;
    use contracts::domain::a008_stock_control::StockControlFilters;

    #[test]
    fn test_parse_saved_filters() {
        let filters: StockControlFilters = parse_saved(Some(
            r#"{"searchTerm": "taza", "selectedSucursal": "La Paz"}"#,
        ));
        assert_eq!(filters.search_term, "taza");
        assert_eq!(filters.selected_branch, "La Paz");
        assert_eq!(filters.selected_category, "all");
    }

    #[test]
    fn test_malformed_json_is_ignored() {
        let filters: ContactFilters = parse_saved(Some("{not json"));
        assert_eq!(filters, ContactFilters::default());

        let filters: ContactFilters = parse_saved(None);
        assert_eq!(filters.relation, "ALL");
    }
}
