//! Категории страниц внутри табов.
//!
//! Корневой элемент страницы получает `id` вида `{ключ}--{категория}`
//! (например `"a007_soportes--list"`) и `data-page-category`.

/// Список записей: таблица с фильтрами и пагинацией
pub const PAGE_CAT_LIST: &str = "list";

/// Рабочая страница со своей разметкой (матрица остатков)
pub const PAGE_CAT_CUSTOM: &str = "custom";

pub const ALL_CATEGORIES: &[&str] = &[PAGE_CAT_LIST, PAGE_CAT_CUSTOM];

/// Проверка формата `{ключ}--{категория}`
pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((entity, category)) => !entity.is_empty() && ALL_CATEGORIES.contains(&category),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ids() {
        assert!(is_valid_page_id("a001_inventario--list"));
        assert!(is_valid_page_id("a008_control_stock--custom"));
        assert!(!is_valid_page_id("a001_inventario"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("a001_inventario--detail"));
    }
}
