//! Наборы фильтров страниц списков, сохраняемые в sessionStorage

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Активный фильтр, показываемый «чипом» с кнопкой удаления
#[derive(Debug, Clone, PartialEq)]
pub struct FilterChip {
    pub id: &'static str,
    pub label: String,
}

impl FilterChip {
    pub fn new(id: &'static str, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// Значение селекта «все» в фильтрах
pub const ALL: &str = "all";

pub fn is_all(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case(ALL)
}

pub trait SessionFilters: Serialize + DeserializeOwned + Default + Clone + PartialEq {
    /// Ключ в sessionStorage
    const STORAGE_KEY: &'static str;

    fn chips(&self) -> Vec<FilterChip>;

    /// Сбросить один фильтр по id чипа
    fn remove(&mut self, chip_id: &str);

    fn active_count(&self) -> usize {
        self.chips().len()
    }

    fn is_empty(&self) -> bool {
        self.chips().is_empty()
    }
}
