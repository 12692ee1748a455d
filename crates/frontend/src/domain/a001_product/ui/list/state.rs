use crate::shared::config::config;
use contracts::domain::a001_product::Product;
use contracts::shared::list_query::{page_slice, total_pages, Pagination};
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct ProductListState {
    pub items: Vec<Product>,
    pub pagination: Pagination,
    /// Поиск: загружено окно целиком, страницы режутся на клиенте
    pub local_paging: bool,
    pub page: usize,
    pub page_size: usize,
    /// Растёт при каждой загрузке, строки таблицы пересоздаются
    pub revision: u64,
    pub is_loaded: bool,
}

impl Default for ProductListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::default(),
            local_paging: false,
            page: 0,
            page_size: config().lists.page_size,
            revision: 0,
            is_loaded: false,
        }
    }
}

impl ProductListState {
    pub fn visible(&self) -> Vec<Product> {
        if self.local_paging {
            page_slice(&self.items, self.page, self.page_size).to_vec()
        } else {
            self.items.clone()
        }
    }

    pub fn total_count(&self) -> usize {
        if self.local_paging {
            self.items.len()
        } else {
            self.pagination.total.max(self.items.len())
        }
    }

    pub fn total_pages(&self) -> usize {
        if self.local_paging {
            total_pages(self.items.len(), self.page_size)
        } else {
            self.pagination.total_pages.max(1)
        }
    }
}

pub fn create_state() -> RwSignal<ProductListState> {
    RwSignal::new(ProductListState::default())
}
