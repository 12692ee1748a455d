use crate::shared::config::config;
use contracts::domain::a003_consumable::Consumable;
use contracts::shared::list_query::{page_slice, total_pages, Pagination};
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct ConsumableListState {
    pub items: Vec<Consumable>,
    pub pagination: Pagination,
    /// Поиск идёт по окну записей, страницы режутся на клиенте
    pub local_paging: bool,
    pub page: usize,
    pub page_size: usize,
    pub revision: u64,
}

impl Default for ConsumableListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::default(),
            local_paging: false,
            page: 0,
            page_size: config().lists.page_size,
            revision: 0,
        }
    }
}

impl ConsumableListState {
    pub fn visible(&self) -> Vec<Consumable> {
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

    pub fn total_stock(&self) -> f64 {
        self.items.iter().map(|c| c.stock).sum()
    }
}

pub fn create_state() -> RwSignal<ConsumableListState> {
    RwSignal::new(ConsumableListState::default())
}
