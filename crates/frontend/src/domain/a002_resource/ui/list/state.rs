use crate::shared::config::config;
use contracts::domain::a002_resource::Resource;
use contracts::shared::list_query::{page_slice, total_pages, Pagination};
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct ResourceListState {
    pub items: Vec<Resource>,
    pub pagination: Pagination,
    pub local_paging: bool,
    pub page: usize,
    pub page_size: usize,
    pub revision: u64,
}

impl Default for ResourceListState {
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

impl ResourceListState {
    pub fn visible(&self) -> Vec<Resource> {
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

pub fn create_state() -> RwSignal<ResourceListState> {
    RwSignal::new(ResourceListState::default())
}
