use crate::shared::config::config;
use contracts::domain::a004_contact::{Contact, SalesOwner};
use contracts::shared::list_query::Pagination;
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct ContactListState {
    pub items: Vec<Contact>,
    pub owners: Vec<SalesOwner>,
    pub pagination: Pagination,
    pub page: usize,
    pub page_size: usize,
    pub revision: u64,
}

impl Default for ContactListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            owners: Vec::new(),
            pagination: Pagination::default(),
            page: 0,
            page_size: config().lists.page_size,
            revision: 0,
        }
    }
}

impl ContactListState {
    pub fn owner_name(&self, owner_id: Option<&str>) -> String {
        let Some(owner_id) = owner_id else {
            return "Sin asignar".to_string();
        };
        self.owners
            .iter()
            .find(|o| o.id == owner_id)
            .map(|o| o.display_name().to_string())
            .unwrap_or_else(|| owner_id.to_string())
    }

    pub fn total_count(&self) -> usize {
        self.pagination.total.max(self.items.len())
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages.max(1)
    }
}

pub fn create_state() -> RwSignal<ContactListState> {
    RwSignal::new(ContactListState::default())
}
