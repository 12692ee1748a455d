//! Ключ вкладки -> страница

use super::tab_labels::STOCK_CONTROL_KEY;
use crate::domain::a001_product::ui::list::ProductList;
use crate::domain::a002_resource::ui::list::ResourceList;
use crate::domain::a003_consumable::ui::list::ConsumableList;
use crate::domain::a004_contact::ui::list::ContactList;
use crate::domain::a005_account::ui::list::AccountList;
use crate::domain::a006_auxiliary::ui::list::AuxiliaryList;
use crate::domain::a007_support::ui::list::SupportList;
use crate::domain::a008_stock_control::ui::list::StockControlPage;
use contracts::domain::a001_product::Product;
use contracts::domain::a002_resource::Resource;
use contracts::domain::a003_consumable::Consumable;
use contracts::domain::a004_contact::Contact;
use contracts::domain::a005_account::Account;
use contracts::domain::a006_auxiliary::Auxiliary;
use contracts::domain::a007_support::Support;
use contracts::domain::common::ApiRecord;
use leptos::logging::log;
use leptos::prelude::*;

pub fn render_tab_content(key: &str) -> AnyView {
    match key {
        k if k == Product::page_key() => view! { <ProductList /> }.into_any(),
        k if k == Resource::page_key() => view! { <ResourceList /> }.into_any(),
        k if k == Consumable::page_key() => view! { <ConsumableList /> }.into_any(),
        k if k == Contact::page_key() => view! { <ContactList /> }.into_any(),
        k if k == Account::page_key() => view! { <AccountList /> }.into_any(),
        k if k == Auxiliary::page_key() => view! { <AuxiliaryList /> }.into_any(),
        k if k == Support::page_key() => view! { <SupportList /> }.into_any(),
        STOCK_CONTROL_KEY => view! { <StockControlPage /> }.into_any(),
        _ => {
            log!("pestaña desconocida: {}", key);
            view! { <div class="placeholder">"Página no disponible"</div> }.into_any()
        }
    }
}
