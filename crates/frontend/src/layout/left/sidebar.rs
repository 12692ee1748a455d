//! Боковое меню с раскрывающимися группами.
//! Группа видна, если у пользователя есть просмотр её модуля.

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{tab_label_for_key, STOCK_CONTROL_KEY};
use crate::shared::icons::icon;
use crate::system::permissions::use_permissions;
use contracts::domain::a001_product::Product;
use contracts::domain::a002_resource::Resource;
use contracts::domain::a003_consumable::Consumable;
use contracts::domain::a004_contact::Contact;
use contracts::domain::a005_account::Account;
use contracts::domain::a006_auxiliary::Auxiliary;
use contracts::domain::a007_support::Support;
use contracts::domain::common::ApiRecord;
use contracts::system::permissions::{
    ACCOUNTING_MODULE, CONTACTS_MODULE, INVENTORY_MODULE, SUPPORTS_MODULE,
};
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuItem {
    key: String,
    label: &'static str,
    icon: &'static str,
}

impl MenuItem {
    fn new(key: String, icon: &'static str) -> Self {
        let label = tab_label_for_key(&key);
        Self { key, label, icon }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    module: &'static str,
    items: Vec<MenuItem>,
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "inventario",
            label: "Inventario",
            icon: "package",
            module: INVENTORY_MODULE,
            items: vec![
                MenuItem::new(Product::page_key(), "package"),
                MenuItem::new(Resource::page_key(), "layers"),
                MenuItem::new(Consumable::page_key(), "droplet"),
                MenuItem::new(STOCK_CONTROL_KEY.to_string(), "boxes"),
            ],
        },
        MenuGroup {
            id: "contactos",
            label: "Contactos",
            icon: "users",
            module: CONTACTS_MODULE,
            items: vec![MenuItem::new(Contact::page_key(), "users")],
        },
        MenuGroup {
            id: "contabilidad",
            label: "Contabilidad",
            icon: "book",
            module: ACCOUNTING_MODULE,
            items: vec![
                MenuItem::new(Account::page_key(), "book"),
                MenuItem::new(Auxiliary::page_key(), "wallet"),
            ],
        },
        MenuGroup {
            id: "soportes",
            label: "Soportes",
            icon: "map-pin",
            module: SUPPORTS_MODULE,
            items: vec![MenuItem::new(Support::page_key(), "map-pin")],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let permissions = use_permissions();

    let expanded_groups = RwSignal::new(vec!["inventario".to_string()]);

    view! {
        <div class="app-sidebar__content">
            {get_menu_groups().into_iter().map(|group| {
                let module = group.module;
                let group_id = group.id.to_string();
                let gid_click = group_id.clone();
                let gid_chevron = group_id.clone();
                let gid_show = group_id;
                let items = StoredValue::new(group.items);

                view! {
                    <Show when=move || permissions.can_view(module)>
                        <div>
                            <div
                                class="app-sidebar__item"
                                style:padding-left="12px"
                                on:click={
                                    let gid = gid_click.clone();
                                    move |_| {
                                        let gid = gid.clone();
                                        expanded_groups.update(move |open| {
                                            if let Some(pos) = open.iter().position(|x| x == &gid) {
                                                open.remove(pos);
                                            } else {
                                                open.push(gid);
                                            }
                                        });
                                    }
                                }
                            >
                                <div class="app-sidebar__item-content">
                                    {icon(group.icon)}
                                    <span>{group.label}</span>
                                </div>
                                <div
                                    class="app-sidebar__chevron"
                                    class:app-sidebar__chevron--expanded={
                                        let gid = gid_chevron.clone();
                                        move || expanded_groups.with(|open| open.contains(&gid))
                                    }
                                >
                                    {icon("chevron-right")}
                                </div>
                            </div>

                            <Show when={
                                let gid = gid_show.clone();
                                move || expanded_groups.with(|open| open.contains(&gid))
                            }>
                                <div class="app-sidebar__children">
                                    {items.get_value().into_iter().map(|item| {
                                        let key = StoredValue::new(item.key);
                                        view! {
                                            <div
                                                class="app-sidebar__item"
                                                class:app-sidebar__item--active=move || {
                                                    ctx.active.with(|a| a.as_deref() == Some(key.get_value().as_str()))
                                                }
                                                style:padding-left="10px"
                                                on:click=move |_| ctx.open_tab(&key.get_value(), item.label)
                                            >
                                                <div class="app-sidebar__item-content">
                                                    {icon(item.icon)}
                                                    <span>{item.label}</span>
                                                </div>
                                            </div>
                                        }
                                    }).collect_view()}
                                </div>
                            </Show>
                        </div>
                    </Show>
                }
            }).collect_view()}
        </div>
    }
}
