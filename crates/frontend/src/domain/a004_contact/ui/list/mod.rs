pub mod state;

use self::state::create_state;
use crate::domain::a004_contact::api;
use crate::shared::components::bulk_bar::{BulkBar, PendingBar};
use crate::shared::components::edit_cells::TextInput;
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{TableCellCheckbox, TableHeaderCheckbox};
use crate::shared::components::ui::Badge;
use crate::shared::config::config;
use crate::shared::icons::icon;
use crate::shared::list_edit::{
    apply_report, confirm_action, save_patches_with, toggle_selected, WriteMethod,
};
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::session_filters::use_session_filters;
use crate::shared::toast::use_toasts;
use crate::system::permissions::use_permissions;
use contracts::domain::a004_contact::{
    Contact, ContactFilters, ContactKind, ContactPatch, Relation, ALL,
};
use contracts::domain::common::ApiRecord;
use contracts::shared::edit_buffer::EditSession;
use contracts::shared::filters::SessionFilters;
use contracts::system::permissions::CONTACTS_MODULE;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::{BTreeSet, HashSet};
use thaw::*;

#[component]
pub fn ContactList() -> impl IntoView {
    let state = create_state();
    let filters = use_session_filters::<ContactFilters>();
    let session = RwSignal::new(EditSession::<ContactPatch>::new());
    let selected = RwSignal::new(HashSet::<String>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let saving = RwSignal::new(false);
    let is_filter_expanded = RwSignal::new(false);

    let toasts = use_toasts();
    let permissions = use_permissions();
    let can_edit = permissions.edit_signal(CONTACTS_MODULE);
    let can_delete = permissions.delete_signal(CONTACTS_MODULE);

    let load_items = move || {
        let current = filters.get_untracked();
        let (page, page_size) = state.with_untracked(|s| (s.page, s.page_size));
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match api::fetch_contacts(&current, page + 1, page_size).await {
                Ok((items, pagination)) => {
                    // тип сервер может проигнорировать
                    let items: Vec<Contact> =
                        items.into_iter().filter(|c| c.matches_kind(&current)).collect();
                    log!("contactos: {} registro(s)", items.len());
                    state.update(|s| {
                        s.items = items;
                        s.pagination = pagination;
                        s.revision += 1;
                    });
                }
                Err(e) => {
                    log!("contactos: error al cargar: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    // комерсанты не зависят от фильтров
    spawn_local(async move {
        match api::fetch_sales_owners().await {
            Ok(owners) => state.update(|s| s.owners = owners),
            Err(e) => log!("contactos: comerciales no disponibles: {}", e),
        }
    });

    Effect::new(move |_| {
        filters.track();
        state.update_untracked(|s| s.page = 0);
        load_items();
    });

    let go_to_page = move |page: usize| {
        state.update(|s| s.page = page);
        load_items();
    };

    let change_page_size = move |size: usize| {
        state.update(|s| {
            s.page_size = size;
            s.page = 0;
        });
        load_items();
    };

    let page_ids = Signal::derive(move || {
        state.with(|s| s.items.iter().map(|c| c.id.clone()).collect::<Vec<_>>())
    });

    let toggle_all = move |check_all: bool| {
        let ids = page_ids.get_untracked();
        selected.update(|s| {
            if check_all {
                s.extend(ids);
            } else {
                s.clear();
            }
        });
    };

    let bulk_apply = move |patch: ContactPatch, label: &'static str| {
        let ids = selected.get_untracked();
        let applied = session
            .try_update(|s| s.bulk_apply(ids.iter(), |_| Some(patch.clone())))
            .unwrap_or(0);
        toasts.info(format!("{} actualizado para {} contacto(s)", label, applied));
    };

    let bulk_relation = move |code: String| {
        if let Some(relation) = Relation::from_code(&code) {
            bulk_apply(ContactPatch::relation(relation), "Relación");
        }
    };

    let bulk_owner = move |owner_id: String| {
        if owner_id.is_empty() {
            return;
        }
        bulk_apply(ContactPatch::sales_owner(&owner_id), "Comercial");
    };

    let save_changes = move || {
        let changes = session.with_untracked(|s| s.merged());
        if changes.is_empty() {
            toasts.info("No hay cambios pendientes para guardar");
            return;
        }
        saving.set(true);
        spawn_local(async move {
            let report = save_patches_with(WriteMethod::Patch, changes, Contact::item_path).await;
            apply_report(&report, session, toasts);
            if !report.succeeded.is_empty() {
                selected.update(|s| s.retain(|id| !report.succeeded.contains(id)));
                load_items();
            }
            saving.set(false);
        });
    };

    let bulk_delete = move || {
        let ids: Vec<String> = selected.get_untracked().into_iter().collect();
        if ids.is_empty() || !confirm_action(&format!("¿Eliminar {} contacto(s)?", ids.len())) {
            return;
        }
        spawn_local(async move {
            match api::delete_contacts(ids.clone()).await {
                Ok(()) => {
                    toasts.success(format!("{} contacto(s) eliminado(s)", ids.len()));
                    let removed: BTreeSet<String> = ids.into_iter().collect();
                    session.update(|s| s.settle(&removed));
                    selected.update(|s| s.clear());
                    load_items();
                }
                Err(e) => toasts.error(e.to_string()),
            }
        });
    };

    let selected_signal = Signal::derive(move || selected.get());
    let selected_count = Signal::derive(move || selected.with(|s| s.len()));
    let pending_count = Signal::derive(move || session.with(|s| s.pending_count()));

    view! {
        <PageFrame page_id="a004_contactos--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{Contact::list_name()}</h1>
                    <Badge variant="primary".to_string()>
                        {move || state.with(|s| s.total_count()).to_string()}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_items()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Cargando..." } else { " Actualizar" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <FilterPanel
                    is_expanded=is_filter_expanded
                    chips=Signal::derive(move || filters.with(|f| f.chips()))
                    on_remove_chip=Callback::new(move |id: &'static str| filters.update(|f| f.remove(id)))
                    on_clear_all=Callback::new(move |_| filters.set(ContactFilters::default()))
                    header_center=move || view! {
                        <PaginationControls
                            current_page=Signal::derive(move || state.with(|s| s.page))
                            total_pages=Signal::derive(move || state.with(|s| s.total_pages()))
                            total_count=Signal::derive(move || state.with(|s| s.total_count()))
                            page_size=Signal::derive(move || state.with(|s| s.page_size))
                            on_page_change=Callback::new(go_to_page)
                            on_page_size_change=Callback::new(change_page_size)
                            page_size_options=config().lists.page_size_options.clone()
                        />
                    }
                >
                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <div style="flex: 1; max-width: 360px;">
                            <SearchInput
                                value=Signal::derive(move || filters.with(|f| f.q.clone()))
                                on_change=Callback::new(move |v: String| filters.update(|f| f.q = v))
                                placeholder="Nombre, NIT, email..."
                            />
                        </div>
                        <select
                            class="filter-select"
                            prop:value=move || filters.with(|f| f.relation.clone())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                filters.update(|f| f.relation = value);
                            }
                        >
                            <option value=ALL>"Todas las relaciones"</option>
                            {Relation::ALL.iter().map(|r| view! { <option value=r.code()>{r.label()}</option> }).collect_view()}
                        </select>
                        <select
                            class="filter-select"
                            prop:value=move || filters.with(|f| f.kind.clone())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                filters.update(|f| f.kind = value);
                            }
                        >
                            <option value=ALL>"Todos los tipos"</option>
                            {ContactKind::ALL.iter().map(|k| view! { <option value=k.code()>{k.label()}</option> }).collect_view()}
                        </select>
                    </Flex>
                </FilterPanel>

                {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

                <Show when=move || can_edit.get()>
                    <BulkBar
                        selected_count=selected_count
                        on_clear_selection=Callback::new(move |_| selected.update(|s| s.clear()))
                    >
                        <select
                            class="bulk-bar__select"
                            on:change=move |ev| bulk_relation(event_target_value(&ev))
                        >
                            <option value="">"Cambiar relación"</option>
                            {Relation::ALL.iter().map(|r| view! { <option value=r.code()>{r.label()}</option> }).collect_view()}
                        </select>
                        <select
                            class="bulk-bar__select"
                            on:change=move |ev| bulk_owner(event_target_value(&ev))
                        >
                            <option value="">"Asignar comercial"</option>
                            <option value="none">"Sin comercial"</option>
                            {move || state.with(|s| {
                                s.owners
                                    .iter()
                                    .map(|o| {
                                        let value = o.id.clone();
                                        let name = o.display_name().to_string();
                                        view! { <option value=value>{name}</option> }
                                    })
                                    .collect_view()
                            })}
                        </select>
                        <Show when=move || can_delete.get()>
                            <Button appearance=ButtonAppearance::Secondary on_click=move |_| bulk_delete()>
                                {icon("trash")}
                                " Eliminar"
                            </Button>
                        </Show>
                    </BulkBar>
                </Show>

                <PendingBar
                    pending_count=pending_count
                    saving=saving
                    on_save=Callback::new(move |_| save_changes())
                    on_discard=Callback::new(move |_| {
                        session.update(|s| s.discard());
                        toasts.info("Cambios descartados");
                    })
                />

                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 1100px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCheckbox
                                    ids=page_ids
                                    selected=selected_signal
                                    on_change=Callback::new(toggle_all)
                                />
                                <TableHeaderCell min_width=220.0>"Nombre"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Tipo"</TableHeaderCell>
                                <TableHeaderCell min_width=110.0>"NIT"</TableHeaderCell>
                                <TableHeaderCell min_width=180.0>"Email"</TableHeaderCell>
                                <TableHeaderCell min_width=120.0>"Teléfono"</TableHeaderCell>
                                <TableHeaderCell min_width=120.0>"Ciudad"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Relación"</TableHeaderCell>
                                <TableHeaderCell min_width=140.0>"Comercial"</TableHeaderCell>
                                <TableHeaderCell min_width=90.0>"Estado"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || {
                                    state.with(|s| {
                                        let revision = s.revision;
                                        s.items.iter().cloned().map(move |c| (revision, c)).collect::<Vec<_>>()
                                    })
                                }
                                key=|(revision, item)| (*revision, item.id.clone())
                                children=move |(_, item)| {
                                    let owner_of = Callback::new(move |owner: Option<String>| {
                                        state.with(|s| s.owner_name(owner.as_deref()))
                                    });
                                    view! {
                                        <ContactRow
                                            item=item
                                            session=session
                                            selected=selected
                                            can_edit=can_edit
                                            owner_of=owner_of
                                        />
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>
            </div>
        </PageFrame>
    }
}

#[component]
fn ContactRow(
    item: Contact,
    session: RwSignal<EditSession<ContactPatch>>,
    selected: RwSignal<HashSet<String>>,
    can_edit: Signal<bool>,
    owner_of: Callback<Option<String>, String>,
) -> impl IntoView {
    let id = StoredValue::new(item.id.clone());
    let base = StoredValue::new(item.clone());

    let shown = Signal::derive(move || {
        let item = base.get_value();
        match session.with(|s| s.effective(&item.id)) {
            Some(patch) => item.with_patch(&patch),
            None => item,
        }
    });
    let dirty = Signal::derive(move || {
        session.with(|s| {
            let row = id.get_value();
            s.is_edited(&row) || s.is_pending(&row)
        })
    });
    let read_only = Signal::derive(move || !can_edit.get());

    let commit = move |patch: ContactPatch| {
        let row = id.get_value();
        let unchanged = shown.with_untracked(|c| c.with_patch(&patch) == *c);
        let selected_count = selected.with_untracked(|s| s.len());
        session.update(|s| {
            if !unchanged {
                s.edit(&row, patch, selected_count);
            }
            s.confirm(&row);
        });
    };

    let cancel = move || {
        let row = id.get_value();
        session.update(|s| s.cancel(&row));
        selected.update(|s| {
            s.remove(&row);
        });
    };

    let text_cell = move |field: &'static str, value_of: fn(&Contact) -> String| {
        view! {
            <TableCell>
                <TextInput
                    text=Signal::derive(move || shown.with(value_of))
                    on_commit=Callback::new(move |raw: String| commit(ContactPatch::text_field(field, &raw)))
                    on_cancel=Callback::new(move |_| cancel())
                    dirty=dirty
                    disabled=read_only
                />
            </TableCell>
        }
    };

    let kind = item.kind.map(|k| k.label()).unwrap_or("-");
    let row_id = item.id.clone();

    view! {
        <TableRow>
            <TableCellCheckbox
                item_id=row_id
                selected=Signal::derive(move || selected.get())
                on_change=Callback::new(move |(id, checked)| toggle_selected(selected, id, checked))
            />
            {text_cell("displayName", |c| c.display_name.clone())}
            <TableCell>
                <TableCellLayout>{kind}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout truncate=true>{item.tax_id.clone().unwrap_or_default()}</TableCellLayout>
            </TableCell>
            {text_cell("email", |c| c.email.clone().unwrap_or_default())}
            {text_cell("phone", |c| c.phone.clone().unwrap_or_default())}
            {text_cell("city", |c| c.city.clone().unwrap_or_default())}
            <TableCell>
                {move || match shown.with(|c| c.relation) {
                    Some(relation) => view! {
                        <Badge variant=relation.badge().to_string()>{relation.label()}</Badge>
                    }
                    .into_any(),
                    None => view! { <span class="text-muted">"-"</span> }.into_any(),
                }}
            </TableCell>
            <TableCell>
                <TableCellLayout truncate=true>
                    {move || owner_of.run(shown.with(|c| c.sales_owner_id.clone()))}
                </TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{item.status.clone()}</TableCellLayout>
            </TableCell>
        </TableRow>
    }
}
