pub mod state;

use self::state::create_state;
use crate::domain::a001_product::api;
use crate::shared::components::bulk_bar::{BulkBar, PendingBar};
use crate::shared::components::edit_cells::{AmountInput, TextInput};
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{format_percent, TableCellCheckbox, TableHeaderCheckbox};
use crate::shared::components::ui::Badge;
use crate::shared::config::config;
use crate::shared::icons::icon;
use crate::shared::list_edit::{
    apply_report, confirm_action, distinct_values, save_patches, toggle_selected,
};
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::session_filters::use_session_filters;
use crate::shared::toast::use_toasts;
use crate::system::permissions::use_permissions;
use contracts::domain::a001_product::{Product, ProductField, ProductFilters, ProductPatch};
use contracts::domain::common::ApiRecord;
use contracts::shared::edit_buffer::EditSession;
use contracts::shared::filters::SessionFilters;
use contracts::shared::list_query::ListQuery;
use contracts::shared::pricing::format_amount;
use contracts::system::permissions::INVENTORY_MODULE;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::{BTreeSet, HashSet};
use thaw::*;

#[component]
pub fn ProductList() -> impl IntoView {
    let state = create_state();
    let filters = use_session_filters::<ProductFilters>();
    let session = RwSignal::new(EditSession::<ProductPatch>::new());
    let selected = RwSignal::new(HashSet::<String>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let saving = RwSignal::new(false);
    let is_filter_expanded = RwSignal::new(false);

    let toasts = use_toasts();
    let permissions = use_permissions();
    let can_edit = permissions.edit_signal(INVENTORY_MODULE);
    let can_delete = permissions.delete_signal(INVENTORY_MODULE);

    let load_items = move || {
        let current = filters.get_untracked();
        let (page, page_size) = state.with_untracked(|s| (s.page, s.page_size));
        let searching = !current.search_term.trim().is_empty();
        let query = if searching {
            ListQuery::new(1, config().lists.search_window)
        } else {
            ListQuery::new(page + 1, page_size)
        }
        .param("categoria", &current.selected_category);

        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match api::fetch_products(&query).await {
                Ok((items, pagination)) => {
                    let items: Vec<Product> =
                        items.into_iter().filter(|p| p.matches(&current)).collect();
                    log!("inventario: {} registro(s)", items.len());
                    state.update(|s| {
                        s.items = items;
                        s.pagination = pagination;
                        s.local_paging = searching;
                        s.revision += 1;
                        s.is_loaded = true;
                    });
                }
                Err(e) => {
                    log!("inventario: error al cargar: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    // смена фильтров: первая страница и перезагрузка
    Effect::new(move |_| {
        filters.track();
        state.update_untracked(|s| s.page = 0);
        load_items();
    });

    let go_to_page = move |page: usize| {
        state.update(|s| s.page = page);
        if !state.with_untracked(|s| s.local_paging) {
            load_items();
        }
    };

    let change_page_size = move |size: usize| {
        state.update(|s| {
            s.page_size = size;
            s.page = 0;
        });
        load_items();
    };

    let page_ids = Signal::derive(move || {
        state.with(|s| s.visible().into_iter().map(|p| p.id).collect::<Vec<_>>())
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

    let categories =
        Signal::derive(move || state.with(|s| distinct_values(s.items.iter().map(|p| p.categoria.as_str()))));
    let units = Signal::derive(move || {
        state.with(|s| distinct_values(s.items.iter().map(|p| p.unidad_medida.as_str())))
    });

    let bulk_set = move |field: ProductField, value: String| {
        if value.is_empty() {
            return;
        }
        let ids = selected.get_untracked();
        let applied = session
            .try_update(|s| s.bulk_apply(ids.iter(), |_| Some(ProductPatch::from_field(field, &value))))
            .unwrap_or(0);
        toasts.info(format!("{} actualizado para {} item(s)", field.label(), applied));
    };

    let save_changes = move || {
        let changes = session.with_untracked(|s| s.merged());
        if changes.is_empty() {
            toasts.info("No hay cambios pendientes para guardar");
            return;
        }
        saving.set(true);
        spawn_local(async move {
            let report = save_patches(changes, Product::item_path).await;
            apply_report(&report, session, toasts);
            if !report.succeeded.is_empty() {
                selected.update(|s| s.retain(|id| !report.succeeded.contains(id)));
                load_items();
            }
            saving.set(false);
        });
    };

    let discard_changes = move || {
        session.update(|s| s.discard());
        toasts.info("Cambios descartados");
    };

    let toggle_visibility = move |(id, visible): (String, bool)| {
        spawn_local(async move {
            match api::update_product(&id, &ProductPatch::visibility(visible)).await {
                Ok(()) => load_items(),
                Err(e) => toasts.error(e.to_string()),
            }
        });
    };

    let bulk_delete = move || {
        let ids: Vec<String> = selected.get_untracked().into_iter().collect();
        if ids.is_empty() || !confirm_action(&format!("¿Eliminar {} items del inventario?", ids.len())) {
            return;
        }
        spawn_local(async move {
            match api::delete_products(ids.clone()).await {
                Ok(()) => {
                    toasts.success(format!("{} item(s) eliminado(s) correctamente", ids.len()));
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
        <PageFrame page_id="a001_inventario--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{Product::list_name()}</h1>
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
                    on_clear_all=Callback::new(move |_| filters.set(ProductFilters::default()))
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
                                value=Signal::derive(move || filters.with(|f| f.search_term.clone()))
                                on_change=Callback::new(move |v: String| filters.update(|f| f.search_term = v))
                                placeholder="Código, nombre, categoría..."
                            />
                        </div>
                        <select
                            class="filter-select"
                            prop:value=move || filters.with(|f| f.selected_category.clone())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                filters.update(|f| f.selected_category = value);
                            }
                        >
                            <option value="">"Todas las categorías"</option>
                            {move || categories.get().into_iter().map(|c| {
                                let value = c.clone();
                                view! { <option value=value>{c}</option> }
                            }).collect_view()}
                        </select>
                    </Flex>
                </FilterPanel>

                {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

                <Show when=move || can_edit.get()>
                    <BulkBar
                        selected_count=selected_count
                        on_clear_selection=Callback::new(move |_| selected.update(|s| s.clear()))
                    >
                        <Show when=move || { selected_count.get() > 1 }>
                            <select
                                class="bulk-bar__select"
                                on:change=move |ev| bulk_set(ProductField::Categoria, event_target_value(&ev))
                            >
                                <option value="">"Cambiar categoría"</option>
                                {move || categories.get().into_iter().map(|c| {
                                    let value = c.clone();
                                    view! { <option value=value>{c}</option> }
                                }).collect_view()}
                            </select>
                            <select
                                class="bulk-bar__select"
                                on:change=move |ev| bulk_set(ProductField::UnidadMedida, event_target_value(&ev))
                            >
                                <option value="">"Cambiar unidad"</option>
                                {move || units.get().into_iter().map(|u| {
                                    let value = u.clone();
                                    view! { <option value=value>{u}</option> }
                                }).collect_view()}
                            </select>
                        </Show>
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
                    on_discard=Callback::new(move |_| discard_changes())
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
                                <TableHeaderCell min_width=100.0>"Código"</TableHeaderCell>
                                <TableHeaderCell min_width=220.0>"Nombre"</TableHeaderCell>
                                <TableHeaderCell min_width=140.0>"Categoría"</TableHeaderCell>
                                <TableHeaderCell min_width=90.0>"Unidad"</TableHeaderCell>
                                <TableHeaderCell min_width=110.0>"Coste"</TableHeaderCell>
                                <TableHeaderCell min_width=110.0>"Precio venta"</TableHeaderCell>
                                <TableHeaderCell min_width=90.0>"Margen"</TableHeaderCell>
                                <TableHeaderCell min_width=120.0>"Disponibilidad"</TableHeaderCell>
                                <TableHeaderCell min_width=60.0>"Web"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || {
                                    state.with(|s| {
                                        let revision = s.revision;
                                        s.visible().into_iter().map(move |p| (revision, p)).collect::<Vec<_>>()
                                    })
                                }
                                key=|(revision, item)| (*revision, item.id.clone())
                                children=move |(_, item)| view! {
                                    <ProductRow
                                        item=item
                                        session=session
                                        selected=selected
                                        can_edit=can_edit
                                        on_visibility=Callback::new(toggle_visibility)
                                    />
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
fn ProductRow(
    item: Product,
    session: RwSignal<EditSession<ProductPatch>>,
    selected: RwSignal<HashSet<String>>,
    can_edit: Signal<bool>,
    on_visibility: Callback<(String, bool)>,
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

    let commit = move |patch: ProductPatch, input: Option<(ProductField, String)>| {
        let row = id.get_value();
        let unchanged = shown.with_untracked(|p| p.with_patch(&patch) == *p);
        let selected_count = selected.with_untracked(|s| s.len());
        session.update(|s| {
            if let Some((field, text)) = input {
                s.set_input(&row, field.key(), text);
            }
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

    let amount_cell = move |field: ProductField, value_of: fn(&Product) -> f64| {
        let text = Signal::derive(move || {
            session
                .with(|s| s.input(&id.get_value(), field.key()).map(str::to_string))
                .unwrap_or_else(|| format_amount(shown.with(value_of)))
        });
        view! {
            <TableCell>
                <AmountInput
                    text=text
                    on_input=Callback::new(move |raw: String| {
                        session.update(|s| s.set_input(&id.get_value(), field.key(), raw))
                    })
                    on_commit=Callback::new(move |formatted: String| {
                        commit(ProductPatch::from_field(field, &formatted), Some((field, formatted)))
                    })
                    on_cancel=Callback::new(move |_| cancel())
                    dirty=dirty
                    disabled=read_only
                />
            </TableCell>
        }
    };

    let margin = move || shown.with(|p| p.profit_margin_pct());
    let availability_variant = match item.disponibilidad.as_str() {
        "Disponible" => "success",
        "Agotado" | "No disponible" => "error",
        "Bajo stock" => "warning",
        _ => "neutral",
    };
    let row_id = item.id.clone();

    view! {
        <TableRow>
            <TableCellCheckbox
                item_id=row_id
                selected=Signal::derive(move || selected.get())
                on_change=Callback::new(move |(id, checked)| toggle_selected(selected, id, checked))
            />
            <TableCell>
                <TableCellLayout truncate=true>{item.codigo.clone()}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TextInput
                    text=Signal::derive(move || shown.with(|p| p.nombre.clone()))
                    on_commit=Callback::new(move |raw: String| {
                        commit(ProductPatch::from_field(ProductField::Nombre, &raw), None)
                    })
                    on_cancel=Callback::new(move |_| cancel())
                    dirty=dirty
                    disabled=read_only
                />
            </TableCell>
            <TableCell>
                <TableCellLayout truncate=true>{move || shown.with(|p| p.categoria.clone())}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{move || shown.with(|p| p.unidad_medida.clone())}</TableCellLayout>
            </TableCell>
            {amount_cell(ProductField::Coste, |p| p.coste)}
            {amount_cell(ProductField::PrecioVenta, |p| p.precio_venta)}
            <TableCell>
                <span
                    class="table__number"
                    class:table__number--negative=move || { margin() < 0.0 }
                >
                    {move || format_percent(margin())}
                </span>
            </TableCell>
            <TableCell>
                <Badge variant=availability_variant.to_string()>{item.disponibilidad.clone()}</Badge>
            </TableCell>
            <TableCell>
                <input
                    type="checkbox"
                    title="Mostrar en web"
                    prop:checked=move || shown.with(|p| p.mostrar_en_web)
                    disabled=move || read_only.get()
                    on:change=move |ev| on_visibility.run((id.get_value(), event_target_checked(&ev)))
                />
            </TableCell>
        </TableRow>
    }
}
