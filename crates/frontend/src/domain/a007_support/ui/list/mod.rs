pub mod state;

use self::state::create_state;
use crate::domain::a007_support::api;
use crate::shared::components::bulk_bar::{BulkBar, PendingBar};
use crate::shared::components::edit_cells::{AmountInput, TextInput};
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{
    format_money, SortableHeaderCell, TableCellCheckbox, TableHeaderCheckbox,
};
use crate::shared::components::ui::Badge;
use crate::shared::config::config;
use crate::shared::icons::icon;
use crate::shared::list_edit::{apply_report, confirm_action, toggle_selected};
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::session_filters::use_session_filters;
use crate::shared::toast::use_toasts;
use crate::system::permissions::use_permissions;
use contracts::domain::a007_support::{
    SortColumn, SortDirection, Support, SupportField, SupportFilters, SupportPatch, SupportStatus,
    SUPPORT_TYPES,
};
use contracts::domain::common::ApiRecord;
use contracts::shared::edit_buffer::EditSession;
use contracts::shared::filters::SessionFilters;
use contracts::shared::pricing::format_amount;
use contracts::system::permissions::SUPPORTS_MODULE;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::{BTreeSet, HashSet};
use thaw::*;

#[component]
pub fn SupportList() -> impl IntoView {
    let state = create_state();
    let filters = use_session_filters::<SupportFilters>();
    let session = RwSignal::new(EditSession::<SupportPatch>::new());
    let selected = RwSignal::new(HashSet::<String>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let saving = RwSignal::new(false);
    let is_filter_expanded = RwSignal::new(false);

    let toasts = use_toasts();
    let permissions = use_permissions();
    let can_edit = permissions.edit_signal(SUPPORTS_MODULE);
    let can_delete = permissions.delete_signal(SUPPORTS_MODULE);

    let load_items = move || {
        let current = filters.get_untracked();
        let (page, page_size) = state.with_untracked(|s| (s.page, s.page_size));
        let full_window = current.needs_full_window();
        let (page, limit) = if full_window {
            (1, config().lists.search_window)
        } else {
            (page + 1, page_size)
        };

        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match api::fetch_supports(&current, page, limit).await {
                Ok((items, pagination)) => {
                    let items = if full_window { current.apply(items) } else { items };
                    log!("soportes: {} registro(s)", items.len());
                    state.update(|s| {
                        s.items = items;
                        s.pagination = pagination;
                        s.local_paging = full_window;
                        s.revision += 1;
                    });
                }
                Err(e) => {
                    log!("soportes: error al cargar: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

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
        state.with(|s| s.visible().into_iter().map(|item| item.id).collect::<Vec<_>>())
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

    let sorted_by = move |column: SortColumn| {
        Signal::derive(move || {
            filters.with(|f| {
                (f.sort_column == Some(column)).then_some(f.sort_direction == SortDirection::Asc)
            })
        })
    };

    let save_changes = move || {
        let changes = session.with_untracked(|s| s.merged());
        if changes.is_empty() {
            toasts.info("No hay cambios pendientes para guardar");
            return;
        }
        let loaded = state.with_untracked(|s| s.items.clone());
        saving.set(true);
        spawn_local(async move {
            let report = api::save_supports(changes, &loaded).await;
            apply_report(&report, session, toasts);
            if !report.succeeded.is_empty() {
                selected.update(|s| s.retain(|id| !report.succeeded.contains(id)));
                load_items();
            }
            saving.set(false);
        });
    };

    let bulk_status = move |label: String| {
        let Some(status) = SupportStatus::from_label(&label) else {
            return;
        };
        let ids: Vec<String> = selected.get_untracked().into_iter().collect();
        if ids.is_empty() {
            return;
        }
        spawn_local(async move {
            match api::set_status(ids.clone(), status).await {
                Ok(()) => {
                    toasts.success(format!("Estado «{}» aplicado a {} soporte(s)", status.label(), ids.len()));
                    selected.update(|s| s.clear());
                    load_items();
                }
                Err(e) => toasts.error(e.to_string()),
            }
        });
    };

    let bulk_delete = move || {
        let ids: Vec<String> = selected.get_untracked().into_iter().collect();
        if ids.is_empty() || !confirm_action(&format!("¿Eliminar {} soporte(s)?", ids.len())) {
            return;
        }
        spawn_local(async move {
            match api::delete_supports(ids.clone()).await {
                Ok(()) => {
                    toasts.success(format!("{} soporte(s) eliminado(s)", ids.len()));
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
        <PageFrame page_id="a007_soportes--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{Support::list_name()}</h1>
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
                    on_clear_all=Callback::new(move |_| filters.set(SupportFilters::default()))
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
                        <div style="flex: 1; max-width: 320px;">
                            <SearchInput
                                value=Signal::derive(move || filters.with(|f| f.q.clone()))
                                on_change=Callback::new(move |v: String| filters.update(|f| f.q = v))
                                placeholder="Código, título, ciudad..."
                            />
                        </div>
                        <div style="width: 200px;">
                            <SearchInput
                                value=Signal::derive(move || filters.with(|f| f.city_filter.clone()))
                                on_change=Callback::new(move |v: String| filters.update(|f| f.city_filter = v))
                                placeholder="Ciudad"
                            />
                        </div>
                        <div class="status-toggles">
                            {SupportStatus::ALL
                                .into_iter()
                                .map(|status| {
                                    let active = move || filters.with(|f| f.status_filter.contains(&status));
                                    view! {
                                        <label class="status-toggle" class:status-toggle--active=active>
                                            <input
                                                type="checkbox"
                                                prop:checked=active
                                                on:change=move |_| filters.update(|f| f.toggle_status(status))
                                            />
                                            {status.label()}
                                        </label>
                                    }
                                })
                                .collect_view()}
                        </div>
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
                            on:change=move |ev| bulk_status(event_target_value(&ev))
                        >
                            <option value="">"Cambiar estado"</option>
                            {SupportStatus::ALL
                                .into_iter()
                                .map(|s| view! { <option value=s.label()>{s.label()}</option> })
                                .collect_view()}
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
                    <Table attr:style="width: 100%; min-width: 1200px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCheckbox
                                    ids=page_ids
                                    selected=selected_signal
                                    on_change=Callback::new(toggle_all)
                                />
                                <SortableHeaderCell
                                    label="Código"
                                    sorted=sorted_by(SortColumn::Code)
                                    on_sort=Callback::new(move |_| filters.update(|f| f.toggle_sort(SortColumn::Code)))
                                    min_width=110.0
                                />
                                <SortableHeaderCell
                                    label="Título"
                                    sorted=sorted_by(SortColumn::Title)
                                    on_sort=Callback::new(move |_| filters.update(|f| f.toggle_sort(SortColumn::Title)))
                                    min_width=220.0
                                />
                                <TableHeaderCell min_width=120.0>"Tipo"</TableHeaderCell>
                                <TableHeaderCell min_width=130.0>"Estado"</TableHeaderCell>
                                <TableHeaderCell min_width=110.0>"Ciudad"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Medidas"</TableHeaderCell>
                                <TableHeaderCell min_width=80.0>"Área m²"</TableHeaderCell>
                                <TableHeaderCell min_width=110.0>"Precio/mes"</TableHeaderCell>
                                <TableHeaderCell min_width=90.0>"Precio/m²"</TableHeaderCell>
                                <TableHeaderCell min_width=60.0>"Mapa"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || {
                                    state.with(|s| {
                                        let revision = s.revision;
                                        s.visible().into_iter().map(move |item| (revision, item)).collect::<Vec<_>>()
                                    })
                                }
                                key=|(revision, item)| (*revision, item.id.clone())
                                children=move |(_, item)| view! {
                                    <SupportRow item=item session=session selected=selected can_edit=can_edit />
                                }
                            />
                        </TableBody>
                    </Table>
                </div>
            </div>
        </PageFrame>
    }
}

fn measure(value: Option<f64>) -> String {
    value.map(format_amount).unwrap_or_else(|| "-".to_string())
}

#[component]
fn SupportRow(
    item: Support,
    session: RwSignal<EditSession<SupportPatch>>,
    selected: RwSignal<HashSet<String>>,
    can_edit: Signal<bool>,
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

    let commit = move |patch: SupportPatch, input: Option<(SupportField, String)>| {
        let row = id.get_value();
        let unchanged = shown.with_untracked(|s| s.with_patch(&patch) == *s);
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

    let text_cell = move |field: SupportField, value_of: fn(&Support) -> String| {
        view! {
            <TableCell>
                <TextInput
                    text=Signal::derive(move || shown.with(value_of))
                    on_commit=Callback::new(move |raw: String| commit(SupportPatch::from_field(field, &raw), None))
                    on_cancel=Callback::new(move |_| cancel())
                    dirty=dirty
                    disabled=read_only
                />
            </TableCell>
        }
    };

    let price_text = Signal::derive(move || {
        session
            .with(|s| s.input(&id.get_value(), SupportField::PriceMonth.key()).map(str::to_string))
            .unwrap_or_else(|| format_amount(shown.with(|s| s.price_month.unwrap_or(0.0))))
    });

    let dimensions = match (item.width_m, item.height_m) {
        (None, None) => "-".to_string(),
        (w, h) => format!("{} x {}", measure(w), measure(h)),
    };
    let map_url = item.map_url();
    let row_id = item.id.clone();
    let city = item.city.clone();
    let area = format_money(item.area());

    view! {
        <TableRow>
            <TableCellCheckbox
                item_id=row_id
                selected=Signal::derive(move || selected.get())
                on_change=Callback::new(move |(id, checked)| toggle_selected(selected, id, checked))
            />
            {text_cell(SupportField::Code, |s| s.code.clone())}
            {text_cell(SupportField::Title, |s| s.title.clone())}
            <TableCell>
                <select
                    class="table__select"
                    class:table__select--dirty=move || dirty.get()
                    prop:value=move || shown.with(|s| s.kind.clone())
                    disabled=move || read_only.get()
                    on:change=move |ev| {
                        commit(SupportPatch::from_field(SupportField::Kind, &event_target_value(&ev)), None)
                    }
                >
                    <option value="">"-"</option>
                    {SUPPORT_TYPES.iter().map(|t| view! { <option value=*t>{*t}</option> }).collect_view()}
                </select>
            </TableCell>
            <TableCell>
                <select
                    class="table__select"
                    prop:value=move || shown.with(|s| s.status.map(|st| st.label()).unwrap_or(""))
                    disabled=move || read_only.get()
                    on:change=move |ev| {
                        if let Some(status) = SupportStatus::from_label(&event_target_value(&ev)) {
                            commit(SupportPatch::status(status), None);
                        }
                    }
                >
                    <option value="">"-"</option>
                    {SupportStatus::ALL
                        .into_iter()
                        .map(|s| view! { <option value=s.label()>{s.label()}</option> })
                        .collect_view()}
                </select>
                {move || shown.with(|s| s.status).map(|status| view! {
                    <Badge variant=status.badge().to_string()>{status.label()}</Badge>
                })}
            </TableCell>
            <TableCell>
                <TableCellLayout truncate=true>{city}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{dimensions}</TableCellLayout>
            </TableCell>
            <TableCell>
                <span class="table__number">{area}</span>
            </TableCell>
            <TableCell>
                <AmountInput
                    text=price_text
                    on_input=Callback::new(move |raw: String| {
                        session.update(|s| s.set_input(&id.get_value(), SupportField::PriceMonth.key(), raw))
                    })
                    on_commit=Callback::new(move |formatted: String| {
                        commit(
                            SupportPatch::from_field(SupportField::PriceMonth, &formatted),
                            Some((SupportField::PriceMonth, formatted)),
                        )
                    })
                    on_cancel=Callback::new(move |_| cancel())
                    dirty=dirty
                    disabled=read_only
                />
            </TableCell>
            <TableCell>
                <span class="table__number">
                    {move || shown.with(|s| s.price_per_m2()).map(format_money).unwrap_or_else(|| "-".to_string())}
                </span>
            </TableCell>
            <TableCell>
                {map_url.map(|url| view! {
                    <a href=url target="_blank" rel="noopener noreferrer" title="Ver en el mapa">
                        {icon("map-pin")}
                    </a>
                })}
            </TableCell>
        </TableRow>
    }
}
