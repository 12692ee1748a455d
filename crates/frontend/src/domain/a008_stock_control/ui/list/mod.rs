//! Матрица остатков: строка на ресурс x комбинацию вариантов x филиал

use crate::domain::a008_stock_control::api;
use crate::shared::components::bulk_bar::{BulkAmountField, BulkBar, PendingBar};
use crate::shared::components::edit_cells::AmountInput;
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{TableCellCheckbox, TableCellMoney, TableHeaderCheckbox};
use crate::shared::components::ui::Badge;
use crate::shared::config::config;
use crate::shared::icons::icon;
use crate::shared::list_edit::{distinct_values, settle_saved, toggle_selected};
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_CUSTOM;
use crate::shared::session_filters::use_session_filters;
use crate::shared::toast::use_toasts;
use crate::system::permissions::use_permissions;
use contracts::domain::a002_resource::Resource;
use contracts::domain::a003_consumable::Consumable;
use contracts::domain::a008_stock_control::rows::{CATEGORY_CONSUMABLES, CATEGORY_SUPPLIES};
use contracts::domain::a008_stock_control::{
    build_write_plan, expand_rows, StockControlFilters, StockEdit, StockField, StockRow,
};
use contracts::shared::edit_buffer::EditSession;
use contracts::shared::filters::{SessionFilters, ALL};
use contracts::shared::list_query::{page_slice, total_pages};
use contracts::shared::pricing::{format_amount, parse_amount};
use contracts::system::permissions::INVENTORY_MODULE;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashSet;
use thaw::*;

const EDITABLE: [StockField; 3] = [StockField::Stock, StockField::PriceDelta, StockField::VariantPrice];

/// Сырые тексты полей строки после связанного пересчёта
fn refresh_inputs(session: &mut EditSession<StockEdit>, row_id: &str, edit: &StockEdit) {
    for field in EDITABLE {
        if let Some(value) = edit.get(field) {
            session.set_input(row_id, field.key(), format_amount(value));
        }
    }
}

#[derive(Clone, Debug, Default)]
struct Sources {
    resources: Vec<Resource>,
    consumables: Vec<Consumable>,
    rows: Vec<StockRow>,
    revision: u64,
}

#[component]
pub fn StockControlPage() -> impl IntoView {
    let sources = RwSignal::new(Sources::default());
    let filters = use_session_filters::<StockControlFilters>();
    let session = RwSignal::new(EditSession::<StockEdit>::new());
    let selected = RwSignal::new(HashSet::<String>::new());
    let page = RwSignal::new(0usize);
    let page_size = config().stock.page_size;
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let saving = RwSignal::new(false);
    let is_filter_expanded = RwSignal::new(false);

    let toasts = use_toasts();
    let permissions = use_permissions();
    let can_edit = permissions.edit_signal(INVENTORY_MODULE);

    let load_items = move || {
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match api::fetch_sources().await {
                Ok((resources, consumables)) => {
                    let rows = expand_rows(&resources, &consumables, &config().stock.branches);
                    log!(
                        "control_stock: {} recurso(s), {} consumible(s), {} fila(s)",
                        resources.len(),
                        consumables.len(),
                        rows.len()
                    );
                    sources.update(|s| {
                        s.resources = resources;
                        s.consumables = consumables;
                        s.rows = rows;
                        s.revision += 1;
                    });
                }
                Err(e) => {
                    log!("control_stock: error al cargar: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };
    load_items();

    Effect::new(move |_| {
        filters.track();
        page.set(0);
    });

    let filtered = Memo::new(move |_| {
        let current = filters.get();
        sources.with(|s| current.apply(&s.rows).into_iter().cloned().collect::<Vec<_>>())
    });
    let visible = Memo::new(move |_| filtered.with(|rows| page_slice(rows, page.get(), page_size).to_vec()));

    let branches = Signal::derive(move || {
        sources.with(|s| {
            distinct_values(
                config()
                    .stock
                    .branches
                    .iter()
                    .map(String::as_str)
                    .chain(s.rows.iter().map(|r| r.branch.as_str())),
            )
        })
    });

    let page_ids = Signal::derive(move || visible.with(|rows| rows.iter().map(|r| r.id.clone()).collect::<Vec<_>>()));

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

    // цена и разница пересчитываются от себестоимости каждой строки
    let bulk_set = move |field: StockField, value: f64| {
        let ids = selected.get_untracked();
        let costs = sources.with_untracked(|s| {
            s.rows
                .iter()
                .filter(|r| ids.contains(&r.id))
                .map(|r| (r.id.clone(), r.base_cost))
                .collect::<Vec<_>>()
        });
        let applied = session
            .try_update(|s| {
                let applied = s.bulk_apply(ids.iter(), |id| {
                    costs
                        .iter()
                        .find(|(row_id, _)| row_id == id)
                        .map(|(_, cost)| StockEdit::linked(field, value, *cost))
                });
                for (row_id, cost) in &costs {
                    refresh_inputs(s, row_id, &StockEdit::linked(field, value, *cost));
                }
                applied
            })
            .unwrap_or(0);
        toasts.info(format!("{} actualizado para {} fila(s)", field.label(), applied));
    };

    let save_changes = move || {
        let changes = session.with_untracked(|s| s.merged());
        if changes.is_empty() {
            toasts.info("No hay cambios pendientes para guardar");
            return;
        }
        let plan = sources.with_untracked(|s| build_write_plan(&s.rows, &changes, &s.resources, &s.consumables));
        log!(
            "control_stock: {} cambio(s) en {} registro(s), {} sin registro",
            changes.len(),
            plan.writes.len(),
            plan.skipped.len()
        );
        saving.set(true);
        spawn_local(async move {
            let report = api::save_plan(&plan).await;
            let saved = api::saved_rows(&plan, &report);
            settle_saved(&report, &saved, session, toasts);
            if !saved.is_empty() {
                selected.update(|s| s.retain(|id| !saved.contains(id)));
                load_items();
            }
            saving.set(false);
        });
    };

    let selected_signal = Signal::derive(move || selected.get());
    let selected_count = Signal::derive(move || selected.with(|s| s.len()));
    let pending_count = Signal::derive(move || session.with(|s| s.pending_count()));

    view! {
        <PageFrame page_id="a008_control_stock--custom" category=PAGE_CAT_CUSTOM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Control de Stock"</h1>
                    <Badge variant="primary".to_string()>
                        {move || filtered.with(|rows| rows.len()).to_string()}
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
                    on_clear_all=Callback::new(move |_| filters.set(StockControlFilters::default()))
                    header_center=move || view! {
                        <PaginationControls
                            current_page=Signal::derive(move || page.get())
                            total_pages=Signal::derive(move || total_pages(filtered.with(|r| r.len()), page_size))
                            total_count=Signal::derive(move || filtered.with(|r| r.len()))
                            page_size=Signal::derive(move || page_size)
                            on_page_change=Callback::new(move |p: usize| page.set(p))
                        />
                    }
                >
                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <div style="flex: 1; max-width: 360px;">
                            <SearchInput
                                value=Signal::derive(move || filters.with(|f| f.search_term.clone()))
                                on_change=Callback::new(move |v: String| filters.update(|f| f.search_term = v))
                                placeholder="Nombre o variante..."
                            />
                        </div>
                        <select
                            class="filter-select"
                            prop:value=move || filters.with(|f| f.selected_branch.clone())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                filters.update(|f| f.selected_branch = value);
                            }
                        >
                            <option value=ALL>"Todas las sucursales"</option>
                            {move || branches.get().into_iter().map(|b| {
                                let value = b.clone();
                                view! { <option value=value>{b}</option> }
                            }).collect_view()}
                        </select>
                        <select
                            class="filter-select"
                            prop:value=move || filters.with(|f| f.selected_category.clone())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                filters.update(|f| f.selected_category = value);
                            }
                        >
                            <option value=ALL>"Todas las categorías"</option>
                            <option value=CATEGORY_SUPPLIES>{CATEGORY_SUPPLIES}</option>
                            <option value=CATEGORY_CONSUMABLES>{CATEGORY_CONSUMABLES}</option>
                        </select>
                    </Flex>
                </FilterPanel>

                {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

                <Show when=move || can_edit.get()>
                    <BulkBar
                        selected_count=selected_count
                        on_clear_selection=Callback::new(move |_| selected.update(|s| s.clear()))
                    >
                        <BulkAmountField
                            placeholder="Stock"
                            on_apply=Callback::new(move |v: f64| bulk_set(StockField::Stock, v))
                        />
                        <BulkAmountField
                            placeholder="Diferencia de precio"
                            on_apply=Callback::new(move |v: f64| bulk_set(StockField::PriceDelta, v))
                        />
                        <BulkAmountField
                            placeholder="Precio variante"
                            on_apply=Callback::new(move |v: f64| bulk_set(StockField::VariantPrice, v))
                        />
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
                    <Table attr:style="width: 100%; min-width: 1300px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCheckbox
                                    ids=page_ids
                                    selected=selected_signal
                                    on_change=Callback::new(toggle_all)
                                />
                                <TableHeaderCell min_width=100.0>"Código"</TableHeaderCell>
                                <TableHeaderCell min_width=200.0>"Nombre"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Tipo"</TableHeaderCell>
                                <TableHeaderCell min_width=110.0>"Sucursal"</TableHeaderCell>
                                <TableHeaderCell min_width=200.0>"Variante"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Formato"</TableHeaderCell>
                                <TableHeaderCell min_width=80.0>"Unidad"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Coste"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Stock"</TableHeaderCell>
                                <TableHeaderCell min_width=110.0>"Dif. precio"</TableHeaderCell>
                                <TableHeaderCell min_width=110.0>"Precio variante"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || {
                                    let revision = sources.with(|s| s.revision);
                                    visible.get().into_iter().map(move |row| (revision, row)).collect::<Vec<_>>()
                                }
                                key=|(revision, row)| (*revision, row.id.clone())
                                children=move |(_, row)| view! {
                                    <StockRowView row=row session=session selected=selected can_edit=can_edit />
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
fn StockRowView(
    row: StockRow,
    session: RwSignal<EditSession<StockEdit>>,
    selected: RwSignal<HashSet<String>>,
    can_edit: Signal<bool>,
) -> impl IntoView {
    let id = StoredValue::new(row.id.clone());
    let base = StoredValue::new(row.clone());
    let base_cost = row.base_cost;

    let shown = Signal::derive(move || {
        let row = base.get_value();
        match session.with(|s| s.effective(&row.id)) {
            Some(edit) => edit.apply_to(&row),
            None => row,
        }
    });
    let dirty = Signal::derive(move || {
        session.with(|s| {
            let row = id.get_value();
            s.is_edited(&row) || s.is_pending(&row)
        })
    });
    let read_only = Signal::derive(move || !can_edit.get());

    let cancel = move || {
        let row = id.get_value();
        session.update(|s| s.cancel(&row));
        selected.update(|s| {
            s.remove(&row);
        });
    };

    let amount_cell = move |field: StockField| {
        let text = Signal::derive(move || {
            session
                .with(|s| s.input(&id.get_value(), field.key()).map(str::to_string))
                .unwrap_or_else(|| format_amount(shown.with(|r| field.value_of(r))))
        });
        let commit = move |formatted: String| {
            let row = id.get_value();
            let edit = StockEdit::linked(field, parse_amount(&formatted), base_cost);
            let unchanged = shown.with_untracked(|r| edit.apply_to(r) == *r);
            let selected_count = selected.with_untracked(|s| s.len());
            session.update(|s| {
                s.set_input(&row, field.key(), formatted);
                if !unchanged {
                    refresh_inputs(s, &row, &edit);
                    s.edit(&row, edit, selected_count);
                }
                s.confirm(&row);
            });
        };
        view! {
            <TableCell>
                <AmountInput
                    text=text
                    on_input=Callback::new(move |raw: String| {
                        session.update(|s| s.set_input(&id.get_value(), field.key(), raw))
                    })
                    on_commit=Callback::new(commit)
                    on_cancel=Callback::new(move |_| cancel())
                    dirty=dirty
                    disabled=read_only
                />
            </TableCell>
        }
    };

    let row_id = row.id.clone();

    view! {
        <TableRow>
            <TableCellCheckbox
                item_id=row_id
                selected=Signal::derive(move || selected.get())
                on_change=Callback::new(move |(id, checked)| toggle_selected(selected, id, checked))
            />
            <TableCell>
                <TableCellLayout truncate=true>{row.code.clone()}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout truncate=true>{row.name.clone()}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{row.kind.label()}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{row.branch.clone()}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout truncate=true>{row.variant_label.clone()}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{row.format.clone().unwrap_or_default()}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{row.unit.clone()}</TableCellLayout>
            </TableCell>
            <TableCellMoney value=Signal::derive(move || Some(base_cost)) />
            {amount_cell(StockField::Stock)}
            {amount_cell(StockField::PriceDelta)}
            {amount_cell(StockField::VariantPrice)}
        </TableRow>
    }
}
