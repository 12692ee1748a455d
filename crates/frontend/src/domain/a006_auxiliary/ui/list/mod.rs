use crate::domain::a006_auxiliary::api;
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::ui::Badge;
use crate::shared::config::config;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::session_filters::use_session_filters;
use contracts::domain::a005_account::{VALIDITY_ACTIVE, VALIDITY_INACTIVE};
use contracts::domain::a006_auxiliary::{Auxiliary, AuxiliaryFilters, AUXILIARY_TYPES};
use contracts::domain::common::ApiRecord;
use contracts::shared::filters::SessionFilters;
use contracts::shared::list_query::{page_slice, total_pages};
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn AuxiliaryList() -> impl IntoView {
    let filters = use_session_filters::<AuxiliaryFilters>();
    let items = RwSignal::new(Vec::<Auxiliary>::new());
    let page = RwSignal::new(0usize);
    let page_size = RwSignal::new(config().lists.page_size);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let is_filter_expanded = RwSignal::new(false);

    let load_items = move || {
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match api::fetch_auxiliaries().await {
                Ok(loaded) => {
                    log!("auxiliares: {} registro(s)", loaded.len());
                    items.set(loaded);
                }
                Err(e) => {
                    log!("auxiliares: error al cargar: {}", e);
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
        items.with(|all| current.apply(all).into_iter().cloned().collect::<Vec<_>>())
    });
    let visible = Memo::new(move |_| {
        filtered.with(|rows| page_slice(rows, page.get(), page_size.get()).to_vec())
    });

    view! {
        <PageFrame page_id="a006_auxiliares--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{Auxiliary::list_name()}</h1>
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
                    on_clear_all=Callback::new(move |_| filters.set(AuxiliaryFilters::default()))
                    header_center=move || view! {
                        <PaginationControls
                            current_page=Signal::derive(move || page.get())
                            total_pages=Signal::derive(move || total_pages(filtered.with(|r| r.len()), page_size.get()))
                            total_count=Signal::derive(move || filtered.with(|r| r.len()))
                            page_size=Signal::derive(move || page_size.get())
                            on_page_change=Callback::new(move |p: usize| page.set(p))
                            on_page_size_change=Callback::new(move |size: usize| {
                                page_size.set(size);
                                page.set(0);
                            })
                            page_size_options=config().lists.page_size_options.clone()
                        />
                    }
                >
                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <div style="flex: 1; max-width: 360px;">
                            <SearchInput
                                value=Signal::derive(move || filters.with(|f| f.search_term.clone()))
                                on_change=Callback::new(move |v: String| filters.update(|f| f.search_term = v))
                                placeholder="Código, nombre, NIT..."
                            />
                        </div>
                        <select
                            class="filter-select"
                            prop:value=move || filters.with(|f| f.auxiliary_type.clone())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                filters.update(|f| f.auxiliary_type = value);
                            }
                        >
                            <option value="">"Todos los tipos"</option>
                            {AUXILIARY_TYPES.iter().map(|t| view! { <option value=*t>{*t}</option> }).collect_view()}
                        </select>
                        <select
                            class="filter-select"
                            prop:value=move || filters.with(|f| f.validity.clone())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                filters.update(|f| f.validity = value);
                            }
                        >
                            <option value="">"Todos"</option>
                            <option value=VALIDITY_ACTIVE>"Vigentes"</option>
                            <option value=VALIDITY_INACTIVE>"No vigentes"</option>
                        </select>
                    </Flex>
                </FilterPanel>

                {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 1000px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=100.0>"Código"</TableHeaderCell>
                                <TableHeaderCell min_width=220.0>"Nombre"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Tipo"</TableHeaderCell>
                                <TableHeaderCell min_width=110.0>"NIT"</TableHeaderCell>
                                <TableHeaderCell min_width=120.0>"Teléfono"</TableHeaderCell>
                                <TableHeaderCell min_width=180.0>"Email"</TableHeaderCell>
                                <TableHeaderCell min_width=110.0>"Cuenta asociada"</TableHeaderCell>
                                <TableHeaderCell min_width=70.0>"Moneda"</TableHeaderCell>
                                <TableHeaderCell min_width=90.0>"Banco/Caja"</TableHeaderCell>
                                <TableHeaderCell min_width=90.0>"Estado"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || visible.get()
                                key=|a| a.id.clone()
                                children=move |a: Auxiliary| {
                                    let (status, variant) = if a.vigencia {
                                        ("Vigente", "success")
                                    } else {
                                        ("No vigente", "neutral")
                                    };
                                    let codigo = a.codigo.clone();
                                    let display_name = a.display_name().to_string();
                                    let tipo_auxiliar = a.tipo_auxiliar.clone();
                                    let tax_id = a.tax_id().to_string();
                                    let phone = a.phone().to_string();
                                    let email = a.email().to_string();
                                    let cuenta_asociada = a.cuenta_asociada.clone().unwrap_or_default();
                                    let moneda = a.moneda.clone();
                                    let is_cash_or_bank = a.is_cash_or_bank();
                                    view! {
                                        <TableRow>
                                            <TableCell><TableCellLayout>{codigo}</TableCellLayout></TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{display_name}</TableCellLayout>
                                            </TableCell>
                                            <TableCell><TableCellLayout>{tipo_auxiliar}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{tax_id}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{phone}</TableCellLayout></TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{email}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{cuenta_asociada}</TableCellLayout>
                                            </TableCell>
                                            <TableCell><TableCellLayout>{moneda}</TableCellLayout></TableCell>
                                            <TableCell>
                                                {is_cash_or_bank.then(|| view! { {icon("wallet")} })}
                                            </TableCell>
                                            <TableCell>
                                                <Badge variant=variant.to_string()>{status}</Badge>
                                            </TableCell>
                                        </TableRow>
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
