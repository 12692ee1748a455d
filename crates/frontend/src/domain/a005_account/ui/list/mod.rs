use crate::domain::a005_account::api;
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::ui::Badge;
use crate::shared::config::config;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::session_filters::use_session_filters;
use contracts::domain::a005_account::{
    Account, AccountFilters, ACCOUNT_TYPES, VALIDITY_ACTIVE, VALIDITY_INACTIVE,
};
use contracts::domain::common::ApiRecord;
use contracts::shared::filters::SessionFilters;
use contracts::shared::list_query::{page_slice, total_pages};
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn flag(value: bool) -> &'static str {
    if value {
        "Sí"
    } else {
        "No"
    }
}

/// План счетов: только просмотр
#[component]
pub fn AccountList() -> impl IntoView {
    let filters = use_session_filters::<AccountFilters>();
    let items = RwSignal::new(Vec::<Account>::new());
    let page = RwSignal::new(0usize);
    let page_size = RwSignal::new(config().lists.page_size);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let is_filter_expanded = RwSignal::new(false);

    let load_items = move || {
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match api::fetch_accounts().await {
                Ok(accounts) => {
                    log!("cuentas: {} registro(s)", accounts.len());
                    items.set(accounts);
                }
                Err(e) => {
                    log!("cuentas: error al cargar: {}", e);
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
        <PageFrame page_id="a005_cuentas--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{Account::list_name()}</h1>
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
                    on_clear_all=Callback::new(move |_| filters.set(AccountFilters::default()))
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
                                placeholder="Cuenta, descripción, clasificador..."
                            />
                        </div>
                        <select
                            class="filter-select"
                            prop:value=move || filters.with(|f| f.account_type.clone())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                filters.update(|f| f.account_type = value);
                            }
                        >
                            <option value="">"Todos los tipos"</option>
                            {ACCOUNT_TYPES.iter().map(|t| view! { <option value=*t>{*t}</option> }).collect_view()}
                        </select>
                        <select
                            class="filter-select"
                            prop:value=move || filters.with(|f| f.validity.clone())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                filters.update(|f| f.validity = value);
                            }
                        >
                            <option value="">"Todas"</option>
                            <option value=VALIDITY_ACTIVE>"Activas"</option>
                            <option value=VALIDITY_INACTIVE>"Inactivas"</option>
                        </select>
                    </Flex>
                </FilterPanel>

                {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 1000px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=120.0>"Cuenta"</TableHeaderCell>
                                <TableHeaderCell min_width=280.0>"Descripción"</TableHeaderCell>
                                <TableHeaderCell min_width=110.0>"Clasificador"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Tipo"</TableHeaderCell>
                                <TableHeaderCell min_width=60.0>"Nivel"</TableHeaderCell>
                                <TableHeaderCell min_width=70.0>"Moneda"</TableHeaderCell>
                                <TableHeaderCell min_width=80.0>"Auxiliar"</TableHeaderCell>
                                <TableHeaderCell min_width=80.0>"Efectivo"</TableHeaderCell>
                                <TableHeaderCell min_width=60.0>"AITB"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Transaccional"</TableHeaderCell>
                                <TableHeaderCell min_width=90.0>"Estado"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || visible.get()
                                key=|a| a.id.clone()
                                children=move |a: Account| {
                                    let indent = format!("padding-left: {}px;", a.indent_px());
                                    let currency = a.currency().to_string();
                                    let is_group = !a.transaccional;
                                    let cuenta = a.cuenta.clone();
                                    let descripcion = a.descripcion.clone();
                                    let clasificador = a.clasificador.clone();
                                    let tipo_cuenta = a.tipo_cuenta.clone();
                                    let level = a.level();
                                    let permite_auxiliar = flag(a.permite_auxiliar);
                                    let efectivo = flag(a.efectivo);
                                    let aitb = flag(a.aitb);
                                    let transaccional = flag(a.transaccional);
                                    let (status, variant) = if a.vigente {
                                        ("Vigente", "success")
                                    } else {
                                        ("No vigente", "neutral")
                                    };
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span style=indent class:account--group=is_group>
                                                        {cuenta}
                                                    </span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{descripcion}</TableCellLayout>
                                            </TableCell>
                                            <TableCell><TableCellLayout>{clasificador}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{tipo_cuenta}</TableCellLayout></TableCell>
                                            <TableCell><span class="table__number">{level}</span></TableCell>
                                            <TableCell><TableCellLayout>{currency}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{permite_auxiliar}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{efectivo}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{aitb}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{transaccional}</TableCellLayout></TableCell>
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
