use crate::shared::icons::icon;
use contracts::shared::filters::FilterChip;
use leptos::prelude::*;

/// Сворачиваемая панель фильтров с чипами активных фильтров
#[component]
pub fn FilterPanel(
    is_expanded: RwSignal<bool>,
    #[prop(into)] chips: Signal<Vec<FilterChip>>,
    /// id чипа, который пользователь закрыл
    on_remove_chip: Callback<&'static str>,
    on_clear_all: Callback<()>,
    /// Пагинация или счётчики в заголовке
    #[prop(optional, into)]
    header_center: Option<ViewFn>,
    children: ChildrenFn,
) -> impl IntoView {
    let active_count = move || chips.with(|c| c.len());

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                <div
                    class="filter-panel-header__left"
                    on:click=move |_| is_expanded.update(|e| *e = !*e)
                >
                    <span
                        class="filter-panel__chevron"
                        class:filter-panel__chevron--expanded=move || is_expanded.get()
                    >
                        {icon("chevron-right")}
                    </span>
                    {icon("filter")}
                    <span class="filter-panel__title">"Filtros"</span>
                    <Show when=move || { active_count() > 0 }>
                        <span class="badge badge--primary">{active_count}</span>
                    </Show>
                </div>
                <div class="filter-panel-header__center">
                    {header_center.map(|f| f.run())}
                </div>
            </div>

            <Show when=move || is_expanded.get()>
                <div class="filter-panel-content">{children()}</div>
            </Show>

            <Show when=move || { active_count() > 0 }>
                <div class="filter-panel__chips">
                    <For
                        each=move || chips.get()
                        key=|chip| (chip.id, chip.label.clone())
                        children=move |chip| {
                            let id = chip.id;
                            view! {
                                <span class="filter-chip">
                                    {chip.label}
                                    <button
                                        class="filter-chip__remove"
                                        title="Quitar filtro"
                                        on:click=move |_| on_remove_chip.run(id)
                                    >
                                        {icon("x")}
                                    </button>
                                </span>
                            }
                        }
                    />
                    <button class="filter-panel__clear" on:click=move |_| on_clear_all.run(())>
                        "Limpiar todo"
                    </button>
                </div>
            </Show>
        </div>
    }
}
