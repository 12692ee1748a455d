use crate::shared::icons::icon;
use leptos::prelude::*;

/// Пагинация списка. `current_page` 0-based, пользователю показывается с 1.
#[component]
pub fn PaginationControls(
    #[prop(into)] current_page: Signal<usize>,
    #[prop(into)] total_pages: Signal<usize>,
    #[prop(into)] total_count: Signal<usize>,
    #[prop(into)] page_size: Signal<usize>,
    on_page_change: Callback<usize>,
    /// Без колбэка выбор размера страницы не показывается
    #[prop(optional)]
    on_page_size_change: Option<Callback<usize>>,
    #[prop(optional)] page_size_options: Option<Vec<usize>>,
) -> impl IntoView {
    let last_page = move || total_pages.get().max(1) - 1;
    let is_first = move || current_page.get() == 0;
    let is_last = move || current_page.get() >= last_page();

    let size_select = on_page_size_change.map(|on_size| {
        let options = page_size_options.unwrap_or_else(|| vec![25, 50, 100, 200]);
        view! {
            <select
                class="page-size-select"
                prop:value=move || page_size.get().to_string()
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                        on_size.run(size);
                    }
                }
            >
                {options.into_iter().map(|size| view! {
                    <option value=size.to_string() selected=move || page_size.get() == size>
                        {format!("{} / pág.", size)}
                    </option>
                }).collect_view()}
            </select>
        }
    });

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                title="Primera página"
                disabled=is_first
                on:click=move |_| on_page_change.run(0)
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                title="Página anterior"
                disabled=is_first
                on:click=move |_| on_page_change.run(current_page.get().saturating_sub(1))
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || format!(
                    "Página {} de {} ({} registros)",
                    current_page.get() + 1,
                    total_pages.get().max(1),
                    total_count.get()
                )}
            </span>
            <button
                class="pagination-btn"
                title="Página siguiente"
                disabled=is_last
                on:click=move |_| on_page_change.run((current_page.get() + 1).min(last_page()))
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                title="Última página"
                disabled=is_last
                on:click=move |_| on_page_change.run(last_page())
            >
                {icon("chevrons-right")}
            </button>
            {size_select}
        </div>
    }
}
