use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use leptos::prelude::*;
use thaw::*;

/// Заголовок с переключением сортировки по клику.
/// `sorted`: None без сортировки, Some(true) по возрастанию.
#[component]
pub fn SortableHeaderCell(
    #[prop(into)] label: String,
    #[prop(into)] sorted: Signal<Option<bool>>,
    on_sort: Callback<()>,
    #[prop(optional, default = 100.0)] min_width: f64,
) -> impl IntoView {
    view! {
        <TableHeaderCell min_width=min_width>
            <div class="table__sortable-header" on:click=move |_| on_sort.run(())>
                {label}
                <span class=move || get_sort_class(sorted.get().is_some())>
                    {move || {
                        let state = sorted.get();
                        get_sort_indicator(state.is_some(), state.unwrap_or(true))
                    }}
                </span>
            </div>
        </TableHeaderCell>
    }
}
