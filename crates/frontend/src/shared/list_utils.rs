//! Общие элементы страниц списков: поле поиска и индикаторы сортировки

use crate::shared::icons::icon;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Поле поиска с задержкой и кнопкой очистки.
/// `on_change` вызывается только для последнего ввода после паузы.
#[component]
pub fn SearchInput(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Buscar...".to_string()
    } else {
        placeholder
    };

    let input_value = RwSignal::new(value.get_untracked());
    let generation = StoredValue::new(0u64);

    // внешний сброс (чипы, «limpiar todo») обновляет поле
    Effect::new(move |_| {
        let external = value.get();
        if untrack(move || input_value.get()) != external {
            input_value.set(external);
        }
    });

    let handle_input = move |text: String| {
        input_value.set(text.clone());
        generation.update_value(|g| *g += 1);
        let current = generation.get_value();
        spawn_local(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if generation.get_value() == current {
                on_change.run(text);
            }
        });
    };

    let clear = move |_| {
        generation.update_value(|g| *g += 1);
        input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <span class="search-input__icon">{icon("search")}</span>
            <input
                type="text"
                class="search-input__field"
                class:search-input__field--active=move || !value.get().trim().is_empty()
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear title="Limpiar">
                    {icon("x")}
                </button>
            </Show>
        </div>
    }
}

/// Индикатор сортировки колонки
pub fn get_sort_indicator(is_sorted: bool, ascending: bool) -> &'static str {
    match (is_sorted, ascending) {
        (true, true) => " ▲",
        (true, false) => " ▼",
        (false, _) => " ⇅",
    }
}

pub fn get_sort_class(is_sorted: bool) -> &'static str {
    if is_sorted {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator(true, true), " ▲");
        assert_eq!(get_sort_indicator(true, false), " ▼");
        assert_eq!(get_sort_indicator(false, true), " ⇅");
        assert!(get_sort_class(true).ends_with("--active"));
    }
}
