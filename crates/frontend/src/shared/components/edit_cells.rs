//! Поля построчного редактирования в ячейках таблицы

use contracts::shared::pricing::{format_input_on_blur, validate_number_input};
use leptos::ev::KeyboardEvent;
use leptos::prelude::*;
use web_sys::HtmlInputElement;

fn blur_target(ev: &KeyboardEvent) {
    let input = event_target::<HtmlInputElement>(ev);
    let _ = input.blur();
}

/// Числовая ячейка: ввод проверяется посимвольно, запятая считается точкой,
/// при потере фокуса текст приводится к двум знакам.
#[component]
pub fn AmountInput(
    #[prop(into)] text: Signal<String>,
    /// Допустимый сырой текст после каждого нажатия
    on_input: Callback<String>,
    /// Отформатированный текст при blur или Enter
    on_commit: Callback<String>,
    #[prop(optional)] on_cancel: Option<Callback<()>>,
    #[prop(optional, into)] dirty: Signal<bool>,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <input
            type="text"
            inputmode="decimal"
            class="cell-input cell-input--number"
            class:cell-input--dirty=move || dirty.get()
            prop:value=move || text.get()
            disabled=move || disabled.get()
            on:input=move |ev| {
                let input = event_target::<HtmlInputElement>(&ev);
                let typed = input.value();
                let accepted = validate_number_input(&typed, &text.get_untracked());
                if accepted != typed {
                    input.set_value(&accepted);
                }
                on_input.run(accepted);
            }
            on:blur=move |ev| {
                let raw = event_target_value(&ev);
                on_commit.run(format_input_on_blur(&raw));
            }
            on:keydown=move |ev: KeyboardEvent| match ev.key().as_str() {
                "Enter" => blur_target(&ev),
                "Escape" => {
                    if let Some(cancel) = on_cancel {
                        cancel.run(());
                    }
                }
                _ => {}
            }
        />
    }
}

/// Текстовая ячейка: значение уходит при blur или Enter
#[component]
pub fn TextInput(
    #[prop(into)] text: Signal<String>,
    on_commit: Callback<String>,
    #[prop(optional)] on_cancel: Option<Callback<()>>,
    #[prop(optional, into)] dirty: Signal<bool>,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <input
            type="text"
            class="cell-input"
            class:cell-input--dirty=move || dirty.get()
            prop:value=move || text.get()
            disabled=move || disabled.get()
            on:blur=move |ev| on_commit.run(event_target_value(&ev))
            on:keydown=move |ev: KeyboardEvent| match ev.key().as_str() {
                "Enter" => blur_target(&ev),
                "Escape" => {
                    if let Some(cancel) = on_cancel {
                        cancel.run(());
                    }
                }
                _ => {}
            }
        />
    }
}
