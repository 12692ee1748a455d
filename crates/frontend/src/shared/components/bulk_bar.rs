use crate::shared::icons::icon;
use contracts::shared::pricing::{parse_amount, validate_number_input};
use leptos::prelude::*;
use thaw::*;
use web_sys::HtmlInputElement;

/// Панель действий над выбранными строками
#[component]
pub fn BulkBar(
    #[prop(into)] selected_count: Signal<usize>,
    on_clear_selection: Callback<()>,
    children: ChildrenFn,
) -> impl IntoView {
    view! {
        <Show when=move || { selected_count.get() > 0 }>
            <div class="bulk-bar">
                <span class="bulk-bar__count">
                    {move || format!("{} seleccionado(s)", selected_count.get())}
                </span>
                <div class="bulk-bar__actions">{children()}</div>
                <button
                    class="bulk-bar__clear"
                    title="Quitar selección"
                    on:click=move |_| on_clear_selection.run(())
                >
                    {icon("x")}
                </button>
            </div>
        </Show>
    }
}

/// Панель несохранённых изменений: количество, сохранить, отменить
#[component]
pub fn PendingBar(
    #[prop(into)] pending_count: Signal<usize>,
    #[prop(into)] saving: Signal<bool>,
    on_save: Callback<()>,
    on_discard: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || { pending_count.get() > 0 }>
            <div class="pending-bar">
                <span class="pending-bar__count">
                    {move || format!("{} cambio(s) sin guardar", pending_count.get())}
                </span>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=saving
                    on_click=move |_| on_save.run(())
                >
                    {icon("save")}
                    {move || if saving.get() { " Guardando..." } else { " Guardar cambios" }}
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=saving
                    on_click=move |_| on_discard.run(())
                >
                    "Descartar"
                </Button>
            </div>
        </Show>
    }
}

/// Числовое поле массового изменения с кнопкой «Aplicar»
#[component]
pub fn BulkAmountField(
    placeholder: &'static str,
    on_apply: Callback<f64>,
) -> impl IntoView {
    let text = RwSignal::new(String::new());

    view! {
        <div class="bulk-bar__amount">
            <input
                type="text"
                inputmode="decimal"
                class="cell-input cell-input--number"
                placeholder=placeholder
                prop:value=move || text.get()
                on:input=move |ev| {
                    let input = event_target::<HtmlInputElement>(&ev);
                    let typed = input.value();
                    let accepted = validate_number_input(&typed, &text.get_untracked());
                    if accepted != typed {
                        input.set_value(&accepted);
                    }
                    text.set(accepted);
                }
            />
            <Button
                appearance=ButtonAppearance::Secondary
                disabled=Signal::derive(move || text.with(|t| t.trim().is_empty()))
                on_click=move |_| {
                    on_apply.run(parse_amount(&text.get_untracked()));
                    text.set(String::new());
                }
            >
                {icon("check")}
                " Aplicar"
            </Button>
        </div>
    }
}
