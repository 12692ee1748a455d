//! Чекбокс «выбрать все» в заголовке таблицы.
//! Работает с id видимых строк, третье состояние: частичный выбор.

use leptos::prelude::*;
use std::collections::HashSet;
use thaw::*;
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, Copy, PartialEq)]
enum CheckboxState {
    Unchecked,
    Checked,
    Indeterminate,
}

fn state_of(ids: &[String], selected: &HashSet<String>) -> CheckboxState {
    let count = ids.iter().filter(|id| selected.contains(*id)).count();
    if count == 0 {
        CheckboxState::Unchecked
    } else if count == ids.len() {
        CheckboxState::Checked
    } else {
        CheckboxState::Indeterminate
    }
}

#[component]
pub fn TableHeaderCheckbox(
    /// id строк текущей страницы
    #[prop(into)]
    ids: Signal<Vec<String>>,
    #[prop(into)] selected: Signal<HashSet<String>>,
    /// true: выбрать все, false: снять
    on_change: Callback<bool>,
) -> impl IntoView {
    let state = Signal::derive(move || selected.with(|sel| ids.with(|ids| state_of(ids, sel))));
    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    Effect::new(move |_| {
        let indeterminate = state.get() == CheckboxState::Indeterminate;
        if let Some(input) = checkbox_ref.get() {
            if let Some(el) = input.dyn_ref::<web_sys::HtmlInputElement>() {
                el.set_indeterminate(indeterminate);
            }
        }
    });

    view! {
        <TableHeaderCell resizable=false class="fixed-checkbox-column">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || state.get() == CheckboxState::Checked
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </TableHeaderCell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_of_selection() {
        let ids = vec!["a".to_string(), "b".to_string()];
        let mut selected = HashSet::new();
        assert_eq!(state_of(&ids, &selected), CheckboxState::Unchecked);
        selected.insert("a".to_string());
        selected.insert("zz".to_string());
        assert_eq!(state_of(&ids, &selected), CheckboxState::Indeterminate);
        selected.insert("b".to_string());
        assert_eq!(state_of(&ids, &selected), CheckboxState::Checked);
        assert_eq!(state_of(&[], &selected), CheckboxState::Unchecked);
    }
}
