//! Ячейка денежной суммы: es-BO формат, выравнивание вправо

use super::number_format::format_money;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn TableCellMoney(
    #[prop(into)] value: Signal<Option<f64>>,
    #[prop(optional, default = "Bs")] currency: &'static str,
    #[prop(optional, default = false)] show_currency: bool,
    /// Положительные зелёным, отрицательные красным
    #[prop(optional, default = false)]
    color_by_sign: bool,
    #[prop(optional, default = false)] bold: bool,
) -> impl IntoView {
    let text = move || match value.get() {
        Some(v) if show_currency => format!("{} {}", currency, format_money(v)),
        Some(v) => format_money(v),
        None => "—".to_string(),
    };

    let style = move || {
        let mut styles = Vec::new();
        if color_by_sign {
            match value.get() {
                Some(v) if v > 0.0 => styles.push("color: var(--color-success-700)"),
                Some(v) if v < 0.0 => styles.push("color: var(--color-error-700)"),
                _ => {}
            }
        }
        if bold {
            styles.push("font-weight: 600");
        }
        styles.join("; ")
    };

    view! {
        <TableCell class="text-right">
            <span style=style>{text}</span>
        </TableCell>
    }
}
