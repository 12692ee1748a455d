//! Верхняя панель: переключатель меню и название приложения

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::system::permissions::use_permissions;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let permissions = use_permissions();

    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Ocultar menú" } else { "Mostrar menú" }
                >
                    {move || if is_sidebar_visible() {
                        icon("panel-left-close")
                    } else {
                        icon("panel-left-open")
                    }}
                </button>
                <span class="top-header__title">"Panel de gestión"</span>
            </div>

            <div class="top-header__actions">
                <Show when=move || !permissions.loaded.get()>
                    <span class="top-header__hint">"Cargando permisos..."</span>
                </Show>
            </div>
        </div>
    }
}
