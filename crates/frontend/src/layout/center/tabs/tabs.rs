use super::tab::Tab;
use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use crate::layout::tabs::TabPage;
use leptos::prelude::*;

/// Полоса вкладок и их содержимое
#[component]
pub fn Tabs() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();

    view! {
        <div class="tabs">
            <div class="tabs__bar">
                <For
                    each=move || ctx.opened.get()
                    key=|tab| tab.key.clone()
                    children=move |tab: TabData| view! { <Tab tab=tab /> }
                />
            </div>
            <Show
                when=move || ctx.opened.with(|tabs| !tabs.is_empty())
                fallback=|| view! {
                    <div class="tabs__empty">"Seleccione una sección en el menú lateral"</div>
                }
            >
                <div class="tabs__content">
                    <For
                        each=move || ctx.opened.get()
                        key=|tab| tab.key.clone()
                        children=move |tab: TabData| view! { <TabPage tab=tab tabs_store=ctx /> }
                    />
                </div>
            </Show>
        </div>
    }
}
