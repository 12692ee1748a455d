use crate::layout::center::tabs::Tabs;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::left::Sidebar;
use crate::layout::Shell;
use crate::shared::toast::{ToastHost, ToastService};
use crate::system::permissions::PermissionsProvider;
use leptos::prelude::*;

/// Основной layout: меню слева, вкладки по центру.
/// Синхронизирует активную вкладку с `?active=`.
#[component]
fn MainLayout() -> impl IntoView {
    let tabs_store = expect_context::<AppGlobalContext>();
    tabs_store.init_router_integration();

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=|| view! { <Tabs /> }.into_any()
        />
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppGlobalContext::new());
    provide_context(ToastService::new());

    view! {
        <PermissionsProvider>
            <MainLayout />
        </PermissionsProvider>
        <ToastHost />
    }
}
