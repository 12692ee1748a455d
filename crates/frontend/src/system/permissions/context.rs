//! Права пользователя для условного рендера.
//! Пока матрица не загружена, все проверки возвращают false.

use super::api;
use contracts::system::permissions::PermissionMatrix;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
pub struct PermissionsState {
    matrix: RwSignal<PermissionMatrix>,
    pub loaded: RwSignal<bool>,
}

impl PermissionsState {
    pub fn new() -> Self {
        Self {
            matrix: RwSignal::new(PermissionMatrix::default()),
            loaded: RwSignal::new(false),
        }
    }

    pub fn can_view(&self, module: &str) -> bool {
        self.matrix.with(|m| m.can_view(module))
    }

    pub fn can_edit(&self, module: &str) -> bool {
        self.matrix.with(|m| m.can_edit(module))
    }

    pub fn can_delete(&self, module: &str) -> bool {
        self.matrix.with(|m| m.can_delete(module))
    }

    pub fn can_admin(&self, module: &str) -> bool {
        self.matrix.with(|m| m.can_admin(module))
    }

    pub fn has_technical(&self, capability: &str) -> bool {
        self.matrix.with(|m| m.has_technical(capability))
    }

    /// Сигнал «можно редактировать модуль» для пропсов компонентов
    pub fn edit_signal(&self, module: &'static str) -> Signal<bool> {
        let this = *self;
        Signal::derive(move || this.can_edit(module))
    }

    pub fn delete_signal(&self, module: &'static str) -> Signal<bool> {
        let this = *self;
        Signal::derive(move || this.can_delete(module))
    }

    fn reload(&self) {
        let this = *self;
        spawn_local(async move {
            match api::fetch_permissions().await {
                Ok(matrix) => {
                    log::debug!("permisos: {} módulo(s)", matrix.0.len());
                    this.matrix.set(matrix);
                }
                Err(e) => log::warn!("permisos no cargados: {}", e),
            }
            this.loaded.set(true);
        });
    }
}

impl Default for PermissionsState {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn PermissionsProvider(children: Children) -> impl IntoView {
    let state = PermissionsState::new();
    state.reload();
    provide_context(state);
    children()
}

pub fn use_permissions() -> PermissionsState {
    expect_context::<PermissionsState>()
}
