pub mod api;
pub mod context;

pub use context::{use_permissions, PermissionsProvider, PermissionsState};
