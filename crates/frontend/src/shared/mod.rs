pub mod api_error;
pub mod api_utils;
pub mod bulk_save;
pub mod components;
pub mod config;
pub mod http;
pub mod icons;
pub mod list_edit;
pub mod list_utils;
pub mod page_frame;
pub mod page_standard;
pub mod session_filters;
pub mod toast;
