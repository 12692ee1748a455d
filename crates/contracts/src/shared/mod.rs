pub mod edit_buffer;
pub mod filters;
pub mod list_query;
pub mod loose_json;
pub mod pricing;
pub mod save_report;
pub mod text;
