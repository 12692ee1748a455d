//! Общие типы и трейты записей API

pub mod api_record;
pub mod bulk;
pub mod format;

pub use api_record::ApiRecord;
pub use bulk::{BulkAction, BulkRequest};
pub use format::{first_format, parse_formats, FormatEntry};
