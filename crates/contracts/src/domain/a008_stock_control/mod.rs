//! Контроль остатков по вариантам и филиалам (ajustes de inventario)

pub mod control_stock;
pub mod reconcile;
pub mod rows;
pub mod variants;

pub use control_stock::{ControlStock, StockEntry, StockLookup};
pub use reconcile::{build_write_plan, resolve_entry, RecordWrite, StockEdit, StockField, WritePlan};
pub use rows::{expand_rows, ItemKind, StockControlFilters, StockRow};
pub use variants::{combinations, describe, stock_key, variant_key, Combination, VariantAxis};
