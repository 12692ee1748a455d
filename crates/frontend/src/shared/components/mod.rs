pub mod bulk_bar;
pub mod edit_cells;
pub mod filter_panel;
pub mod pagination_controls;
pub mod table;
pub mod ui;
